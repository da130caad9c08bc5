//! Command handlers and terminal rendering

pub mod assets;
pub mod chart;
pub mod setup;
pub mod ui;
pub mod value;
