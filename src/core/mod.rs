//! Core business logic: possessions, their valuation and the portfolio views

pub mod asset;
pub mod config;
pub mod dates;
pub mod error;
pub mod log;
pub mod portfolio;
pub mod valuation;

// Re-export main types for cleaner imports
pub use asset::{AccrualDay, Asset, AssetPatch, AssetRecord, NewAsset, ValuationMode, ValuationTerms};
pub use dates::DateRange;
pub use error::PatrimoineError;
pub use portfolio::{PortfolioSnapshot, SeriesPoint, Step, TimelinePoint};
pub use valuation::{is_active_at, value_at};
