//! Error types raised at the boundary of the valuation engine.

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatrimoineError {
    #[error("{kind} not found: {key}")]
    NotFound { kind: &'static str, key: String },

    #[error("invalid date: {0}")]
    InvalidDate(String),

    #[error("invalid value for {field}: {value} (must not be negative)")]
    InvalidNumeric { field: &'static str, value: String },

    #[error("asset label must not be empty")]
    InvalidLabel,

    #[error("invalid date range: {start} is after {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },
}

pub type Result<T> = std::result::Result<T, PatrimoineError>;
