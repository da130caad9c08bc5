//! Possessions and the rule that decides how each one is valued over time.
use super::dates::iso_date;
use super::error::{PatrimoineError, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use uuid::Uuid;

/// Marks an asset as eligible for accrual. Older books store a plain flag,
/// newer ones the day of month the contribution lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AccrualDay {
    Flag(bool),
    Day(u32),
}

impl AccrualDay {
    pub fn is_set(&self) -> bool {
        match self {
            AccrualDay::Flag(flag) => *flag,
            AccrualDay::Day(day) => *day > 0,
        }
    }
}

/// How an asset's value evolves after acquisition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValuationMode {
    /// Worth its acquisition value for as long as it is held.
    Flat,
    /// Straight-line loss of `rate_percent` of the acquisition value per year.
    Depreciating { rate_percent: Decimal },
    /// Worth `amount` for every full 30-day period held.
    Accruing { amount: Decimal },
}

impl Display for ValuationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValuationMode::Flat => write!(f, "Flat"),
            ValuationMode::Depreciating { rate_percent } => {
                write!(f, "Depreciating {}%/yr", rate_percent.normalize())
            }
            ValuationMode::Accruing { amount } => {
                write!(f, "Accruing {}/30d", amount.normalize())
            }
        }
    }
}

/// The raw, optional valuation fields as entered by the user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValuationTerms {
    pub depreciation_rate_percent: Option<Decimal>,
    pub accrual_amount: Option<Decimal>,
    pub accrual_day: Option<AccrualDay>,
}

impl ValuationTerms {
    /// Picks the valuation mode. A positive depreciation rate wins over
    /// accrual; accrual needs both an amount and a set accrual day.
    pub fn mode(&self) -> ValuationMode {
        if let Some(rate) = self.depreciation_rate_percent {
            if rate > Decimal::ZERO {
                return ValuationMode::Depreciating { rate_percent: rate };
            }
        }
        match (self.accrual_amount, self.accrual_day) {
            (Some(amount), Some(day)) if day.is_set() => ValuationMode::Accruing { amount },
            _ => ValuationMode::Flat,
        }
    }
}

/// Storage and wire shape of an asset. Every field is taken as-is; use
/// [`Asset::try_from`] to validate it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub label: String,
    pub acquisition_value: Decimal,
    #[serde(with = "iso_date")]
    pub acquisition_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depreciation_rate_percent: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accrual_amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accrual_day: Option<AccrualDay>,
    #[serde(
        default,
        with = "iso_date::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub closed_date: Option<NaiveDate>,
}

/// A validated possession with its valuation mode already resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "AssetRecord", into = "AssetRecord")]
pub struct Asset {
    id: Uuid,
    label: String,
    acquisition_value: Decimal,
    acquisition_date: NaiveDate,
    terms: ValuationTerms,
    mode: ValuationMode,
    closed_date: Option<NaiveDate>,
}

impl Asset {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn acquisition_value(&self) -> Decimal {
        self.acquisition_value
    }

    pub fn acquisition_date(&self) -> NaiveDate {
        self.acquisition_date
    }

    pub fn terms(&self) -> ValuationTerms {
        self.terms
    }

    pub fn mode(&self) -> ValuationMode {
        self.mode
    }

    pub fn closed_date(&self) -> Option<NaiveDate> {
        self.closed_date
    }

    pub fn to_record(&self) -> AssetRecord {
        AssetRecord {
            id: Some(self.id),
            label: self.label.clone(),
            acquisition_value: self.acquisition_value,
            acquisition_date: self.acquisition_date,
            depreciation_rate_percent: self.terms.depreciation_rate_percent,
            accrual_amount: self.terms.accrual_amount,
            accrual_day: self.terms.accrual_day,
            closed_date: self.closed_date,
        }
    }

    /// Returns a copy with the patched fields replaced, validated again.
    pub fn patched(&self, patch: AssetPatch) -> Result<Asset> {
        let mut record = self.to_record();
        if let Some(label) = patch.label {
            record.label = label;
        }
        if let Some(value) = patch.acquisition_value {
            record.acquisition_value = value;
        }
        if let Some(date) = patch.acquisition_date {
            record.acquisition_date = date;
        }
        if let Some(rate) = patch.depreciation_rate_percent {
            record.depreciation_rate_percent = Some(rate);
        }
        if let Some(amount) = patch.accrual_amount {
            record.accrual_amount = Some(amount);
        }
        if let Some(day) = patch.accrual_day {
            record.accrual_day = Some(day);
        }
        Asset::try_from(record)
    }

    pub(crate) fn close(&mut self, on: NaiveDate) {
        self.closed_date = Some(on);
    }
}

impl TryFrom<AssetRecord> for Asset {
    type Error = PatrimoineError;

    fn try_from(record: AssetRecord) -> Result<Self> {
        let label = record.label.trim();
        if label.is_empty() {
            return Err(PatrimoineError::InvalidLabel);
        }
        if record.acquisition_value < Decimal::ZERO {
            return Err(PatrimoineError::InvalidNumeric {
                field: "acquisition_value",
                value: record.acquisition_value.to_string(),
            });
        }
        if let Some(rate) = record.depreciation_rate_percent {
            if rate < Decimal::ZERO {
                return Err(PatrimoineError::InvalidNumeric {
                    field: "depreciation_rate_percent",
                    value: rate.to_string(),
                });
            }
        }

        let terms = ValuationTerms {
            depreciation_rate_percent: record.depreciation_rate_percent,
            accrual_amount: record.accrual_amount,
            accrual_day: record.accrual_day,
        };
        Ok(Asset {
            id: record.id.unwrap_or_else(Uuid::new_v4),
            label: label.to_string(),
            acquisition_value: record.acquisition_value,
            acquisition_date: record.acquisition_date,
            terms,
            mode: terms.mode(),
            closed_date: record.closed_date,
        })
    }
}

impl From<Asset> for AssetRecord {
    fn from(asset: Asset) -> Self {
        asset.to_record()
    }
}

/// Input for creating a possession. New possessions are always open.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAsset {
    pub label: String,
    pub acquisition_value: Decimal,
    pub acquisition_date: NaiveDate,
    pub terms: ValuationTerms,
}

impl TryFrom<NewAsset> for Asset {
    type Error = PatrimoineError;

    fn try_from(new_asset: NewAsset) -> Result<Self> {
        Asset::try_from(AssetRecord {
            id: None,
            label: new_asset.label,
            acquisition_value: new_asset.acquisition_value,
            acquisition_date: new_asset.acquisition_date,
            depreciation_rate_percent: new_asset.terms.depreciation_rate_percent,
            accrual_amount: new_asset.terms.accrual_amount,
            accrual_day: new_asset.terms.accrual_day,
            closed_date: None,
        })
    }
}

/// Partial update: `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssetPatch {
    pub label: Option<String>,
    pub acquisition_value: Option<Decimal>,
    pub acquisition_date: Option<NaiveDate>,
    pub depreciation_rate_percent: Option<Decimal>,
    pub accrual_amount: Option<Decimal>,
    pub accrual_day: Option<AccrualDay>,
}

impl AssetPatch {
    pub fn is_empty(&self) -> bool {
        *self == AssetPatch::default()
    }
}
