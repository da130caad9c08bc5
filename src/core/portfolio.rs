//! Provides the portfolio-level views built on top of [`value_at`]: a point in
//! time snapshot, the per-asset chart series and a dated timeline.
use super::asset::Asset;
use super::dates::DateRange;
use super::valuation::{is_active_at, value_at};
use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt::Display;
use std::str::FromStr;
use tracing::debug;
use uuid::Uuid;

/// The value of a single asset on the snapshot date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValuationResult {
    pub id: Uuid,
    pub label: String,
    pub active: bool,
    pub value: Decimal,
}

/// Net worth on a given date, with the per-asset breakdown behind it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioSnapshot {
    pub date: NaiveDate,
    pub total: Decimal,
    pub per_asset: Vec<ValuationResult>,
}

/// Values every asset on `reference_date`.
///
/// Every asset appears in `per_asset`, in input order. Inactive ones are
/// reported with a value of zero and do not count towards `total`, which caps
/// at `Decimal::MAX`.
pub fn snapshot_at(assets: &[Asset], reference_date: NaiveDate) -> PortfolioSnapshot {
    let mut total = Decimal::ZERO;
    let per_asset = assets
        .iter()
        .map(|asset| {
            let active = is_active_at(asset, reference_date);
            let value = if active {
                value_at(asset, reference_date)
            } else {
                Decimal::ZERO
            };
            total = total.checked_add(value).unwrap_or(Decimal::MAX);
            ValuationResult {
                id: asset.id(),
                label: asset.label().to_string(),
                active,
                value,
            }
        })
        .collect();

    debug!(%reference_date, %total, "Computed portfolio snapshot");
    PortfolioSnapshot {
        date: reference_date,
        total,
        per_asset,
    }
}

/// One bar of the per-asset chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub label: String,
    pub value: Decimal,
}

/// Values, at the end of `range`, every asset acquired within `range`.
///
/// This is one point per asset rather than a curve over time, and the closed
/// date is not considered. Use [`timeline`] for net worth across the range.
pub fn series_for(assets: &[Asset], range: DateRange) -> Vec<SeriesPoint> {
    assets
        .iter()
        .filter(|asset| range.contains(asset.acquisition_date()))
        .map(|asset| SeriesPoint {
            label: asset.label().to_string(),
            value: value_at(asset, range.end()),
        })
        .collect()
}

/// Spacing between two points of a [`timeline`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Day,
    Week,
    Month,
}

impl Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Step::Day => "day",
                Step::Week => "week",
                Step::Month => "month",
            }
        )
    }
}

impl FromStr for Step {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "day" | "d" => Ok(Step::Day),
            "week" | "w" => Ok(Step::Week),
            "month" | "m" => Ok(Step::Month),
            _ => Err(anyhow::anyhow!("Invalid step: {}", s)),
        }
    }
}

/// Net worth on one date of a [`timeline`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelinePoint {
    pub date: NaiveDate,
    pub total: Decimal,
}

/// Dates from the start of `range`, `step` apart, always ending on its end.
pub fn timeline_dates(range: DateRange, step: Step) -> Vec<NaiveDate> {
    let mut dates = Vec::new();
    let mut n: u32 = 0;
    loop {
        let next = match step {
            Step::Day => range.start().checked_add_signed(Duration::days(i64::from(n))),
            Step::Week => range
                .start()
                .checked_add_signed(Duration::weeks(i64::from(n))),
            Step::Month => range.months_after_start(n),
        };
        match next {
            Some(date) if date < range.end() => dates.push(date),
            _ => break,
        }
        n += 1;
    }
    dates.push(range.end());
    dates
}

/// Net worth at each date of `range`, sampled every `step`.
pub fn timeline(assets: &[Asset], range: DateRange, step: Step) -> Vec<TimelinePoint> {
    timeline_dates(range, step)
        .into_iter()
        .map(|date| TimelinePoint {
            date,
            total: snapshot_at(assets, date).total,
        })
        .collect()
}
