//! Per-asset valuation.
use super::asset::{Asset, ValuationMode};
use super::dates::{fractional_years_between, whole_days_between};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Length in days of one accrual period.
pub const ACCRUAL_PERIOD_DAYS: i64 = 30;

/// Value of `asset` on `reference_date`.
///
/// Zero before the acquisition date. Otherwise the asset's valuation mode
/// decides, and the result is never negative. The closed date is not looked
/// at here; see [`is_active_at`].
///
/// Amounts too large for a `Decimal` saturate: a depreciation loss that
/// overflows wipes the value out, an accrual that overflows caps at
/// `Decimal::MAX`.
pub fn value_at(asset: &Asset, reference_date: NaiveDate) -> Decimal {
    let acquired = asset.acquisition_date();
    if reference_date < acquired {
        return Decimal::ZERO;
    }

    let value = match asset.mode() {
        ValuationMode::Flat => asset.acquisition_value(),
        ValuationMode::Depreciating { rate_percent } => {
            let years = fractional_years_between(acquired, reference_date);
            (rate_percent / dec!(100))
                .checked_mul(years)
                .and_then(|share| share.checked_mul(asset.acquisition_value()))
                .map_or(Decimal::ZERO, |lost| asset.acquisition_value() - lost)
        }
        ValuationMode::Accruing { amount } => {
            let periods = whole_days_between(acquired, reference_date) / ACCRUAL_PERIOD_DAYS;
            amount
                .checked_mul(Decimal::from(periods))
                .unwrap_or(if amount.is_sign_negative() {
                    Decimal::ZERO
                } else {
                    Decimal::MAX
                })
        }
    };

    value.max(Decimal::ZERO)
}

/// Whether `asset` counts towards a snapshot on `reference_date`.
///
/// An asset is held up to, but not including, its closed date: it is active
/// for every date strictly before `closed_date` and inactive from that date on.
pub fn is_active_at(asset: &Asset, reference_date: NaiveDate) -> bool {
    match asset.closed_date() {
        None => true,
        Some(closed) => reference_date < closed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::asset::{AccrualDay, AssetRecord};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn asset(
        value: Decimal,
        acquired: NaiveDate,
        rate: Option<Decimal>,
        accrual: Option<(Decimal, AccrualDay)>,
    ) -> Asset {
        Asset::try_from(AssetRecord {
            id: None,
            label: "test".to_string(),
            acquisition_value: value,
            acquisition_date: acquired,
            depreciation_rate_percent: rate,
            accrual_amount: accrual.map(|(amount, _)| amount),
            accrual_day: accrual.map(|(_, day)| day),
            closed_date: None,
        })
        .unwrap()
    }

    fn assert_close(actual: Decimal, expected: Decimal, tolerance: Decimal) {
        assert!(
            (actual - expected).abs() <= tolerance,
            "expected {expected} +/- {tolerance}, got {actual}"
        );
    }

    #[test]
    fn test_before_acquisition_is_zero() {
        let a = asset(dec!(1000), date(2020, 1, 1), None, None);
        assert_eq!(value_at(&a, date(2019, 12, 31)), Decimal::ZERO);
        let d = asset(dec!(1000), date(2020, 1, 1), Some(dec!(10)), None);
        assert_eq!(value_at(&d, date(2019, 1, 1)), Decimal::ZERO);
    }

    #[test]
    fn test_flat_mode_is_constant() {
        let a = asset(dec!(1500), date(2020, 1, 1), Some(Decimal::ZERO), None);
        for d in [date(2020, 1, 1), date(2021, 6, 15), date(2090, 1, 1)] {
            assert_eq!(value_at(&a, d), dec!(1500));
        }
    }

    #[test]
    fn test_depreciation_scenario() {
        let a = asset(dec!(10000), date(2020, 1, 1), Some(dec!(10)), None);
        assert_eq!(value_at(&a, date(2020, 1, 1)), dec!(10000));
        assert_close(value_at(&a, date(2021, 1, 1)), dec!(9000), dec!(5));
        assert_close(value_at(&a, date(2025, 1, 1)), dec!(5000), dec!(5));
        // 1461 days are exactly four years
        assert_eq!(value_at(&a, date(2024, 1, 1)), dec!(6000));
    }

    #[test]
    fn test_depreciation_is_monotonic_and_clamped() {
        let a = asset(dec!(10000), date(2020, 1, 1), Some(dec!(25)), None);
        let mut previous = value_at(&a, date(2020, 1, 1));
        let mut day = date(2020, 1, 1);
        while day < date(2026, 1, 1) {
            day += chrono::Duration::days(17);
            let current = value_at(&a, day);
            assert!(current <= previous, "value rose on {day}");
            assert!(current >= Decimal::ZERO);
            previous = current;
        }
        assert_eq!(value_at(&a, date(2030, 1, 1)), Decimal::ZERO);
    }

    #[test]
    fn test_accrual_scenario() {
        let a = asset(
            Decimal::ZERO,
            date(2020, 1, 1),
            None,
            Some((dec!(200), AccrualDay::Flag(true))),
        );
        assert_eq!(value_at(&a, date(2020, 4, 1)), dec!(600));
        assert_eq!(value_at(&a, date(2020, 1, 1)), Decimal::ZERO);
        assert_eq!(value_at(&a, date(2020, 1, 30)), Decimal::ZERO);
        assert_eq!(value_at(&a, date(2020, 1, 31)), dec!(200));
    }

    #[test]
    fn test_accrual_ignores_acquisition_value() {
        let a = asset(
            dec!(5000),
            date(2020, 1, 1),
            None,
            Some((dec!(100), AccrualDay::Day(5))),
        );
        assert_eq!(value_at(&a, date(2020, 1, 10)), Decimal::ZERO);
        assert_eq!(value_at(&a, date(2020, 2, 15)), dec!(100));
    }

    #[test]
    fn test_negative_accrual_is_clamped() {
        let a = asset(
            Decimal::ZERO,
            date(2020, 1, 1),
            None,
            Some((dec!(-50), AccrualDay::Flag(true))),
        );
        assert_eq!(value_at(&a, date(2021, 1, 1)), Decimal::ZERO);
    }

    #[test]
    fn test_huge_amounts_saturate() {
        let car = asset(Decimal::MAX, date(2000, 1, 1), Some(dec!(50)), None);
        assert_eq!(value_at(&car, date(2100, 1, 1)), Decimal::ZERO);
        assert_eq!(value_at(&car, date(2000, 1, 1)), Decimal::MAX);

        let saving = asset(
            Decimal::ZERO,
            date(2000, 1, 1),
            None,
            Some((dec!(10000000000000000000000000000), AccrualDay::Flag(true))),
        );
        assert_eq!(value_at(&saving, date(2100, 1, 1)), Decimal::MAX);

        let debt = asset(
            Decimal::ZERO,
            date(2000, 1, 1),
            None,
            Some((Decimal::MIN, AccrualDay::Flag(true))),
        );
        assert_eq!(value_at(&debt, date(2100, 1, 1)), Decimal::ZERO);
    }

    #[test]
    fn test_value_at_is_pure() {
        let a = asset(dec!(777), date(2021, 3, 3), Some(dec!(7)), None);
        let first = value_at(&a, date(2023, 8, 9));
        assert_eq!(first, value_at(&a, date(2023, 8, 9)));
    }

    #[test]
    fn test_closed_date_boundary() {
        let mut a = asset(dec!(100), date(2020, 1, 1), None, None);
        assert!(is_active_at(&a, date(2099, 1, 1)));

        a.close(date(2023, 6, 1));
        assert!(is_active_at(&a, date(2023, 5, 31)));
        assert!(!is_active_at(&a, date(2023, 6, 1)));
        assert!(!is_active_at(&a, date(2023, 7, 1)));
    }
}
