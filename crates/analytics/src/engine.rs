use chrono::Weekday;
use configuration::AnalyticsSettings;
use rust_decimal::Decimal;

/// A stateless calculator for deriving analytics reports from a trader's
/// trade set. Holds only the bucket/timezone settings; every operation is a
/// pure reduction over the records it is given.
#[derive(Debug, Clone)]
pub struct AggregationEngine {
    pub(crate) settings: AnalyticsSettings,
}

impl AggregationEngine {
    pub fn new(settings: AnalyticsSettings) -> Self {
        Self { settings }
    }
}

impl Default for AggregationEngine {
    fn default() -> Self {
        Self::new(AnalyticsSettings::default())
    }
}

/// Day names indexed by `days_from_sunday`, fixing the Sunday-first order
/// of every weekday-bucketed report.
pub(crate) const DAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

pub(crate) fn day_index(weekday: Weekday) -> usize {
    weekday.num_days_from_sunday() as usize
}

/// Rounds a monetary output to 2 decimal places.
pub(crate) fn round2(value: Decimal) -> Decimal {
    value.round_dp(2)
}

/// `100 * part / whole`, or 0 when `whole` is zero. The universal
/// percentage guard: never NaN, never infinite. Saturates at
/// `Decimal::MAX` instead of panicking when the quotient is too large
/// to represent.
pub(crate) fn pct(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        Decimal::ZERO
    } else {
        part.checked_div(whole)
            .and_then(|quotient| quotient.checked_mul(Decimal::ONE_HUNDRED))
            .unwrap_or(Decimal::MAX)
    }
}

/// `numerator / denominator`, or 0 when the denominator is zero.
/// Saturates at `Decimal::MAX` on overflow.
pub(crate) fn ratio(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator.is_zero() {
        Decimal::ZERO
    } else {
        numerator.checked_div(denominator).unwrap_or(Decimal::MAX)
    }
}

/// Mean of a pre-summed total over a count, or 0 for an empty group.
pub(crate) fn mean(total: Decimal, count: usize) -> Decimal {
    if count == 0 {
        Decimal::ZERO
    } else {
        total / Decimal::from(count)
    }
}

/// Overflow-checked accumulation; stored amounts are caller-supplied, so a
/// pathological journal must surface as a report error rather than a panic.
pub(crate) fn accumulate(
    acc: Decimal,
    value: Decimal,
    report: &str,
) -> Result<Decimal, crate::error::AnalyticsError> {
    acc.checked_add(value)
        .ok_or_else(|| crate::error::AnalyticsError::computation(report, "accumulator overflow"))
}

/// A trade's entry notional, with an overflow surfaced as a report error.
pub(crate) fn notional(
    trade: &core_types::TradeRecord,
    report: &str,
) -> Result<Decimal, crate::error::AnalyticsError> {
    trade.entry_notional().ok_or_else(|| {
        crate::error::AnalyticsError::computation(report, "entry notional overflowed")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn zero_denominators_yield_zero() {
        assert_eq!(pct(dec!(5), dec!(0)), dec!(0));
        assert_eq!(ratio(dec!(5), dec!(0)), dec!(0));
        assert_eq!(mean(dec!(5), 0), dec!(0));
    }

    #[test]
    fn percentage_and_mean_behave_on_live_denominators() {
        assert_eq!(pct(dec!(1), dec!(4)), dec!(25));
        assert_eq!(mean(dec!(9), 3), dec!(3));
        assert_eq!(ratio(dec!(9), dec!(2)), dec!(4.5));
    }

    #[test]
    fn sunday_is_day_zero() {
        assert_eq!(day_index(Weekday::Sun), 0);
        assert_eq!(day_index(Weekday::Sat), 6);
        assert_eq!(DAY_NAMES[day_index(Weekday::Wed)], "Wednesday");
    }

    #[test]
    fn oversized_percentages_saturate_instead_of_panicking() {
        assert_eq!(pct(Decimal::MAX, dec!(0.5)), Decimal::MAX);
        assert_eq!(ratio(Decimal::MAX, dec!(0.5)), Decimal::MAX);
    }

    #[test]
    fn accumulate_flags_overflow() {
        let err = accumulate(Decimal::MAX, Decimal::MAX, "turnover").unwrap_err();
        assert!(matches!(
            err,
            crate::error::AnalyticsError::Computation { ref report, .. } if report == "turnover"
        ));
    }
}
