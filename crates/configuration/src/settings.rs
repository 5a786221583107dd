use crate::error::ConfigError;
use chrono::FixedOffset;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

/// The root configuration structure for the application.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub analytics: AnalyticsSettings,
}

impl Settings {
    /// Checks the cross-field constraints a plain deserialize cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.analytics.validate()
    }
}

/// Tunable parameters for the aggregation engine.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalyticsSettings {
    /// The trader's local timezone as a whole-hour UTC offset. Weekday
    /// bucketing (turnover, best-trading-time) is computed in this zone.
    pub utc_offset_hours: i32,

    /// Notional thresholds separating the trade-size buckets.
    pub size_thresholds: SizeThresholds,

    /// Leverage ranges for margin analytics, lowest first. The last bucket
    /// may leave `max` unset to act as the open-ended catch-all.
    pub leverage_buckets: Vec<LeverageBucket>,
}

impl AnalyticsSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(-12..=14).contains(&self.utc_offset_hours) {
            return Err(ConfigError::ValidationError(format!(
                "utc_offset_hours must be within -12..=14, got {}",
                self.utc_offset_hours
            )));
        }
        let t = &self.size_thresholds;
        if !(t.small_max < t.medium_max && t.medium_max < t.large_max) {
            return Err(ConfigError::ValidationError(
                "size_thresholds must be strictly ascending (small < medium < large)".to_string(),
            ));
        }
        if self.leverage_buckets.is_empty() {
            return Err(ConfigError::ValidationError(
                "at least one leverage bucket must be configured".to_string(),
            ));
        }
        Ok(())
    }

    /// The configured offset as a chrono timezone.
    pub fn timezone(&self) -> FixedOffset {
        // Validated to a sane range above, so the construction cannot fail.
        FixedOffset::east_opt(self.utc_offset_hours * 3600)
            .unwrap_or_else(|| FixedOffset::east_opt(0).expect("zero offset is valid"))
    }
}

impl Default for AnalyticsSettings {
    fn default() -> Self {
        Self {
            utc_offset_hours: 0,
            size_thresholds: SizeThresholds::default(),
            leverage_buckets: LeverageBucket::default_buckets(),
        }
    }
}

/// Upper bounds (inclusive) for the small/medium/large notional buckets.
/// Anything above `large_max` is "very large".
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SizeThresholds {
    pub small_max: Decimal,
    pub medium_max: Decimal,
    pub large_max: Decimal,
}

impl Default for SizeThresholds {
    fn default() -> Self {
        Self {
            small_max: dec!(1000),
            medium_max: dec!(10000),
            large_max: dec!(100000),
        }
    }
}

/// One leverage range for margin analytics, e.g. 11x-25x.
#[derive(Debug, Clone, Deserialize)]
pub struct LeverageBucket {
    pub label: String,
    pub min: Decimal,
    pub max: Option<Decimal>,
}

impl LeverageBucket {
    /// Whether a trade's leverage falls inside this range (inclusive).
    pub fn contains(&self, leverage: Decimal) -> bool {
        leverage >= self.min && self.max.is_none_or(|max| leverage <= max)
    }

    /// The conventional bucket layout: 1-10x, 11-25x, 26-50x, 51-100x, 100x+.
    pub fn default_buckets() -> Vec<LeverageBucket> {
        vec![
            LeverageBucket {
                label: "1-10x".to_string(),
                min: dec!(1),
                max: Some(dec!(10)),
            },
            LeverageBucket {
                label: "11-25x".to_string(),
                min: dec!(11),
                max: Some(dec!(25)),
            },
            LeverageBucket {
                label: "26-50x".to_string(),
                min: dec!(26),
                max: Some(dec!(50)),
            },
            LeverageBucket {
                label: "51-100x".to_string(),
                min: dec!(51),
                max: Some(dec!(100)),
            },
            LeverageBucket {
                label: "100x+".to_string(),
                min: dec!(100),
                max: None,
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_pass_validation() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.analytics.timezone().local_minus_utc(), 0);
    }

    #[test]
    fn out_of_range_offset_is_rejected() {
        let mut settings = Settings::default();
        settings.analytics.utc_offset_hours = 15;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn inverted_size_thresholds_are_rejected() {
        let mut settings = Settings::default();
        settings.analytics.size_thresholds.medium_max = dec!(500);
        assert!(settings.validate().is_err());
    }

    #[test]
    fn default_leverage_buckets_cover_high_leverage() {
        let buckets = LeverageBucket::default_buckets();
        assert_eq!(buckets.len(), 5);
        assert!(buckets.last().unwrap().contains(dec!(250)));
        assert!(buckets[0].contains(dec!(5)));
        assert!(!buckets[0].contains(dec!(11)));
    }
}
