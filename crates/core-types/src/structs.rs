use crate::enums::{InstrumentType, OptionType, PositionType, TradeOutcome};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The unvalidated trade shape supplied by an external caller.
///
/// Every field the valuator checks is optional at the type level so that
/// validation can report *all* missing fields for the declared instrument
/// type in one pass, rather than failing on the first absent field during
/// deserialization. Unknown fields in the incoming document are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawTrade {
    pub instrument_type: Option<String>,

    // Common fields, required for every instrument type.
    pub symbol: Option<String>,
    pub entry_price: Option<Decimal>,
    pub exit_price: Option<Decimal>,
    pub risk: Option<Decimal>,
    pub reward: Option<Decimal>,
    pub tags: Option<Vec<String>>,
    pub entry_date: Option<DateTime<Utc>>,
    pub exit_date: Option<DateTime<Utc>>,

    /// Execution fees for the round trip. Optional; defaults to zero.
    pub fees: Option<Decimal>,

    // Type-dependent fields, required only for their instrument type.
    pub quantity: Option<Decimal>,
    pub units: Option<Decimal>,
    pub usd_exchange_rate: Option<Decimal>,
    pub leverage: Option<Decimal>,
    pub position_type: Option<PositionType>,
    pub option_type: Option<OptionType>,
    pub strike_price: Option<Decimal>,
    pub option_premium: Option<Decimal>,
    pub expiration_date: Option<DateTime<Utc>>,
    pub margin_available: Option<Decimal>,
}

impl RawTrade {
    /// Lays a partial update over this raw shape, field by field. Fields the
    /// patch leaves out keep their existing value.
    pub fn apply_patch(&self, patch: &RawTrade) -> RawTrade {
        RawTrade {
            instrument_type: patch.instrument_type.clone().or_else(|| self.instrument_type.clone()),
            symbol: patch.symbol.clone().or_else(|| self.symbol.clone()),
            entry_price: patch.entry_price.or(self.entry_price),
            exit_price: patch.exit_price.or(self.exit_price),
            risk: patch.risk.or(self.risk),
            reward: patch.reward.or(self.reward),
            tags: patch.tags.clone().or_else(|| self.tags.clone()),
            entry_date: patch.entry_date.or(self.entry_date),
            exit_date: patch.exit_date.or(self.exit_date),
            fees: patch.fees.or(self.fees),
            quantity: patch.quantity.or(self.quantity),
            units: patch.units.or(self.units),
            usd_exchange_rate: patch.usd_exchange_rate.or(self.usd_exchange_rate),
            leverage: patch.leverage.or(self.leverage),
            position_type: patch.position_type.or(self.position_type),
            option_type: patch.option_type.or(self.option_type),
            strike_price: patch.strike_price.or(self.strike_price),
            option_premium: patch.option_premium.or(self.option_premium),
            expiration_date: patch.expiration_date.or(self.expiration_date),
            margin_available: patch.margin_available.or(self.margin_available),
        }
    }
}

/// The type-dependent portion of a validated trade.
///
/// Exactly one variant per instrument class. Each variant carries only the
/// fields its valuation formula needs, so a `TradeRecord` can never hold a
/// half-populated mixture of fields from different classes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "instrument_type")]
pub enum InstrumentDetails {
    #[serde(rename = "equity")]
    Equity { quantity: Decimal },

    #[serde(rename = "spot-crypto")]
    SpotCrypto { quantity: Decimal },

    #[serde(rename = "forex")]
    Forex {
        units: Decimal,
        usd_exchange_rate: Decimal,
    },

    #[serde(rename = "margined-crypto")]
    MarginedCrypto {
        quantity: Decimal,
        leverage: Decimal,
        position_type: PositionType,
        /// Account margin available at entry, when the caller supplied it.
        /// Only consumed by margin-utilization analytics.
        margin_available: Option<Decimal>,
    },

    #[serde(rename = "option")]
    Option {
        quantity: Decimal,
        option_type: OptionType,
        strike_price: Decimal,
        option_premium: Decimal,
        position_type: PositionType,
        expiration_date: Option<DateTime<Utc>>,
    },
}

impl InstrumentDetails {
    pub fn instrument_type(&self) -> InstrumentType {
        match self {
            InstrumentDetails::Equity { .. } => InstrumentType::Equity,
            InstrumentDetails::SpotCrypto { .. } => InstrumentType::SpotCrypto,
            InstrumentDetails::Forex { .. } => InstrumentType::Forex,
            InstrumentDetails::MarginedCrypto { .. } => InstrumentType::MarginedCrypto,
            InstrumentDetails::Option { .. } => InstrumentType::Option,
        }
    }
}

/// Performance-summary fields carried on every record.
///
/// Zeroed at creation; only ever populated by downstream batch jobs that
/// recompute a trader's rolling statistics. The valuator never fills these.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerformanceSummary {
    pub win_rate: Decimal,
    pub avg_profit_loss: Decimal,
    pub max_drawdown: Decimal,
    pub profit_factor: Decimal,
    pub sharpe_ratio: Decimal,
    pub volatility: Decimal,
    pub sortino_ratio: Decimal,
    pub avg_holding_period_hours: Decimal,
    pub improvement_suggestions: Vec<ImprovementSuggestion>,
}

/// A structured textual suggestion produced by downstream analysis jobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImprovementSuggestion {
    pub category: String,
    pub message: String,
}

/// The validated, persisted trade entity. The central type of the system.
///
/// `profit_loss` and `trade_outcome` are derived by the valuator and are
/// immutable afterwards except through an explicit update, which re-runs
/// the full validation pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    pub id: Uuid,
    pub owner_id: Uuid,

    #[serde(flatten)]
    pub instrument: InstrumentDetails,

    pub symbol: String,
    pub entry_price: Decimal,
    pub exit_price: Decimal,
    pub risk: Decimal,
    pub reward: Decimal,
    pub fees: Decimal,
    pub tags: Vec<String>,
    pub entry_date: DateTime<Utc>,
    pub exit_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,

    // Derived at validation time, never supplied by the caller.
    pub profit_loss: Decimal,
    pub trade_outcome: TradeOutcome,

    #[serde(default)]
    pub performance: PerformanceSummary,
}

impl TradeRecord {
    pub fn instrument_type(&self) -> InstrumentType {
        self.instrument.instrument_type()
    }

    pub fn is_win(&self) -> bool {
        self.trade_outcome == TradeOutcome::Win
    }

    /// The capital footprint of the position at entry. Used by analytics
    /// for investment totals, size buckets, and percentage-gain figures.
    ///
    /// For options this is the premium paid, not the strike exposure; for
    /// margined positions it is the full levered notional. `None` when the
    /// product exceeds the representable decimal range.
    pub fn entry_notional(&self) -> Option<Decimal> {
        match &self.instrument {
            InstrumentDetails::Equity { quantity } | InstrumentDetails::SpotCrypto { quantity } => {
                self.entry_price.checked_mul(*quantity)
            }
            InstrumentDetails::Forex {
                units,
                usd_exchange_rate,
            } => self
                .entry_price
                .checked_mul(*units)?
                .checked_mul(*usd_exchange_rate),
            InstrumentDetails::MarginedCrypto {
                quantity, leverage, ..
            } => self
                .entry_price
                .checked_mul(*quantity)?
                .checked_mul(*leverage),
            InstrumentDetails::Option {
                quantity,
                option_premium,
                ..
            } => option_premium.checked_mul(*quantity),
        }
    }

    /// Reward-to-risk ratio as planned at entry. Zero when no risk was
    /// recorded, never a division error.
    pub fn risk_reward_ratio(&self) -> Decimal {
        if self.risk.is_zero() {
            Decimal::ZERO
        } else {
            self.reward / self.risk
        }
    }

    /// Decomposes the record back into the raw shape, with every field
    /// populated. Used when merging a partial update before re-validation.
    pub fn to_raw(&self) -> RawTrade {
        let mut raw = RawTrade {
            instrument_type: Some(self.instrument_type().as_str().to_string()),
            symbol: Some(self.symbol.clone()),
            entry_price: Some(self.entry_price),
            exit_price: Some(self.exit_price),
            risk: Some(self.risk),
            reward: Some(self.reward),
            tags: Some(self.tags.clone()),
            entry_date: Some(self.entry_date),
            exit_date: Some(self.exit_date),
            fees: Some(self.fees),
            ..RawTrade::default()
        };
        match &self.instrument {
            InstrumentDetails::Equity { quantity } | InstrumentDetails::SpotCrypto { quantity } => {
                raw.quantity = Some(*quantity);
            }
            InstrumentDetails::Forex {
                units,
                usd_exchange_rate,
            } => {
                raw.units = Some(*units);
                raw.usd_exchange_rate = Some(*usd_exchange_rate);
            }
            InstrumentDetails::MarginedCrypto {
                quantity,
                leverage,
                position_type,
                margin_available,
            } => {
                raw.quantity = Some(*quantity);
                raw.leverage = Some(*leverage);
                raw.position_type = Some(*position_type);
                raw.margin_available = *margin_available;
            }
            InstrumentDetails::Option {
                quantity,
                option_type,
                strike_price,
                option_premium,
                position_type,
                expiration_date,
            } => {
                raw.quantity = Some(*quantity);
                raw.option_type = Some(*option_type);
                raw.strike_price = Some(*strike_price);
                raw.option_premium = Some(*option_premium);
                raw.position_type = Some(*position_type);
                raw.expiration_date = *expiration_date;
            }
        }
        raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn sample_record(instrument: InstrumentDetails) -> TradeRecord {
        let ts = Utc.with_ymd_and_hms(2024, 3, 4, 14, 30, 0).unwrap();
        TradeRecord {
            id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            instrument,
            symbol: "AAPL".to_string(),
            entry_price: dec!(100),
            exit_price: dec!(110),
            risk: dec!(50),
            reward: dec!(150),
            fees: dec!(2),
            tags: vec!["breakout".to_string()],
            entry_date: ts,
            exit_date: ts,
            created_at: ts,
            profit_loss: dec!(100),
            trade_outcome: TradeOutcome::Win,
            performance: PerformanceSummary::default(),
        }
    }

    #[test]
    fn entry_notional_per_instrument() {
        let equity = sample_record(InstrumentDetails::Equity {
            quantity: dec!(10),
        });
        assert_eq!(equity.entry_notional(), Some(dec!(1000)));

        let forex = sample_record(InstrumentDetails::Forex {
            units: dec!(1000),
            usd_exchange_rate: dec!(1.1),
        });
        assert_eq!(forex.entry_notional(), Some(dec!(110000)));

        let margined = sample_record(InstrumentDetails::MarginedCrypto {
            quantity: dec!(0.5),
            leverage: dec!(10),
            position_type: PositionType::Long,
            margin_available: None,
        });
        assert_eq!(margined.entry_notional(), Some(dec!(500)));

        let option = sample_record(InstrumentDetails::Option {
            quantity: dec!(2),
            option_type: OptionType::Call,
            strike_price: dec!(100),
            option_premium: dec!(5),
            position_type: PositionType::Long,
            expiration_date: None,
        });
        assert_eq!(option.entry_notional(), Some(dec!(10)));
    }

    #[test]
    fn overflowing_entry_notional_is_none_not_a_panic() {
        let mut record = sample_record(InstrumentDetails::Equity {
            quantity: dec!(10000000000),
        });
        record.entry_price = dec!(100000000000000000000);
        assert_eq!(record.entry_notional(), None);
    }

    #[test]
    fn risk_reward_ratio_guards_zero_risk() {
        let mut record = sample_record(InstrumentDetails::Equity {
            quantity: dec!(1),
        });
        assert_eq!(record.risk_reward_ratio(), dec!(3));
        record.risk = Decimal::ZERO;
        assert_eq!(record.risk_reward_ratio(), Decimal::ZERO);
    }

    #[test]
    fn patch_overrides_only_supplied_fields() {
        let record = sample_record(InstrumentDetails::Equity {
            quantity: dec!(10),
        });
        let patch = RawTrade {
            exit_price: Some(dec!(95)),
            ..RawTrade::default()
        };
        let merged = record.to_raw().apply_patch(&patch);
        assert_eq!(merged.exit_price, Some(dec!(95)));
        assert_eq!(merged.entry_price, Some(dec!(100)));
        assert_eq!(merged.quantity, Some(dec!(10)));
        assert_eq!(merged.instrument_type.as_deref(), Some("equity"));
    }

    #[test]
    fn record_serializes_with_flattened_instrument_tag() {
        let record = sample_record(InstrumentDetails::SpotCrypto {
            quantity: dec!(0.25),
        });
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["instrument_type"], "spot-crypto");
        assert_eq!(json["symbol"], "AAPL");
    }
}
