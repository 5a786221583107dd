use chrono::{DateTime, Utc};
use core_types::{InstrumentType, TradeOutcome};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Optional filter criteria supplied by an external caller.
///
/// Every field is independent and optional; unrecognized fields in the
/// incoming document are silently ignored. Range bounds are inclusive and
/// may be supplied one-sided.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TradeFilter {
    pub instrument_type: Option<InstrumentType>,
    pub symbol: Option<String>,
    pub outcome: Option<TradeOutcome>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub min_win_rate: Option<Decimal>,
    pub max_win_rate: Option<Decimal>,
    pub min_profit_loss: Option<Decimal>,
    pub max_profit_loss: Option<Decimal>,
}

impl TradeFilter {
    /// True when no criterion is set, i.e. the filter matches everything.
    pub fn is_empty(&self) -> bool {
        *self == TradeFilter::default()
    }

    /// Convenience constructor for the common per-instrument scoping.
    pub fn for_instrument(instrument_type: InstrumentType) -> Self {
        TradeFilter {
            instrument_type: Some(instrument_type),
            ..TradeFilter::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_fields_are_silently_ignored() {
        let filter: TradeFilter = serde_json::from_str(
            r#"{"symbol": "BTCUSDT", "sortBy": "profit", "page": 3}"#,
        )
        .unwrap();
        assert_eq!(filter.symbol.as_deref(), Some("BTCUSDT"));
        assert!(filter.instrument_type.is_none());
    }

    #[test]
    fn empty_document_is_the_empty_filter() {
        let filter: TradeFilter = serde_json::from_str("{}").unwrap();
        assert!(filter.is_empty());
    }
}
