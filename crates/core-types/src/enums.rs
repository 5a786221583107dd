use crate::error::CoreError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed set of instrument classes the system understands.
///
/// Adding a new class means adding a variant here and registering a
/// strategy for it in the `instruments` crate; the compiler flags every
/// match that needs extending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum InstrumentType {
    #[serde(rename = "equity")]
    Equity,
    #[serde(rename = "forex")]
    Forex,
    #[serde(rename = "margined-crypto")]
    MarginedCrypto,
    #[serde(rename = "spot-crypto")]
    SpotCrypto,
    #[serde(rename = "option")]
    Option,
}

impl InstrumentType {
    /// All variants, in a stable display order. Used by per-type reports.
    pub const ALL: [InstrumentType; 5] = [
        InstrumentType::Equity,
        InstrumentType::Forex,
        InstrumentType::MarginedCrypto,
        InstrumentType::SpotCrypto,
        InstrumentType::Option,
    ];

    /// The wire tag for this instrument type.
    pub fn as_str(&self) -> &'static str {
        match self {
            InstrumentType::Equity => "equity",
            InstrumentType::Forex => "forex",
            InstrumentType::MarginedCrypto => "margined-crypto",
            InstrumentType::SpotCrypto => "spot-crypto",
            InstrumentType::Option => "option",
        }
    }
}

impl FromStr for InstrumentType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "equity" => Ok(InstrumentType::Equity),
            "forex" => Ok(InstrumentType::Forex),
            "margined-crypto" => Ok(InstrumentType::MarginedCrypto),
            "spot-crypto" => Ok(InstrumentType::SpotCrypto),
            "option" => Ok(InstrumentType::Option),
            other => Err(CoreError::UnknownInstrumentType(other.to_string())),
        }
    }
}

impl fmt::Display for InstrumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The direction of a leveraged or written position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionType {
    Long,
    Short,
}

impl PositionType {
    /// The sign applied to a price move for this direction: a short
    /// position profits when the price falls.
    pub fn sign(&self) -> Decimal {
        match self {
            PositionType::Long => Decimal::ONE,
            PositionType::Short => Decimal::NEGATIVE_ONE,
        }
    }
}

impl fmt::Display for PositionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PositionType::Long => f.write_str("long"),
            PositionType::Short => f.write_str("short"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    Call,
    Put,
}

/// The realized outcome of a closed trade, derived from the sign of its
/// profit/loss. A flat trade counts as a loss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeOutcome {
    Win,
    Loss,
}

impl TradeOutcome {
    /// Derives the outcome from a signed profit/loss figure.
    pub fn from_profit_loss(profit_loss: Decimal) -> Self {
        if profit_loss > Decimal::ZERO {
            TradeOutcome::Win
        } else {
            TradeOutcome::Loss
        }
    }
}

impl fmt::Display for TradeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeOutcome::Win => f.write_str("win"),
            TradeOutcome::Loss => f.write_str("loss"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn instrument_type_parses_known_tags() {
        assert_eq!(
            "margined-crypto".parse::<InstrumentType>().unwrap(),
            InstrumentType::MarginedCrypto
        );
        assert_eq!(
            "spot-crypto".parse::<InstrumentType>().unwrap(),
            InstrumentType::SpotCrypto
        );
    }

    #[test]
    fn instrument_type_rejects_unknown_tags() {
        let err = "futures".parse::<InstrumentType>().unwrap_err();
        assert!(matches!(err, CoreError::UnknownInstrumentType(tag) if tag == "futures"));
    }

    #[test]
    fn short_sign_is_negative() {
        assert_eq!(PositionType::Short.sign(), dec!(-1));
        assert_eq!(PositionType::Long.sign(), dec!(1));
    }

    #[test]
    fn zero_profit_is_a_loss() {
        assert_eq!(TradeOutcome::from_profit_loss(dec!(0)), TradeOutcome::Loss);
        assert_eq!(TradeOutcome::from_profit_loss(dec!(0.01)), TradeOutcome::Win);
        assert_eq!(TradeOutcome::from_profit_loss(dec!(-3)), TradeOutcome::Loss);
    }
}
