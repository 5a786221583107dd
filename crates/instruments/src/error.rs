use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// One or more required fields are absent for the declared instrument
    /// type. Carries every missing field name, not just the first.
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    #[error("Unknown instrument type: '{0}'")]
    InvalidInstrumentType(String),

    #[error("Option contract expired at {expired_at}; expired instruments cannot be recorded")]
    ExpiredInstrument { expired_at: DateTime<Utc> },

    #[error("Symbol must be a non-empty string")]
    EmptySymbol,

    #[error("At least one tag is required")]
    EmptyTags,

    #[error("Leverage must be greater than zero, got {0}")]
    NonPositiveLeverage(Decimal),

    /// The valuation formula overflowed the representable decimal range.
    /// Raised instead of panicking on pathological price/quantity inputs.
    #[error("Trade valuation overflowed the representable numeric range")]
    NumericOverflow,
}
