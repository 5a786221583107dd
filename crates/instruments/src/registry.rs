use crate::error::ValidationError;
use chrono::{DateTime, Utc};
use core_types::{InstrumentDetails, InstrumentType, OptionType, RawTrade};
use rust_decimal::Decimal;

/// The trait every instrument class implements: field validation paired
/// with the class's valuation formula.
///
/// Implementations are stateless unit structs, so the registry can hand out
/// `&'static` references. The `Send + Sync` bounds let the analytics facade
/// use strategies from concurrent tasks.
pub trait InstrumentStrategy: Send + Sync {
    /// The instrument class this strategy is registered for.
    fn instrument_type(&self) -> InstrumentType;

    /// Collects the type-dependent fields from the raw shape, pushing the
    /// name of every absent field into `missing`. Returns the assembled
    /// details only when all required fields are present.
    fn collect_fields(
        &self,
        raw: &RawTrade,
        missing: &mut Vec<String>,
    ) -> Option<InstrumentDetails>;

    /// Domain checks that need the full field set: leverage bounds, option
    /// expiry. Runs after `collect_fields` succeeds.
    fn check(
        &self,
        _details: &InstrumentDetails,
        _now: DateTime<Utc>,
    ) -> Result<(), ValidationError> {
        Ok(())
    }

    /// The booked profit/loss for a round trip at the given prices, or
    /// `None` when the computation overflows the decimal range.
    fn profit_loss(
        &self,
        entry_price: Decimal,
        exit_price: Decimal,
        details: &InstrumentDetails,
    ) -> Option<Decimal> {
        booked_profit_loss(entry_price, exit_price, details)
    }
}

/// Returns the strategy registered for an instrument type.
///
/// The match is exhaustive over the closed `InstrumentType` set: adding a
/// variant without registering a strategy here is a compile error.
pub fn strategy_for(instrument_type: InstrumentType) -> &'static dyn InstrumentStrategy {
    match instrument_type {
        InstrumentType::Equity => &EquityStrategy,
        InstrumentType::SpotCrypto => &SpotCryptoStrategy,
        InstrumentType::Forex => &ForexStrategy,
        InstrumentType::MarginedCrypto => &MarginedCryptoStrategy,
        InstrumentType::Option => &OptionStrategy,
    }
}

/// The canonical booked profit/loss, shared by write-time valuation and
/// read-time analytics. Sign-respecting and fee-exclusive: fees live in
/// their own field and are surfaced separately by the aggregation engine.
///
/// Checked arithmetic throughout; `None` when the caller's amounts push
/// the product past the representable decimal range.
pub fn booked_profit_loss(
    entry_price: Decimal,
    exit_price: Decimal,
    details: &InstrumentDetails,
) -> Option<Decimal> {
    match details {
        InstrumentDetails::Equity { quantity } | InstrumentDetails::SpotCrypto { quantity } => {
            exit_price.checked_sub(entry_price)?.checked_mul(*quantity)
        }
        InstrumentDetails::Forex {
            units,
            usd_exchange_rate,
        } => exit_price
            .checked_sub(entry_price)?
            .checked_mul(*units)?
            .checked_mul(*usd_exchange_rate),
        InstrumentDetails::MarginedCrypto {
            quantity,
            leverage,
            position_type,
            ..
        } => exit_price
            .checked_sub(entry_price)?
            .checked_mul(*quantity)?
            .checked_mul(*leverage)?
            .checked_mul(position_type.sign()),
        InstrumentDetails::Option {
            quantity,
            option_type,
            strike_price,
            option_premium,
            position_type,
            ..
        } => intrinsic_value(*option_type, exit_price, *strike_price)?
            .checked_sub(*option_premium)?
            .checked_mul(*quantity)?
            .checked_mul(position_type.sign()),
    }
}

/// The payoff of an option if exercised against the exit price, floored
/// at zero. `None` when the price difference overflows.
pub fn intrinsic_value(
    option_type: OptionType,
    exit_price: Decimal,
    strike_price: Decimal,
) -> Option<Decimal> {
    let payoff = match option_type {
        OptionType::Call => exit_price.checked_sub(strike_price)?,
        OptionType::Put => strike_price.checked_sub(exit_price)?,
    };
    Some(payoff.max(Decimal::ZERO))
}

/// Pushes `name` into `missing` when the field is absent, passing the value
/// through otherwise. The small workhorse behind all-at-once field reporting.
fn require<T: Clone>(value: &Option<T>, name: &str, missing: &mut Vec<String>) -> Option<T> {
    if value.is_none() {
        missing.push(name.to_string());
    }
    value.clone()
}

struct EquityStrategy;

impl InstrumentStrategy for EquityStrategy {
    fn instrument_type(&self) -> InstrumentType {
        InstrumentType::Equity
    }

    fn collect_fields(
        &self,
        raw: &RawTrade,
        missing: &mut Vec<String>,
    ) -> Option<InstrumentDetails> {
        let quantity = require(&raw.quantity, "quantity", missing)?;
        Some(InstrumentDetails::Equity { quantity })
    }
}

struct SpotCryptoStrategy;

impl InstrumentStrategy for SpotCryptoStrategy {
    fn instrument_type(&self) -> InstrumentType {
        InstrumentType::SpotCrypto
    }

    fn collect_fields(
        &self,
        raw: &RawTrade,
        missing: &mut Vec<String>,
    ) -> Option<InstrumentDetails> {
        let quantity = require(&raw.quantity, "quantity", missing)?;
        Some(InstrumentDetails::SpotCrypto { quantity })
    }
}

struct ForexStrategy;

impl InstrumentStrategy for ForexStrategy {
    fn instrument_type(&self) -> InstrumentType {
        InstrumentType::Forex
    }

    fn collect_fields(
        &self,
        raw: &RawTrade,
        missing: &mut Vec<String>,
    ) -> Option<InstrumentDetails> {
        let units = require(&raw.units, "units", missing);
        let usd_exchange_rate = require(&raw.usd_exchange_rate, "usd_exchange_rate", missing);
        Some(InstrumentDetails::Forex {
            units: units?,
            usd_exchange_rate: usd_exchange_rate?,
        })
    }
}

struct MarginedCryptoStrategy;

impl InstrumentStrategy for MarginedCryptoStrategy {
    fn instrument_type(&self) -> InstrumentType {
        InstrumentType::MarginedCrypto
    }

    fn collect_fields(
        &self,
        raw: &RawTrade,
        missing: &mut Vec<String>,
    ) -> Option<InstrumentDetails> {
        let quantity = require(&raw.quantity, "quantity", missing);
        let leverage = require(&raw.leverage, "leverage", missing);
        let position_type = require(&raw.position_type, "position_type", missing);
        Some(InstrumentDetails::MarginedCrypto {
            quantity: quantity?,
            leverage: leverage?,
            position_type: position_type?,
            margin_available: raw.margin_available,
        })
    }

    fn check(
        &self,
        details: &InstrumentDetails,
        _now: DateTime<Utc>,
    ) -> Result<(), ValidationError> {
        if let InstrumentDetails::MarginedCrypto { leverage, .. } = details {
            if *leverage <= Decimal::ZERO {
                return Err(ValidationError::NonPositiveLeverage(*leverage));
            }
        }
        Ok(())
    }
}

struct OptionStrategy;

impl InstrumentStrategy for OptionStrategy {
    fn instrument_type(&self) -> InstrumentType {
        InstrumentType::Option
    }

    fn collect_fields(
        &self,
        raw: &RawTrade,
        missing: &mut Vec<String>,
    ) -> Option<InstrumentDetails> {
        let quantity = require(&raw.quantity, "quantity", missing);
        let option_type = require(&raw.option_type, "option_type", missing);
        let strike_price = require(&raw.strike_price, "strike_price", missing);
        let option_premium = require(&raw.option_premium, "option_premium", missing);
        let position_type = require(&raw.position_type, "position_type", missing);
        Some(InstrumentDetails::Option {
            quantity: quantity?,
            option_type: option_type?,
            strike_price: strike_price?,
            option_premium: option_premium?,
            position_type: position_type?,
            expiration_date: raw.expiration_date,
        })
    }

    fn check(
        &self,
        details: &InstrumentDetails,
        now: DateTime<Utc>,
    ) -> Result<(), ValidationError> {
        if let InstrumentDetails::Option {
            expiration_date: Some(expired_at),
            ..
        } = details
        {
            if *expired_at < now {
                return Err(ValidationError::ExpiredInstrument {
                    expired_at: *expired_at,
                });
            }
        }
        Ok(())
    }
}
