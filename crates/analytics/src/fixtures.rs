//! Shared builders for analytics tests.

use chrono::{DateTime, TimeZone, Utc};
use core_types::{
    InstrumentDetails, OptionType, PerformanceSummary, PositionType, TradeOutcome, TradeRecord,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

pub fn ts(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, 0, 0).unwrap()
}

pub fn trade(
    instrument: InstrumentDetails,
    symbol: &str,
    entry_price: Decimal,
    exit_price: Decimal,
    profit_loss: Decimal,
    entry_date: DateTime<Utc>,
    exit_date: DateTime<Utc>,
) -> TradeRecord {
    TradeRecord {
        id: Uuid::new_v4(),
        owner_id: Uuid::new_v4(),
        instrument,
        symbol: symbol.to_string(),
        entry_price,
        exit_price,
        risk: dec!(10),
        reward: dec!(20),
        fees: Decimal::ZERO,
        tags: vec!["test".to_string()],
        entry_date,
        exit_date,
        created_at: exit_date,
        profit_loss,
        trade_outcome: TradeOutcome::from_profit_loss(profit_loss),
        performance: PerformanceSummary::default(),
    }
}

/// An equity trade; profit/loss follows the canonical formula.
pub fn equity(
    symbol: &str,
    entry_price: Decimal,
    exit_price: Decimal,
    quantity: Decimal,
    entry_date: DateTime<Utc>,
    exit_date: DateTime<Utc>,
) -> TradeRecord {
    trade(
        InstrumentDetails::Equity { quantity },
        symbol,
        entry_price,
        exit_price,
        (exit_price - entry_price) * quantity,
        entry_date,
        exit_date,
    )
}

pub fn margined(
    symbol: &str,
    entry_price: Decimal,
    exit_price: Decimal,
    quantity: Decimal,
    leverage: Decimal,
    position_type: PositionType,
    margin_available: Option<Decimal>,
    exit_date: DateTime<Utc>,
) -> TradeRecord {
    trade(
        InstrumentDetails::MarginedCrypto {
            quantity,
            leverage,
            position_type,
            margin_available,
        },
        symbol,
        entry_price,
        exit_price,
        position_type.sign() * (exit_price - entry_price) * quantity * leverage,
        exit_date,
        exit_date,
    )
}

pub fn call_option(
    symbol: &str,
    strike_price: Decimal,
    exit_price: Decimal,
    option_premium: Decimal,
    quantity: Decimal,
    exit_date: DateTime<Utc>,
) -> TradeRecord {
    let intrinsic = (exit_price - strike_price).max(Decimal::ZERO);
    trade(
        InstrumentDetails::Option {
            quantity,
            option_type: OptionType::Call,
            strike_price,
            option_premium,
            position_type: PositionType::Long,
            expiration_date: None,
        },
        symbol,
        strike_price,
        exit_price,
        (intrinsic - option_premium) * quantity,
        exit_date,
        exit_date,
    )
}
