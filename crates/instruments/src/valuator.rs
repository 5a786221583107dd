use crate::error::ValidationError;
use crate::registry::strategy_for;
use chrono::{DateTime, Utc};
use core_types::{
    InstrumentType, PerformanceSummary, RawTrade, TradeOutcome, TradeRecord,
};
use rust_decimal::Decimal;
use uuid::Uuid;

/// Validates a raw trade and produces the persisted record shape.
///
/// The pipeline: common-field presence, instrument dispatch, strategy field
/// validation, booked profit/loss, outcome derivation, zeroed performance
/// defaults. Deterministic for a given `(raw, now)` pair apart from the
/// freshly generated trade id; performs no I/O. Persisting the returned
/// record is the caller's responsibility.
pub fn validate_new(
    owner_id: Uuid,
    raw: &RawTrade,
    now: DateTime<Utc>,
) -> Result<TradeRecord, ValidationError> {
    let mut missing = Vec::new();

    let symbol = require(&raw.symbol, "symbol", &mut missing);
    let entry_price = require(&raw.entry_price, "entry_price", &mut missing);
    let exit_price = require(&raw.exit_price, "exit_price", &mut missing);
    let risk = require(&raw.risk, "risk", &mut missing);
    let reward = require(&raw.reward, "reward", &mut missing);
    let tags = require(&raw.tags, "tags", &mut missing);
    let entry_date = require(&raw.entry_date, "entry_date", &mut missing);
    let exit_date = require(&raw.exit_date, "exit_date", &mut missing);

    // An unknown tag is rejected outright; a missing tag joins the
    // missing-field list so the caller sees the full picture at once.
    let details = match raw.instrument_type.as_deref() {
        None => {
            missing.push("instrument_type".to_string());
            None
        }
        Some(tag) => {
            let instrument_type: InstrumentType = tag
                .parse()
                .map_err(|_| ValidationError::InvalidInstrumentType(tag.to_string()))?;
            strategy_for(instrument_type).collect_fields(raw, &mut missing)
        }
    };

    if !missing.is_empty() {
        tracing::debug!(?missing, "trade rejected: required fields absent");
        return Err(ValidationError::MissingFields(missing));
    }

    // `missing` is empty, so every require above returned Some and the
    // strategy assembled its details. The fallbacks are unreachable but
    // keep this path panic-free.
    let details =
        details.ok_or_else(|| ValidationError::MissingFields(vec!["instrument_type".to_string()]))?;
    let symbol = symbol.ok_or(ValidationError::EmptySymbol)?;
    let (entry_price, exit_price, risk, reward) = match (entry_price, exit_price, risk, reward) {
        (Some(en), Some(ex), Some(ri), Some(re)) => (en, ex, ri, re),
        _ => return Err(ValidationError::MissingFields(vec!["entry_price".to_string()])),
    };
    let (tags, entry_date, exit_date) = match (tags, entry_date, exit_date) {
        (Some(t), Some(en), Some(ex)) => (t, en, ex),
        _ => return Err(ValidationError::MissingFields(vec!["tags".to_string()])),
    };

    if symbol.trim().is_empty() {
        return Err(ValidationError::EmptySymbol);
    }
    if tags.is_empty() {
        return Err(ValidationError::EmptyTags);
    }

    let strategy = strategy_for(details.instrument_type());
    strategy.check(&details, now)?;

    let profit_loss = strategy
        .profit_loss(entry_price, exit_price, &details)
        .ok_or(ValidationError::NumericOverflow)?;
    let trade_outcome = TradeOutcome::from_profit_loss(profit_loss);

    Ok(TradeRecord {
        id: Uuid::new_v4(),
        owner_id,
        instrument: details,
        symbol,
        entry_price,
        exit_price,
        risk,
        reward,
        fees: raw.fees.unwrap_or(Decimal::ZERO),
        tags,
        entry_date,
        exit_date,
        created_at: now,
        profit_loss,
        trade_outcome,
        performance: PerformanceSummary::default(),
    })
}

/// Re-validates an existing record with a partial update laid over it.
///
/// The merged shape goes through the same pipeline as a new trade, so the
/// derived `profit_loss`/`trade_outcome` always match the updated fields.
/// Identity and creation time are preserved from the existing record.
pub fn validate_update(
    existing: &TradeRecord,
    patch: &RawTrade,
    now: DateTime<Utc>,
) -> Result<TradeRecord, ValidationError> {
    let merged = existing.to_raw().apply_patch(patch);
    let mut updated = validate_new(existing.owner_id, &merged, now)?;
    updated.id = existing.id;
    updated.created_at = existing.created_at;
    updated.performance = existing.performance.clone();
    Ok(updated)
}

fn require<T: Clone>(value: &Option<T>, name: &str, missing: &mut Vec<String>) -> Option<T> {
    if value.is_none() {
        missing.push(name.to_string());
    }
    value.clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use core_types::{OptionType, PositionType};
    use rust_decimal_macros::dec;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 3, 12, 0, 0).unwrap()
    }

    fn base_raw(instrument_type: &str) -> RawTrade {
        RawTrade {
            instrument_type: Some(instrument_type.to_string()),
            symbol: Some("TEST".to_string()),
            entry_price: Some(dec!(100)),
            exit_price: Some(dec!(110)),
            risk: Some(dec!(10)),
            reward: Some(dec!(30)),
            tags: Some(vec!["swing".to_string()]),
            entry_date: Some(now()),
            exit_date: Some(now()),
            ..RawTrade::default()
        }
    }

    #[test]
    fn equity_trade_values_and_wins() {
        // entry=100, exit=110, quantity=10 -> +100, win.
        let mut raw = base_raw("equity");
        raw.quantity = Some(dec!(10));
        let record = validate_new(Uuid::new_v4(), &raw, now()).unwrap();
        assert_eq!(record.profit_loss, dec!(100));
        assert_eq!(record.trade_outcome, TradeOutcome::Win);
        assert_eq!(record.fees, Decimal::ZERO);
        assert_eq!(record.performance, PerformanceSummary::default());
    }

    #[test]
    fn short_margined_crypto_wins_on_a_drop() {
        // entry=50000, exit=49000, qty=0.1, lev=5, short -> +500, win.
        let mut raw = base_raw("margined-crypto");
        raw.entry_price = Some(dec!(50000));
        raw.exit_price = Some(dec!(49000));
        raw.quantity = Some(dec!(0.1));
        raw.leverage = Some(dec!(5));
        raw.position_type = Some(PositionType::Short);
        let record = validate_new(Uuid::new_v4(), &raw, now()).unwrap();
        assert_eq!(record.profit_loss, dec!(500.0));
        assert_eq!(record.trade_outcome, TradeOutcome::Win);
    }

    #[test]
    fn worthless_long_call_loses_its_premium() {
        // call, strike=100, exit=90, premium=5, qty=1, long -> -5, loss.
        let mut raw = base_raw("option");
        raw.exit_price = Some(dec!(90));
        raw.quantity = Some(dec!(1));
        raw.option_type = Some(OptionType::Call);
        raw.strike_price = Some(dec!(100));
        raw.option_premium = Some(dec!(5));
        raw.position_type = Some(PositionType::Long);
        let record = validate_new(Uuid::new_v4(), &raw, now()).unwrap();
        assert_eq!(record.profit_loss, dec!(-5));
        assert_eq!(record.trade_outcome, TradeOutcome::Loss);
    }

    #[test]
    fn missing_fields_are_reported_all_at_once() {
        let raw = RawTrade {
            instrument_type: Some("forex".to_string()),
            symbol: Some("EURUSD".to_string()),
            entry_price: Some(dec!(1.1)),
            ..RawTrade::default()
        };
        let err = validate_new(Uuid::new_v4(), &raw, now()).unwrap_err();
        match err {
            ValidationError::MissingFields(fields) => {
                for expected in [
                    "exit_price",
                    "risk",
                    "reward",
                    "tags",
                    "entry_date",
                    "exit_date",
                    "units",
                    "usd_exchange_rate",
                ] {
                    assert!(fields.iter().any(|f| f == expected), "missing {expected}");
                }
                assert!(!fields.iter().any(|f| f == "symbol"));
            }
            other => panic!("expected MissingFields, got {other:?}"),
        }
    }

    #[test]
    fn unknown_instrument_tag_is_rejected() {
        let raw = base_raw("futures");
        let err = validate_new(Uuid::new_v4(), &raw, now()).unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidInstrumentType("futures".to_string())
        );
    }

    #[test]
    fn expired_option_is_rejected() {
        let mut raw = base_raw("option");
        raw.quantity = Some(dec!(1));
        raw.option_type = Some(OptionType::Put);
        raw.strike_price = Some(dec!(100));
        raw.option_premium = Some(dec!(5));
        raw.position_type = Some(PositionType::Long);
        raw.expiration_date = Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        let err = validate_new(Uuid::new_v4(), &raw, now()).unwrap_err();
        assert!(matches!(err, ValidationError::ExpiredInstrument { .. }));
    }

    #[test]
    fn empty_tags_and_blank_symbol_are_rejected() {
        let mut raw = base_raw("equity");
        raw.quantity = Some(dec!(1));
        raw.tags = Some(vec![]);
        assert_eq!(
            validate_new(Uuid::new_v4(), &raw, now()).unwrap_err(),
            ValidationError::EmptyTags
        );

        let mut raw = base_raw("equity");
        raw.quantity = Some(dec!(1));
        raw.symbol = Some("   ".to_string());
        assert_eq!(
            validate_new(Uuid::new_v4(), &raw, now()).unwrap_err(),
            ValidationError::EmptySymbol
        );
    }

    #[test]
    fn zero_leverage_is_rejected() {
        let mut raw = base_raw("margined-crypto");
        raw.quantity = Some(dec!(1));
        raw.leverage = Some(dec!(0));
        raw.position_type = Some(PositionType::Long);
        assert_eq!(
            validate_new(Uuid::new_v4(), &raw, now()).unwrap_err(),
            ValidationError::NonPositiveLeverage(dec!(0))
        );
    }

    #[test]
    fn overflowing_valuation_is_an_error_not_a_panic() {
        let mut raw = base_raw("equity");
        raw.exit_price = Some(dec!(100000000000000000000));
        raw.quantity = Some(dec!(10000000000));
        assert_eq!(
            validate_new(Uuid::new_v4(), &raw, now()).unwrap_err(),
            ValidationError::NumericOverflow
        );
    }

    #[test]
    fn valuation_is_deterministic_for_the_same_input() {
        let mut raw = base_raw("spot-crypto");
        raw.quantity = Some(dec!(0.5));
        let a = validate_new(Uuid::new_v4(), &raw, now()).unwrap();
        let b = validate_new(Uuid::new_v4(), &raw, now()).unwrap();
        assert_eq!(a.profit_loss, b.profit_loss);
        assert_eq!(a.trade_outcome, b.trade_outcome);
        assert_eq!(a.entry_notional(), b.entry_notional());
    }

    #[test]
    fn update_revalues_and_preserves_identity() {
        let mut raw = base_raw("equity");
        raw.quantity = Some(dec!(10));
        let record = validate_new(Uuid::new_v4(), &raw, now()).unwrap();

        let patch = RawTrade {
            exit_price: Some(dec!(95)),
            ..RawTrade::default()
        };
        let later = Utc.with_ymd_and_hms(2024, 6, 4, 9, 0, 0).unwrap();
        let updated = validate_update(&record, &patch, later).unwrap();

        assert_eq!(updated.id, record.id);
        assert_eq!(updated.owner_id, record.owner_id);
        assert_eq!(updated.created_at, record.created_at);
        assert_eq!(updated.profit_loss, dec!(-50));
        assert_eq!(updated.trade_outcome, TradeOutcome::Loss);
    }

    #[test]
    fn update_cannot_sneak_in_an_unknown_instrument() {
        let mut raw = base_raw("equity");
        raw.quantity = Some(dec!(10));
        let record = validate_new(Uuid::new_v4(), &raw, now()).unwrap();

        let patch = RawTrade {
            instrument_type: Some("warrant".to_string()),
            ..RawTrade::default()
        };
        let err = validate_update(&record, &patch, now()).unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidInstrumentType("warrant".to_string())
        );
    }
}
