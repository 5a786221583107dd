use crate::filter::TradeFilter;
use chrono::{DateTime, Utc};
use core_types::{InstrumentType, TradeOutcome, TradeRecord};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One conjunctive constraint over a trade record.
///
/// Kept as plain data so a store adapter can translate each clause into its
/// native query language instead of evaluating in-process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Clause {
    Owner(Uuid),
    Instrument(InstrumentType),
    Symbol(String),
    Outcome(TradeOutcome),
    EntryDateAtLeast(DateTime<Utc>),
    EntryDateAtMost(DateTime<Utc>),
    WinRateAtLeast(Decimal),
    WinRateAtMost(Decimal),
    ProfitLossAtLeast(Decimal),
    ProfitLossAtMost(Decimal),
}

impl Clause {
    /// Evaluates this clause against a record. Pure; never fails.
    pub fn matches(&self, record: &TradeRecord) -> bool {
        match self {
            Clause::Owner(owner_id) => record.owner_id == *owner_id,
            Clause::Instrument(instrument_type) => {
                record.instrument_type() == *instrument_type
            }
            Clause::Symbol(symbol) => record.symbol == *symbol,
            Clause::Outcome(outcome) => record.trade_outcome == *outcome,
            Clause::EntryDateAtLeast(start) => record.entry_date >= *start,
            Clause::EntryDateAtMost(end) => record.entry_date <= *end,
            Clause::WinRateAtLeast(min) => record.performance.win_rate >= *min,
            Clause::WinRateAtMost(max) => record.performance.win_rate <= *max,
            Clause::ProfitLossAtLeast(min) => record.profit_loss >= *min,
            Clause::ProfitLossAtMost(max) => record.profit_loss <= *max,
        }
    }
}

/// A conjunction of clauses. The empty conjunction matches everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Predicate {
    clauses: Vec<Clause>,
}

impl Predicate {
    /// The match-everything predicate.
    pub fn match_all() -> Self {
        Predicate::default()
    }

    /// Builds a predicate from caller-supplied filter criteria. Each present
    /// field contributes one clause; range bounds are inclusive and applied
    /// only for the bounds actually supplied. Never fails.
    pub fn from_filter(filter: &TradeFilter) -> Self {
        let mut clauses = Vec::new();
        if let Some(instrument_type) = filter.instrument_type {
            clauses.push(Clause::Instrument(instrument_type));
        }
        if let Some(symbol) = &filter.symbol {
            clauses.push(Clause::Symbol(symbol.clone()));
        }
        if let Some(outcome) = filter.outcome {
            clauses.push(Clause::Outcome(outcome));
        }
        if let Some(start) = filter.start_date {
            clauses.push(Clause::EntryDateAtLeast(start));
        }
        if let Some(end) = filter.end_date {
            clauses.push(Clause::EntryDateAtMost(end));
        }
        if let Some(min) = filter.min_win_rate {
            clauses.push(Clause::WinRateAtLeast(min));
        }
        if let Some(max) = filter.max_win_rate {
            clauses.push(Clause::WinRateAtMost(max));
        }
        if let Some(min) = filter.min_profit_loss {
            clauses.push(Clause::ProfitLossAtLeast(min));
        }
        if let Some(max) = filter.max_profit_loss {
            clauses.push(Clause::ProfitLossAtMost(max));
        }
        Predicate { clauses }
    }

    /// Adds an owner-scoping clause. Every store read in the analytics path
    /// goes through a predicate scoped this way.
    pub fn and_owner(mut self, owner_id: Uuid) -> Self {
        self.clauses.push(Clause::Owner(owner_id));
        self
    }

    /// Adds an instrument-scoping clause.
    pub fn and_instrument(mut self, instrument_type: InstrumentType) -> Self {
        self.clauses.push(Clause::Instrument(instrument_type));
        self
    }

    /// Evaluates the full conjunction against a record.
    pub fn matches(&self, record: &TradeRecord) -> bool {
        self.clauses.iter().all(|clause| clause.matches(record))
    }

    /// The underlying clauses, for store adapters that translate them.
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn is_match_all(&self) -> bool {
        self.clauses.is_empty()
    }
}
