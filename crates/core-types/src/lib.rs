//! # Tradebook Core Types
//!
//! This crate defines the data model shared by every other crate in the
//! system: the `TradeRecord` entity, the raw caller-supplied trade shape,
//! and the closed set of instrument classifications.
//!
//! ## Architectural Principles
//!
//! - **Layer 0:** This crate sits at the bottom of the dependency graph.
//!   It has no knowledge of validation rules, analytics, or storage.
//! - **Decimal Money Math:** All prices and monetary amounts are
//!   `rust_decimal::Decimal`. Floating point never touches financial values.
//!
//! ## Public API
//!
//! - `TradeRecord`: The validated, persisted trade entity.
//! - `RawTrade`: The unvalidated input shape supplied by an external caller.
//! - `InstrumentDetails`: The tagged variant carrying type-dependent fields.
//! - `InstrumentType`, `PositionType`, `OptionType`, `TradeOutcome`: The
//!   closed classification enums.

pub mod enums;
pub mod error;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::{InstrumentType, OptionType, PositionType, TradeOutcome};
pub use error::CoreError;
pub use structs::{
    ImprovementSuggestion, InstrumentDetails, PerformanceSummary, RawTrade, TradeRecord,
};
