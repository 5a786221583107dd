//! # Tradebook Instrument Library
//!
//! This crate contains the per-instrument trading knowledge of the system:
//! which fields each instrument class requires and how its profit/loss is
//! computed. It defines a universal `InstrumentStrategy` trait with one
//! registered implementation per class, plus the `valuator` module that
//! applies the matching strategy to a raw trade at creation or update time.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of
//!   storage or transport. It depends only on `core-types`.
//! - **Closed Registry:** Strategies are dispatched with an exhaustive match
//!   over `InstrumentType`, so adding an instrument class is localized to
//!   one new strategy registration and the compiler flags every gap.
//! - **One Canonical Formula:** The same booked profit/loss formula is used
//!   at write time here and at read time by the analytics crate. Fees are
//!   carried separately and never folded into per-trade profit/loss.
//!
//! ## Public API
//!
//! - `InstrumentStrategy`: The trait pairing field validation with valuation.
//! - `strategy_for`: The registry lookup keyed by `InstrumentType`.
//! - `booked_profit_loss` / `intrinsic_value`: The valuation formulas.
//! - `validate_new` / `validate_update`: The Trade Valuator entry points.
//! - `ValidationError`: The specific error types returned by this crate.

pub mod error;
pub mod registry;
pub mod valuator;

// Re-export the key components to create a clean, public-facing API.
pub use error::ValidationError;
pub use registry::{booked_profit_loss, intrinsic_value, strategy_for, InstrumentStrategy};
pub use valuator::{validate_new, validate_update};
