//! # Tradebook Query Predicates
//!
//! This crate translates optional, caller-supplied filter criteria into a
//! store-agnostic predicate. The predicate is plain data (a conjunction of
//! clauses) plus an in-process `matches` evaluator, so a store adapter can
//! either translate the clauses into its native query language or fetch
//! records and evaluate them here — correctness never depends on the
//! store's own filtering primitives.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** Pure data and evaluation. No I/O, and building a
//!   predicate never fails: absent criteria simply add no clause, and an
//!   empty filter yields the match-everything predicate.

pub mod filter;
pub mod predicate;

// Re-export the key components to create a clean, public-facing API.
pub use filter::TradeFilter;
pub use predicate::{Clause, Predicate};
