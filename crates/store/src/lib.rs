//! # Tradebook Store Interface
//!
//! This crate defines the data-store collaborator the rest of the system
//! talks to: a small async `TradeStore` trait for persisting and retrieving
//! trade records, plus an in-memory reference implementation.
//!
//! ## Architectural Principles
//!
//! - **Store-Agnostic:** Filtering is expressed through the `query` crate's
//!   predicates, which an adapter may translate into its native query
//!   language or evaluate in-process. No part of the system depends on a
//!   particular store's grouping or filtering primitives; the analytics
//!   path is fully correct over a store that can only return record lists.
//! - **Thin Contract:** The trait covers exactly the operations the engine
//!   needs (find, count, insert, update, delete). Transactions, retries and
//!   durability concerns belong to the adapter behind it.
//!
//! ## Public API
//!
//! - `TradeStore`: The async collaborator trait.
//! - `MemoryTradeStore`: The `RwLock`-backed reference implementation used
//!   by the CLI and tests.
//! - `Sort`, `SortField`, `Page`: Listing controls.
//! - `StoreError`: The specific error types returned by this crate.

pub mod error;
pub mod interface;
pub mod memory;

// Re-export the key components to create a clean, public-facing API.
pub use error::StoreError;
pub use interface::{Page, Sort, SortField, TradeStore};
pub use memory::MemoryTradeStore;
