//! # Tradebook Aggregation Engine
//!
//! This crate derives read-time analytics from a trader's historical trade
//! set: per-asset summaries, win/loss breakdowns, portfolio-level metrics,
//! weekday turnover, best-trading-time scores, margin analytics, trade-size
//! distribution, and monthly performance series.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of
//!   storage or transport; every operation is a stateless reduction over a
//!   `&[TradeRecord]` slice. Whether those records were narrowed store-side
//!   or fetched wholesale is the caller's concern.
//! - **Defined Division:** A zero denominator is never an error anywhere in
//!   this crate. Every percentage and ratio is guarded to yield exactly 0.
//! - **Totality of Buckets:** Weekday reports always carry all seven days
//!   and the size distribution always carries all four buckets, zero-filled
//!   when empty.
//!
//! ## Public API
//!
//! - `AggregationEngine`: The stateless calculator holding bucket settings.
//! - The report structs in `report`, one per aggregation operation.
//! - `AnalyticsError`: The specific error types that can be returned here.

pub mod engine;
pub mod error;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod margin;
pub mod portfolio;
pub mod report;
pub mod summary;
pub mod time_buckets;

// Re-export the key components to create a clean, public-facing API.
pub use engine::AggregationEngine;
pub use error::AnalyticsError;
pub use report::{
    AssetSummary, LeverageBucketSummary, MarginReport, MonthlyPerformance, PortfolioMetrics,
    SizeBucket, SizeBucketSummary, TradingTimeScore, WeekdayTurnover, WeekdayTurnoverReport,
    WinLossBreakdown,
};
