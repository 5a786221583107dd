//! # Tradebook Analytics Facade
//!
//! For a given owner, this crate runs the aggregation engine's operations
//! as concurrent, independent read tasks against the trade store and joins
//! their results into one response object keyed by report name.
//!
//! ## Architectural Principles
//!
//! - **Fan-Out / Fan-In:** Each sub-report is one logical store read
//!   followed by a pure reduction. The tasks share nothing mutable and are
//!   joined with a barrier before the facade returns.
//! - **Fail-Fast:** A failure in any sub-report fails the whole facade
//!   call; partial responses are never returned. This is the documented
//!   contract, chosen over flagged partial results.
//!
//! ## Public API
//!
//! - `AnalyticsFacade`: The orchestrator.
//! - `TradeAnalytics`: The merged response, one field per report.
//! - `FacadeError`: The specific error types returned by this crate.

use analytics::{
    AggregationEngine, AnalyticsError, AssetSummary, MarginReport, MonthlyPerformance,
    PortfolioMetrics, SizeBucketSummary, TradingTimeScore, WeekdayTurnoverReport,
    WinLossBreakdown,
};
use configuration::AnalyticsSettings;
use core_types::{InstrumentType, TradeRecord};
use query::{Predicate, TradeFilter};
use serde::Serialize;
use store::{Page, TradeStore};
use uuid::Uuid;

pub mod error;

pub use error::FacadeError;

/// The merged analytics response: every report the engine derives for an
/// owner, keyed by report name.
#[derive(Debug, Clone, Serialize)]
pub struct TradeAnalytics {
    pub asset_summaries: Vec<AssetSummary>,
    pub win_loss: Vec<WinLossBreakdown>,
    pub portfolio: PortfolioMetrics,
    pub weekday_turnover: WeekdayTurnoverReport,
    pub best_trading_time: Vec<TradingTimeScore>,
    pub margin: MarginReport,
    pub size_distribution: Vec<SizeBucketSummary>,
    pub monthly_performance: Vec<MonthlyPerformance>,
}

/// Orchestrates the aggregation engine over a trade store.
#[derive(Debug, Clone, Default)]
pub struct AnalyticsFacade {
    engine: AggregationEngine,
}

impl AnalyticsFacade {
    pub fn new(settings: AnalyticsSettings) -> Self {
        Self {
            engine: AggregationEngine::new(settings),
        }
    }

    /// Computes the full analytics response for an owner, optionally
    /// narrowed by a caller-supplied filter.
    ///
    /// The eight sub-reports run concurrently; each performs its own store
    /// read so an adapter is free to narrow server-side. Fails with
    /// `MissingOwner` for a nil owner id, and fail-fast on the first
    /// sub-report error otherwise.
    pub async fn full_report(
        &self,
        trade_store: &dyn TradeStore,
        owner_id: Uuid,
        filter: &TradeFilter,
    ) -> Result<TradeAnalytics, FacadeError> {
        if owner_id.is_nil() {
            return Err(FacadeError::MissingOwner);
        }
        let predicate = Predicate::from_filter(filter).and_owner(owner_id);
        tracing::debug!(%owner_id, "computing analytics report set");

        let (
            asset_summaries,
            win_loss,
            portfolio,
            weekday_turnover,
            best_trading_time,
            margin,
            size_distribution,
            monthly_performance,
        ) = tokio::try_join!(
            self.sub_report(trade_store, &predicate, |engine, trades| engine
                .summarize_assets(trades)),
            self.sub_report(trade_store, &predicate, |engine, trades| engine
                .win_loss_breakdown(trades)),
            self.sub_report(trade_store, &predicate, |engine, trades| engine
                .portfolio_metrics(trades)),
            self.sub_report(trade_store, &predicate, |engine, trades| engine
                .turnover_by_weekday(trades)),
            self.sub_report(trade_store, &predicate, |engine, trades| engine
                .best_trading_time(trades)),
            self.sub_report(trade_store, &predicate, |engine, trades| engine
                .leverage_analytics(trades)),
            self.sub_report(trade_store, &predicate, |engine, trades| engine
                .size_distribution(trades)),
            self.sub_report(trade_store, &predicate, |engine, trades| engine
                .monthly_performance(trades)),
        )?;

        Ok(TradeAnalytics {
            asset_summaries,
            win_loss,
            portfolio,
            weekday_turnover,
            best_trading_time,
            margin,
            size_distribution,
            monthly_performance,
        })
    }

    /// The full report scoped to one instrument type.
    pub async fn instrument_report(
        &self,
        trade_store: &dyn TradeStore,
        owner_id: Uuid,
        instrument_type: InstrumentType,
    ) -> Result<TradeAnalytics, FacadeError> {
        self.full_report(
            trade_store,
            owner_id,
            &TradeFilter::for_instrument(instrument_type),
        )
        .await
    }

    /// One sub-report: a single logical store read followed by a pure
    /// reduction. No state is shared across concurrently running calls.
    async fn sub_report<T, F>(
        &self,
        trade_store: &dyn TradeStore,
        predicate: &Predicate,
        reduce: F,
    ) -> Result<T, FacadeError>
    where
        F: FnOnce(&AggregationEngine, &[TradeRecord]) -> Result<T, AnalyticsError>,
    {
        let trades = trade_store.find_many(predicate, None, Page::all()).await?;
        Ok(reduce(&self.engine, &trades)?)
    }
}
