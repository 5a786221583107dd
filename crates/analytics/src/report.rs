use core_types::{InstrumentType, PositionType, TradeOutcome};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One row of the per-type/per-asset summary: a `(instrument type, symbol,
/// outcome)` group with its aggregate figures. Monetary fields are rounded
/// to 2 decimal places.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetSummary {
    pub instrument_type: InstrumentType,
    pub symbol: String,
    pub outcome: TradeOutcome,
    pub trade_count: usize,
    pub total_profit_loss: Decimal,
    pub avg_profit_loss: Decimal,
    pub avg_entry_price: Decimal,
    pub avg_exit_price: Decimal,
    pub total_fees: Decimal,
    pub avg_risk_reward: Decimal,
}

/// Win/loss counts and percentages for one instrument type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WinLossBreakdown {
    pub instrument_type: InstrumentType,
    pub total_trades: usize,
    pub wins: usize,
    pub losses: usize,
    pub win_percentage: Decimal,
    pub loss_percentage: Decimal,
}

/// Portfolio-level figures over the full filtered trade set. Every ratio is
/// zero when its denominator is zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioMetrics {
    pub total_trades: usize,
    /// Capital deployed: the sum of entry notionals.
    pub total_investment: Decimal,
    /// The sum of booked profit/loss (gross of fees).
    pub total_return: Decimal,
    /// Total return less total fees.
    pub net_profit: Decimal,
    pub total_fees: Decimal,
    pub roi_pct: Decimal,
    /// Fees as a fraction of capital deployed.
    pub expense_ratio: Decimal,
    /// Net profit retained as a percentage of gross return.
    pub savings_rate_pct: Decimal,
    /// The share of trades that must win for the book to break even, from
    /// average win and loss magnitudes.
    pub break_even_pct: Decimal,
    /// Gross profit over gross loss.
    pub risk_reward_ratio: Decimal,
    pub win_percentage: Decimal,
}

/// One weekday bucket of the turnover report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekdayTurnover {
    /// Day name, Sunday through Saturday.
    pub day: String,
    /// Sum of absolute profit/loss booked on this day.
    pub turnover: Decimal,
    /// This day's share of the week's total turnover, in percent.
    pub turnover_share_pct: Decimal,
    pub net_profit_loss: Decimal,
    /// Mean percentage gain (profit/loss over entry notional) of the
    /// day's trades.
    pub avg_gain_pct: Decimal,
}

/// The turnover-by-weekday report: always exactly seven buckets, Sunday
/// first, zero-filled when a day has no trades.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekdayTurnoverReport {
    pub days: Vec<WeekdayTurnover>,
    pub total_turnover: Decimal,
}

/// One weekday of the best-trading-time report. `performance` scales the
/// day's profit against the best day into [0, 100].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradingTimeScore {
    pub day: String,
    pub profit_loss: Decimal,
    pub performance: Decimal,
}

/// One `(leverage range, position type)` group of the margin report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeverageBucketSummary {
    pub bucket: String,
    pub position_type: PositionType,
    pub trade_count: usize,
    pub total_profit_loss: Decimal,
    pub avg_profit_loss: Decimal,
    pub win_rate_pct: Decimal,
    pub total_notional: Decimal,
}

/// Margin/leverage analytics over the margined subset of a trade set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarginReport {
    pub buckets: Vec<LeverageBucketSummary>,
    /// Mean of per-trade `margin required / margin available`; trades with
    /// no margin snapshot contribute zero.
    pub avg_margin_utilization: Decimal,
    pub margined_trades: usize,
}

/// Notional size classes for the trade-size distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SizeBucket {
    Small,
    Medium,
    Large,
    VeryLarge,
}

impl SizeBucket {
    pub const ALL: [SizeBucket; 4] = [
        SizeBucket::Small,
        SizeBucket::Medium,
        SizeBucket::Large,
        SizeBucket::VeryLarge,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SizeBucket::Small => "small",
            SizeBucket::Medium => "medium",
            SizeBucket::Large => "large",
            SizeBucket::VeryLarge => "very-large",
        }
    }
}

/// One bucket of the trade-size distribution. All four buckets are always
/// present, zero-filled when empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizeBucketSummary {
    pub bucket: SizeBucket,
    pub trade_count: usize,
    pub total_value: Decimal,
    pub avg_profit_loss: Decimal,
}

/// One calendar month of the time-series performance report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyPerformance {
    pub year: i32,
    pub month: u32,
    pub trade_count: usize,
    pub win_rate_pct: Decimal,
    pub total_profit_loss: Decimal,
    pub avg_profit_loss: Decimal,
    /// Sum of entry notionals closed in the month.
    pub total_volume: Decimal,
    pub avg_risk_reward: Decimal,
}
