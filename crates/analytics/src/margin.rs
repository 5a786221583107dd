use crate::engine::{accumulate, mean, notional, pct, ratio, round2, AggregationEngine};
use crate::error::AnalyticsError;
use crate::report::{LeverageBucketSummary, MarginReport, SizeBucket, SizeBucketSummary};
use core_types::{InstrumentDetails, PositionType, TradeRecord};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

#[derive(Default)]
struct LeverageAccumulator {
    trade_count: usize,
    wins: usize,
    total_profit_loss: Decimal,
    total_notional: Decimal,
}

#[derive(Default, Clone, Copy)]
struct SizeAccumulator {
    trade_count: usize,
    total_value: Decimal,
    total_profit_loss: Decimal,
}

impl AggregationEngine {
    /// Margin analytics over the margined subset of the trade set: trades
    /// grouped by configured leverage range and position direction, plus
    /// the mean margin utilization.
    ///
    /// Margin required is the entry notional deleveraged (entry price times
    /// quantity); utilization divides it by the caller-supplied available
    /// margin and contributes 0 when that snapshot is absent or zero.
    pub fn leverage_analytics(
        &self,
        trades: &[TradeRecord],
    ) -> Result<MarginReport, AnalyticsError> {
        const REPORT: &str = "leverage_analytics";
        let mut groups: BTreeMap<(usize, PositionType), LeverageAccumulator> = BTreeMap::new();
        let mut utilization_total = Decimal::ZERO;
        let mut margined_trades = 0usize;

        for trade in trades {
            let InstrumentDetails::MarginedCrypto {
                leverage,
                position_type,
                margin_available,
                ..
            } = &trade.instrument
            else {
                continue;
            };
            margined_trades += 1;

            let acc = groups
                .entry((self.leverage_bucket_index(*leverage), *position_type))
                .or_default();
            acc.trade_count += 1;
            if trade.is_win() {
                acc.wins += 1;
            }
            let trade_notional = notional(trade, REPORT)?;
            acc.total_profit_loss =
                accumulate(acc.total_profit_loss, trade.profit_loss, REPORT)?;
            acc.total_notional = accumulate(acc.total_notional, trade_notional, REPORT)?;

            let margin_required = ratio(trade_notional, *leverage);
            let utilization = match margin_available {
                Some(available) if !available.is_zero() => margin_required / available,
                _ => Decimal::ZERO,
            };
            utilization_total = accumulate(utilization_total, utilization, REPORT)?;
        }

        let buckets = groups
            .into_iter()
            .map(|((bucket_idx, position_type), acc)| LeverageBucketSummary {
                bucket: self.settings.leverage_buckets[bucket_idx].label.clone(),
                position_type,
                trade_count: acc.trade_count,
                total_profit_loss: round2(acc.total_profit_loss),
                avg_profit_loss: round2(mean(acc.total_profit_loss, acc.trade_count)),
                win_rate_pct: round2(pct(
                    Decimal::from(acc.wins),
                    Decimal::from(acc.trade_count),
                )),
                total_notional: round2(acc.total_notional),
            })
            .collect();

        Ok(MarginReport {
            buckets,
            avg_margin_utilization: mean(utilization_total, margined_trades).round_dp(4),
            margined_trades,
        })
    }

    /// Distribution of trades across the four notional size buckets. All
    /// four buckets are always present, zero-filled when empty.
    pub fn size_distribution(
        &self,
        trades: &[TradeRecord],
    ) -> Result<Vec<SizeBucketSummary>, AnalyticsError> {
        const REPORT: &str = "size_distribution";
        let mut buckets = [SizeAccumulator::default(); 4];

        for trade in trades {
            let trade_notional = notional(trade, REPORT)?;
            let idx = self.size_bucket(trade_notional) as usize;
            let acc = &mut buckets[idx];
            acc.trade_count += 1;
            acc.total_value = accumulate(acc.total_value, trade_notional, REPORT)?;
            acc.total_profit_loss =
                accumulate(acc.total_profit_loss, trade.profit_loss, REPORT)?;
        }

        Ok(SizeBucket::ALL
            .iter()
            .zip(buckets.iter())
            .map(|(bucket, acc)| SizeBucketSummary {
                bucket: *bucket,
                trade_count: acc.trade_count,
                total_value: round2(acc.total_value),
                avg_profit_loss: round2(mean(acc.total_profit_loss, acc.trade_count)),
            })
            .collect())
    }

    /// Index into the configured leverage buckets. A leverage falling in a
    /// gap between ranges lands in the next range up; anything beyond the
    /// last bounded range lands in the final bucket.
    fn leverage_bucket_index(&self, leverage: Decimal) -> usize {
        let buckets = &self.settings.leverage_buckets;
        buckets
            .iter()
            .position(|b| b.contains(leverage))
            .or_else(|| {
                buckets
                    .iter()
                    .position(|b| b.max.is_none_or(|max| leverage <= max))
            })
            .unwrap_or(buckets.len() - 1)
    }

    fn size_bucket(&self, notional: Decimal) -> SizeBucket {
        let thresholds = &self.settings.size_thresholds;
        if notional <= thresholds.small_max {
            SizeBucket::Small
        } else if notional <= thresholds.medium_max {
            SizeBucket::Medium
        } else if notional <= thresholds.large_max {
            SizeBucket::Large
        } else {
            SizeBucket::VeryLarge
        }
    }
}
