use crate::engine::{accumulate, mean, pct, round2, AggregationEngine};
use crate::error::AnalyticsError;
use crate::report::{AssetSummary, WinLossBreakdown};
use core_types::{InstrumentType, TradeOutcome, TradeRecord};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

#[derive(Default)]
struct AssetAccumulator {
    trade_count: usize,
    total_profit_loss: Decimal,
    total_entry_price: Decimal,
    total_exit_price: Decimal,
    total_fees: Decimal,
    total_risk_reward: Decimal,
}

impl AggregationEngine {
    /// Groups trades by `(instrument type, symbol, outcome)` and reduces
    /// each group to its summary figures. Groups are emitted in a stable
    /// order; monetary outputs are rounded to 2 decimal places.
    pub fn summarize_assets(
        &self,
        trades: &[TradeRecord],
    ) -> Result<Vec<AssetSummary>, AnalyticsError> {
        let mut groups: BTreeMap<(InstrumentType, String, TradeOutcome), AssetAccumulator> =
            BTreeMap::new();

        for trade in trades {
            let acc = groups
                .entry((
                    trade.instrument_type(),
                    trade.symbol.clone(),
                    trade.trade_outcome,
                ))
                .or_default();
            acc.trade_count += 1;
            acc.total_profit_loss =
                accumulate(acc.total_profit_loss, trade.profit_loss, "asset_summary")?;
            acc.total_entry_price =
                accumulate(acc.total_entry_price, trade.entry_price, "asset_summary")?;
            acc.total_exit_price =
                accumulate(acc.total_exit_price, trade.exit_price, "asset_summary")?;
            acc.total_fees = accumulate(acc.total_fees, trade.fees, "asset_summary")?;
            acc.total_risk_reward = accumulate(
                acc.total_risk_reward,
                trade.risk_reward_ratio(),
                "asset_summary",
            )?;
        }

        Ok(groups
            .into_iter()
            .map(|((instrument_type, symbol, outcome), acc)| AssetSummary {
                instrument_type,
                symbol,
                outcome,
                trade_count: acc.trade_count,
                total_profit_loss: round2(acc.total_profit_loss),
                avg_profit_loss: round2(mean(acc.total_profit_loss, acc.trade_count)),
                avg_entry_price: round2(mean(acc.total_entry_price, acc.trade_count)),
                avg_exit_price: round2(mean(acc.total_exit_price, acc.trade_count)),
                total_fees: round2(acc.total_fees),
                avg_risk_reward: round2(mean(acc.total_risk_reward, acc.trade_count)),
            })
            .collect())
    }

    /// Win/loss counts and percentages per instrument type, for the types
    /// present in the trade set. Percentages are 0 for an empty group.
    pub fn win_loss_breakdown(
        &self,
        trades: &[TradeRecord],
    ) -> Result<Vec<WinLossBreakdown>, AnalyticsError> {
        let mut groups: BTreeMap<InstrumentType, (usize, usize)> = BTreeMap::new();

        for trade in trades {
            let (wins, losses) = groups.entry(trade.instrument_type()).or_default();
            match trade.trade_outcome {
                TradeOutcome::Win => *wins += 1,
                TradeOutcome::Loss => *losses += 1,
            }
        }

        Ok(groups
            .into_iter()
            .map(|(instrument_type, (wins, losses))| {
                let total_trades = wins + losses;
                WinLossBreakdown {
                    instrument_type,
                    total_trades,
                    wins,
                    losses,
                    win_percentage: round2(pct(
                        Decimal::from(wins),
                        Decimal::from(total_trades),
                    )),
                    loss_percentage: round2(pct(
                        Decimal::from(losses),
                        Decimal::from(total_trades),
                    )),
                }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{call_option, equity, margined, ts};
    use core_types::PositionType;
    use rust_decimal_macros::dec;

    #[test]
    fn summary_splits_groups_by_outcome() {
        let engine = AggregationEngine::default();
        let when = ts(2024, 2, 5, 10);
        let trades = vec![
            equity("AAPL", dec!(100), dec!(110), dec!(10), when, when),
            equity("AAPL", dec!(100), dec!(120), dec!(10), when, when),
            equity("AAPL", dec!(100), dec!(95), dec!(10), when, when),
        ];

        let summaries = engine.summarize_assets(&trades).unwrap();
        assert_eq!(summaries.len(), 2);

        let losses = summaries
            .iter()
            .find(|s| s.outcome == TradeOutcome::Loss)
            .unwrap();
        assert_eq!(losses.trade_count, 1);
        assert_eq!(losses.total_profit_loss, dec!(-50.00));

        let wins = summaries
            .iter()
            .find(|s| s.outcome == TradeOutcome::Win)
            .unwrap();
        assert_eq!(wins.trade_count, 2);
        assert_eq!(wins.total_profit_loss, dec!(300.00));
        assert_eq!(wins.avg_profit_loss, dec!(150.00));
        assert_eq!(wins.avg_entry_price, dec!(100.00));
        assert_eq!(wins.avg_exit_price, dec!(115.00));
        // Fixture risk=10, reward=20 -> ratio 2 for every trade.
        assert_eq!(wins.avg_risk_reward, dec!(2.00));
    }

    #[test]
    fn summary_accumulates_fees() {
        let engine = AggregationEngine::default();
        let when = ts(2024, 2, 5, 10);
        let mut a = equity("MSFT", dec!(10), dec!(11), dec!(1), when, when);
        a.fees = dec!(0.35);
        let mut b = equity("MSFT", dec!(10), dec!(12), dec!(1), when, when);
        b.fees = dec!(0.65);

        let summaries = engine.summarize_assets(&[a, b]).unwrap();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].total_fees, dec!(1.00));
    }

    #[test]
    fn worthless_option_books_as_a_loss_group() {
        let engine = AggregationEngine::default();
        let when = ts(2024, 2, 7, 15);
        // Out-of-the-money call: zero intrinsic value, the premium is lost.
        let trades = vec![call_option("SPY", dec!(500), dec!(480), dec!(5), dec!(1), when)];

        let summaries = engine.summarize_assets(&trades).unwrap();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].outcome, TradeOutcome::Loss);
        assert_eq!(summaries[0].total_profit_loss, dec!(-5.00));
    }

    #[test]
    fn breakdown_percentages_sum_to_one_hundred() {
        let engine = AggregationEngine::default();
        let when = ts(2024, 2, 6, 9);
        let trades = vec![
            equity("A", dec!(10), dec!(11), dec!(1), when, when),
            equity("A", dec!(10), dec!(9), dec!(1), when, when),
            equity("A", dec!(10), dec!(8), dec!(1), when, when),
            margined(
                "BTCUSDT",
                dec!(50000),
                dec!(49000),
                dec!(0.1),
                dec!(5),
                PositionType::Short,
                None,
                when,
            ),
        ];

        let breakdown = engine.win_loss_breakdown(&trades).unwrap();
        assert_eq!(breakdown.len(), 2);

        let equities = breakdown
            .iter()
            .find(|b| b.instrument_type == InstrumentType::Equity)
            .unwrap();
        assert_eq!(equities.total_trades, 3);
        assert_eq!(equities.win_percentage, dec!(33.33));
        assert_eq!(equities.loss_percentage, dec!(66.67));

        let crypto = breakdown
            .iter()
            .find(|b| b.instrument_type == InstrumentType::MarginedCrypto)
            .unwrap();
        assert_eq!(crypto.wins, 1);
        assert_eq!(crypto.win_percentage, dec!(100.00));
    }

    #[test]
    fn empty_input_produces_empty_reports() {
        let engine = AggregationEngine::default();
        assert!(engine.summarize_assets(&[]).unwrap().is_empty());
        assert!(engine.win_loss_breakdown(&[]).unwrap().is_empty());
    }
}
