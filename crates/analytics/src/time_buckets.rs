use crate::engine::{
    accumulate, day_index, mean, notional, pct, round2, AggregationEngine, DAY_NAMES,
};
use crate::error::AnalyticsError;
use crate::report::{MonthlyPerformance, TradingTimeScore, WeekdayTurnover, WeekdayTurnoverReport};
use chrono::Datelike;
use core_types::TradeRecord;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

#[derive(Default, Clone, Copy)]
struct DayAccumulator {
    turnover: Decimal,
    net_profit_loss: Decimal,
    gain_pct_total: Decimal,
    trade_count: usize,
}

#[derive(Default)]
struct MonthAccumulator {
    trade_count: usize,
    wins: usize,
    total_profit_loss: Decimal,
    total_volume: Decimal,
    total_risk_reward: Decimal,
}

impl AggregationEngine {
    /// Turnover (sum of absolute profit/loss) bucketed into the seven
    /// calendar weekdays by exit date, evaluated in the configured timezone.
    ///
    /// All seven buckets are always present, Sunday first, zero-filled when
    /// a day has no trades. Bucket and total turnover are carried at full
    /// precision so the buckets always sum exactly to the total; rounding
    /// each bucket independently could drift the sum by several cents on
    /// sub-cent trades. Percentages are rounded to 2 decimal places.
    pub fn turnover_by_weekday(
        &self,
        trades: &[TradeRecord],
    ) -> Result<WeekdayTurnoverReport, AnalyticsError> {
        const REPORT: &str = "turnover_by_weekday";
        let tz = self.settings.timezone();
        let mut days = [DayAccumulator::default(); 7];

        for trade in trades {
            let idx = day_index(trade.exit_date.with_timezone(&tz).weekday());
            let acc = &mut days[idx];
            acc.turnover = accumulate(acc.turnover, trade.profit_loss.abs(), REPORT)?;
            acc.net_profit_loss = accumulate(acc.net_profit_loss, trade.profit_loss, REPORT)?;
            acc.gain_pct_total = accumulate(
                acc.gain_pct_total,
                pct(trade.profit_loss, notional(trade, REPORT)?),
                REPORT,
            )?;
            acc.trade_count += 1;
        }

        let total_turnover: Decimal = days.iter().map(|d| d.turnover).sum();

        let days = days
            .iter()
            .enumerate()
            .map(|(idx, acc)| WeekdayTurnover {
                day: DAY_NAMES[idx].to_string(),
                turnover: acc.turnover,
                turnover_share_pct: round2(pct(acc.turnover, total_turnover)),
                net_profit_loss: round2(acc.net_profit_loss),
                avg_gain_pct: round2(mean(acc.gain_pct_total, acc.trade_count)),
            })
            .collect();

        Ok(WeekdayTurnoverReport {
            days,
            total_turnover,
        })
    }

    /// Profit summed by entry-date weekday, scaled against the best day
    /// into a 0-100 performance score. All scores are 0 when no day is
    /// profitable; the best day scores exactly 100 otherwise. Days tying
    /// for the maximum all score 100.
    pub fn best_trading_time(
        &self,
        trades: &[TradeRecord],
    ) -> Result<Vec<TradingTimeScore>, AnalyticsError> {
        const REPORT: &str = "best_trading_time";
        let tz = self.settings.timezone();
        let mut profits = [Decimal::ZERO; 7];

        for trade in trades {
            let idx = day_index(trade.entry_date.with_timezone(&tz).weekday());
            profits[idx] = accumulate(profits[idx], trade.profit_loss, REPORT)?;
        }

        let max_profit = profits.iter().copied().max().unwrap_or(Decimal::ZERO);

        Ok(profits
            .iter()
            .enumerate()
            .map(|(idx, profit)| {
                let performance = if max_profit <= Decimal::ZERO {
                    Decimal::ZERO
                } else {
                    // Loss-making days floor at 0 rather than going negative.
                    pct(*profit, max_profit)
                        .max(Decimal::ZERO)
                        .min(Decimal::ONE_HUNDRED)
                };
                TradingTimeScore {
                    day: DAY_NAMES[idx].to_string(),
                    profit_loss: round2(*profit),
                    performance: round2(performance),
                }
            })
            .collect())
    }

    /// Performance series grouped by the calendar month of the exit date,
    /// sorted chronologically.
    pub fn monthly_performance(
        &self,
        trades: &[TradeRecord],
    ) -> Result<Vec<MonthlyPerformance>, AnalyticsError> {
        const REPORT: &str = "monthly_performance";
        let tz = self.settings.timezone();
        let mut months: BTreeMap<(i32, u32), MonthAccumulator> = BTreeMap::new();

        for trade in trades {
            let local_exit = trade.exit_date.with_timezone(&tz);
            let acc = months
                .entry((local_exit.year(), local_exit.month()))
                .or_default();
            acc.trade_count += 1;
            if trade.is_win() {
                acc.wins += 1;
            }
            acc.total_profit_loss =
                accumulate(acc.total_profit_loss, trade.profit_loss, REPORT)?;
            acc.total_volume = accumulate(acc.total_volume, notional(trade, REPORT)?, REPORT)?;
            acc.total_risk_reward =
                accumulate(acc.total_risk_reward, trade.risk_reward_ratio(), REPORT)?;
        }

        Ok(months
            .into_iter()
            .map(|((year, month), acc)| MonthlyPerformance {
                year,
                month,
                trade_count: acc.trade_count,
                win_rate_pct: round2(pct(
                    Decimal::from(acc.wins),
                    Decimal::from(acc.trade_count),
                )),
                total_profit_loss: round2(acc.total_profit_loss),
                avg_profit_loss: round2(mean(acc.total_profit_loss, acc.trade_count)),
                total_volume: round2(acc.total_volume),
                avg_risk_reward: round2(mean(acc.total_risk_reward, acc.trade_count)),
            })
            .collect())
    }
}
