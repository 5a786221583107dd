use crate::engine::{accumulate, mean, notional, pct, ratio, round2, AggregationEngine};
use crate::error::AnalyticsError;
use crate::report::PortfolioMetrics;
use core_types::TradeRecord;
use rust_decimal::Decimal;

impl AggregationEngine {
    /// Portfolio-level metrics over the full filtered trade set.
    ///
    /// Investment is the sum of entry notionals; return is the sum of booked
    /// profit/loss (gross of fees); net profit subtracts fees. Every ratio
    /// yields exactly 0 on a zero denominator, and the savings rate is
    /// additionally 0 when the gross return is non-positive.
    pub fn portfolio_metrics(
        &self,
        trades: &[TradeRecord],
    ) -> Result<PortfolioMetrics, AnalyticsError> {
        const REPORT: &str = "portfolio_metrics";

        let mut total_investment = Decimal::ZERO;
        let mut total_return = Decimal::ZERO;
        let mut total_fees = Decimal::ZERO;
        let mut gross_profit = Decimal::ZERO;
        let mut gross_loss = Decimal::ZERO;
        let mut wins = 0usize;
        let mut losses = 0usize;

        for trade in trades {
            total_investment = accumulate(total_investment, notional(trade, REPORT)?, REPORT)?;
            total_return = accumulate(total_return, trade.profit_loss, REPORT)?;
            total_fees = accumulate(total_fees, trade.fees, REPORT)?;
            if trade.profit_loss > Decimal::ZERO {
                gross_profit = accumulate(gross_profit, trade.profit_loss, REPORT)?;
                wins += 1;
            } else {
                gross_loss = accumulate(gross_loss, trade.profit_loss.abs(), REPORT)?;
                losses += 1;
            }
        }

        let net_profit = total_return - total_fees;
        let avg_win = mean(gross_profit, wins);
        let avg_loss = mean(gross_loss, losses);

        let savings_rate_pct = if total_return > Decimal::ZERO {
            pct(net_profit, total_return)
        } else {
            Decimal::ZERO
        };

        Ok(PortfolioMetrics {
            total_trades: trades.len(),
            total_investment: round2(total_investment),
            total_return: round2(total_return),
            net_profit: round2(net_profit),
            total_fees: round2(total_fees),
            roi_pct: round2(pct(total_return, total_investment)),
            // Kept at 4 decimal places: typical expense ratios are well
            // below a cent per unit of capital.
            expense_ratio: ratio(total_fees, total_investment).round_dp(4),
            savings_rate_pct: round2(savings_rate_pct),
            break_even_pct: round2(pct(avg_loss, avg_win + avg_loss)),
            risk_reward_ratio: round2(ratio(gross_profit, gross_loss)),
            win_percentage: round2(pct(
                Decimal::from(wins),
                Decimal::from(trades.len()),
            )),
        })
    }
}
