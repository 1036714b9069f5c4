use crate::models::valuation::{HoldingRow, PortfolioTotals};

/// Rolls per-holding rows up into portfolio-level totals.
///
/// Policy: holdings without a resolvable price contribute 0 to the
/// value sum but never make the total unavailable — a partial total is
/// shown, with the priced/unpriced counts reporting how partial.
pub struct PortfolioAggregator;

impl PortfolioAggregator {
    pub fn new() -> Self {
        Self
    }

    #[must_use]
    pub fn totals(&self, cash_uninvested: f64, rows: &[HoldingRow]) -> PortfolioTotals {
        let mut total_invested = 0.0;
        let mut total_value = 0.0;
        let mut total_dividends = 0.0;
        let mut total_shares = 0.0;
        let mut priced_holdings = 0;
        let mut unpriced_holdings = 0;

        for row in rows {
            total_invested += row.total_invested;
            total_dividends += row.dividends_collected;
            total_shares += row.shares;
            match row.metrics.market_value {
                Some(mv) => {
                    total_value += mv;
                    priced_holdings += 1;
                }
                None => unpriced_holdings += 1,
            }
        }

        let overall_return = total_value + cash_uninvested + total_dividends - total_invested;
        let overall_return_pct =
            (total_invested > 0.0).then(|| overall_return / total_invested * 100.0);

        let avg_cost = (total_shares > 0.0).then(|| total_invested / total_shares);
        let true_ada =
            (total_shares > 0.0).then(|| (total_invested - total_dividends) / total_shares);
        let basis_improvement_pct = match (avg_cost, true_ada) {
            (Some(ac), Some(ada)) if ac > 0.0 => Some((ac - ada) / ac * 100.0),
            _ => None,
        };

        PortfolioTotals {
            total_invested,
            total_value,
            total_dividends,
            cash_uninvested,
            total_with_cash: total_value + cash_uninvested,
            overall_return,
            overall_return_pct,
            total_shares,
            avg_cost,
            true_ada,
            basis_improvement_pct,
            priced_holdings,
            unpriced_holdings,
        }
    }
}

impl Default for PortfolioAggregator {
    fn default() -> Self {
        Self::new()
    }
}
