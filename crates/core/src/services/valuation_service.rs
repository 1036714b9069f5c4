use crate::models::holding::Holding;
use crate::models::valuation::HoldingMetrics;

/// Per-holding valuation: turns a holding plus a (possibly unavailable)
/// price into the derived display metrics.
///
/// Pure business logic — no I/O, no API calls. Unavailability
/// propagates: every metric that needs a price is `None` when the
/// price is, rather than being coerced to zero.
pub struct ValuationEngine;

impl ValuationEngine {
    pub fn new() -> Self {
        Self
    }

    #[must_use]
    pub fn value(&self, holding: &Holding, price: Option<f64>) -> HoldingMetrics {
        let shares = holding.shares;
        let invested = holding.total_invested;
        let dividends = holding.dividends_collected;

        let market_value = price.map(|p| shares * p);
        let total_value = market_value.map(|mv| mv + dividends);
        let overall_return = market_value.map(|mv| mv - invested + dividends);

        let overall_return_pct = match overall_return {
            Some(r) if invested > 0.0 => Some(r / invested * 100.0),
            _ => None,
        };

        // Undefined at zero shares regardless of invested/dividends.
        let true_ada = (shares > 0.0).then(|| (invested - dividends) / shares);

        let return_vs_true_ada_pct = match (price, true_ada) {
            (Some(p), Some(ada)) if ada != 0.0 => Some((p - ada) / ada * 100.0),
            _ => None,
        };

        HoldingMetrics {
            market_value,
            total_value,
            overall_return,
            overall_return_pct,
            true_ada,
            return_vs_true_ada_pct,
        }
    }
}

impl Default for ValuationEngine {
    fn default() -> Self {
        Self::new()
    }
}
