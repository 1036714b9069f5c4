use chrono::NaiveDate;
use serde::Serialize;

use super::payout::PayoutFrequency;

/// Derived metrics for one holding at a given price.
///
/// `None` means "unavailable" — no valid value could be computed or
/// fetched. It is distinct from zero and renders as a blank cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HoldingMetrics {
    /// shares × price.
    pub market_value: Option<f64>,

    /// market_value + dividends_collected.
    pub total_value: Option<f64>,

    /// market_value − total_invested + dividends_collected.
    /// Unavailable when the price is — a missing quote never silently
    /// collapses the return to a dividends-only figure.
    pub overall_return: Option<f64>,

    /// overall_return / total_invested × 100; unavailable when nothing
    /// was invested.
    pub overall_return_pct: Option<f64>,

    /// True ADA: (total_invested − dividends_collected) / shares.
    /// Undefined at zero shares. May legitimately be negative once
    /// dividends exceed the cost basis.
    pub true_ada: Option<f64>,

    /// (price − true_ada) / true_ada × 100.
    pub return_vs_true_ada_pct: Option<f64>,
}

/// One rendered table row: holding fields, the resolved price, derived
/// metrics, and the payout-frequency label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HoldingRow {
    pub ticker: String,
    pub name: String,
    pub payout: PayoutFrequency,
    pub shares: f64,
    pub purchase_price: Option<f64>,
    pub total_invested: f64,
    /// Resolved price: live quote, else last known price, else unavailable.
    pub price: Option<f64>,
    pub dividends_collected: f64,
    pub last_div_amount: f64,
    pub last_div_date: Option<NaiveDate>,
    pub metrics: HoldingMetrics,
}

/// One row of the dividend overview.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DividendRow {
    pub ticker: String,
    pub dividends_collected: f64,
    pub last_div_amount: f64,
    pub last_div_date: Option<NaiveDate>,
}

/// Portfolio-level totals rolled up from per-holding rows.
///
/// Holdings without a resolvable price contribute 0 to `total_value`
/// but never make the total unavailable — partial totals are shown,
/// with `unpriced_holdings` reporting how partial.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioTotals {
    pub total_invested: f64,
    /// Σ market_value over priced holdings only.
    pub total_value: f64,
    pub total_dividends: f64,
    pub cash_uninvested: f64,
    /// total_value + cash_uninvested.
    pub total_with_cash: f64,
    /// total_value + cash + total_dividends − total_invested.
    pub overall_return: f64,
    pub overall_return_pct: Option<f64>,
    pub total_shares: f64,
    /// Unadjusted average cost per share across the portfolio.
    pub avg_cost: Option<f64>,
    /// Portfolio-level True ADA.
    pub true_ada: Option<f64>,
    /// (avg_cost − true_ada) / avg_cost × 100.
    pub basis_improvement_pct: Option<f64>,
    pub priced_holdings: usize,
    pub unpriced_holdings: usize,
}
