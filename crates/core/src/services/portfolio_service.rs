use chrono::NaiveDate;

use crate::errors::CoreError;
use crate::models::holding::{Holding, HoldingInput};
use crate::models::portfolio::Portfolio;

/// Holding mutations with validation at the boundary.
///
/// Pure business logic — no I/O, no API calls. A failed mutation
/// leaves the portfolio untouched; a committed one stamps
/// `last_updated`.
pub struct PortfolioService;

impl PortfolioService {
    pub fn new() -> Self {
        Self
    }

    /// Normalize a user-entered ticker: trimmed, uppercased, non-empty.
    pub fn normalize_ticker(raw: &str) -> Result<String, CoreError> {
        let ticker = raw.trim().to_uppercase();
        if ticker.is_empty() {
            return Err(CoreError::Validation("Ticker must not be empty".into()));
        }
        Ok(ticker)
    }

    /// Cost-basis precedence: `shares × purchase_price` wins whenever a
    /// purchase price is given; otherwise the explicit total stands.
    /// Applied identically on add and edit.
    #[must_use]
    pub fn resolve_invested(shares: f64, purchase_price: Option<f64>, explicit_total: f64) -> f64 {
        match purchase_price {
            Some(p) if p > 0.0 => shares * p,
            _ => explicit_total,
        }
    }

    /// Add a new holding. The ticker must not already exist.
    pub fn add_holding(
        &self,
        portfolio: &mut Portfolio,
        ticker: &str,
        input: HoldingInput,
        name: String,
        summary: String,
    ) -> Result<(), CoreError> {
        let ticker = Self::normalize_ticker(ticker)?;
        if portfolio.holdings.contains_key(&ticker) {
            return Err(CoreError::HoldingExists(ticker));
        }

        let holding = Self::build_holding(input, name, summary, 0.0, None)?;
        Self::seed_last_price(portfolio, &ticker, holding.purchase_price);
        portfolio.holdings.insert(ticker, holding);
        portfolio.touch();
        Ok(())
    }

    /// Full-record replace of an existing holding's numeric fields.
    /// Name, summary, and the last-dividend pair carry over.
    pub fn update_holding(
        &self,
        portfolio: &mut Portfolio,
        ticker: &str,
        input: HoldingInput,
    ) -> Result<(), CoreError> {
        let ticker = Self::normalize_ticker(ticker)?;
        let existing = portfolio
            .holdings
            .get(&ticker)
            .cloned()
            .ok_or_else(|| CoreError::HoldingNotFound(ticker.clone()))?;

        let holding = Self::build_holding(
            input,
            existing.name,
            existing.summary,
            existing.last_div_amount,
            existing.last_div_date,
        )?;
        Self::seed_last_price(portfolio, &ticker, holding.purchase_price);
        portfolio.holdings.insert(ticker, holding);
        portfolio.touch();
        Ok(())
    }

    /// Record a dividend payment: adds to the cumulative total and
    /// replaces the last-dividend amount/date pair.
    pub fn record_dividend(
        &self,
        portfolio: &mut Portfolio,
        ticker: &str,
        date: NaiveDate,
        amount: f64,
    ) -> Result<(), CoreError> {
        let ticker = Self::normalize_ticker(ticker)?;
        if !amount.is_finite() || amount <= 0.0 {
            return Err(CoreError::Validation(
                "Dividend amount must be positive".into(),
            ));
        }

        let holding = portfolio
            .holdings
            .get_mut(&ticker)
            .ok_or_else(|| CoreError::HoldingNotFound(ticker.clone()))?;
        holding.dividends_collected += amount;
        holding.last_div_amount = amount;
        holding.last_div_date = Some(date);
        portfolio.touch();
        Ok(())
    }

    /// Two-factor delete: the confirmation text must match the ticker
    /// (trimmed, case-insensitive) AND the acknowledgement flag must be
    /// set. Anything less rejects with no state change.
    /// Returns the removed holding.
    pub fn delete_holding(
        &self,
        portfolio: &mut Portfolio,
        ticker: &str,
        confirmation: &str,
        acknowledged: bool,
    ) -> Result<Holding, CoreError> {
        let ticker = Self::normalize_ticker(ticker)?;
        if !portfolio.holdings.contains_key(&ticker) {
            return Err(CoreError::HoldingNotFound(ticker));
        }
        if confirmation.trim().to_uppercase() != ticker || !acknowledged {
            return Err(CoreError::ConfirmationFailed(format!(
                "Type the ticker exactly ({ticker}) and acknowledge the deletion"
            )));
        }

        let removed = portfolio
            .holdings
            .remove(&ticker)
            .ok_or_else(|| CoreError::HoldingNotFound(ticker))?;
        portfolio.touch();
        Ok(removed)
    }

    /// Set the uninvested cash balance.
    pub fn set_cash(&self, portfolio: &mut Portfolio, amount: f64) -> Result<(), CoreError> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(CoreError::Validation(
                "Cash must be a non-negative number".into(),
            ));
        }
        portfolio.cash_uninvested = amount;
        portfolio.touch();
        Ok(())
    }

    /// Validate the numeric fields and assemble the final record,
    /// applying the cost-basis precedence rule.
    fn build_holding(
        input: HoldingInput,
        name: String,
        summary: String,
        last_div_amount: f64,
        last_div_date: Option<NaiveDate>,
    ) -> Result<Holding, CoreError> {
        if !input.shares.is_finite() || input.shares < 0.0 {
            return Err(CoreError::Validation(
                "Shares must be a non-negative number".into(),
            ));
        }
        if let Some(p) = input.purchase_price {
            if !p.is_finite() || p <= 0.0 {
                return Err(CoreError::Validation(
                    "Purchase price must be positive".into(),
                ));
            }
        }
        if !input.total_invested.is_finite() || input.total_invested < 0.0 {
            return Err(CoreError::Validation(
                "Total invested must be a non-negative number".into(),
            ));
        }
        if !input.dividends_collected.is_finite() || input.dividends_collected < 0.0 {
            return Err(CoreError::Validation(
                "Dividends collected must be a non-negative number".into(),
            ));
        }

        let total_invested =
            Self::resolve_invested(input.shares, input.purchase_price, input.total_invested);
        if input.shares == 0.0 && total_invested > 0.0 {
            return Err(CoreError::Validation(
                "Cannot have invested capital without shares".into(),
            ));
        }

        Ok(Holding {
            name,
            shares: input.shares,
            purchase_price: input.purchase_price,
            total_invested,
            dividends_collected: input.dividends_collected,
            summary,
            last_div_amount,
            last_div_date,
        })
    }

    /// A committed positive purchase price doubles as the last known
    /// price for the ticker.
    fn seed_last_price(portfolio: &mut Portfolio, ticker: &str, purchase_price: Option<f64>) {
        if let Some(p) = purchase_price {
            portfolio.last_prices.insert(ticker.to_string(), p);
        }
    }
}

impl Default for PortfolioService {
    fn default() -> Self {
        Self::new()
    }
}
