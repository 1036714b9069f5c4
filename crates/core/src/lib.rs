pub mod errors;
pub mod models;
pub mod normalize;
pub mod providers;
pub mod services;
pub mod storage;

use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use std::collections::BTreeMap;

use errors::CoreError;
use models::holding::{Holding, HoldingInput};
use models::portfolio::{Portfolio, DOCUMENT_VERSION};
use models::settings::Settings;
use models::valuation::{DividendRow, HoldingRow, PortfolioTotals};
use services::aggregation_service::PortfolioAggregator;
use services::merge_service::{MergeEngine, MergeMode, MergeReport};
use services::payout_classifier::PayoutClassifier;
use services::portfolio_service::PortfolioService;
use services::quote_service::QuoteService;
use services::valuation_service::ValuationEngine;
use storage::manager::StorageManager;

/// Main entry point for the investment tracker core library.
///
/// Holds the user's named portfolios (e.g. "IRA", "Roth") and the
/// services that operate on them. Every operation names its target
/// portfolio explicitly — there is no ambient "active portfolio".
#[must_use]
pub struct InvestmentTracker {
    portfolios: BTreeMap<String, Portfolio>,
    quotes: QuoteService,
    portfolio_service: PortfolioService,
    valuation: ValuationEngine,
    aggregator: PortfolioAggregator,
    payout_classifier: PayoutClassifier,
    merge_engine: MergeEngine,
    /// Tracks whether any mutation has occurred since the last save/load.
    dirty: bool,
}

impl std::fmt::Debug for InvestmentTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InvestmentTracker")
            .field("portfolios", &self.portfolios.len())
            .field("provider", &self.quotes.provider_name())
            .field("dirty", &self.dirty)
            .finish()
    }
}

/// Import/merge files share the persisted document shape, but only the
/// holdings map is consumed.
#[derive(Deserialize)]
struct ImportDocument {
    #[serde(default)]
    holdings: BTreeMap<String, Holding>,
}

impl InvestmentTracker {
    /// Create a tracker with no portfolios, backed by the given quote
    /// service.
    pub fn new(quotes: QuoteService) -> Self {
        Self {
            portfolios: BTreeMap::new(),
            quotes,
            portfolio_service: PortfolioService::new(),
            valuation: ValuationEngine::new(),
            aggregator: PortfolioAggregator::new(),
            payout_classifier: PayoutClassifier::new(),
            merge_engine: MergeEngine::new(),
            dirty: false,
        }
    }

    /// Create a tracker wired to the Yahoo Finance provider.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn with_yahoo() -> Result<Self, CoreError> {
        Ok(Self::new(QuoteService::with_yahoo()?))
    }

    // ── Portfolio Management ────────────────────────────────────────

    /// Create a new empty portfolio under the given name.
    pub fn create_portfolio(&mut self, name: &str) -> Result<(), CoreError> {
        let name = Self::normalize_portfolio_name(name)?;
        if self.portfolios.contains_key(&name) {
            return Err(CoreError::PortfolioExists(name));
        }
        self.portfolios.insert(name, Portfolio::default());
        self.dirty = true;
        Ok(())
    }

    /// Insert (or replace) a portfolio under the given name, e.g. one
    /// loaded through a [`storage::store::PortfolioStore`].
    pub fn insert_portfolio(&mut self, name: &str, portfolio: Portfolio) -> Result<(), CoreError> {
        let name = Self::normalize_portfolio_name(name)?;
        self.portfolios.insert(name, portfolio);
        Ok(())
    }

    /// Portfolio names in sorted order.
    #[must_use]
    pub fn portfolio_names(&self) -> Vec<&str> {
        self.portfolios.keys().map(String::as_str).collect()
    }

    /// Borrow a portfolio by name.
    pub fn portfolio(&self, name: &str) -> Result<&Portfolio, CoreError> {
        self.portfolios
            .get(name)
            .ok_or_else(|| CoreError::PortfolioNotFound(name.to_string()))
    }

    // ── Holding Management ──────────────────────────────────────────

    /// Add a new holding to a portfolio. The ticker must not already
    /// exist there.
    ///
    /// When no purchase price is given, auto-price is on, and shares
    /// are positive, the live price is fetched and used as the purchase
    /// price; if that fails, the explicit total stands. The company
    /// name and summary are fetched best-effort.
    pub async fn add_holding(
        &mut self,
        portfolio: &str,
        ticker: &str,
        mut input: HoldingInput,
    ) -> Result<(), CoreError> {
        let ticker = PortfolioService::normalize_ticker(ticker)?;
        let state = self.portfolio(portfolio)?;
        let auto_price = state.settings.auto_price;
        // Reject duplicates before any network round-trips.
        if state.holdings.contains_key(&ticker) {
            return Err(CoreError::HoldingExists(ticker));
        }

        if input.purchase_price.is_none() && auto_price && input.shares > 0.0 {
            input.purchase_price = self.quotes.price(&ticker).await;
        }
        let (name, summary) = self.quotes.profile(&ticker).await;

        let state = self
            .portfolios
            .get_mut(portfolio)
            .ok_or_else(|| CoreError::PortfolioNotFound(portfolio.to_string()))?;
        self.portfolio_service
            .add_holding(state, &ticker, input, name, summary)?;
        self.dirty = true;
        Ok(())
    }

    /// Replace an existing holding's numeric fields (full-record edit).
    /// Same auto-price fallback and cost-basis precedence as
    /// [`add_holding`](Self::add_holding).
    pub async fn update_holding(
        &mut self,
        portfolio: &str,
        ticker: &str,
        mut input: HoldingInput,
    ) -> Result<(), CoreError> {
        let ticker = PortfolioService::normalize_ticker(ticker)?;
        let state = self.portfolio(portfolio)?;
        let auto_price = state.settings.auto_price;
        if !state.holdings.contains_key(&ticker) {
            return Err(CoreError::HoldingNotFound(ticker));
        }

        if input.purchase_price.is_none() && auto_price && input.shares > 0.0 {
            input.purchase_price = self.quotes.price(&ticker).await;
        }

        let state = self
            .portfolios
            .get_mut(portfolio)
            .ok_or_else(|| CoreError::PortfolioNotFound(portfolio.to_string()))?;
        self.portfolio_service.update_holding(state, &ticker, input)?;
        self.dirty = true;
        Ok(())
    }

    /// Record a dividend payment against a holding.
    pub fn record_dividend(
        &mut self,
        portfolio: &str,
        ticker: &str,
        date: NaiveDate,
        amount: f64,
    ) -> Result<(), CoreError> {
        let state = self
            .portfolios
            .get_mut(portfolio)
            .ok_or_else(|| CoreError::PortfolioNotFound(portfolio.to_string()))?;
        self.portfolio_service
            .record_dividend(state, ticker, date, amount)?;
        self.dirty = true;
        Ok(())
    }

    /// Delete a holding. Requires the confirmation text to match the
    /// ticker and the acknowledgement flag to be set.
    /// Returns the removed holding.
    pub fn delete_holding(
        &mut self,
        portfolio: &str,
        ticker: &str,
        confirmation: &str,
        acknowledged: bool,
    ) -> Result<Holding, CoreError> {
        let state = self
            .portfolios
            .get_mut(portfolio)
            .ok_or_else(|| CoreError::PortfolioNotFound(portfolio.to_string()))?;
        let removed =
            self.portfolio_service
                .delete_holding(state, ticker, confirmation, acknowledged)?;
        self.dirty = true;
        Ok(removed)
    }

    /// Get a single holding by ticker.
    pub fn holding(&self, portfolio: &str, ticker: &str) -> Result<Option<&Holding>, CoreError> {
        let ticker = PortfolioService::normalize_ticker(ticker)?;
        Ok(self.portfolio(portfolio)?.holdings.get(&ticker))
    }

    pub fn holding_count(&self, portfolio: &str) -> Result<usize, CoreError> {
        Ok(self.portfolio(portfolio)?.holding_count())
    }

    // ── Valuation ───────────────────────────────────────────────────

    /// Build the valuation table: one row per holding in ticker order,
    /// with resolved prices, derived metrics, and payout labels.
    ///
    /// Price resolution per ticker: live quote (when auto-price is on),
    /// else the last successfully fetched price, else unavailable —
    /// rendered blank and excluded from value sums.
    pub async fn portfolio_rows(&mut self, portfolio: &str) -> Result<Vec<HoldingRow>, CoreError> {
        let state = self.portfolio(portfolio)?;
        let auto_price = state.settings.auto_price;
        let holdings = state.holdings.clone();
        let last_prices = state.last_prices.clone();

        let today = Utc::now().date_naive();
        let mut rows = Vec::with_capacity(holdings.len());

        for (ticker, holding) in &holdings {
            let live = if auto_price {
                self.quotes.price(ticker).await
            } else {
                None
            };
            let price = live.or_else(|| last_prices.get(ticker).copied());

            let history = self.quotes.dividend_history(ticker).await;
            let payout = self.payout_classifier.classify(&history, today);
            let metrics = self.valuation.value(holding, price);

            rows.push(HoldingRow {
                ticker: ticker.clone(),
                name: holding.name.clone(),
                payout,
                shares: holding.shares,
                purchase_price: holding.purchase_price,
                total_invested: holding.total_invested,
                price,
                dividends_collected: holding.dividends_collected,
                last_div_amount: holding.last_div_amount,
                last_div_date: holding.last_div_date,
                metrics,
            });
        }

        Ok(rows)
    }

    /// Portfolio-level totals: invested, partial value, dividends,
    /// overall return, and the portfolio True ADA block.
    pub async fn portfolio_totals(&mut self, portfolio: &str) -> Result<PortfolioTotals, CoreError> {
        let rows = self.portfolio_rows(portfolio).await?;
        let cash = self.portfolio(portfolio)?.cash_uninvested;
        Ok(self.aggregator.totals(cash, &rows))
    }

    /// Dividend overview: cumulative and last-dividend columns per
    /// ticker, in ticker order.
    pub fn dividend_rows(&self, portfolio: &str) -> Result<Vec<DividendRow>, CoreError> {
        Ok(self
            .portfolio(portfolio)?
            .holdings
            .iter()
            .map(|(ticker, h)| DividendRow {
                ticker: ticker.clone(),
                dividends_collected: h.dividends_collected,
                last_div_amount: h.last_div_amount,
                last_div_date: h.last_div_date,
            })
            .collect())
    }

    pub fn total_dividends(&self, portfolio: &str) -> Result<f64, CoreError> {
        Ok(self
            .portfolio(portfolio)?
            .holdings
            .values()
            .map(|h| h.dividends_collected)
            .sum())
    }

    // ── Prices ──────────────────────────────────────────────────────

    /// Re-fetch prices for every held ticker, updating the portfolio's
    /// last-known prices. Invalidates the session price cache first so
    /// stale quotes don't satisfy the refresh. Returns how many tickers
    /// were updated.
    pub async fn refresh_prices(&mut self, portfolio: &str) -> Result<usize, CoreError> {
        let tickers: Vec<String> = self
            .portfolio(portfolio)?
            .holdings
            .keys()
            .cloned()
            .collect();
        self.quotes.invalidate_prices();

        let mut fetched = Vec::new();
        for ticker in tickers {
            if let Some(price) = self.quotes.price(&ticker).await {
                fetched.push((ticker, price));
            }
        }

        let state = self
            .portfolios
            .get_mut(portfolio)
            .ok_or_else(|| CoreError::PortfolioNotFound(portfolio.to_string()))?;
        let updated = fetched.len();
        for (ticker, price) in fetched {
            state.last_prices.insert(ticker, price);
        }
        if updated > 0 {
            state.touch();
            self.dirty = true;
        }
        Ok(updated)
    }

    // ── Cash & Settings ─────────────────────────────────────────────

    pub fn set_cash(&mut self, portfolio: &str, amount: f64) -> Result<(), CoreError> {
        let state = self
            .portfolios
            .get_mut(portfolio)
            .ok_or_else(|| CoreError::PortfolioNotFound(portfolio.to_string()))?;
        self.portfolio_service.set_cash(state, amount)?;
        self.dirty = true;
        Ok(())
    }

    pub fn cash(&self, portfolio: &str) -> Result<f64, CoreError> {
        Ok(self.portfolio(portfolio)?.cash_uninvested)
    }

    /// Set the display currency. Must be a 3-letter alphabetic code.
    pub fn set_currency(&mut self, portfolio: &str, currency: &str) -> Result<(), CoreError> {
        let trimmed = currency.trim().to_uppercase();
        if trimmed.len() != 3 || !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(CoreError::Validation(format!(
                "Invalid currency code '{currency}': must be exactly 3 ASCII letters (e.g., USD, EUR, GBP)"
            )));
        }
        let state = self
            .portfolios
            .get_mut(portfolio)
            .ok_or_else(|| CoreError::PortfolioNotFound(portfolio.to_string()))?;
        state.settings.currency = trimmed;
        state.touch();
        self.dirty = true;
        Ok(())
    }

    /// Toggle live price fetching. When off, valuation uses only the
    /// last-known prices.
    pub fn set_auto_price(&mut self, portfolio: &str, enabled: bool) -> Result<(), CoreError> {
        let state = self
            .portfolios
            .get_mut(portfolio)
            .ok_or_else(|| CoreError::PortfolioNotFound(portfolio.to_string()))?;
        state.settings.auto_price = enabled;
        state.touch();
        self.dirty = true;
        Ok(())
    }

    pub fn settings(&self, portfolio: &str) -> Result<&Settings, CoreError> {
        Ok(&self.portfolio(portfolio)?.settings)
    }

    // ── Export / Restore / Merge ────────────────────────────────────

    /// Export the full portfolio document as JSON — the same field set
    /// as persisted state.
    pub fn export_json(&self, portfolio: &str) -> Result<String, CoreError> {
        StorageManager::to_json(self.portfolio(portfolio)?)
    }

    /// Restore a portfolio from a backup document, replacing the named
    /// portfolio wholesale (creating it if absent). Missing optional
    /// fields are default-filled; the version is re-stamped.
    pub fn restore_from_json(&mut self, portfolio: &str, json: &str) -> Result<(), CoreError> {
        let name = Self::normalize_portfolio_name(portfolio)?;
        let mut restored = StorageManager::from_json(json)?;
        restored.version = DOCUMENT_VERSION.to_string();
        restored.touch();
        self.portfolios.insert(name, restored);
        self.dirty = true;
        Ok(())
    }

    /// Merge holdings from an import document (an older backup file)
    /// into a portfolio. Only the `holdings` map of the document is
    /// consumed. Returns counts of added and updated tickers.
    pub fn merge_from_json(
        &mut self,
        portfolio: &str,
        json: &str,
        mode: MergeMode,
    ) -> Result<MergeReport, CoreError> {
        let doc: ImportDocument = serde_json::from_str(json).map_err(|e| {
            CoreError::Deserialization(format!("Failed to parse import document: {e}"))
        })?;
        self.merge_holdings(portfolio, doc.holdings, mode)
    }

    /// Merge an already-parsed holdings map into a portfolio.
    pub fn merge_holdings(
        &mut self,
        portfolio: &str,
        incoming: BTreeMap<String, Holding>,
        mode: MergeMode,
    ) -> Result<MergeReport, CoreError> {
        let state = self
            .portfolios
            .get_mut(portfolio)
            .ok_or_else(|| CoreError::PortfolioNotFound(portfolio.to_string()))?;
        let report = self.merge_engine.merge(state, incoming, mode);
        if report.added + report.updated > 0 {
            self.dirty = true;
        }
        Ok(report)
    }

    // ── Files ───────────────────────────────────────────────────────

    /// Load a portfolio document from disk under the given name
    /// (native only).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_portfolio_from_file(
        &mut self,
        name: &str,
        path: impl AsRef<std::path::Path>,
    ) -> Result<(), CoreError> {
        let name = Self::normalize_portfolio_name(name)?;
        let portfolio = StorageManager::load_from_file(path)?;
        self.portfolios.insert(name, portfolio);
        Ok(())
    }

    /// Save a portfolio document to disk (native only). Clears the
    /// unsaved-changes flag on success.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_portfolio_to_file(
        &mut self,
        name: &str,
        path: impl AsRef<std::path::Path>,
    ) -> Result<(), CoreError> {
        StorageManager::save_to_file(self.portfolio(name)?, path)?;
        self.dirty = false;
        Ok(())
    }

    // ── Cache & Dirty State ─────────────────────────────────────────

    /// Drop all session-cached quotes so the next valuation re-fetches.
    pub fn clear_quote_cache(&mut self) {
        self.quotes.clear_cache();
    }

    /// Returns `true` if any portfolio has been modified since the last
    /// save or load.
    #[must_use]
    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty
    }

    // ── Internal ────────────────────────────────────────────────────

    fn normalize_portfolio_name(raw: &str) -> Result<String, CoreError> {
        let name = raw.trim();
        if name.is_empty() {
            return Err(CoreError::Validation(
                "Portfolio name must not be empty".into(),
            ));
        }
        Ok(name.to_string())
    }
}
