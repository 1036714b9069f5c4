use tracing::{debug, warn};

use crate::errors::CoreError;
use crate::models::dividend::DividendEvent;
use crate::providers::cache::QuoteCache;
use crate::providers::traits::QuoteProvider;

/// Fetches quotes, dividend histories, and company profiles through a
/// provider, with a session-scoped cache in front.
///
/// Failure policy: a cache hit is always preferred over a fetch; a
/// failed or invalid fetch degrades to "unavailable" (`None` / empty /
/// ticker-only profile) instead of erroring — callers decide what a
/// missing value means. Prices must be finite and positive to be
/// accepted.
pub struct QuoteService {
    provider: Box<dyn QuoteProvider>,
    cache: QuoteCache,
}

impl QuoteService {
    pub fn new(provider: Box<dyn QuoteProvider>) -> Self {
        Self {
            provider,
            cache: QuoteCache::new(),
        }
    }

    /// Convenience constructor wired to Yahoo Finance.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn with_yahoo() -> Result<Self, CoreError> {
        let provider = crate::providers::yahoo_finance::YahooFinanceProvider::new()?;
        Ok(Self::new(Box::new(provider)))
    }

    #[must_use]
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Current price for a ticker, or `None` when no valid price could
    /// be fetched this session.
    pub async fn price(&mut self, ticker: &str) -> Option<f64> {
        let ticker = ticker.to_uppercase();

        if let Some(hit) = self.cache.price(&ticker) {
            debug!(%ticker, price = hit.price, "price cache hit");
            return Some(hit.price);
        }

        match self.provider.current_price(&ticker).await {
            Ok(price) if price.is_finite() && price > 0.0 => {
                self.cache.set_price(&ticker, price);
                Some(price)
            }
            Ok(price) => {
                warn!(%ticker, price, "provider returned an invalid price");
                None
            }
            Err(e) => {
                warn!(%ticker, error = %e, "price fetch failed");
                None
            }
        }
    }

    /// Dividend event history for a ticker, oldest first. Fails soft to
    /// an empty history.
    pub async fn dividend_history(&mut self, ticker: &str) -> Vec<DividendEvent> {
        let ticker = ticker.to_uppercase();

        if let Some(hit) = self.cache.dividends(&ticker) {
            debug!(%ticker, events = hit.len(), "dividend cache hit");
            return hit.to_vec();
        }

        match self.provider.dividend_history(&ticker).await {
            Ok(events) => {
                self.cache.set_dividends(&ticker, events.clone());
                events
            }
            Err(e) => {
                warn!(%ticker, error = %e, "dividend history fetch failed");
                Vec::new()
            }
        }
    }

    /// Company name and summary. Fails soft to `(ticker, "")`.
    pub async fn profile(&mut self, ticker: &str) -> (String, String) {
        let ticker = ticker.to_uppercase();

        if let Some((name, summary)) = self.cache.profile(&ticker) {
            return (name.clone(), summary.clone());
        }

        match self.provider.profile(&ticker).await {
            Ok((name, summary)) => {
                self.cache
                    .set_profile(&ticker, name.clone(), summary.clone());
                (name, summary)
            }
            Err(e) => {
                warn!(%ticker, error = %e, "profile fetch failed");
                (ticker, String::new())
            }
        }
    }

    /// Drop everything cached for one ticker.
    pub fn invalidate(&mut self, ticker: &str) {
        self.cache.invalidate(ticker);
    }

    /// Drop all cached prices so the next lookup re-fetches. The
    /// explicit "refresh" action.
    pub fn invalidate_prices(&mut self) {
        self.cache.invalidate_prices();
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    #[must_use]
    pub fn cached_price_count(&self) -> usize {
        self.cache.price_count()
    }
}
