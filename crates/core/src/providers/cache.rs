use chrono::{DateTime, Utc};
use std::collections::HashMap;

use crate::models::dividend::DividendEvent;

/// A successfully fetched price and when it was fetched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CachedPrice {
    pub price: f64,
    pub fetched_at: DateTime<Utc>,
}

/// Session-scoped cache of provider results, keyed by uppercase ticker.
///
/// Bounds external calls: each ticker is fetched at most once per
/// session unless explicitly invalidated (the "refresh" action). A
/// cache hit is always preferred over re-fetching, and therefore over
/// a potentially unavailable result. Entries have no TTL beyond the
/// session; the cache is never persisted.
#[derive(Debug, Default)]
pub struct QuoteCache {
    prices: HashMap<String, CachedPrice>,
    dividends: HashMap<String, Vec<DividendEvent>>,
    profiles: HashMap<String, (String, String)>,
}

impl QuoteCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn price(&self, ticker: &str) -> Option<CachedPrice> {
        self.prices.get(&ticker.to_uppercase()).copied()
    }

    pub fn set_price(&mut self, ticker: &str, price: f64) {
        self.prices.insert(
            ticker.to_uppercase(),
            CachedPrice {
                price,
                fetched_at: Utc::now(),
            },
        );
    }

    #[must_use]
    pub fn dividends(&self, ticker: &str) -> Option<&[DividendEvent]> {
        self.dividends.get(&ticker.to_uppercase()).map(Vec::as_slice)
    }

    pub fn set_dividends(&mut self, ticker: &str, events: Vec<DividendEvent>) {
        self.dividends.insert(ticker.to_uppercase(), events);
    }

    #[must_use]
    pub fn profile(&self, ticker: &str) -> Option<&(String, String)> {
        self.profiles.get(&ticker.to_uppercase())
    }

    pub fn set_profile(&mut self, ticker: &str, name: String, summary: String) {
        self.profiles.insert(ticker.to_uppercase(), (name, summary));
    }

    /// Drop everything cached for one ticker.
    pub fn invalidate(&mut self, ticker: &str) {
        let key = ticker.to_uppercase();
        self.prices.remove(&key);
        self.dividends.remove(&key);
        self.profiles.remove(&key);
    }

    /// Drop all cached prices, keeping dividend histories and profiles.
    /// Used by the explicit refresh action.
    pub fn invalidate_prices(&mut self) {
        self.prices.clear();
    }

    pub fn clear(&mut self) {
        self.prices.clear();
        self.dividends.clear();
        self.profiles.clear();
    }

    #[must_use]
    pub fn price_count(&self) -> usize {
        self.prices.len()
    }
}
