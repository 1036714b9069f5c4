use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::holding::Holding;
use super::settings::Settings;

/// Document format version stamped on save and restore.
pub const DOCUMENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// The main data container. This struct IS the persisted JSON document:
/// serializing it yields the backup/export format, and deserializing a
/// backup default-fills any fields an older document is missing.
///
/// `BTreeMap` keeps holdings and cached prices in ticker order, so
/// iteration, table rows, and exported JSON are all deterministic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    /// Holdings keyed by uppercase ticker.
    #[serde(default)]
    pub holdings: BTreeMap<String, Holding>,

    /// Cash not currently invested. Counts toward overall return.
    #[serde(default)]
    pub cash_uninvested: f64,

    /// Display currency and auto-price flag.
    #[serde(default)]
    pub settings: Settings,

    /// Last successfully fetched price per ticker. Used as the fallback
    /// when a live quote is unavailable.
    #[serde(default)]
    pub last_prices: BTreeMap<String, f64>,

    /// When the portfolio was last mutated.
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,

    /// Document format version.
    #[serde(default = "current_version")]
    pub version: String,
}

fn current_version() -> String {
    DOCUMENT_VERSION.to_string()
}

impl Default for Portfolio {
    fn default() -> Self {
        Self {
            holdings: BTreeMap::new(),
            cash_uninvested: 0.0,
            settings: Settings::default(),
            last_prices: BTreeMap::new(),
            last_updated: None,
            version: current_version(),
        }
    }
}

impl Portfolio {
    /// Stamp the mutation time. Called by every committed mutation.
    pub fn touch(&mut self) {
        self.last_updated = Some(Utc::now());
    }

    #[must_use]
    pub fn holding_count(&self) -> usize {
        self.holdings.len()
    }

    /// Tickers in sorted order.
    #[must_use]
    pub fn tickers(&self) -> Vec<&str> {
        self.holdings.keys().map(String::as_str).collect()
    }
}
