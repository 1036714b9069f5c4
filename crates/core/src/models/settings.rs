use serde::{Deserialize, Serialize};

/// Per-portfolio settings, stored inside the persisted document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Display currency label (e.g. "USD"). Display only — no FX
    /// conversion is performed.
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Whether to fetch live prices from the provider. When disabled,
    /// valuation falls back to the portfolio's `last_prices` map.
    #[serde(default = "default_auto_price")]
    pub auto_price: bool,
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_auto_price() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            auto_price: default_auto_price(),
        }
    }
}
