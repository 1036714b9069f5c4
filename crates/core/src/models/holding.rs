use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// One position in a portfolio, keyed by its uppercase ticker.
///
/// Every field carries a serde default so records imported from older
/// backup documents are filled in rather than rejected.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Holding {
    /// Company name (display only, not used in calculations).
    #[serde(default)]
    pub name: String,

    /// Shares held. Non-negative; zero only when `total_invested` is zero.
    #[serde(default)]
    pub shares: f64,

    /// Per-share cost. When present, `shares × purchase_price` is the
    /// committed cost basis; when absent, `total_invested` is authoritative.
    #[serde(default)]
    pub purchase_price: Option<f64>,

    /// Total cost basis in currency units. Never negative.
    #[serde(default)]
    pub total_invested: f64,

    /// Cumulative dividend cash received.
    #[serde(default)]
    pub dividends_collected: f64,

    /// Business summary (display only).
    #[serde(default)]
    pub summary: String,

    /// Amount of the most recent dividend entry. Informational — already
    /// included in `dividends_collected` when entered.
    #[serde(default)]
    pub last_div_amount: f64,

    /// Date of the most recent dividend entry. Older documents store an
    /// empty string here, which deserializes to `None`.
    #[serde(default, deserialize_with = "de_last_div_date")]
    pub last_div_date: Option<NaiveDate>,
}

/// User-entered numeric fields for creating or replacing a holding.
/// Descriptive metadata (`name`, `summary`) and the last-dividend pair
/// are managed separately.
#[derive(Debug, Clone, Default)]
pub struct HoldingInput {
    pub shares: f64,
    pub purchase_price: Option<f64>,
    pub total_invested: f64,
    pub dividends_collected: f64,
}

/// Accepts `null`, `""`, or `"YYYY-MM-DD"`.
fn de_last_div_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    match raw {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(s)) => {
            let s = s.trim();
            if s.is_empty() {
                Ok(None)
            } else {
                s.parse::<NaiveDate>().map(Some).map_err(serde::de::Error::custom)
            }
        }
        Some(other) => Err(serde::de::Error::custom(format!(
            "invalid dividend date: {other}"
        ))),
    }
}
