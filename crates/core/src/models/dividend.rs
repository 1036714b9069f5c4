use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single historical dividend event (per-share amount on a date),
/// as reported by the market data provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DividendEvent {
    pub date: NaiveDate,
    pub amount: f64,
}
