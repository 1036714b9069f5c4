use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::dividend::DividendEvent;

/// Trait abstraction for market data sources.
///
/// The rest of the library only ever talks to this trait; swapping the
/// data source (or mocking it in tests) touches nothing else. Every
/// call may fail — callers in the quote layer degrade failures to
/// "unavailable" rather than surfacing them.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait QuoteProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Last traded price for a ticker.
    async fn current_price(&self, ticker: &str) -> Result<f64, CoreError>;

    /// Historical dividend events, oldest first, covering roughly the
    /// trailing three years (enough for payout classification).
    async fn dividend_history(&self, ticker: &str) -> Result<Vec<DividendEvent>, CoreError>;

    /// Company name and business summary for display.
    async fn profile(&self, ticker: &str) -> Result<(String, String), CoreError>;
}
