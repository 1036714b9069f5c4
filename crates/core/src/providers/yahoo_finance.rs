use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use time::OffsetDateTime;

use super::traits::QuoteProvider;
use crate::errors::CoreError;
use crate::models::dividend::DividendEvent;

const PROVIDER: &str = "Yahoo Finance";
const QUOTE_SUMMARY_URL: &str = "https://query2.finance.yahoo.com/v10/finance/quoteSummary";

/// Dividend history window fetched for payout classification.
const HISTORY_DAYS: i64 = 3 * 365;

/// Business summaries are truncated to this many characters for display.
const SUMMARY_MAX_LEN: usize = 500;

/// Yahoo Finance provider for quotes, dividend history, and company
/// profiles.
///
/// - **Free**: No API key required.
/// - **Coverage**: Global equities, ETFs, indices, mutual funds.
///
/// Quotes and dividend events come through the `yahoo_finance_api`
/// crate; the business summary comes from the quoteSummary endpoint
/// directly. Not WASM-compatible (native reqwest/tokio connectors).
pub struct YahooFinanceProvider {
    connector: yahoo_finance_api::YahooConnector,
    client: Client,
}

impl YahooFinanceProvider {
    pub fn new() -> Result<Self, CoreError> {
        let connector = yahoo_finance_api::YahooConnector::new().map_err(|e| CoreError::Api {
            provider: PROVIDER.into(),
            message: format!("Failed to create connector: {e}"),
        })?;
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());
        Ok(Self { connector, client })
    }

    /// Convert a unix timestamp (seconds) to `chrono::NaiveDate`.
    fn timestamp_to_naive_date(ts: i64) -> Option<NaiveDate> {
        chrono::DateTime::from_timestamp(ts, 0).map(|dt| dt.date_naive())
    }

    async fn fetch_summary(&self, ticker: &str) -> Result<String, CoreError> {
        let url = format!("{QUOTE_SUMMARY_URL}/{ticker}?modules=assetProfile");

        let resp: QuoteSummaryResponse = self
            .client
            .get(&url)
            .send()
            .await?
            .json()
            .await
            .map_err(|e| CoreError::Api {
                provider: PROVIDER.into(),
                message: format!("Failed to parse profile for {ticker}: {e}"),
            })?;

        let summary = resp
            .quote_summary
            .result
            .and_then(|r| r.into_iter().next())
            .and_then(|r| r.asset_profile)
            .and_then(|p| p.long_business_summary)
            .unwrap_or_default();

        if summary.chars().count() > SUMMARY_MAX_LEN {
            let truncated: String = summary.chars().take(SUMMARY_MAX_LEN).collect();
            Ok(format!("{truncated}…"))
        } else {
            Ok(summary)
        }
    }
}

// ── quoteSummary response types ─────────────────────────────────────

#[derive(Deserialize)]
struct QuoteSummaryResponse {
    #[serde(rename = "quoteSummary")]
    quote_summary: QuoteSummaryBody,
}

#[derive(Deserialize)]
struct QuoteSummaryBody {
    result: Option<Vec<QuoteSummaryResult>>,
}

#[derive(Deserialize)]
struct QuoteSummaryResult {
    #[serde(rename = "assetProfile")]
    asset_profile: Option<AssetProfile>,
}

#[derive(Deserialize)]
struct AssetProfile {
    #[serde(rename = "longBusinessSummary")]
    long_business_summary: Option<String>,
}

#[async_trait]
impl QuoteProvider for YahooFinanceProvider {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn current_price(&self, ticker: &str) -> Result<f64, CoreError> {
        let resp = self
            .connector
            .get_latest_quotes(ticker, "1d")
            .await
            .map_err(|e| CoreError::Api {
                provider: PROVIDER.into(),
                message: format!("Failed to fetch latest quote for {ticker}: {e}"),
            })?;

        let quote = resp.last_quote().map_err(|e| CoreError::Api {
            provider: PROVIDER.into(),
            message: format!("No quote data for {ticker}: {e}"),
        })?;

        Ok(quote.close)
    }

    async fn dividend_history(&self, ticker: &str) -> Result<Vec<DividendEvent>, CoreError> {
        let end = OffsetDateTime::now_utc();
        let start = end - time::Duration::days(HISTORY_DAYS);

        let resp = self
            .connector
            .get_quote_history(ticker, start, end)
            .await
            .map_err(|e| CoreError::Api {
                provider: PROVIDER.into(),
                message: format!("Failed to fetch history for {ticker}: {e}"),
            })?;

        let dividends = resp.dividends().map_err(|e| CoreError::Api {
            provider: PROVIDER.into(),
            message: format!("Failed to parse dividends for {ticker}: {e}"),
        })?;

        let mut events: Vec<DividendEvent> = dividends
            .iter()
            .filter_map(|d| {
                Self::timestamp_to_naive_date(d.date as i64).map(|date| DividendEvent {
                    date,
                    amount: d.amount,
                })
            })
            .collect();
        events.sort_by_key(|e| e.date);

        Ok(events)
    }

    async fn profile(&self, ticker: &str) -> Result<(String, String), CoreError> {
        let search = self
            .connector
            .search_ticker(ticker)
            .await
            .map_err(|e| CoreError::Api {
                provider: PROVIDER.into(),
                message: format!("Failed to look up {ticker}: {e}"),
            })?;

        let name = search
            .quotes
            .iter()
            .find(|q| q.symbol.eq_ignore_ascii_case(ticker))
            .map(|q| {
                if q.long_name.is_empty() {
                    q.short_name.clone()
                } else {
                    q.long_name.clone()
                }
            })
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| ticker.to_uppercase());

        // The summary is best-effort; a failed profile fetch still yields
        // a usable (name, "") pair.
        let summary = self.fetch_summary(ticker).await.unwrap_or_default();

        Ok((name, summary))
    }
}
