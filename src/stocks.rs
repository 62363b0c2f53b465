//! Ticker normalization and single-day price fetching.
//!
//! This module handles:
//! - Qualifying raw tickers with an Indian exchange suffix
//! - Fetching one day's open/close from the Yahoo Finance chart API
//! - Turning every fetch problem into a per-ticker `FetchError`

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde_json::Value;
use tracing::debug;

use crate::error::{AppError, FetchError};

const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// Open and close for one trading day. Either side may be missing in the feed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyPrice {
    pub open: Option<f64>,
    pub close: Option<f64>,
}

pub type PriceOutcome = Result<DailyPrice, FetchError>;

/// Map a raw ticker to an exchange-qualified symbol.
///
/// Anything already ending in `NS` or `BO` is taken as NSE/BSE qualified and
/// kept as is; everything else defaults to NSE. The test is a plain suffix
/// match, so `XNS` is also left alone.
pub fn normalize_ticker(raw: &str) -> String {
    if raw.ends_with("NS") || raw.ends_with("BO") {
        raw.to_string()
    } else {
        format!("{}.NS", raw)
    }
}

/// A market-data provider that can price one symbol for one day.
#[async_trait]
pub trait PriceSource: Send + Sync {
    async fn fetch_day(&self, symbol: &str, date: NaiveDate) -> PriceOutcome;
}

pub struct YahooChart {
    client: reqwest::Client,
    base_url: String,
}

impl YahooChart {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, AppError> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Query range covering `date` only: its first and last second in UTC.
    fn day_url(&self, symbol: &str, date: NaiveDate) -> String {
        let start = date.and_hms_opt(0, 0, 0).map(|d| d.and_utc().timestamp()).unwrap_or_default();
        let end = start + 86_399;
        format!(
            "{}/{}?period1={}&period2={}&interval=1d",
            self.base_url, symbol, start, end
        )
    }
}

#[async_trait]
impl PriceSource for YahooChart {
    async fn fetch_day(&self, symbol: &str, date: NaiveDate) -> PriceOutcome {
        let url = self.day_url(symbol, date);
        debug!("[API] GET {}", url);

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = resp.status();
        let text = resp.text().await.map_err(|e| FetchError::Network(e.to_string()))?;

        // Yahoo reports unknown symbols as 404 with a chart.error body; prefer its description.
        let json = serde_json::from_str::<Value>(&text).ok();
        if let Some(description) = json.as_ref().and_then(provider_error) {
            return Err(FetchError::Provider(description));
        }
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                body: text.chars().take(200).collect(),
            });
        }

        let json = json.ok_or_else(|| FetchError::Parse("body is not JSON".to_string()))?;
        extract_day_prices(&json)
    }
}

/// Pull `chart.error.description` (or the error code) out of a chart response.
fn provider_error(json: &Value) -> Option<String> {
    let error = &json["chart"]["error"];
    if error.is_null() {
        return None;
    }
    error["description"]
        .as_str()
        .or_else(|| error["code"].as_str())
        .map(|s| s.to_string())
        .or_else(|| Some(error.to_string()))
}

/// Extract the first bar with an open or a close from a chart response.
pub fn extract_day_prices(json: &Value) -> PriceOutcome {
    let result = json["chart"]["result"]
        .as_array()
        .and_then(|r| r.first())
        .ok_or_else(|| FetchError::Parse("missing chart.result".to_string()))?;

    // A day without trading comes back as a result with no timestamps.
    let bars = result["timestamp"].as_array().map(|t| t.len()).unwrap_or(0);
    if bars == 0 {
        return Err(FetchError::NoData);
    }

    let quote = result["indicators"]["quote"]
        .as_array()
        .and_then(|q| q.first())
        .ok_or_else(|| FetchError::Parse("missing indicators.quote".to_string()))?;

    let opens = quote["open"].as_array();
    let closes = quote["close"].as_array();

    (0..bars)
        .map(|i| DailyPrice {
            open: opens.and_then(|o| o.get(i)).and_then(|v| v.as_f64()),
            close: closes.and_then(|c| c.get(i)).and_then(|v| v.as_f64()),
        })
        .find(|p| p.open.is_some() || p.close.is_some())
        .ok_or(FetchError::NoData)
}
