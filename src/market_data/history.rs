// =============================================================================
// Historical market data client — daily klines over REST
// =============================================================================
//
// Fetches the multi-year daily OHLCV history for one symbol from the exchange
// REST API, paginating until the span is covered.  The provider encodes kline
// prices and volumes as JSON strings, so every numeric field goes through a
// tolerant string-or-number parser.
//
// Fetching is the only asynchronous part of the program; everything after it
// is a pure pass over the in-memory series.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info};

use crate::market_data::bars::{BarSeries, DailyBar};

/// Klines returned per request; the provider caps a single page at 1000.
const PAGE_LIMIT: usize = 1000;

/// One daily kline step in provider timestamps.
const DAY_MS: i64 = 86_400_000;

/// REST client for the daily-history endpoint.
#[derive(Clone)]
pub struct HistoryClient {
    base_url: String,
    client: reqwest::Client,
}

impl HistoryClient {
    /// Create a client against the default exchange endpoint, or the base URL
    /// from `CHARTMARK_DATA_URL` when set.
    pub fn new() -> Self {
        let base_url = std::env::var("CHARTMARK_DATA_URL")
            .unwrap_or_else(|_| "https://api.binance.com".to_string());

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .expect("failed to build reqwest client");

        debug!(base_url = %base_url, "HistoryClient initialised");

        Self { base_url, client }
    }

    /// Fetch `years` of daily bars for `symbol`, oldest first.
    ///
    /// Pages through the kline endpoint until the span is exhausted. The most
    /// recent kline may still be forming; it is returned as-is and it is the
    /// caller's business to exclude it from analysis windows.
    pub async fn daily_history(&self, symbol: &str, years: u32) -> Result<BarSeries> {
        let symbol = symbol.to_uppercase();
        let end_ms = Utc::now().timestamp_millis();
        let mut next_start = (Utc::now() - Duration::days(365 * i64::from(years)))
            .timestamp_millis();

        let mut bars: Vec<DailyBar> = Vec::new();

        loop {
            let url = format!(
                "{}/api/v3/klines?symbol={}&interval=1d&startTime={}&limit={}",
                self.base_url, symbol, next_start, PAGE_LIMIT
            );
            debug!(url = %url, "requesting daily klines");

            let resp = self
                .client
                .get(&url)
                .send()
                .await
                .context("daily kline request failed")?;

            let status = resp.status();
            if !status.is_success() {
                let body = resp.text().await.unwrap_or_default();
                bail!("daily kline request for {symbol} returned {status}: {body}");
            }

            let rows: Vec<serde_json::Value> = resp
                .json()
                .await
                .context("failed to parse kline response")?;

            if rows.is_empty() {
                break;
            }

            let page_len = rows.len();
            let mut last_open = next_start;
            for row in &rows {
                let (open_time, bar) = parse_kline_row(row)?;
                last_open = open_time;
                bars.push(bar);
            }

            next_start = last_open + DAY_MS;
            if page_len < PAGE_LIMIT || next_start > end_ms {
                break;
            }
        }

        if bars.is_empty() {
            bail!("no daily history returned for {symbol}");
        }

        info!(symbol = %symbol, bars = bars.len(), "daily history fetched");
        BarSeries::from_bars(bars)
    }
}

impl Default for HistoryClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse one kline row from the REST response.
///
/// Expected shape (positional array):
/// ```json
/// [1700000000000, "37000.0", "37050.0", "36990.0", "37020.0", "123.4", ...]
/// ```
fn parse_kline_row(row: &serde_json::Value) -> Result<(i64, DailyBar)> {
    let fields = row.as_array().context("kline row is not an array")?;

    let open_time = fields
        .first()
        .and_then(|v| v.as_i64())
        .context("missing kline open time")?;

    let date = DateTime::from_timestamp_millis(open_time)
        .context("kline open time out of range")?
        .date_naive();

    let field = |i: usize, name: &'static str| -> Result<f64> {
        parse_string_f64(fields.get(i).unwrap_or(&serde_json::Value::Null), name)
    };

    let bar = DailyBar {
        date,
        open: field(1, "open")?,
        high: field(2, "high")?,
        low: field(3, "low")?,
        close: field(4, "close")?,
        volume: field(5, "volume")?,
    };

    Ok((open_time, bar))
}

/// Helper: the provider sends numeric values as JSON strings inside klines.
fn parse_string_f64(val: &serde_json::Value, name: &str) -> Result<f64> {
    match val {
        serde_json::Value::String(s) => s
            .parse::<f64>()
            .with_context(|| format!("failed to parse {name} as f64: {s}")),
        serde_json::Value::Number(n) => n
            .as_f64()
            .with_context(|| format!("field {name} is not a valid f64")),
        _ => anyhow::bail!("field {name} has unexpected JSON type"),
    }
}
