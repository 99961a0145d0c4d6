use std::sync::Arc;

use serde::Deserialize;

use super::{fetch_body, with_browser_headers};
use crate::data_source::{FailureReason, FetchFuture, IndexSource};
use crate::http_client::{HttpClient, HttpRequest};
use crate::{latest_point, SeriesPoint, SourceId};

const VIX_SYMBOL: &str = "^VIX";
const PRIMARY_HOST: &str = "https://query1.finance.yahoo.com";
const DIRECT_HOST: &str = "https://query2.finance.yahoo.com";

fn chart_url(host: &str, range: &str, interval: &str) -> String {
    format!(
        "{host}/v8/finance/chart/{}?range={range}&interval={interval}",
        urlencoding::encode(VIX_SYMBOL)
    )
}

// ============================================================================
// Intraday (1m bars over the current session)
// ============================================================================

/// Yahoo chart API, one-minute bars for the current day.
#[derive(Clone)]
pub struct YahooIntradayAdapter {
    http_client: Arc<dyn HttpClient>,
    timeout_ms: u64,
}

impl YahooIntradayAdapter {
    pub fn new(http_client: Arc<dyn HttpClient>, timeout_ms: u64) -> Self {
        Self {
            http_client,
            timeout_ms,
        }
    }

    fn request(&self) -> HttpRequest {
        HttpRequest::get(chart_url(PRIMARY_HOST, "1d", "1m")).with_timeout_ms(self.timeout_ms)
    }
}

impl IndexSource for YahooIntradayAdapter {
    fn id(&self) -> SourceId {
        SourceId::YahooIntraday
    }

    fn fetch(&self) -> FetchFuture<'_> {
        Box::pin(async move {
            let body = fetch_body(self.http_client.as_ref(), self.request()).await?;
            parse_chart_close(&body)
        })
    }
}

// ============================================================================
// Daily history (last five sessions)
// ============================================================================

/// Yahoo chart API, daily bars over the last five sessions.
#[derive(Clone)]
pub struct YahooDailyAdapter {
    http_client: Arc<dyn HttpClient>,
    timeout_ms: u64,
}

impl YahooDailyAdapter {
    pub fn new(http_client: Arc<dyn HttpClient>, timeout_ms: u64) -> Self {
        Self {
            http_client,
            timeout_ms,
        }
    }

    fn request(&self) -> HttpRequest {
        HttpRequest::get(chart_url(PRIMARY_HOST, "5d", "1d")).with_timeout_ms(self.timeout_ms)
    }
}

impl IndexSource for YahooDailyAdapter {
    fn id(&self) -> SourceId {
        SourceId::YahooDaily
    }

    fn fetch(&self) -> FetchFuture<'_> {
        Box::pin(async move {
            let body = fetch_body(self.http_client.as_ref(), self.request()).await?;
            parse_chart_close(&body)
        })
    }
}

// ============================================================================
// Direct call with browser headers
// ============================================================================

/// Secondary Yahoo host called with browser-like headers, preferring `regularMarketPrice`.
#[derive(Clone)]
pub struct YahooDirectAdapter {
    http_client: Arc<dyn HttpClient>,
    timeout_ms: u64,
}

impl YahooDirectAdapter {
    pub fn new(http_client: Arc<dyn HttpClient>, timeout_ms: u64) -> Self {
        Self {
            http_client,
            timeout_ms,
        }
    }

    fn request(&self) -> HttpRequest {
        let request =
            HttpRequest::get(chart_url(DIRECT_HOST, "1d", "5m")).with_timeout_ms(self.timeout_ms);
        with_browser_headers(request, "https://finance.yahoo.com/quote/%5EVIX/")
    }
}

impl IndexSource for YahooDirectAdapter {
    fn id(&self) -> SourceId {
        SourceId::YahooDirect
    }

    fn fetch(&self) -> FetchFuture<'_> {
        Box::pin(async move {
            let body = fetch_body(self.http_client.as_ref(), self.request()).await?;
            parse_chart_market_price(&body)
        })
    }
}

// ============================================================================
// Chart payload parsing
// ============================================================================

/// Latest non-null close in a chart payload, selected by timestamp.
pub(crate) fn parse_chart_close(body: &str) -> Result<f64, FailureReason> {
    let result = parse_chart(body)?;
    latest_close(&result)
}

/// `meta.regularMarketPrice` when present, otherwise the latest close.
pub(crate) fn parse_chart_market_price(body: &str) -> Result<f64, FailureReason> {
    let result = parse_chart(body)?;
    match result
        .meta
        .as_ref()
        .and_then(|meta| meta.regular_market_price)
    {
        Some(price) if price.is_finite() => Ok(price),
        _ => latest_close(&result),
    }
}

fn parse_chart(body: &str) -> Result<YahooChartResult, FailureReason> {
    let response: YahooChartResponse = serde_json::from_str(body)
        .map_err(|e| FailureReason::shape(format!("unexpected yahoo chart payload: {e}")))?;

    if let Some(error) = response.chart.error.filter(|value| !value.is_null()) {
        let description = error
            .get("description")
            .and_then(serde_json::Value::as_str)
            .map(str::to_owned)
            .unwrap_or_else(|| error.to_string());
        return Err(FailureReason::shape(format!(
            "yahoo chart API error: {description}"
        )));
    }

    response
        .chart
        .result
        .unwrap_or_default()
        .into_iter()
        .next()
        .ok_or_else(|| FailureReason::shape("no chart result in yahoo response"))
}

fn latest_close(result: &YahooChartResult) -> Result<f64, FailureReason> {
    let timestamps = result
        .timestamp
        .as_deref()
        .filter(|timestamps| !timestamps.is_empty())
        .ok_or_else(|| FailureReason::shape("yahoo chart series has no timestamps"))?;
    let closes = result
        .indicators
        .quote
        .first()
        .map(|quote| quote.close.as_slice())
        .ok_or_else(|| FailureReason::shape("yahoo chart series has no quote block"))?;

    let points = timestamps
        .iter()
        .zip(closes)
        .map(|(&timestamp, &close)| SeriesPoint::new(timestamp, close));

    let point = latest_point(points)
        .ok_or_else(|| FailureReason::shape("yahoo chart series has no closing prices"))?;
    match point.bar_time() {
        Some(bar_time) => tracing::debug!(%bar_time, "selected latest yahoo bar"),
        None => tracing::debug!(
            timestamp = point.timestamp,
            "latest yahoo bar has no calendar time"
        ),
    }

    point
        .value
        .ok_or_else(|| FailureReason::shape("yahoo chart series has no closing prices"))
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartResponse {
    chart: YahooChartData,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartData {
    #[serde(default)]
    result: Option<Vec<YahooChartResult>>,
    #[serde(default)]
    error: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartResult {
    #[serde(default)]
    meta: Option<YahooChartMeta>,
    #[serde(default)]
    timestamp: Option<Vec<i64>>,
    indicators: YahooChartIndicators,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartMeta {
    #[serde(rename = "regularMarketPrice", default)]
    regular_market_price: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartIndicators {
    #[serde(default)]
    quote: Vec<YahooChartQuote>,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartQuote {
    #[serde(default)]
    close: Vec<Option<f64>>,
}
