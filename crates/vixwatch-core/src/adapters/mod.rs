mod cboe;
mod cnbc;
mod investing;
mod yahoo;

pub use cboe::CboeAdapter;
pub use cnbc::CnbcAdapter;
pub use investing::InvestingAdapter;
pub use yahoo::{YahooDailyAdapter, YahooDirectAdapter, YahooIntradayAdapter};

use crate::data_source::FailureReason;
use crate::http_client::{HttpClient, HttpRequest};

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
(KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// Issues one request and returns the body of a 2xx response.
async fn fetch_body(
    client: &dyn HttpClient,
    request: HttpRequest,
) -> Result<String, FailureReason> {
    let response = client.execute(request).await?;
    if !response.is_success() {
        return Err(FailureReason::http(response.status));
    }
    Ok(response.body)
}

/// Headers that make a request look like an ordinary desktop browser visit.
fn with_browser_headers(request: HttpRequest, referer: &str) -> HttpRequest {
    request
        .with_header("user-agent", BROWSER_USER_AGENT)
        .with_header(
            "accept",
            "text/html,application/xhtml+xml,application/json;q=0.9,*/*;q=0.8",
        )
        .with_header("accept-language", "en-US,en;q=0.9")
        .with_header("referer", referer)
}

/// Parses a provider-formatted decimal such as `"17.25"` or `"1,234.50"`.
fn parse_decimal(raw: &str) -> Result<f64, FailureReason> {
    let cleaned = raw.trim().replace(',', "");
    cleaned
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| {
            FailureReason::parse(format!("could not parse '{}' as a number", raw.trim()))
        })
}
