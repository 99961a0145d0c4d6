use std::sync::{Arc, LazyLock};

use regex::Regex;

use super::{fetch_body, parse_decimal, with_browser_headers};
use crate::data_source::{FailureReason, FetchFuture, IndexSource};
use crate::http_client::{HttpClient, HttpRequest};
use crate::SourceId;

const INDEX_PAGE: &str = "https://www.investing.com/indices/volatility-s-p-500";

static PRICE_LAST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"data-test="instrument-price-last"[^>]*>([^<]*)<"#)
        .expect("static pattern is valid")
});

// Pre-2022 page layout.
static LEGACY_LAST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"id="last_last"[^>]*>([^<]*)<"#).expect("static pattern is valid")
});

/// Scrapes the Investing.com CBOE Volatility Index page.
#[derive(Clone)]
pub struct InvestingAdapter {
    http_client: Arc<dyn HttpClient>,
    timeout_ms: u64,
}

impl InvestingAdapter {
    pub fn new(http_client: Arc<dyn HttpClient>, timeout_ms: u64) -> Self {
        Self {
            http_client,
            timeout_ms,
        }
    }

    fn request(&self) -> HttpRequest {
        with_browser_headers(
            HttpRequest::get(INDEX_PAGE).with_timeout_ms(self.timeout_ms),
            "https://www.investing.com/",
        )
    }
}

impl IndexSource for InvestingAdapter {
    fn id(&self) -> SourceId {
        SourceId::Investing
    }

    fn fetch(&self) -> FetchFuture<'_> {
        Box::pin(async move {
            let body = fetch_body(self.http_client.as_ref(), self.request()).await?;
            parse_index_page(&body)
        })
    }
}

pub(crate) fn parse_index_page(html: &str) -> Result<f64, FailureReason> {
    let raw = [&*PRICE_LAST, &*LEGACY_LAST]
        .into_iter()
        .find_map(|pattern| pattern.captures(html))
        .and_then(|captures| captures.get(1))
        .map(|value| value.as_str())
        .ok_or_else(|| FailureReason::shape("investing.com price element not found in page"))?;

    parse_decimal(raw)
}
