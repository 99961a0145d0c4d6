use std::sync::{Arc, LazyLock};

use regex::Regex;

use super::{fetch_body, parse_decimal, with_browser_headers};
use crate::data_source::{FailureReason, FetchFuture, IndexSource};
use crate::http_client::{HttpClient, HttpRequest};
use crate::SourceId;

const QUOTE_PAGE: &str = "https://www.cnbc.com/quotes/.VIX";

/// Embedded quote state, e.g. `"last":"17.25"`.
static EMBEDDED_LAST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""last"\s*:\s*"([^"]*)""#).expect("static pattern is valid"));

/// Rendered quote strip, e.g. `<span class="QuoteStrip-lastPrice">17.25</span>`.
static QUOTE_STRIP_LAST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"class="QuoteStrip-lastPrice"[^>]*>([^<]*)<"#).expect("static pattern is valid")
});

/// Scrapes the CNBC `.VIX` quote page.
#[derive(Clone)]
pub struct CnbcAdapter {
    http_client: Arc<dyn HttpClient>,
    timeout_ms: u64,
}

impl CnbcAdapter {
    pub fn new(http_client: Arc<dyn HttpClient>, timeout_ms: u64) -> Self {
        Self {
            http_client,
            timeout_ms,
        }
    }

    fn request(&self) -> HttpRequest {
        with_browser_headers(
            HttpRequest::get(QUOTE_PAGE).with_timeout_ms(self.timeout_ms),
            "https://www.cnbc.com/",
        )
    }
}

impl IndexSource for CnbcAdapter {
    fn id(&self) -> SourceId {
        SourceId::Cnbc
    }

    fn fetch(&self) -> FetchFuture<'_> {
        Box::pin(async move {
            let body = fetch_body(self.http_client.as_ref(), self.request()).await?;
            parse_quote_page(&body)
        })
    }
}

pub(crate) fn parse_quote_page(html: &str) -> Result<f64, FailureReason> {
    let raw = [&*EMBEDDED_LAST, &*QUOTE_STRIP_LAST]
        .into_iter()
        .find_map(|pattern| pattern.captures(html))
        .and_then(|captures| captures.get(1))
        .map(|value| value.as_str())
        .ok_or_else(|| FailureReason::shape("cnbc quote price not found in page"))?;

    parse_decimal(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_source::FailureKind;

    #[test]
    fn reads_embedded_quote_json() {
        let html = r#"<script>window.__s_data={"quote":{"symbol":".VIX","last":"19.37","change":"-0.41"}}</script>"#;
        assert_eq!(parse_quote_page(html).expect("price present"), 19.37);
    }

    #[test]
    fn falls_back_to_quote_strip_markup() {
        let html = r#"<div><span class="QuoteStrip-lastPrice">21.08</span></div>"#;
        assert_eq!(parse_quote_page(html).expect("price present"), 21.08);
    }

    #[test]
    fn missing_price_is_a_shape_failure() {
        let failure = parse_quote_page("<html><body>Access Denied</body></html>")
            .expect_err("no price");
        assert_eq!(failure.kind(), FailureKind::Shape);
    }

    #[test]
    fn unreadable_price_is_a_parse_failure() {
        let failure = parse_quote_page(r#"{"last":"UNCH"}"#).expect_err("not a number");
        assert_eq!(failure.kind(), FailureKind::Parse);
    }
}
