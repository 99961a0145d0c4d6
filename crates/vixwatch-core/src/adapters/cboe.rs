use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;

use super::{fetch_body, parse_decimal};
use crate::data_source::{FailureReason, FetchFuture, IndexSource};
use crate::http_client::{HttpClient, HttpRequest};
use crate::SourceId;

const DELAYED_QUOTE_URL: &str = "https://cdn.cboe.com/api/global/delayed_quotes/quotes/_VIX.json";

/// CBOE delayed-quotes API for the index itself.
#[derive(Clone)]
pub struct CboeAdapter {
    http_client: Arc<dyn HttpClient>,
    timeout_ms: u64,
}

impl CboeAdapter {
    pub fn new(http_client: Arc<dyn HttpClient>, timeout_ms: u64) -> Self {
        Self {
            http_client,
            timeout_ms,
        }
    }

    fn request(&self) -> HttpRequest {
        HttpRequest::get(DELAYED_QUOTE_URL)
            .with_header("accept", "application/json")
            .with_timeout_ms(self.timeout_ms)
    }
}

impl IndexSource for CboeAdapter {
    fn id(&self) -> SourceId {
        SourceId::Cboe
    }

    fn fetch(&self) -> FetchFuture<'_> {
        Box::pin(async move {
            let body = fetch_body(self.http_client.as_ref(), self.request()).await?;
            parse_delayed_quote(&body)
        })
    }
}

pub(crate) fn parse_delayed_quote(body: &str) -> Result<f64, FailureReason> {
    let response: CboeQuoteResponse = serde_json::from_str(body)
        .map_err(|e| FailureReason::shape(format!("unexpected cboe payload: {e}")))?;

    let price = response
        .data
        .and_then(|data| data.current_price)
        .filter(|value| !value.is_null())
        .ok_or_else(|| FailureReason::shape("cboe payload has no data.current_price"))?;

    match price {
        Value::Number(number) => number.as_f64().ok_or_else(|| {
            FailureReason::parse(format!("cboe price {number} is not representable"))
        }),
        Value::String(text) => parse_decimal(&text),
        other => Err(FailureReason::parse(format!(
            "cboe current_price has unexpected type: {other}"
        ))),
    }
}

#[derive(Debug, Clone, Deserialize)]
struct CboeQuoteResponse {
    #[serde(default)]
    data: Option<CboeQuoteData>,
}

#[derive(Debug, Clone, Deserialize)]
struct CboeQuoteData {
    #[serde(default)]
    current_price: Option<Value>,
}
