use std::sync::Arc;
use std::time::Instant;

use crate::adapters::{
    CboeAdapter, CnbcAdapter, InvestingAdapter, YahooDailyAdapter, YahooDirectAdapter,
    YahooIntradayAdapter,
};
use crate::config::AcquisitionConfig;
use crate::data_source::{FailureReason, IndexSource};
use crate::http_client::HttpClient;
use crate::retry::{retry_fetch, RetryPolicy};
use crate::{Reading, SourceId};

/// One adapter together with the retry budget it runs under.
#[derive(Clone)]
pub struct ChainEntry {
    pub source: Arc<dyn IndexSource>,
    pub policy: RetryPolicy,
}

impl ChainEntry {
    pub fn new(source: Arc<dyn IndexSource>, policy: RetryPolicy) -> Self {
        Self { source, policy }
    }
}

/// Final failure of one exhausted adapter.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceFailure {
    pub source: SourceId,
    pub attempts: u32,
    pub reason: FailureReason,
}

impl SourceFailure {
    pub fn summary(&self) -> String {
        format!(
            "{}: {} after {} attempt(s)",
            self.source, self.reason, self.attempts
        )
    }
}

/// First successful reading, with the failures observed before it.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainSuccess {
    pub reading: Reading,
    pub attempts: u32,
    pub source_chain: Vec<SourceId>,
    pub failures: Vec<SourceFailure>,
    pub latency_ms: u64,
}

/// Every adapter exhausted its retries.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainFailure {
    pub source_chain: Vec<SourceId>,
    pub failures: Vec<SourceFailure>,
    pub latency_ms: u64,
}

impl ChainFailure {
    /// Diagnostic listing each adapter's final failure in chain order.
    pub fn summary(&self) -> String {
        if self.failures.is_empty() {
            return String::from("no index sources configured");
        }

        let details = self
            .failures
            .iter()
            .map(SourceFailure::summary)
            .collect::<Vec<_>>()
            .join("; ");
        format!("all {} source(s) failed: {details}", self.failures.len())
    }
}

pub type ChainResult = Result<ChainSuccess, ChainFailure>;

/// Ordered fallback over retry-wrapped index sources.
///
/// Order is fixed at construction; the chain never reorders or skips entries.
#[derive(Clone, Default)]
pub struct SourceChain {
    entries: Vec<ChainEntry>,
}

impl SourceChain {
    pub fn new(entries: Vec<ChainEntry>) -> Self {
        Self { entries }
    }

    /// Builds the six production adapters in priority order.
    pub fn standard(http_client: Arc<dyn HttpClient>, config: &AcquisitionConfig) -> Self {
        let timeout_ms = config.request_timeout_ms();
        let sources: Vec<Arc<dyn IndexSource>> = vec![
            Arc::new(YahooIntradayAdapter::new(http_client.clone(), timeout_ms)),
            Arc::new(YahooDailyAdapter::new(http_client.clone(), timeout_ms)),
            Arc::new(CnbcAdapter::new(http_client.clone(), timeout_ms)),
            Arc::new(InvestingAdapter::new(http_client.clone(), timeout_ms)),
            Arc::new(YahooDirectAdapter::new(http_client.clone(), timeout_ms)),
            Arc::new(CboeAdapter::new(http_client, timeout_ms)),
        ];

        Self::new(
            sources
                .into_iter()
                .map(|source| ChainEntry::new(source, config.retry()))
                .collect(),
        )
    }

    pub fn source_ids(&self) -> Vec<SourceId> {
        self.entries.iter().map(|entry| entry.source.id()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Tries each entry in order and returns the first success.
    pub async fn acquire(&self) -> ChainResult {
        let started = Instant::now();
        let mut source_chain = Vec::with_capacity(self.entries.len());
        let mut failures = Vec::new();

        for entry in &self.entries {
            let attempt = retry_fetch(entry.source.as_ref(), &entry.policy).await;
            source_chain.push(attempt.source);

            match attempt.outcome {
                Ok(reading) => {
                    let latency_ms = elapsed_ms(started);
                    if failures.is_empty() {
                        tracing::info!(
                            source = %attempt.source,
                            value = reading.value(),
                            observed_at = %reading.observed_at(),
                            latency_ms,
                            "acquired index reading"
                        );
                    } else {
                        tracing::info!(
                            source = %attempt.source,
                            value = reading.value(),
                            observed_at = %reading.observed_at(),
                            latency_ms,
                            "source fallback succeeded after {} failed source(s)",
                            failures.len()
                        );
                    }

                    return Ok(ChainSuccess {
                        reading,
                        attempts: attempt.attempts,
                        source_chain,
                        failures,
                        latency_ms,
                    });
                }
                Err(reason) => {
                    tracing::warn!(
                        source = %attempt.source,
                        attempts = attempt.attempts,
                        code = reason.code(),
                        "source exhausted retries; falling through"
                    );
                    failures.push(SourceFailure {
                        source: attempt.source,
                        attempts: attempt.attempts,
                        reason,
                    });
                }
            }
        }

        let failure = ChainFailure {
            source_chain,
            failures,
            latency_ms: elapsed_ms(started),
        };
        tracing::error!(latency_ms = failure.latency_ms, "{}", failure.summary());
        Err(failure)
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    started.elapsed().as_millis().min(u128::from(u64::MAX)) as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_source::FetchFuture;
    use crate::http_client::{HttpError, HttpRequest, HttpResponse};
    use std::future::Future;
    use std::pin::Pin;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedSource {
        id: SourceId,
        value: Result<f64, FailureReason>,
        calls: AtomicUsize,
    }

    impl FixedSource {
        fn ok(id: SourceId, value: f64) -> Arc<Self> {
            Arc::new(Self {
                id,
                value: Ok(value),
                calls: AtomicUsize::new(0),
            })
        }

        fn failing(id: SourceId) -> Arc<Self> {
            Arc::new(Self {
                id,
                value: Err(FailureReason::http(503)),
                calls: AtomicUsize::new(0),
            })
        }
    }

    impl IndexSource for FixedSource {
        fn id(&self) -> SourceId {
            self.id
        }

        fn fetch(&self) -> FetchFuture<'_> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let value = self.value.clone();
            Box::pin(async move { value })
        }
    }

    struct UnreachableClient;

    impl HttpClient for UnreachableClient {
        fn execute<'a>(
            &'a self,
            _request: HttpRequest,
        ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
            Box::pin(async { Err(HttpError::new("offline")) })
        }
    }

    #[test]
    fn standard_chain_uses_fixed_priority_order() {
        let chain =
            SourceChain::standard(Arc::new(UnreachableClient), &AcquisitionConfig::default());
        assert_eq!(chain.source_ids(), SourceId::ALL.to_vec());
    }

    #[tokio::test(start_paused = true)]
    async fn records_failures_before_success() {
        let first = FixedSource::failing(SourceId::YahooIntraday);
        let second = FixedSource::ok(SourceId::YahooDaily, 19.7);
        let chain = SourceChain::new(vec![
            ChainEntry::new(first.clone(), RetryPolicy::no_retry()),
            ChainEntry::new(second.clone(), RetryPolicy::no_retry()),
        ]);

        let success = chain.acquire().await.expect("second source succeeds");

        assert_eq!(success.reading.source(), SourceId::YahooDaily);
        assert_eq!(success.source_chain, vec![SourceId::YahooIntraday, SourceId::YahooDaily]);
        assert_eq!(success.failures.len(), 1);
        assert_eq!(success.failures[0].source, SourceId::YahooIntraday);
    }

    #[tokio::test]
    async fn empty_chain_fails_with_explicit_message() {
        let failure = SourceChain::default()
            .acquire()
            .await
            .expect_err("no sources cannot succeed");

        assert!(failure.failures.is_empty());
        assert_eq!(failure.summary(), "no index sources configured");
    }

    #[test]
    fn failure_summary_lists_sources_in_order() {
        let failure = ChainFailure {
            source_chain: vec![SourceId::Cnbc, SourceId::Cboe],
            failures: vec![
                SourceFailure {
                    source: SourceId::Cnbc,
                    attempts: 3,
                    reason: FailureReason::shape("quote price not found in page"),
                },
                SourceFailure {
                    source: SourceId::Cboe,
                    attempts: 3,
                    reason: FailureReason::http(403),
                },
            ],
            latency_ms: 12,
        };

        assert_eq!(
            failure.summary(),
            "all 2 source(s) failed: cnbc: quote price not found in page (source.shape) after 3 attempt(s); \
cboe: upstream returned status 403 (source.http) after 3 attempt(s)"
        );
    }
}
