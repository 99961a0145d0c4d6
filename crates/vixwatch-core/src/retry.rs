//! Bounded, fixed-delay retry around a single source adapter.

use std::time::Duration;

use crate::data_source::{FailureReason, IndexSource};
use crate::{Reading, SourceId, UtcDateTime, ValidationError};

pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(2);

/// Attempt budget and fixed pause applied to one adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            delay: DEFAULT_RETRY_DELAY,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Result<Self, ValidationError> {
        if max_attempts == 0 {
            return Err(ValidationError::ZeroAttempts);
        }
        Ok(Self {
            max_attempts,
            delay,
        })
    }

    /// Single attempt, no pause.
    pub const fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            delay: Duration::ZERO,
        }
    }

    pub const fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub const fn delay(&self) -> Duration {
        self.delay
    }
}

/// Outcome of one retry-wrapped adapter.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceAttempt {
    pub source: SourceId,
    pub attempts: u32,
    pub outcome: Result<Reading, FailureReason>,
}

impl SourceAttempt {
    pub const fn succeeded(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Invokes `source` up to `policy.max_attempts()` times, pausing between attempts.
///
/// Only the last failure is retained.
pub async fn retry_fetch(source: &dyn IndexSource, policy: &RetryPolicy) -> SourceAttempt {
    let id = source.id();
    let mut attempt = 0;

    loop {
        attempt += 1;
        let failure = match source.fetch().await {
            Ok(value) => match Reading::new(value, id, UtcDateTime::now()) {
                Ok(reading) => {
                    tracing::debug!(
                        source = %id,
                        attempt,
                        value = reading.value(),
                        "source returned reading"
                    );
                    return SourceAttempt {
                        source: id,
                        attempts: attempt,
                        outcome: Ok(reading),
                    };
                }
                Err(error) => FailureReason::parse(error.to_string()),
            },
            Err(failure) => failure,
        };

        tracing::warn!(
            source = %id,
            attempt,
            max_attempts = policy.max_attempts,
            code = failure.code(),
            reason = failure.message(),
            "source attempt failed"
        );

        if attempt >= policy.max_attempts {
            return SourceAttempt {
                source: id,
                attempts: attempt,
                outcome: Err(failure),
            };
        }

        tokio::time::sleep(policy.delay).await;
    }
}
