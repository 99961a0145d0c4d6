//! Acquisition settings: alert threshold, retry policy, and request timeout.
//!
//! # Environment Variables
//!
//! | Setting | Primary Env Var | Fallback Env Var | Default |
//! |---------|-----------------|------------------|---------|
//! | Threshold | `VIXWATCH_THRESHOLD` | `VIX_THRESHOLD` | `35` |
//! | Max attempts | `VIXWATCH_MAX_ATTEMPTS` | - | `3` |
//! | Retry delay (ms) | `VIXWATCH_RETRY_DELAY_MS` | - | `2000` |
//! | Request timeout (ms) | `VIXWATCH_TIMEOUT_MS` | - | `10000` |

use std::env;
use std::time::Duration;

use crate::http_client::DEFAULT_TIMEOUT_MS;
use crate::retry::RetryPolicy;
use crate::ValidationError;

pub const DEFAULT_THRESHOLD: f64 = 35.0;

pub const THRESHOLD_ENV: &str = "VIXWATCH_THRESHOLD";
pub const THRESHOLD_FALLBACK_ENV: &str = "VIX_THRESHOLD";
pub const MAX_ATTEMPTS_ENV: &str = "VIXWATCH_MAX_ATTEMPTS";
pub const RETRY_DELAY_ENV: &str = "VIXWATCH_RETRY_DELAY_MS";
pub const TIMEOUT_ENV: &str = "VIXWATCH_TIMEOUT_MS";

/// Explicit configuration passed into the chain and the result builder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AcquisitionConfig {
    threshold: f64,
    retry: RetryPolicy,
    request_timeout_ms: u64,
}

impl Default for AcquisitionConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            retry: RetryPolicy::default(),
            request_timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl AcquisitionConfig {
    /// Defaults overlaid with any `VIXWATCH_*` environment overrides.
    pub fn from_env() -> Result<Self, ValidationError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ValidationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(THRESHOLD_ENV).or_else(|| lookup(THRESHOLD_FALLBACK_ENV)) {
            config = config.with_threshold(parse_threshold(&raw)?)?;
        }

        let max_attempts: u32 = match lookup(MAX_ATTEMPTS_ENV) {
            Some(raw) => parse_u64(MAX_ATTEMPTS_ENV, &raw)?
                .try_into()
                .map_err(|_| ValidationError::InvalidInteger {
                    name: MAX_ATTEMPTS_ENV,
                    value: raw.clone(),
                })?,
            None => config.retry.max_attempts(),
        };
        let delay = match lookup(RETRY_DELAY_ENV) {
            Some(raw) => Duration::from_millis(parse_u64(RETRY_DELAY_ENV, &raw)?),
            None => config.retry.delay(),
        };
        config = config.with_retry(RetryPolicy::new(max_attempts, delay)?);

        if let Some(raw) = lookup(TIMEOUT_ENV) {
            config = config.with_request_timeout_ms(parse_u64(TIMEOUT_ENV, &raw)?)?;
        }

        Ok(config)
    }

    pub fn with_threshold(mut self, threshold: f64) -> Result<Self, ValidationError> {
        if !threshold.is_finite() {
            return Err(ValidationError::InvalidThreshold {
                value: threshold.to_string(),
            });
        }
        self.threshold = threshold;
        Ok(self)
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_request_timeout_ms(mut self, timeout_ms: u64) -> Result<Self, ValidationError> {
        if timeout_ms == 0 {
            return Err(ValidationError::ZeroTimeout);
        }
        self.request_timeout_ms = timeout_ms;
        Ok(self)
    }

    pub const fn threshold(&self) -> f64 {
        self.threshold
    }

    pub const fn retry(&self) -> RetryPolicy {
        self.retry
    }

    pub const fn request_timeout_ms(&self) -> u64 {
        self.request_timeout_ms
    }
}

fn parse_threshold(raw: &str) -> Result<f64, ValidationError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| ValidationError::InvalidThreshold {
            value: raw.to_owned(),
        })
}

fn parse_u64(name: &'static str, raw: &str) -> Result<u64, ValidationError> {
    raw.trim()
        .parse::<u64>()
        .map_err(|_| ValidationError::InvalidInteger {
            name,
            value: raw.to_owned(),
        })
}
