//! CLI argument definitions for vixwatch.
//!
//! The binary runs one acquisition and exits. Every flag overrides the
//! matching `VIXWATCH_*` environment variable read by
//! [`AcquisitionConfig::from_env`].
//!
//! # Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--threshold` | `35` | Alert threshold (inclusive) |
//! | `--max-attempts` | `3` | Attempts per source |
//! | `--retry-delay-ms` | `2000` | Delay between attempts on the same source |
//! | `--timeout-ms` | `10000` | Per-request timeout |
//! | `--pretty` | `false` | Pretty-print the JSON record |
//! | `--github-output` | `$GITHUB_OUTPUT` | Step output file to append to |
//! | `--log-format` | `text` | stderr log format (text, json) |
//!
//! # Examples
//!
//! ```bash
//! # One compact JSON line on stdout
//! vixwatch
//!
//! # Alert at 30 with a single attempt per source
//! vixwatch --threshold 30 --max-attempts 1
//! ```

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use vixwatch_core::config::{
    MAX_ATTEMPTS_ENV, RETRY_DELAY_ENV, THRESHOLD_ENV, THRESHOLD_FALLBACK_ENV, TIMEOUT_ENV,
};
use vixwatch_core::{AcquisitionConfig, RetryPolicy, ValidationError};

/// Fetch the current VIX level from the first provider that answers.
#[derive(Debug, Parser)]
#[command(
    name = "vixwatch",
    author,
    version,
    about = "Fetch the current VIX level with ordered provider fallback",
    long_about = "Queries six VIX providers in a fixed order, retrying each one before \
moving on, and prints a single JSON record.\n\
\n\
Exit codes: 0 reading acquired, 2 every provider failed, 3 invalid \
configuration, 4 serialization failure, 10 I/O failure."
)]
pub struct Cli {
    /// Alert threshold; `exceeded` is true when the reading is at or above it.
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Attempts per source before falling back to the next one.
    #[arg(long)]
    pub max_attempts: Option<u32>,

    /// Delay between attempts on the same source, in milliseconds.
    #[arg(long)]
    pub retry_delay_ms: Option<u64>,

    /// Per-request timeout in milliseconds.
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// Pretty-print the JSON record with indentation.
    #[arg(long, default_value_t = false)]
    pub pretty: bool,

    /// GitHub Actions step output file. Only written when a reading is acquired.
    #[arg(long, env = "GITHUB_OUTPUT", value_name = "PATH")]
    pub github_output: Option<PathBuf>,

    /// Format of the diagnostic log written to stderr.
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

impl Cli {
    /// Process environment overlaid with the flags given on the command line.
    pub fn acquisition_config(&self) -> Result<AcquisitionConfig, ValidationError> {
        self.config_from_lookup(|name| env::var(name).ok())
    }

    /// Variables replaced by a flag are never read, so a malformed value there
    /// cannot fail the run.
    pub fn config_from_lookup<F>(&self, lookup: F) -> Result<AcquisitionConfig, ValidationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base = AcquisitionConfig::from_lookup(|name| {
            if self.overrides(name) {
                None
            } else {
                lookup(name)
            }
        })?;
        self.resolve_config(base)
    }

    fn overrides(&self, env_var: &str) -> bool {
        match env_var {
            THRESHOLD_ENV | THRESHOLD_FALLBACK_ENV => self.threshold.is_some(),
            MAX_ATTEMPTS_ENV => self.max_attempts.is_some(),
            RETRY_DELAY_ENV => self.retry_delay_ms.is_some(),
            TIMEOUT_ENV => self.timeout_ms.is_some(),
            _ => false,
        }
    }

    /// Applies flag overrides on top of `base`.
    pub fn resolve_config(
        &self,
        base: AcquisitionConfig,
    ) -> Result<AcquisitionConfig, ValidationError> {
        let mut config = base;

        if let Some(threshold) = self.threshold {
            config = config.with_threshold(threshold)?;
        }

        if self.max_attempts.is_some() || self.retry_delay_ms.is_some() {
            let current = config.retry();
            let policy = RetryPolicy::new(
                self.max_attempts.unwrap_or(current.max_attempts()),
                self.retry_delay_ms
                    .map(Duration::from_millis)
                    .unwrap_or(current.delay()),
            )?;
            config = config.with_retry(policy);
        }

        if let Some(timeout_ms) = self.timeout_ms {
            config = config.with_request_timeout_ms(timeout_ms)?;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("vixwatch").chain(args.iter().copied()))
            .expect("arguments should parse")
    }

    #[test]
    fn no_flags_keeps_base_config() {
        let base = AcquisitionConfig::default()
            .with_threshold(28.5)
            .expect("finite threshold");
        let resolved = parse(&[]).resolve_config(base).expect("valid");
        assert_eq!(resolved, base);
    }

    #[test]
    fn flags_override_base_config() {
        let cli = parse(&[
            "--threshold",
            "30",
            "--max-attempts",
            "1",
            "--timeout-ms",
            "2500",
        ]);
        let resolved = cli
            .resolve_config(AcquisitionConfig::default())
            .expect("valid");

        assert_eq!(resolved.threshold(), 30.0);
        assert_eq!(resolved.retry().max_attempts(), 1);
        assert_eq!(resolved.retry().delay(), Duration::from_secs(2));
        assert_eq!(resolved.request_timeout_ms(), 2500);
    }

    #[test]
    fn retry_delay_override_keeps_attempt_count() {
        let resolved = parse(&["--retry-delay-ms", "500"])
            .resolve_config(AcquisitionConfig::default())
            .expect("valid");
        assert_eq!(resolved.retry().max_attempts(), 3);
        assert_eq!(resolved.retry().delay(), Duration::from_millis(500));
    }

    #[test]
    fn invalid_overrides_are_validation_errors() {
        let base = AcquisitionConfig::default();
        assert_eq!(
            parse(&["--max-attempts", "0"]).resolve_config(base),
            Err(ValidationError::ZeroAttempts)
        );
        assert_eq!(
            parse(&["--timeout-ms", "0"]).resolve_config(base),
            Err(ValidationError::ZeroTimeout)
        );
        assert!(matches!(
            parse(&["--threshold", "NaN"]).resolve_config(base),
            Err(ValidationError::InvalidThreshold { .. })
        ));
    }

    fn env_of(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |name| {
            pairs
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| value.to_string())
        }
    }

    #[test]
    fn flag_replaces_malformed_env_value() {
        let env = env_of(&[("VIXWATCH_THRESHOLD", "abc"), ("VIXWATCH_TIMEOUT_MS", "0")]);

        let resolved = parse(&["--threshold", "30", "--timeout-ms", "1500"])
            .config_from_lookup(env)
            .expect("flags replace the bad values");

        assert_eq!(resolved.threshold(), 30.0);
        assert_eq!(resolved.request_timeout_ms(), 1500);
    }

    #[test]
    fn env_values_without_a_flag_still_apply_and_validate() {
        let env = env_of(&[("VIX_THRESHOLD", "28"), ("VIXWATCH_MAX_ATTEMPTS", "2")]);
        let resolved = parse(&["--timeout-ms", "1500"])
            .config_from_lookup(env)
            .expect("valid");
        assert_eq!(resolved.threshold(), 28.0);
        assert_eq!(resolved.retry().max_attempts(), 2);

        let env = env_of(&[("VIXWATCH_THRESHOLD", "abc")]);
        assert!(matches!(
            parse(&["--max-attempts", "1"]).config_from_lookup(env),
            Err(ValidationError::InvalidThreshold { .. })
        ));
    }

    #[test]
    fn log_format_accepts_json() {
        assert_eq!(parse(&["--log-format", "json"]).log_format, LogFormat::Json);
        assert_eq!(parse(&[]).log_format, LogFormat::Text);
    }
}
