//! Diagnostic logging. Everything goes to stderr; stdout carries only the
//! JSON record.

use std::io::{self, IsTerminal};

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::cli::LogFormat;

pub const LOG_ENV_VAR: &str = "VIXWATCH_LOG";
const DEFAULT_DIRECTIVE: &str = "info";

/// `VIXWATCH_LOG` when set and valid, otherwise `info`.
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
}

/// Installs the global subscriber. Fails only if one is already installed.
pub fn init(format: LogFormat) -> Result<(), tracing_subscriber::util::TryInitError> {
    let (text, json) = match format {
        LogFormat::Text => (
            Some(
                fmt::layer()
                    .with_writer(io::stderr)
                    .with_ansi(io::stderr().is_terminal()),
            ),
            None,
        ),
        LogFormat::Json => (
            None,
            Some(fmt::layer().json().with_writer(io::stderr)),
        ),
    };

    tracing_subscriber::registry()
        .with(env_filter())
        .with(text)
        .with(json)
        .try_init()
}
