use thiserror::Error;

/// Validation and contract errors exposed by `vixwatch-core`.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("timestamp must be RFC3339 UTC (suffix Z): '{value}'")]
    TimestampNotUtc { value: String },

    #[error("reading value must be finite, got {value}")]
    NonFiniteReading { value: f64 },
    #[error("reading value must be positive, got {value}")]
    NonPositiveReading { value: f64 },

    #[error("threshold must be a finite number: '{value}'")]
    InvalidThreshold { value: String },
    #[error("max_attempts must be at least 1")]
    ZeroAttempts,
    #[error("request timeout must be greater than zero")]
    ZeroTimeout,
    #[error("setting '{name}' expects an unsigned integer, got '{value}'")]
    InvalidInteger { name: &'static str, value: String },
}

/// Top-level error type for core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
