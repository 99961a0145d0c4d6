use thiserror::Error;
use vixwatch_core::{CoreError, ValidationError};

/// CLI-level error categories mapped to exit codes.
///
/// None of them maps to `2`, which is reserved for a run where every source
/// failed.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Usage(#[from] clap::Error),

    #[error("invalid configuration: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Usage(_) => 3,
            Self::Validation(_) => 3,
            Self::Core(CoreError::Validation(_)) => 3,
            Self::Core(CoreError::Serialization(_)) => 4,
            Self::Io(_) => 10,
        }
    }
}
