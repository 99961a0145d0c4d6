//! Index source trait and failure taxonomy.
//!
//! Every provider integration implements [`IndexSource`]: one `fetch` call
//! issues one request (or one request sequence) and returns the latest index
//! level, or a [`FailureReason`] describing why it could not.
//!
//! | Kind | Code | Raised when |
//! |------|------|-------------|
//! | `Network` | `source.network` | provider unreachable, timeout, body read failure |
//! | `Http` | `source.http` | non-2xx status |
//! | `Shape` | `source.shape` | payload missing the expected structure |
//! | `Parse` | `source.parse` | value located but not a usable number |

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;

use crate::http_client::HttpError;
use crate::SourceId;

/// Classification of a single failed adapter attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Network,
    Http { status: u16 },
    Shape,
    Parse,
}

/// Structured adapter failure, retained by the retry wrapper and the chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureReason {
    kind: FailureKind,
    message: String,
}

impl FailureReason {
    pub fn network(message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Network,
            message: message.into(),
        }
    }

    pub fn http(status: u16) -> Self {
        Self {
            kind: FailureKind::Http { status },
            message: format!("upstream returned status {status}"),
        }
    }

    pub fn shape(message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Shape,
            message: message.into(),
        }
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Parse,
            message: message.into(),
        }
    }

    pub const fn kind(&self) -> FailureKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            FailureKind::Network => "source.network",
            FailureKind::Http { .. } => "source.http",
            FailureKind::Shape => "source.shape",
            FailureKind::Parse => "source.parse",
        }
    }
}

impl From<HttpError> for FailureReason {
    fn from(error: HttpError) -> Self {
        if error.timed_out() {
            Self::network(format!("timed out: {}", error.message()))
        } else {
            Self::network(error.message())
        }
    }
}

impl Display for FailureReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for FailureReason {}

/// Boxed future returned by [`IndexSource::fetch`].
pub type FetchFuture<'a> = Pin<Box<dyn Future<Output = Result<f64, FailureReason>> + Send + 'a>>;

/// Index source adapter contract.
///
/// Implementations must not retry internally and must not clamp or reject
/// outlier values: any parseable number the provider returns is trusted.
pub trait IndexSource: Send + Sync {
    /// Returns the adapter identifier used in logs and error summaries.
    fn id(&self) -> SourceId;

    /// Fetches the most recent index level.
    ///
    /// # Errors
    ///
    /// Returns a [`FailureReason`] whose kind distinguishes transport,
    /// status, structure, and number-conversion failures.
    fn fetch(&self) -> FetchFuture<'_>;
}
