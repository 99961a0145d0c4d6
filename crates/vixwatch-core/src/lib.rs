//! # Vixwatch Core
//!
//! Acquisition engine that turns several unreliable, differently-shaped VIX
//! providers into one trustworthy reading or one explicit, attributable
//! failure.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | Provider adapters (Yahoo x3, CNBC, Investing.com, CBOE) |
//! | [`chain`] | Ordered fallback over retry-wrapped sources |
//! | [`config`] | Threshold, retry, and timeout configuration |
//! | [`data_source`] | `IndexSource` trait and failure taxonomy |
//! | [`domain`] | Reading, series point, UTC timestamp |
//! | [`error`] | Core error types |
//! | [`exit_status`] | Result to process exit code mapping |
//! | [`http_client`] | HTTP transport abstraction |
//! | [`result`] | Canonical acquisition record |
//! | [`retry`] | Fixed-delay retry wrapper |
//! | [`source`] | Source identifiers |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use vixwatch_core::{AcquisitionConfig, AcquisitionResult, ReqwestHttpClient, SourceChain};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AcquisitionConfig::from_env()?;
//!     let chain = SourceChain::standard(Arc::new(ReqwestHttpClient::new()), &config);
//!
//!     let outcome = chain.acquire().await;
//!     let result = AcquisitionResult::build(&outcome, config.threshold());
//!     println!("{}", result.to_json(false)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  SourceChain    │  ordered, short-circuits on first success
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  retry_fetch    │  max_attempts, fixed delay, keeps last failure
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │  IndexSource    │────▶│ HttpClient       │
//! │  (adapter)      │     │ (reqwest)        │
//! └────────┬────────┘     └──────────────────┘
//!          │
//!          ▼
//! ┌───────────────────┐     ┌──────────────────┐
//! │ AcquisitionResult │────▶│ exit_code        │
//! └───────────────────┘     └──────────────────┘
//! ```

pub mod adapters;
pub mod chain;
pub mod config;
pub mod data_source;
pub mod domain;
pub mod error;
pub mod exit_status;
pub mod http_client;
pub mod result;
pub mod retry;
pub mod source;

pub use adapters::{
    CboeAdapter, CnbcAdapter, InvestingAdapter, YahooDailyAdapter, YahooDirectAdapter,
    YahooIntradayAdapter,
};

pub use chain::{ChainEntry, ChainFailure, ChainResult, ChainSuccess, SourceChain, SourceFailure};

pub use config::{AcquisitionConfig, DEFAULT_THRESHOLD};

pub use data_source::{FailureKind, FailureReason, FetchFuture, IndexSource};

pub use domain::{latest_point, Reading, SeriesPoint, UtcDateTime};

pub use error::{CoreError, ValidationError};

pub use exit_status::{exit_code, EXIT_ACQUISITION_FAILED, EXIT_SUCCESS};

pub use http_client::{HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient};

pub use result::{AcquisitionOutcome, AcquisitionResult};

pub use retry::{retry_fetch, RetryPolicy, SourceAttempt};

pub use source::SourceId;
