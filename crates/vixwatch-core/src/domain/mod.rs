//! # Domain Models
//!
//! Canonical value types shared by the adapters, the chain, and the result
//! builder.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Reading`] | A validated index level with provenance |
//! | [`SeriesPoint`] | One timestamped sample from a provider series |
//! | [`UtcDateTime`] | UTC timestamp |

mod reading;
mod timestamp;

pub use reading::{latest_point, Reading, SeriesPoint};
pub use timestamp::UtcDateTime;
