use crate::{SourceId, UtcDateTime, ValidationError};

/// An index level observed from one source at acquisition time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    value: f64,
    source: SourceId,
    observed_at: UtcDateTime,
}

impl Reading {
    /// Builds a reading, rounding the value to two decimal places.
    pub fn new(
        value: f64,
        source: SourceId,
        observed_at: UtcDateTime,
    ) -> Result<Self, ValidationError> {
        let rounded = round_cents(value);
        if !rounded.is_finite() {
            return Err(ValidationError::NonFiniteReading { value });
        }
        if rounded <= 0.0 {
            return Err(ValidationError::NonPositiveReading { value });
        }

        Ok(Self {
            value: rounded,
            source,
            observed_at,
        })
    }

    pub const fn value(&self) -> f64 {
        self.value
    }

    pub const fn source(&self) -> SourceId {
        self.source
    }

    pub const fn observed_at(&self) -> UtcDateTime {
        self.observed_at
    }
}

// Magnitudes whose cent scaling overflows carry no fractional digits; keep them as-is.
fn round_cents(value: f64) -> f64 {
    let scaled = value * 100.0;
    if scaled.is_finite() {
        scaled.round() / 100.0
    } else {
        value
    }
}

/// One `(epoch seconds, value)` sample from a provider time series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesPoint {
    pub timestamp: i64,
    pub value: Option<f64>,
}

impl SeriesPoint {
    pub const fn new(timestamp: i64, value: Option<f64>) -> Self {
        Self { timestamp, value }
    }

    /// Exchange time of the sample, when the epoch value is representable.
    pub fn bar_time(&self) -> Option<UtcDateTime> {
        UtcDateTime::from_unix_seconds(self.timestamp)
    }
}

/// Selects the sample with the greatest timestamp that carries a finite value.
///
/// Providers are free to order series ascending or descending, so array
/// position is never consulted.
pub fn latest_point<I>(points: I) -> Option<SeriesPoint>
where
    I: IntoIterator<Item = SeriesPoint>,
{
    points
        .into_iter()
        .filter(|point| point.value.is_some_and(f64::is_finite))
        .max_by_key(|point| point.timestamp)
}
