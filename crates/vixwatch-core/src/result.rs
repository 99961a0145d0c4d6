//! Canonical per-run record combining the chain outcome, threshold, and time.

use serde::{Serialize, Serializer};

use crate::chain::ChainResult;
use crate::{CoreError, Reading, SourceId, UtcDateTime};

/// Exactly one of a reading or an error; no other combination is representable.
#[derive(Debug, Clone, PartialEq)]
pub enum AcquisitionOutcome {
    Reading {
        value: f64,
        exceeded: bool,
        source: SourceId,
    },
    Failed {
        error: String,
    },
}

/// Terminal output of one acquisition run.
#[derive(Debug, Clone, PartialEq)]
pub struct AcquisitionResult {
    timestamp: UtcDateTime,
    threshold: f64,
    outcome: AcquisitionOutcome,
}

impl AcquisitionResult {
    /// Builds the record from a chain result, stamped with the current time.
    pub fn build(result: &ChainResult, threshold: f64) -> Self {
        Self::from_chain(result, threshold, UtcDateTime::now())
    }

    pub fn from_chain(result: &ChainResult, threshold: f64, timestamp: UtcDateTime) -> Self {
        match result {
            Ok(success) => Self::success(&success.reading, threshold, timestamp),
            Err(failure) => Self::failure(failure.summary(), threshold, timestamp),
        }
    }

    /// `exceeded` is inclusive: a reading exactly at the threshold counts.
    pub fn success(reading: &Reading, threshold: f64, timestamp: UtcDateTime) -> Self {
        Self {
            timestamp,
            threshold,
            outcome: AcquisitionOutcome::Reading {
                value: reading.value(),
                exceeded: reading.value() >= threshold,
                source: reading.source(),
            },
        }
    }

    pub fn failure(error: impl Into<String>, threshold: f64, timestamp: UtcDateTime) -> Self {
        Self {
            timestamp,
            threshold,
            outcome: AcquisitionOutcome::Failed {
                error: error.into(),
            },
        }
    }

    pub const fn timestamp(&self) -> UtcDateTime {
        self.timestamp
    }

    pub const fn threshold(&self) -> f64 {
        self.threshold
    }

    pub const fn outcome(&self) -> &AcquisitionOutcome {
        &self.outcome
    }

    pub const fn is_success(&self) -> bool {
        matches!(self.outcome, AcquisitionOutcome::Reading { .. })
    }

    pub fn value(&self) -> Option<f64> {
        match self.outcome {
            AcquisitionOutcome::Reading { value, .. } => Some(value),
            AcquisitionOutcome::Failed { .. } => None,
        }
    }

    pub fn exceeded(&self) -> Option<bool> {
        match self.outcome {
            AcquisitionOutcome::Reading { exceeded, .. } => Some(exceeded),
            AcquisitionOutcome::Failed { .. } => None,
        }
    }

    pub fn source_used(&self) -> Option<SourceId> {
        match self.outcome {
            AcquisitionOutcome::Reading { source, .. } => Some(source),
            AcquisitionOutcome::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            AcquisitionOutcome::Reading { .. } => None,
            AcquisitionOutcome::Failed { error } => Some(error),
        }
    }

    /// Serializes the output record; compact output is always a single line.
    pub fn to_json(&self, pretty: bool) -> Result<String, CoreError> {
        let encoded = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(encoded)
    }
}

/// Wire shape consumed by the orchestration layer. `source_used` is not part of it.
#[derive(Serialize)]
struct OutputRecord<'a> {
    timestamp: UtcDateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    vix: Option<f64>,
    threshold: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    exceeded: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
}

impl Serialize for AcquisitionResult {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        OutputRecord {
            timestamp: self.timestamp,
            vix: self.value(),
            threshold: self.threshold,
            exceeded: self.exceeded(),
            error: self.error(),
        }
        .serialize(serializer)
    }
}
