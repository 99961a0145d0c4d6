use std::fmt::{Display, Formatter};

use serde::{Serialize, Serializer};
use time::format_description::well_known::Rfc3339;
use time::{OffsetDateTime, UtcOffset};

use crate::ValidationError;

/// Instant in UTC, rendered as RFC3339 with a `Z` suffix.
///
/// Used for the acquisition timestamp on the output record and for the
/// exchange time of provider bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UtcDateTime(OffsetDateTime);

impl UtcDateTime {
    pub fn now() -> Self {
        Self(OffsetDateTime::now_utc())
    }

    /// Accepts only RFC3339 input that is already UTC.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        OffsetDateTime::parse(input, &Rfc3339)
            .ok()
            .filter(|parsed| parsed.offset() == UtcOffset::UTC)
            .map(Self)
            .ok_or_else(|| ValidationError::TimestampNotUtc {
                value: input.to_owned(),
            })
    }

    /// Provider epoch seconds; `None` outside the calendar range.
    pub fn from_unix_seconds(seconds: i64) -> Option<Self> {
        OffsetDateTime::from_unix_timestamp(seconds).ok().map(Self)
    }
}

impl Display for UtcDateTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // Only years beyond 9999 fail to format, and neither source can produce them.
        let formatted = self.0.format(&Rfc3339).map_err(|_| std::fmt::Error)?;
        f.write_str(&formatted)
    }
}

impl Serialize for UtcDateTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_renders_utc() {
        let parsed = UtcDateTime::parse("2025-04-07T14:00:00Z").expect("must parse");
        assert_eq!(parsed.to_string(), "2025-04-07T14:00:00Z");
        assert_eq!(
            serde_json::to_string(&parsed).expect("serializes"),
            "\"2025-04-07T14:00:00Z\""
        );
    }

    #[test]
    fn rejects_offsets_and_garbage() {
        for input in ["2025-04-07T15:00:00+01:00", "yesterday", ""] {
            assert!(matches!(
                UtcDateTime::parse(input),
                Err(ValidationError::TimestampNotUtc { .. })
            ));
        }
    }

    #[test]
    fn converts_epoch_seconds() {
        let ts = UtcDateTime::from_unix_seconds(1_704_067_200).expect("in range");
        assert_eq!(ts.to_string(), "2024-01-01T00:00:00Z");
        assert!(UtcDateTime::from_unix_seconds(i64::MAX).is_none());
    }

    #[test]
    fn now_renders_with_z_suffix() {
        assert!(UtcDateTime::now().to_string().ends_with('Z'));
    }
}
