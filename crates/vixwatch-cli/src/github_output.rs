//! GitHub Actions step outputs (`$GITHUB_OUTPUT`).

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

use vixwatch_core::AcquisitionResult;

const HEREDOC_DELIMITER: &str = "EOF";

/// Step outputs for a successful run.
#[derive(Debug, Clone, PartialEq)]
pub struct StepOutputs {
    value: f64,
    exceeded: bool,
    payload: String,
}

impl StepOutputs {
    /// `None` when the run produced no reading.
    pub fn from_result(result: &AcquisitionResult, payload: impl Into<String>) -> Option<Self> {
        Some(Self {
            value: result.value()?,
            exceeded: result.exceeded()?,
            payload: payload.into(),
        })
    }

    /// `name=value` lines followed by the record in a heredoc block.
    ///
    /// The value keeps at least one decimal place, so `20.0` is not written as `20`.
    pub fn render(&self) -> String {
        let delimiter = HEREDOC_DELIMITER;
        format!(
            "vix_value={:?}\nvix_exceeded={}\nvix_payload<<{delimiter}\n{}\n{delimiter}\n",
            self.value, self.exceeded, self.payload
        )
    }

    /// Appends to `path`, creating it if needed. Existing content is kept.
    pub fn append_to(&self, path: &Path) -> io::Result<()> {
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        file.write_all(self.render().as_bytes())?;
        file.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use vixwatch_core::{Reading, SourceId, UtcDateTime};

    fn timestamp() -> UtcDateTime {
        UtcDateTime::parse("2025-04-07T14:00:00Z").expect("valid timestamp")
    }

    fn success(value: f64) -> AcquisitionResult {
        let reading = Reading::new(value, SourceId::Cnbc, timestamp()).expect("valid reading");
        AcquisitionResult::success(&reading, 35.0, timestamp())
    }

    #[test]
    fn renders_values_and_heredoc_payload() {
        let result = success(36.2);
        let payload = result.to_json(false).expect("serializes");
        let outputs = StepOutputs::from_result(&result, payload.clone()).expect("success");

        let rendered = outputs.render();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "vix_value=36.2");
        assert_eq!(lines[1], "vix_exceeded=true");
        assert_eq!(lines[2], "vix_payload<<EOF");
        assert_eq!(lines[3], payload);
        assert_eq!(lines[4], "EOF");
        assert_eq!(lines.len(), 5);

        let record: serde_json::Value = serde_json::from_str(lines[3]).expect("payload is json");
        assert_eq!(record["vix"], serde_json::json!(36.2));
    }

    #[test]
    fn whole_values_keep_a_decimal_place() {
        let outputs = StepOutputs::from_result(&success(20.0), "{}").expect("success");
        assert!(outputs.render().starts_with("vix_value=20.0\n"));
    }

    #[test]
    fn failed_run_has_no_outputs() {
        let result = AcquisitionResult::failure("all 6 source(s) failed", 35.0, timestamp());
        assert_eq!(StepOutputs::from_result(&result, "{}"), None);
    }

    #[test]
    fn append_keeps_existing_step_outputs() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("github_output");
        fs::write(&path, "previous=1\n").expect("seed file");

        let outputs = StepOutputs::from_result(&success(20.5), "{}").expect("success");
        outputs.append_to(&path).expect("append");

        let contents = fs::read_to_string(&path).expect("read back");
        assert!(contents.starts_with("previous=1\nvix_value=20.5\nvix_exceeded=false\n"));
        assert!(contents.ends_with("vix_payload<<EOF\n{}\nEOF\n"));
    }

    #[test]
    fn unwritable_path_is_an_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let outputs = StepOutputs::from_result(&success(20.5), "{}").expect("success");
        assert!(outputs.append_to(dir.path()).is_err());
    }
}
