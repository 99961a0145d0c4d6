use crate::AcquisitionResult;

/// Exit code for a run that produced a reading.
pub const EXIT_SUCCESS: u8 = 0;
/// Exit code for a run where every source failed.
pub const EXIT_ACQUISITION_FAILED: u8 = 2;

/// Maps a result to the process exit code. Independent of `exceeded`.
pub const fn exit_code(result: &AcquisitionResult) -> u8 {
    if result.is_success() {
        EXIT_SUCCESS
    } else {
        EXIT_ACQUISITION_FAILED
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Reading, SourceId, UtcDateTime};

    #[test]
    fn success_maps_to_zero_regardless_of_threshold() {
        let now = UtcDateTime::now();
        let reading = Reading::new(80.0, SourceId::Cboe, now).expect("valid reading");

        assert_eq!(exit_code(&AcquisitionResult::success(&reading, 35.0, now)), 0);
        assert_eq!(exit_code(&AcquisitionResult::success(&reading, 90.0, now)), 0);
    }

    #[test]
    fn failure_maps_to_two() {
        let result = AcquisitionResult::failure("down", 35.0, UtcDateTime::now());
        assert_eq!(exit_code(&result), 2);
    }
}
