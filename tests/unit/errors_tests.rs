/*!
 * Tests for error types and conversions
 */

use subnorm::errors::{AppError, PayloadError, ProbeError};

#[test]
fn test_payloadError_malformed_shouldDisplayCorrectly() {
    let error = PayloadError::Malformed("expected value at line 1".to_string());
    let display = format!("{}", error);
    assert!(display.contains("Malformed transcription payload"));
    assert!(display.contains("expected value at line 1"));
}

#[test]
fn test_probeError_timeout_shouldDisplayProgramAndSeconds() {
    let error = ProbeError::Timeout {
        program: "ffprobe".to_string(),
        timeout_secs: 60,
    };
    let display = format!("{}", error);
    assert!(display.contains("ffprobe"));
    assert!(display.contains("60"));
}

#[test]
fn test_probeError_failed_shouldIncludeStderr() {
    let error = ProbeError::Failed {
        program: "ffprobe".to_string(),
        stderr: "talk.mp3: No such file or directory".to_string(),
    };
    assert!(format!("{}", error).contains("No such file or directory"));
}

#[test]
fn test_appError_fromPayloadError_shouldWrap() {
    let app_error: AppError = PayloadError::Empty.into();
    assert!(matches!(app_error, AppError::Payload(PayloadError::Empty)));
    assert!(format!("{}", app_error).contains("no segments"));
}

#[test]
fn test_appError_fromProbeError_shouldWrap() {
    let app_error: AppError = ProbeError::InvalidOutput("N/A".to_string()).into();
    assert!(matches!(app_error, AppError::Probe(ProbeError::InvalidOutput(_))));
}

#[test]
fn test_appError_fromIoError_shouldBecomeFileError() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
    let app_error: AppError = io_error.into();
    assert!(matches!(app_error, AppError::File(ref message) if message.contains("gone")));
}

#[test]
fn test_appError_fromAnyhow_shouldBecomeUnknown() {
    let app_error: AppError = anyhow::anyhow!("something odd").into();
    assert!(matches!(app_error, AppError::Unknown(_)));
    assert!(format!("{}", app_error).contains("something odd"));
}
