use std::path::Path;
use std::time::Duration;
use log::{debug, warn};
use tokio::process::Command;

use crate::errors::ProbeError;

// @module: Media duration probing through ffprobe

/// Probe the duration of a media file in milliseconds.
///
/// Runs `ffprobe -v error -show_entries format=duration -of csv=p=0 <file>`
/// and reads the seconds value it prints.
pub async fn probe_duration_ms<P: AsRef<Path>>(ffprobe_path: &str, media_path: P, timeout_secs: u64) -> Result<f64, ProbeError> {
    let media_path = media_path.as_ref();

    let mut command = Command::new(ffprobe_path);
    command
        .args([
            "-v", "error",
            "-show_entries", "format=duration",
            "-of", "csv=p=0",
        ])
        .arg(media_path)
        .kill_on_drop(true);
    let ffprobe_future = command.output();

    let output = tokio::select! {
        result = ffprobe_future => {
            result.map_err(|e| ProbeError::Spawn {
                program: ffprobe_path.to_string(),
                message: e.to_string(),
            })?
        },
        _ = tokio::time::sleep(Duration::from_secs(timeout_secs)) => {
            return Err(ProbeError::Timeout {
                program: ffprobe_path.to_string(),
                timeout_secs,
            });
        }
    };

    if !output.status.success() {
        return Err(ProbeError::Failed {
            program: ffprobe_path.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    let duration_ms = parse_probe_output(&String::from_utf8_lossy(&output.stdout))?;
    debug!("Probed duration of {:?}: {:.2}s", media_path, duration_ms / 1000.0);
    Ok(duration_ms)
}

/// Read ffprobe's `<seconds>` output as milliseconds
pub fn parse_probe_output(stdout: &str) -> Result<f64, ProbeError> {
    let trimmed = stdout.trim();
    match trimmed.parse::<f64>() {
        Ok(seconds) if seconds.is_finite() && seconds > 0.0 => Ok(seconds * 1000.0),
        _ => Err(ProbeError::InvalidOutput(trimmed.to_string())),
    }
}

/// Probe a duration for rescaling, or `None` when probing fails.
///
/// The probed file is the audio that was sent for transcription; if it was
/// sped up, `time_multiplier` converts its duration back to the original
/// timeline.
pub async fn probe_target_duration_ms<P: AsRef<Path>>(
    ffprobe_path: &str,
    media_path: P,
    timeout_secs: u64,
    time_multiplier: f64,
) -> Option<f64> {
    match probe_duration_ms(ffprobe_path, media_path, timeout_secs).await {
        Ok(duration_ms) => Some(duration_ms * time_multiplier),
        Err(e) => {
            warn!("Could not determine audio duration, timing will not be rescaled: {}", e);
            None
        }
    }
}
