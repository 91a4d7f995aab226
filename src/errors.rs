/*!
 * Error types for the subnorm application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions. The normalization
 * stages themselves never fail; errors only come from reading the payload and
 * from the external tools around the pipeline.
 */

use thiserror::Error;

/// Errors that can occur while reading a transcription payload
#[derive(Error, Debug)]
pub enum PayloadError {
    /// The payload is not a JSON array of segments, even after stripping code fences
    #[error("Malformed transcription payload: {0}")]
    Malformed(String),

    /// The payload parsed but contained no usable segment
    #[error("Transcription payload contains no segments with text")]
    Empty,
}

/// Errors that can occur while probing media duration
#[derive(Error, Debug)]
pub enum ProbeError {
    /// The probe process could not be started
    #[error("Failed to run {program}: {message}")]
    Spawn {
        /// Program that was invoked
        program: String,
        /// Underlying error message
        message: String,
    },

    /// The probe process exited with a failure status
    #[error("{program} failed: {stderr}")]
    Failed {
        /// Program that was invoked
        program: String,
        /// Captured standard error
        stderr: String,
    },

    /// The probe did not finish in time
    #[error("{program} timed out after {timeout_secs} seconds")]
    Timeout {
        /// Program that was invoked
        program: String,
        /// Timeout that elapsed
        timeout_secs: u64,
    },

    /// The probe output could not be read as a duration
    #[error("Unparsable duration output: {0:?}")]
    InvalidOutput(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error while reading the transcription payload
    #[error("Transcription error: {0}")]
    Payload(#[from] PayloadError),

    /// Error while probing media
    #[error("Probe error: {0}")]
    Probe(#[from] ProbeError),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
