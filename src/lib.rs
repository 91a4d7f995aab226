/*!
 * # subnorm - caption timing and segmentation normalizer
 *
 * Turns the raw timed caption records returned by a transcription service
 * into a clean SubRip track.
 *
 * ## Features
 *
 * - Lenient `HH:MM:SS,mmm` timestamp parsing with speed-up compensation
 * - Word-limit splitting with evenly divided time slices
 * - Sentence-boundary repair across neighbouring captions
 * - Overlap, micro-gap and inverted-range repair, optional gap filling
 * - Rescaling onto the true audio duration (given or probed with ffprobe)
 * - BOM-prefixed SubRip output
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `timecode`: Timestamp parsing and formatting
 * - `payload`: Transcription payload intake
 * - `pipeline`: The normalization stages:
 *   - `pipeline::word_limit`: Word-limit splitting
 *   - `pipeline::sentence_boundary`: Sentence-boundary repair
 *   - `pipeline::timing`: Timing sanitation
 *   - `pipeline::rescale`: Duration rescaling
 *   - `pipeline::orchestrator`: Stage ordering and statistics
 * - `subtitle_processor`: Segments and SubRip rendering
 * - `validation`: Post-run checks on normalized tracks
 * - `media_probe`: Audio duration lookup through ffprobe
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod media_probe;
pub mod payload;
pub mod pipeline;
pub mod subtitle_processor;
pub mod timecode;
pub mod validation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, DurationSource, FolderSummary};
pub use subtitle_processor::{Segment, SubtitleTrack};
pub use pipeline::{NormalizationPipeline, PipelineConfig};
pub use errors::{AppError, PayloadError, ProbeError};
