/*!
 * Pipeline orchestrator for chaining the normalization stages.
 *
 * The stages run strictly in order, each taking and returning a segment list:
 * 1. Word-limit splitting
 * 2. Sentence-boundary repair
 * 3. Timing sanitizing
 * 4. Duration rescaling (only when the true duration is known)
 */

use log::debug;
use std::time::{Duration, Instant};

use crate::subtitle_processor::Segment;

use super::rescale::{apply_scale, scale_factor};
use super::sentence_boundary::fix_sentence_boundaries_counted;
use super::timing::{sanitize_timing_with_repairs, TimingConfig, TimingRepairs};
use super::word_limit::enforce_max_words;

/// Default maximum number of words per caption
pub const DEFAULT_MAX_WORDS: usize = 7;

/// Configuration for the normalization pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Maximum words per caption
    pub max_words: usize,

    /// Configuration for the timing sanitizer
    pub timing: TimingConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_words: DEFAULT_MAX_WORDS,
            timing: TimingConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Create a pipeline configuration with the given word limit.
    pub fn new(max_words: usize) -> Self {
        Self {
            max_words,
            ..Default::default()
        }
    }

    /// Enable or disable gap filling.
    pub fn with_fill_gaps(mut self, enabled: bool) -> Self {
        self.timing.fill_gaps = enabled;
        self
    }

    /// Set custom timing configuration.
    pub fn with_timing_config(mut self, timing: TimingConfig) -> Self {
        self.timing = timing;
        self
    }
}

/// Statistics gathered during one pipeline run.
#[derive(Debug, Clone, Default)]
pub struct PipelineStats {
    /// Segments handed to the pipeline
    pub input_segments: usize,

    /// Segments after word-limit splitting
    pub split_segments: usize,

    /// Segments whose text was cut at a sentence boundary
    pub boundary_fixes: usize,

    /// Repairs made by the timing sanitizer
    pub timing_repairs: TimingRepairs,

    /// Scale factor applied by the rescaler, if it ran
    pub scale_factor: Option<f64>,

    /// Wall time of the run
    pub elapsed: Duration,
}

/// Result of a pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Normalized segments
    pub segments: Vec<Segment>,

    /// What the stages did
    pub stats: PipelineStats,
}

/// Runs the normalization stages in order.
#[derive(Debug, Clone, Default)]
pub struct NormalizationPipeline {
    config: PipelineConfig,
}

impl NormalizationPipeline {
    /// Create a new pipeline.
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Normalize `segments`, rescaling to `duration_ms` when it is given.
    pub fn run(&self, segments: &[Segment], duration_ms: Option<f64>) -> PipelineOutput {
        let start_time = Instant::now();
        let mut stats = PipelineStats {
            input_segments: segments.len(),
            ..Default::default()
        };

        let split = enforce_max_words(segments, self.config.max_words);
        stats.split_segments = split.len();

        let (fixed, boundary_fixes) = fix_sentence_boundaries_counted(&split);
        stats.boundary_fixes = boundary_fixes;

        let (sanitized, repairs) = sanitize_timing_with_repairs(&fixed, &self.config.timing);
        stats.timing_repairs = repairs;

        stats.scale_factor = scale_factor(&sanitized, duration_ms);
        let segments = match (stats.scale_factor, duration_ms) {
            (Some(scale), Some(target_ms)) => apply_scale(&sanitized, scale, target_ms),
            _ => sanitized,
        };

        stats.elapsed = start_time.elapsed();
        debug!(
            "Pipeline: {} in, {} after split, {} boundary fixes, {} timing repairs, scale {:?}",
            stats.input_segments,
            stats.split_segments,
            stats.boundary_fixes,
            stats.timing_repairs.total(),
            stats.scale_factor
        );

        PipelineOutput { segments, stats }
    }

    /// Normalize `segments` and return only the resulting list.
    pub fn normalize(&self, segments: &[Segment], duration_ms: Option<f64>) -> Vec<Segment> {
        self.run(segments, duration_ms).segments
    }
}
