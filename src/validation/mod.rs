/*!
 * Validation of normalized caption tracks.
 *
 * Validation runs after the pipeline and reports anything the stages could
 * not guarantee. Findings are informational; they never fail a run.
 *
 * # Architecture
 *
 * - `timecodes`: Validates timing integrity (ranges, overlaps, gaps)
 * - `words`: Validates word limits and sentence boundaries
 */

pub mod timecodes;
pub mod words;

use log::warn;

use crate::pipeline::PipelineConfig;
use crate::subtitle_processor::Segment;

pub use timecodes::{TimecodeIssue, TimecodeValidator, TimecodeValidatorConfig};
pub use words::{validate_words, WordIssue};

/// Combined findings for one track
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    /// Timing findings
    pub timecode_issues: Vec<TimecodeIssue>,
    /// Word and sentence findings
    pub word_issues: Vec<WordIssue>,
}

impl ValidationReport {
    /// Whether the track has no findings
    pub fn is_clean(&self) -> bool {
        self.timecode_issues.is_empty() && self.word_issues.is_empty()
    }

    /// Total number of findings
    pub fn issue_count(&self) -> usize {
        self.timecode_issues.len() + self.word_issues.len()
    }

    /// Log every finding as a warning
    pub fn log_issues(&self) {
        for issue in &self.timecode_issues {
            warn!("{}", issue);
        }
        for issue in &self.word_issues {
            warn!("{}", issue);
        }
    }
}

/// Validates tracks against the settings they were normalized with
pub struct TrackValidator {
    timecodes: TimecodeValidator,
    max_words: usize,
}

impl TrackValidator {
    /// Create a validator matching a pipeline configuration
    pub fn for_pipeline(config: &PipelineConfig) -> Self {
        Self {
            timecodes: TimecodeValidator::with_config(TimecodeValidatorConfig {
                expect_filled_gaps: config.timing.fill_gaps,
                bridge_max_ms: config.timing.bridge_max_ms,
            }),
            max_words: config.max_words.max(1),
        }
    }

    /// Validate a normalized track
    pub fn validate(&self, segments: &[Segment]) -> ValidationReport {
        ValidationReport {
            timecode_issues: self.timecodes.validate(segments),
            word_issues: validate_words(segments, self.max_words),
        }
    }
}
