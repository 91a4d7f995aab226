/*!
 * Timecode validation for normalized tracks.
 *
 * This module checks that a track's timing holds after normalization:
 * - Each segment ends no earlier than it starts
 * - Adjacent segments do not overlap
 * - With gap filling on, adjacent segments touch
 */

use log::debug;

use crate::subtitle_processor::Segment;

/// Types of timecode issues
#[derive(Debug, Clone, PartialEq)]
pub enum TimecodeIssue {
    /// End time is before start time
    InvalidTimeRange {
        index: usize,
        start_ms: u64,
        end_ms: u64,
    },
    /// Segment runs into the next one
    Overlap {
        index: usize,
        overlap_ms: u64,
    },
    /// Gap left open although gap filling was requested
    UnfilledGap {
        index: usize,
        gap_ms: u64,
    },
}

impl std::fmt::Display for TimecodeIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimecodeIssue::InvalidTimeRange { index, start_ms, end_ms } => {
                write!(f, "Segment {}: invalid time range, start {}ms > end {}ms", index, start_ms, end_ms)
            }
            TimecodeIssue::Overlap { index, overlap_ms } => {
                write!(f, "Segment {}: overlaps the next segment by {}ms", index, overlap_ms)
            }
            TimecodeIssue::UnfilledGap { index, gap_ms } => {
                write!(f, "Segment {}: {}ms gap to the next segment was not filled", index, gap_ms)
            }
        }
    }
}

/// Configuration for timecode validation
#[derive(Debug, Clone, Default)]
pub struct TimecodeValidatorConfig {
    /// Report every open gap (gap filling was enabled)
    pub expect_filled_gaps: bool,
    /// Gaps above this are allowed to stay open even when filling
    pub bridge_max_ms: Option<u64>,
}

/// Timecode validator for normalized segments
pub struct TimecodeValidator {
    config: TimecodeValidatorConfig,
}

impl TimecodeValidator {
    /// Create a new validator with default configuration
    pub fn new() -> Self {
        Self {
            config: TimecodeValidatorConfig::default(),
        }
    }

    /// Create a new validator with custom configuration
    pub fn with_config(config: TimecodeValidatorConfig) -> Self {
        Self { config }
    }

    /// Validate a track. Segment indices in issues are 1-based.
    pub fn validate(&self, segments: &[Segment]) -> Vec<TimecodeIssue> {
        let mut issues = Vec::new();

        for (i, segment) in segments.iter().enumerate() {
            let index = i + 1;

            if segment.end_ms < segment.start_ms {
                issues.push(TimecodeIssue::InvalidTimeRange {
                    index,
                    start_ms: segment.start_ms,
                    end_ms: segment.end_ms,
                });
            }

            let Some(next) = segments.get(i + 1) else {
                continue;
            };

            if segment.end_ms > next.start_ms {
                issues.push(TimecodeIssue::Overlap {
                    index,
                    overlap_ms: segment.end_ms - next.start_ms,
                });
            } else if self.config.expect_filled_gaps && next.start_ms > segment.end_ms {
                let gap_ms = next.start_ms - segment.end_ms;
                if self.config.bridge_max_ms.is_none_or(|max| gap_ms <= max) {
                    issues.push(TimecodeIssue::UnfilledGap { index, gap_ms });
                }
            }
        }

        debug!("Timecode validation: {} segments, {} issues", segments.len(), issues.len());
        issues
    }
}

impl Default for TimecodeValidator {
    fn default() -> Self {
        Self::new()
    }
}
