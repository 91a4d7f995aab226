/*!
 * Timing sanitizer.
 *
 * One left-to-right pass that repairs each segment against its successor:
 * 1. a non-positive duration is extended to the minimum duration,
 * 2. an end that runs past the next start is clamped to it,
 * 3. a gap shorter than the micro-gap threshold is closed, and with gap
 *    filling enabled every remaining positive gap is closed too.
 *
 * Only end times are rewritten. Start times stay as parsed.
 */

use log::trace;

use crate::subtitle_processor::Segment;

/// Gaps below this are treated as model jitter and always closed
pub const DEFAULT_MICRO_GAP_MS: u64 = 300;

/// Duration given to segments whose end is not after their start
pub const DEFAULT_MIN_DURATION_MS: u64 = 1_000;

/// Settings for the timing sanitizer
#[derive(Debug, Clone, PartialEq)]
pub struct TimingConfig {
    /// Gaps strictly shorter than this are snapped closed
    pub micro_gap_ms: u64,

    /// Duration assigned when `end <= start`
    pub min_duration_ms: u64,

    /// Close every positive gap so the previous caption stays visible
    pub fill_gaps: bool,

    /// Largest gap gap-filling may close; `None` closes gaps of any size
    pub bridge_max_ms: Option<u64>,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            micro_gap_ms: DEFAULT_MICRO_GAP_MS,
            min_duration_ms: DEFAULT_MIN_DURATION_MS,
            fill_gaps: false,
            bridge_max_ms: None,
        }
    }
}

impl TimingConfig {
    /// Enable or disable gap filling.
    pub fn with_fill_gaps(mut self, enabled: bool) -> Self {
        self.fill_gaps = enabled;
        self
    }

    /// Cap the gaps that gap filling may close.
    pub fn with_bridge_max(mut self, bridge_max_ms: Option<u64>) -> Self {
        self.bridge_max_ms = bridge_max_ms;
        self
    }

    fn may_bridge(&self, gap_ms: u64) -> bool {
        self.fill_gaps && self.bridge_max_ms.is_none_or(|max| gap_ms <= max)
    }
}

/// Counts of the repairs made by one sanitizer pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimingRepairs {
    /// Segments extended to the minimum duration
    pub extended: usize,
    /// Ends clamped back to the next start
    pub clamped: usize,
    /// Micro gaps snapped closed
    pub snapped: usize,
    /// Larger gaps closed by gap filling
    pub bridged: usize,
}

impl TimingRepairs {
    /// Total number of repairs
    pub fn total(&self) -> usize {
        self.extended + self.clamped + self.snapped + self.bridged
    }
}

/// Sanitize segment timing, returning the repaired segments.
pub fn sanitize_timing(segments: &[Segment], config: &TimingConfig) -> Vec<Segment> {
    sanitize_timing_with_repairs(segments, config).0
}

/// Sanitize segment timing and report which repairs were made.
pub fn sanitize_timing_with_repairs(segments: &[Segment], config: &TimingConfig) -> (Vec<Segment>, TimingRepairs) {
    let mut result = segments.to_vec();
    let mut repairs = TimingRepairs::default();

    for i in 0..result.len() {
        let start = result[i].start_ms;
        let mut end = result[i].end_ms;

        if end <= start {
            end = start.saturating_add(config.min_duration_ms);
            repairs.extended += 1;
        }

        if let Some(next_start) = result.get(i + 1).map(|next| next.start_ms) {
            if end > next_start {
                end = next_start.max(start);
                repairs.clamped += 1;
            }

            let gap = next_start.saturating_sub(end);
            if gap > 0 && gap < config.micro_gap_ms {
                end = next_start;
                repairs.snapped += 1;
            } else if gap > 0 && config.may_bridge(gap) {
                end = next_start;
                repairs.bridged += 1;
            }
        }

        if end != result[i].end_ms {
            trace!("Segment {}: end {}ms -> {}ms", i + 1, result[i].end_ms, end);
        }
        result[i].end_ms = end;
    }

    (result, repairs)
}
