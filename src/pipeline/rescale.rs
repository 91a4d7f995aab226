/*!
 * Duration rescaling.
 *
 * Model timestamps drift against the real audio. When the true duration is
 * known, every timestamp is scaled by `duration / last_end` so the track ends
 * where the audio ends.
 */

use log::{debug, warn};

use crate::subtitle_processor::Segment;

/// Below this last-end value the model timestamps are considered unusable
pub const MIN_RESCALE_SPAN_MS: u64 = 1_000;

/// Scale all timestamps so the last segment ends at `duration_ms`.
///
/// Returns the input unchanged when no usable duration is given, the list is
/// empty, or the last end is under [`MIN_RESCALE_SPAN_MS`]. Each endpoint is
/// rounded independently; the final end never exceeds the duration.
pub fn rescale_to_duration(segments: &[Segment], duration_ms: Option<f64>) -> Vec<Segment> {
    match (scale_factor(segments, duration_ms), duration_ms) {
        (Some(scale), Some(target_ms)) => apply_scale(segments, scale, target_ms),
        _ => segments.to_vec(),
    }
}

/// The factor [`rescale_to_duration`] would apply, if any.
pub fn scale_factor(segments: &[Segment], duration_ms: Option<f64>) -> Option<f64> {
    let duration_ms = duration_ms?;
    if !duration_ms.is_finite() || duration_ms <= 0.0 {
        warn!("Ignoring invalid target duration: {}ms", duration_ms);
        return None;
    }

    let last_end = segments.last()?.end_ms;
    if last_end < MIN_RESCALE_SPAN_MS {
        warn!("Transcribed timestamps too small ({}ms), skipping rescale", last_end);
        return None;
    }

    let scale = duration_ms / last_end as f64;
    let difference = (last_end as f64 - duration_ms).abs() / duration_ms;
    debug!(
        "Scaling timings: transcribed={:.2}s -> actual={:.2}s (scale factor: {:.3}, diff: {:.1}%)",
        last_end as f64 / 1000.0,
        duration_ms / 1000.0,
        scale,
        difference * 100.0
    );

    Some(scale)
}

/// Multiply every endpoint by `scale`, capping the final end at `duration_ms`.
pub fn apply_scale(segments: &[Segment], scale: f64, duration_ms: f64) -> Vec<Segment> {
    let limit = duration_ms.round() as u64;
    let last = segments.len().saturating_sub(1);

    segments
        .iter()
        .enumerate()
        .map(|(i, segment)| {
            let start_ms = scale_point(segment.start_ms, scale);
            let mut end_ms = scale_point(segment.end_ms, scale);
            if i == last {
                end_ms = end_ms.min(limit);
            }
            Segment {
                start_ms,
                end_ms,
                text: segment.text.clone(),
            }
        })
        .collect()
}

fn scale_point(ms: u64, scale: f64) -> u64 {
    (ms as f64 * scale).round() as u64
}
