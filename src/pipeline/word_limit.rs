/*!
 * Word-limit splitting.
 *
 * A segment holding more words than the configured limit is cut into
 * `ceil(words / limit)` consecutive chunks. The original time range is shared
 * out in equal slices, so the chunks tile `[start, end]` exactly. When the
 * next segment already starts inside that range, the slices stop at its
 * start so no chunk begins after it.
 */

use crate::subtitle_processor::Segment;

/// Split every segment longer than `limit` words.
///
/// Segments within the limit are passed through untouched. A limit of zero
/// is treated as one.
pub fn enforce_max_words(segments: &[Segment], limit: usize) -> Vec<Segment> {
    let limit = limit.max(1);
    let mut result = Vec::with_capacity(segments.len());

    for (index, segment) in segments.iter().enumerate() {
        let words: Vec<&str> = segment.words().collect();
        if words.len() <= limit {
            result.push(segment.clone());
            continue;
        }

        let span_end = match segments.get(index + 1) {
            Some(next) => segment.end_ms.min(next.start_ms.max(segment.start_ms)),
            None => segment.end_ms,
        };

        let chunks = words.len().div_ceil(limit);
        for (i, chunk_words) in words.chunks(limit).enumerate() {
            result.push(Segment {
                start_ms: slice_boundary(segment.start_ms, span_end, i, chunks),
                end_ms: slice_boundary(segment.start_ms, span_end, i + 1, chunks),
                text: chunk_words.join(" "),
            });
        }
    }

    result
}

/// Boundary `index` of `chunks` equal slices over `[start, end]`.
///
/// Boundary 0 is the start and boundary `chunks` is the end, so adjacent
/// slices share their boundary and nothing is lost to rounding.
fn slice_boundary(start: u64, end: u64, index: usize, chunks: usize) -> u64 {
    let duration = end.saturating_sub(start) as u128;
    let offset = duration * index as u128 / chunks as u128;
    start + offset as u64
}
