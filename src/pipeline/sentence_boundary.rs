/*!
 * Sentence-boundary repair.
 *
 * Splitting by word count ignores punctuation, so a caption can end with the
 * first words of the next sentence ("...the problem. This"). The fixer moves
 * such trailing words to the front of the following caption. Timestamps are
 * left alone: the moved words keep the timing of the segment they land in.
 */

use once_cell::sync::Lazy;
use regex::Regex;

use crate::subtitle_processor::Segment;

// @const: Shortest prefix ending in a terminator that is followed by more words
static SENTENCE_BREAK_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^(.+?[.?!])\s+(\S.*)$").unwrap()
});

/// Split `text` after its first sentence terminator that has words after it.
///
/// Returns `(head, tail)` with the head ending at the terminator, or `None`
/// when the text holds a single sentence (or ends at its terminator).
pub fn split_at_sentence_break(text: &str) -> Option<(&str, &str)> {
    SENTENCE_BREAK_REGEX.captures(text.trim()).and_then(|caps| {
        let head = caps.get(1)?.as_str();
        let tail = caps.get(2)?.as_str();
        Some((head, tail))
    })
}

/// Move words that follow a sentence terminator into the next segment.
///
/// Single left-to-right pass; the last segment is never rewritten. Words only
/// ever move forward, and a segment that received words is examined in turn
/// when the pass reaches it.
pub fn fix_sentence_boundaries(segments: &[Segment]) -> Vec<Segment> {
    fix_sentence_boundaries_counted(segments).0
}

/// Same as [`fix_sentence_boundaries`], also returning how many segments
/// were cut at a sentence boundary.
pub fn fix_sentence_boundaries_counted(segments: &[Segment]) -> (Vec<Segment>, usize) {
    let mut result = segments.to_vec();
    let mut fixes = 0;

    for i in 0..result.len().saturating_sub(1) {
        let Some((head, tail)) = split_at_sentence_break(&result[i].text) else {
            continue;
        };
        let (head, tail) = (head.to_string(), tail.to_string());

        let next_text = result[i + 1].text.trim();
        result[i + 1].text = if next_text.is_empty() {
            tail
        } else {
            format!("{} {}", tail, next_text)
        };
        result[i].text = head;
        fixes += 1;
    }

    (result, fixes)
}
