/*!
 * Word and sentence checks for normalized tracks.
 */

use crate::pipeline::sentence_boundary::split_at_sentence_break;
use crate::subtitle_processor::Segment;

/// Types of word issues
#[derive(Debug, Clone, PartialEq)]
pub enum WordIssue {
    /// Segment holds more words than allowed
    WordLimitExceeded {
        index: usize,
        words: usize,
        max_words: usize,
    },
    /// Segment carries the start of another sentence after a terminator
    SentenceLeak {
        index: usize,
        trailing: String,
    },
}

impl std::fmt::Display for WordIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WordIssue::WordLimitExceeded { index, words, max_words } => {
                write!(f, "Segment {}: {} words (max: {})", index, words, max_words)
            }
            WordIssue::SentenceLeak { index, trailing } => {
                write!(f, "Segment {}: words after sentence end: {:?}", index, trailing)
            }
        }
    }
}

/// Check word limits and sentence leaks. Segment indices are 1-based.
///
/// The last segment is exempt from the sentence check since nothing follows
/// it to take the trailing words.
pub fn validate_words(segments: &[Segment], max_words: usize) -> Vec<WordIssue> {
    let mut issues = Vec::new();
    let last = segments.len().saturating_sub(1);

    for (i, segment) in segments.iter().enumerate() {
        let words = segment.word_count();
        if words > max_words {
            issues.push(WordIssue::WordLimitExceeded {
                index: i + 1,
                words,
                max_words,
            });
        }

        if i < last {
            if let Some((_, trailing)) = split_at_sentence_break(&segment.text) {
                issues.push(WordIssue::SentenceLeak {
                    index: i + 1,
                    trailing: trailing.to_string(),
                });
            }
        }
    }

    issues
}
