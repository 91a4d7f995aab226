use std::fmt;

use crate::timecode;

// @module: Caption segments and SubRip rendering

/// Byte-order mark written ahead of SubRip output so editors pick UTF-8
/// for non-ASCII captions.
pub const UTF8_BOM: char = '\u{FEFF}';

// @struct: Single caption segment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    // @field: Start time in ms
    pub start_ms: u64,

    // @field: End time in ms
    pub end_ms: u64,

    // @field: Caption text (whitespace-delimited words)
    pub text: String,
}

impl Segment {
    /// Creates a new segment
    pub fn new(start_ms: u64, end_ms: u64, text: impl Into<String>) -> Self {
        Segment {
            start_ms,
            end_ms,
            text: text.into(),
        }
    }

    /// Words of the caption in order
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.text.split_whitespace()
    }

    /// Number of whitespace-delimited words
    pub fn word_count(&self) -> usize {
        self.words().count()
    }

    /// Duration in ms, zero when the range is inverted
    pub fn duration_ms(&self) -> u64 {
        self.end_ms.saturating_sub(self.start_ms)
    }

    /// Convert start time to formatted SRT timestamp
    pub fn format_start_time(&self) -> String {
        timecode::format_timestamp(self.start_ms)
    }

    /// Convert end time to formatted SRT timestamp
    pub fn format_end_time(&self) -> String {
        timecode::format_timestamp(self.end_ms)
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{} --> {}] {}", self.format_start_time(), self.format_end_time(), self.text.trim())
    }
}

/// Ordered caption track ready to be rendered
#[derive(Debug, Clone)]
pub struct SubtitleTrack {
    /// Segments in temporal order
    pub segments: Vec<Segment>,
}

impl SubtitleTrack {
    /// Create a track from already normalized segments
    pub fn new(segments: Vec<Segment>) -> Self {
        SubtitleTrack { segments }
    }

    /// Render the track as SubRip text, prefixed with a UTF-8 BOM.
    ///
    /// Each entry is `index`, `start --> end`, the trimmed text, then a
    /// blank line. Indices start at 1.
    pub fn to_srt(&self) -> String {
        let mut out = String::with_capacity(self.segments.len() * 64 + 3);
        out.push(UTF8_BOM);

        for (i, segment) in self.segments.iter().enumerate() {
            out.push_str(&format!(
                "{}\n{} --> {}\n{}\n\n",
                i + 1,
                segment.format_start_time(),
                segment.format_end_time(),
                segment.text.trim()
            ));
        }

        out
    }
}
