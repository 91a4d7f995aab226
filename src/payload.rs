/*!
 * Transcription payload intake.
 *
 * The transcription model answers with a JSON array of
 * `{"start": "HH:MM:SS,mmm", "end": "...", "text": "..."}` records. Models
 * sometimes wrap the array in markdown code fences, and individual records
 * can be sloppy (numbers instead of strings, missing fields). This module
 * turns that answer into an ordered list of [`Segment`]s without ever
 * failing on a single bad record.
 */

use log::{debug, warn};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::errors::PayloadError;
use crate::subtitle_processor::Segment;
use crate::timecode;

/// One record of the transcription payload, before any timing is applied
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct RawSegment {
    /// Start timestamp text
    #[serde(default, deserialize_with = "timestamp_text")]
    pub start: String,

    /// End timestamp text
    #[serde(default, deserialize_with = "timestamp_text")]
    pub end: String,

    /// Caption text
    #[serde(default, deserialize_with = "lenient_string")]
    pub text: String,
}

impl RawSegment {
    /// Convert to a segment, applying the time multiplier exactly once
    pub fn into_segment(self, time_multiplier: f64) -> Segment {
        Segment {
            start_ms: timecode::parse_timestamp_scaled(&self.start, time_multiplier),
            end_ms: timecode::parse_timestamp_scaled(&self.end, time_multiplier),
            text: self.text.trim().to_string(),
        }
    }
}

/// Keep string timestamps; anything else becomes empty and parses as zero.
///
/// A bare number carries no unit, and reading `3` as the hours field would
/// stretch a caption over hours.
fn timestamp_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => {
            warn!("Non-string timestamp in payload record, reading it as zero: {}", other);
            String::new()
        }
    })
}

/// Accept strings, numbers, booleans and null where text is expected.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => {
            warn!("Unexpected value in payload record, ignoring: {}", other);
            String::new()
        }
    })
}

/// Parse the payload text into raw records.
///
/// The text is parsed as-is first. On failure, code-fence markers are removed
/// and parsing is retried once; a second failure is reported as
/// [`PayloadError::Malformed`].
pub fn parse_payload(text: &str) -> Result<Vec<RawSegment>, PayloadError> {
    match serde_json::from_str::<Vec<RawSegment>>(text) {
        Ok(records) => Ok(records),
        Err(first_error) => {
            debug!("Payload is not plain JSON ({}), retrying without code fences", first_error);
            let cleaned = strip_code_fences(text);
            serde_json::from_str::<Vec<RawSegment>>(&cleaned)
                .map_err(|e| PayloadError::Malformed(e.to_string()))
        }
    }
}

/// Remove ```` ```json ```` and ```` ``` ```` markers and surrounding whitespace
pub fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_string()
}

/// Parse a payload into ordered segments.
///
/// Records with blank text are dropped. The remaining segments are
/// stable-sorted by start time so later stages can rely on temporal order.
pub fn segments_from_payload(text: &str, time_multiplier: f64) -> Result<Vec<Segment>, PayloadError> {
    let records = parse_payload(text)?;
    let total = records.len();

    let mut segments: Vec<Segment> = records
        .into_iter()
        .map(|record| record.into_segment(time_multiplier))
        .filter(|segment| !segment.text.is_empty())
        .collect();

    if segments.len() < total {
        warn!("Dropped {} payload records without text", total - segments.len());
    }

    if segments.is_empty() {
        return Err(PayloadError::Empty);
    }

    if segments.windows(2).any(|pair| pair[0].start_ms > pair[1].start_ms) {
        warn!("Payload segments are out of order, sorting by start time");
        segments.sort_by_key(|segment| segment.start_ms);
    }

    debug!("Parsed {} segments from payload", segments.len());
    Ok(segments)
}
