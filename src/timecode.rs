/*!
 * SubRip timestamp codec.
 *
 * Timestamps travel as `HH:MM:SS,mmm` text and are handled internally as
 * integer milliseconds. Parsing is lenient: a field that is missing or not a
 * number counts as zero, so a malformed record degrades instead of aborting
 * the whole track.
 */

const MS_PER_HOUR: u64 = 3_600_000;
const MS_PER_MINUTE: u64 = 60_000;
const MS_PER_SECOND: u64 = 1_000;

/// Parse a `HH:MM:SS,mmm` timestamp into milliseconds.
///
/// Fields are separated by `:` and `,`. Each field is read from its leading
/// digits, so `"05abc"` is 5 and `"abc"` is 0. Fields past the fourth are
/// ignored.
pub fn parse_timestamp(text: &str) -> u64 {
    let mut fields = text.trim().split([':', ',']).map(lenient_field);

    let hours = fields.next().unwrap_or(0);
    let minutes = fields.next().unwrap_or(0);
    let seconds = fields.next().unwrap_or(0);
    let millis = fields.next().unwrap_or(0);

    hours
        .saturating_mul(MS_PER_HOUR)
        .saturating_add(minutes.saturating_mul(MS_PER_MINUTE))
        .saturating_add(seconds.saturating_mul(MS_PER_SECOND))
        .saturating_add(millis)
}

/// Parse a timestamp and apply a time multiplier.
///
/// The multiplier undoes a speed change applied to the audio before
/// transcription (audio sped up 1.5x yields timestamps that must be
/// multiplied by 1.5). The product is rounded to the nearest millisecond.
pub fn parse_timestamp_scaled(text: &str, multiplier: f64) -> u64 {
    let ms = parse_timestamp(text);
    if multiplier == 1.0 || !multiplier.is_finite() || multiplier <= 0.0 {
        return ms;
    }
    (ms as f64 * multiplier).round() as u64
}

/// Format milliseconds as a SubRip timestamp (`HH:MM:SS,mmm`).
pub fn format_timestamp(ms: u64) -> String {
    let hours = ms / MS_PER_HOUR;
    let minutes = (ms % MS_PER_HOUR) / MS_PER_MINUTE;
    let seconds = (ms % MS_PER_MINUTE) / MS_PER_SECOND;
    let millis = ms % MS_PER_SECOND;

    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
}

fn lenient_field(field: &str) -> u64 {
    let field = field.trim();
    let digits_end = field
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(field.len());
    field[..digits_end].parse().unwrap_or(0)
}
