/*!
 * Tests for payload intake and the timestamp codec
 */

use subnorm::errors::PayloadError;
use subnorm::payload::{parse_payload, segments_from_payload, strip_code_fences};
use subnorm::timecode::{format_timestamp, parse_timestamp, parse_timestamp_scaled};
use crate::common;

/// Test the codec on canonical and boundary values
#[test]
fn test_timestamp_withCanonicalValues_shouldRoundTrip() {
    for ms in [0u64, 1, 999, 1_000, 59_999, 60_000, 3_599_999, 3_600_000, 359_999_999] {
        assert_eq!(parse_timestamp(&format_timestamp(ms)), ms);
    }
    assert_eq!(format_timestamp(3_723_004), "01:02:03,004");
    assert_eq!(format_timestamp(100 * 3_600_000), "100:00:00,000");
}

/// Test that malformed timestamps degrade to zero fields instead of failing
#[test]
fn test_parseTimestamp_withMalformedInput_shouldBeLenient() {
    assert_eq!(parse_timestamp(""), 0);
    assert_eq!(parse_timestamp("garbage"), 0);
    assert_eq!(parse_timestamp("00:00:05"), 5_000);
    assert_eq!(parse_timestamp("00:xx:05,250"), 5_250);
}

/// Test the multiplier is applied once and rounded
#[test]
fn test_parseTimestampScaled_shouldMultiplyAndRound() {
    assert_eq!(parse_timestamp_scaled("00:00:10,000", 1.5), 15_000);
    assert_eq!(parse_timestamp_scaled("00:00:00,001", 1.5), 2);
    assert_eq!(parse_timestamp_scaled("00:00:10,000", 1.0), 10_000);
}

/// Test fenced payloads are accepted
#[test]
fn test_parsePayload_withCodeFences_shouldRecover() {
    let fenced = "```json\n[{\"start\":\"00:00:01,000\",\"end\":\"00:00:02,000\",\"text\":\"Hi\"}]\n```";
    let records = parse_payload(fenced).unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].text, "Hi");
    assert_eq!(strip_code_fences("```\n[]\n```"), "[]");
}

/// Test that non-JSON text is reported as malformed
#[test]
fn test_parsePayload_withProse_shouldBeMalformed() {
    let result = parse_payload("Sorry, I could not transcribe this audio.");
    assert!(matches!(result, Err(PayloadError::Malformed(_))));

    let result = parse_payload(r#"{"start": "00:00:00,000"}"#);
    assert!(matches!(result, Err(PayloadError::Malformed(_))));
}

/// Test missing and non-string fields are tolerated
#[test]
fn test_parsePayload_withSloppyRecords_shouldFillBlanks() {
    let records = parse_payload(r#"[{"text": "no times"}, {"start": null, "end": 5, "text": "x"}]"#).unwrap();

    assert_eq!(records[0].start, "");
    assert_eq!(records[0].end, "");
    assert_eq!(records[1].start, "");
    assert_eq!(records[1].end, "");
}

/// Test that numeric timestamps are read as zero rather than as hours
#[test]
fn test_segmentsFromPayload_withNumericEnd_shouldNotStretchCaption() {
    let segments = segments_from_payload(r#"[{"start":0,"end":3,"text":"x"}]"#, 1.0).unwrap();

    assert_eq!(segments[0].start_ms, 0);
    assert_eq!(segments[0].end_ms, 0);
}

/// Test conversion to ordered segments with the multiplier applied
#[test]
fn test_segmentsFromPayload_shouldSortDropBlanksAndScale() {
    let payload = common::payload_json(&[
        ("00:00:04,000", "00:00:05,000", "second"),
        ("00:00:01,000", "00:00:02,000", "first"),
        ("00:00:06,000", "00:00:07,000", "   "),
    ]);

    let segments = segments_from_payload(&payload, 2.0).unwrap();

    assert_eq!(common::texts(&segments), vec!["first", "second"]);
    assert_eq!(common::spans(&segments), vec![(2_000, 4_000), (8_000, 10_000)]);
}

/// Test that a payload without any text is an error
#[test]
fn test_segmentsFromPayload_withOnlyBlankText_shouldBeEmpty() {
    let payload = common::payload_json(&[("00:00:00,000", "00:00:01,000", "")]);
    assert!(matches!(segments_from_payload(&payload, 1.0), Err(PayloadError::Empty)));
    assert!(matches!(segments_from_payload("[]", 1.0), Err(PayloadError::Empty)));
}
