/*!
 * Tests for post-run validation of normalized tracks
 */

use subnorm::pipeline::{NormalizationPipeline, PipelineConfig};
use subnorm::validation::{TimecodeIssue, TrackValidator, WordIssue};
use crate::common::seg;

/// Test that pipeline output passes validation with the same settings
#[test]
fn test_trackValidator_onPipelineOutput_shouldBeClean() {
    let config = PipelineConfig::new(3).with_fill_gaps(true);
    let input = vec![
        seg(0, 3_000, "The first caption runs long. And then"),
        seg(2_800, 4_000, "it keeps going"),
        seg(6_000, 6_000, "done"),
    ];

    let output = NormalizationPipeline::new(config.clone()).normalize(&input, Some(12_000.0));
    let report = TrackValidator::for_pipeline(&config).validate(&output);

    assert!(report.is_clean(), "{:?}", report);
    assert_eq!(output.last().map(|s| s.end_ms), Some(12_000));
}

/// Test that raw input is flagged
#[test]
fn test_trackValidator_onRawInput_shouldReportIssues() {
    let config = PipelineConfig::new(3);
    let input = vec![
        seg(0, 3_000, "The first caption runs long. And then"),
        seg(2_800, 4_000, "it keeps going"),
    ];

    let report = TrackValidator::for_pipeline(&config).validate(&input);

    assert!(!report.is_clean());
    assert!(report.timecode_issues.contains(&TimecodeIssue::Overlap { index: 1, overlap_ms: 200 }));
    assert!(report.word_issues.contains(&WordIssue::WordLimitExceeded { index: 1, words: 7, max_words: 3 }));
    assert!(report.word_issues.iter().any(|issue| matches!(issue, WordIssue::SentenceLeak { index: 1, .. })));
    assert_eq!(report.issue_count(), report.timecode_issues.len() + report.word_issues.len());
}
