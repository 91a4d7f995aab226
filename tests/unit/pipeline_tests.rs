/*!
 * Tests for the normalization stages working together
 */

use subnorm::pipeline::{
    enforce_max_words, fix_sentence_boundaries, rescale_to_duration, sanitize_timing,
    NormalizationPipeline, PipelineConfig, TimingConfig,
};
use subnorm::Segment;
use crate::common::{seg, spans, texts};

fn sample_track() -> Vec<Segment> {
    vec![
        seg(0, 4_000, "one two three four five six seven eight nine ten. eleven"),
        seg(3_900, 6_000, "twelve thirteen"),
        seg(6_100, 6_100, "fourteen"),
        seg(9_000, 12_000, "fifteen sixteen seventeen"),
    ]
}

/// Test the splitter tiles the original range with equal slices
#[test]
fn test_enforceMaxWords_shouldTileRangeEvenly() {
    let output = enforce_max_words(&[seg(1_000, 2_000, "a b c d e f g")], 3);

    assert_eq!(texts(&output), vec!["a b c", "d e f", "g"]);
    assert_eq!(spans(&output), vec![(1_000, 1_333), (1_333, 1_666), (1_666, 2_000)]);
}

/// Test the splitter never drops or reorders words
#[test]
fn test_enforceMaxWords_shouldPreserveWordSequence() {
    let input = sample_track();
    for limit in 1..=8 {
        let output = enforce_max_words(&input, limit);
        let before: Vec<&str> = input.iter().flat_map(|s| s.words()).collect();
        let after: Vec<&str> = output.iter().flat_map(|s| s.words()).collect();
        assert_eq!(before, after, "limit {}", limit);
        assert!(output.iter().all(|s| s.word_count() <= limit));
    }
}

/// Test the fixer only moves words forward and keeps every timestamp
#[test]
fn test_fixSentenceBoundaries_shouldKeepTimingAndWords() {
    let input = vec![seg(0, 1_000, "Done. Next"), seg(1_000, 2_000, "part. More"), seg(2_000, 3_000, "end")];

    let output = fix_sentence_boundaries(&input);

    assert_eq!(texts(&output), vec!["Done.", "Next part.", "More end"]);
    assert_eq!(spans(&output), spans(&input));
}

/// Test the sanitizer leaves no overlaps or inverted ranges
#[test]
fn test_sanitizeTiming_onMessyTrack_shouldBeMonotonic() {
    let output = sanitize_timing(&sample_track(), &TimingConfig::default());

    for segment in &output {
        assert!(segment.start_ms <= segment.end_ms);
    }
    for pair in output.windows(2) {
        assert!(pair[0].end_ms <= pair[1].start_ms);
    }
    assert_eq!(spans(&output), vec![(0, 3_900), (3_900, 6_100), (6_100, 7_100), (9_000, 12_000)]);
}

/// Test the bridge cap keeps long pauses open
#[test]
fn test_sanitizeTiming_withBridgeCap_shouldOnlyFillShortGaps() {
    let config = TimingConfig::default().with_fill_gaps(true).with_bridge_max(Some(1_000));
    let input = vec![seg(0, 1_000, "a"), seg(1_800, 2_000, "b"), seg(5_000, 6_000, "c")];

    let output = sanitize_timing(&input, &config);

    assert_eq!(spans(&output), vec![(0, 1_800), (1_800, 2_000), (5_000, 6_000)]);
}

/// Test rescaling maps the last end onto the duration
#[test]
fn test_rescaleToDuration_shouldEndAtDuration() {
    let input = vec![seg(0, 1_500, "a"), seg(1_500, 3_000, "b")];

    let output = rescale_to_duration(&input, Some(4_500.0));

    assert_eq!(spans(&output), vec![(0, 2_250), (2_250, 4_500)]);
    assert_eq!(rescale_to_duration(&input, None), input);
    assert_eq!(rescale_to_duration(&input, Some(-1.0)), input);
}

/// Test the full pipeline on a track that needs every stage
#[test]
fn test_pipeline_withMessyTrack_shouldProduceCleanOutput() {
    let pipeline = NormalizationPipeline::new(PipelineConfig::new(4).with_fill_gaps(true));

    let output = pipeline.run(&sample_track(), Some(24_000.0));

    let segments = &output.segments;
    assert_eq!(segments.last().map(|s| s.end_ms), Some(24_000));
    for pair in segments.windows(2) {
        assert!(pair[0].end_ms <= pair[1].start_ms);
        assert_eq!(pair[0].end_ms, pair[1].start_ms, "gap filling should close every gap");
    }
    assert_eq!(output.stats.input_segments, 4);
    assert_eq!(output.stats.scale_factor, Some(2.0));

    let before: Vec<String> = sample_track().iter().flat_map(|s| s.words().map(str::to_string).collect::<Vec<_>>()).collect();
    let after: Vec<String> = segments.iter().flat_map(|s| s.words().map(str::to_string).collect::<Vec<_>>()).collect();
    assert_eq!(before, after);
}

/// Test a second normalization pass without rescaling changes nothing
#[test]
fn test_pipeline_runTwice_shouldBeStable() {
    let pipeline = NormalizationPipeline::new(PipelineConfig::new(4));

    let once = pipeline.normalize(&sample_track(), None);
    let twice = pipeline.normalize(&once, None);

    assert_eq!(once, twice);
}

/// Test overlapping source records that need splitting end up ordered and overlap-free
#[test]
fn test_pipeline_withOverlappingLongRecords_shouldKeepStartsOrdered() {
    let pipeline = NormalizationPipeline::new(PipelineConfig::new(2));
    let input = vec![
        seg(0, 5_000, "a b c d"),
        seg(1_000, 2_000, "e"),
        seg(1_500, 6_000, "f g h i j"),
        seg(4_000, 7_000, "k"),
    ];

    let output = pipeline.normalize(&input, None);

    for pair in output.windows(2) {
        assert!(pair[0].start_ms <= pair[1].start_ms, "{:?}", pair);
        assert!(pair[0].end_ms <= pair[1].start_ms, "{:?}", pair);
    }
    assert_eq!(spans(&output[..2]), vec![(0, 500), (500, 1_000)]);
}
