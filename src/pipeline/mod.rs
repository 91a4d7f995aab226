/*!
 * Caption normalization pipeline.
 *
 * Each stage is a pure function from a segment list to a new segment list:
 * 1. **Word limit**: split captions longer than the word limit
 * 2. **Sentence boundary**: move words after a sentence terminator forward
 * 3. **Timing**: repair durations, overlaps and gaps
 * 4. **Rescale**: stretch the track to the true audio duration
 *
 * The orchestrator chains them and collects statistics.
 */

pub mod orchestrator;
pub mod rescale;
pub mod sentence_boundary;
pub mod timing;
pub mod word_limit;

// Re-export types used externally
pub use orchestrator::{NormalizationPipeline, PipelineConfig, PipelineOutput, PipelineStats};
pub use rescale::rescale_to_duration;
pub use sentence_boundary::fix_sentence_boundaries;
pub use timing::{sanitize_timing, TimingConfig, TimingRepairs};
pub use word_limit::enforce_max_words;
