use anyhow::{Result, anyhow};
use log::{error, warn, info, debug};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use indicatif::{ProgressBar, ProgressStyle};

use crate::app_config::Config;
use crate::errors::AppError;
use crate::file_utils::FileManager;
use crate::media_probe;
use crate::payload;
use crate::pipeline::{NormalizationPipeline, PipelineStats};
use crate::subtitle_processor::{Segment, SubtitleTrack};
use crate::validation::TrackValidator;

// @module: Application controller for caption normalization

/// Where the true duration of the audio comes from
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DurationSource {
    /// No duration known, timing is not rescaled
    #[default]
    Unknown,
    /// Duration in ms supplied by the caller (host sequence length)
    Explicit(f64),
    /// Probe this audio file with ffprobe
    Probe(PathBuf),
}

/// Outcome of processing a directory of payloads
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FolderSummary {
    /// Payloads turned into subtitles
    pub processed: usize,
    /// Payloads skipped because the output exists
    pub skipped: usize,
    /// Payloads that failed
    pub failed: usize,
}

/// Main application controller for caption normalization
pub struct Controller {
    // @field: App configuration
    config: Config,

    // @field: Pipeline built from the configuration
    pipeline: NormalizationPipeline,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()?;
        let pipeline = NormalizationPipeline::new(config.normalization.pipeline_config());

        Ok(Self { config, pipeline })
    }

    /// Configuration in use
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Read a payload file into ordered segments
    pub async fn load_segments(&self, input_file: &Path) -> Result<Vec<Segment>, AppError> {
        let content = tokio::fs::read_to_string(input_file)
            .await
            .map_err(|e| AppError::File(format!("{}: {}", input_file.display(), e)))?;

        let segments = payload::segments_from_payload(&content, self.config.normalization.time_multiplier)?;
        Ok(segments)
    }

    /// Resolve the true duration in ms for rescaling
    pub async fn resolve_duration(&self, source: &DurationSource) -> Option<f64> {
        match source {
            DurationSource::Unknown => {
                warn!("Audio duration unknown, timing will not be rescaled");
                None
            }
            DurationSource::Explicit(duration_ms) => Some(*duration_ms),
            DurationSource::Probe(audio_file) => {
                media_probe::probe_target_duration_ms(
                    &self.config.probe.ffprobe_path,
                    audio_file,
                    self.config.probe.timeout_secs,
                    self.config.normalization.time_multiplier,
                )
                .await
            }
        }
    }

    /// Run the pipeline on loaded segments and log validation findings
    pub fn normalize(&self, segments: &[Segment], duration_ms: Option<f64>) -> (Vec<Segment>, PipelineStats) {
        let output = self.pipeline.run(segments, duration_ms);

        let report = TrackValidator::for_pipeline(self.pipeline.config()).validate(&output.segments);
        if !report.is_clean() {
            warn!("Normalized track has {} remaining issue(s)", report.issue_count());
            report.log_issues();
        }

        (output.segments, output.stats)
    }

    /// Normalize one payload file into a SubRip file.
    ///
    /// Returns the written path, or `None` when the output already exists and
    /// `force_overwrite` is off. Nothing is written when any step fails.
    pub async fn run(
        &self,
        input_file: PathBuf,
        output_file: Option<PathBuf>,
        duration: &DurationSource,
        force_overwrite: bool,
    ) -> Result<Option<PathBuf>> {
        let start_time = Instant::now();

        if !FileManager::file_exists(&input_file) {
            return Err(anyhow!("Input file does not exist: {:?}", input_file));
        }

        let output_file = output_file.unwrap_or_else(|| {
            let output_dir = input_file.parent().unwrap_or(Path::new("")).to_path_buf();
            FileManager::generate_output_path(&input_file, output_dir, "srt")
        });

        if output_file.exists() && !force_overwrite {
            warn!("Output file already exists: {:?}. Use -f to force overwrite.", output_file);
            return Ok(None);
        }

        let segments = self.load_segments(&input_file).await?;
        let duration_ms = self.resolve_duration(duration).await;
        if let Some(duration_ms) = duration_ms {
            debug!("Target duration for scaling: {:.2}s", duration_ms / 1000.0);
        }

        let (segments, stats) = self.normalize(&segments, duration_ms);
        let track = SubtitleTrack::new(segments);
        FileManager::write_to_file(&output_file, &track.to_srt()).await?;

        info!(
            "Success: {} ({} segments, {})",
            output_file.display(),
            track.segments.len(),
            Self::format_duration(start_time.elapsed())
        );
        debug!("Pipeline stats: {:?}", stats);

        Ok(Some(output_file))
    }

    /// Normalize every `.json` payload under a directory.
    ///
    /// Each payload gets a `.srt` next to it. Existing outputs are skipped
    /// unless `force_overwrite` is set. A failing payload is logged and does
    /// not stop the others.
    pub async fn run_folder(&self, input_dir: PathBuf, force_overwrite: bool) -> Result<FolderSummary> {
        let start_time = Instant::now();

        if !FileManager::dir_exists(&input_dir) {
            return Err(anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        let payload_files = FileManager::find_files(&input_dir, "json")?;
        if payload_files.is_empty() {
            return Err(anyhow!("No payload files found in directory: {:?}", input_dir));
        }

        let folder_pb = ProgressBar::new(payload_files.len() as u64);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        folder_pb.set_style(template_result.progress_chars("█▓▒░"));

        let mut summary = FolderSummary::default();

        for payload_file in &payload_files {
            let file_name = payload_file.file_name()
                .map(|f| f.to_string_lossy().to_string())
                .unwrap_or_else(|| "unknown".to_string());
            folder_pb.set_message(format!("Processing: {}", file_name));

            match self.run(payload_file.clone(), None, &DurationSource::Unknown, force_overwrite).await {
                Ok(Some(_)) => summary.processed += 1,
                Ok(None) => summary.skipped += 1,
                Err(e) => {
                    error!("Error processing file {}: {}", file_name, e);
                    summary.failed += 1;
                }
            }

            folder_pb.inc(1);
        }

        folder_pb.finish_with_message("Folder processing complete");

        info!(
            "Folder processing completed: {} processed, {} skipped, {} errors ({})",
            summary.processed,
            summary.skipped,
            summary.failed,
            Self::format_duration(start_time.elapsed())
        );

        Ok(summary)
    }

    // Format duration in a human-readable format
    fn format_duration(duration: Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
