use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::Path;
use anyhow::{Context, Result};

use crate::errors::AppError;
use crate::pipeline::{PipelineConfig, TimingConfig};

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Normalization settings
    #[serde(default)]
    pub normalization: NormalizationConfig,

    /// Media probing settings
    #[serde(default)]
    pub probe: ProbeConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Settings for the normalization pipeline
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct NormalizationConfig {
    /// Maximum words per caption
    #[serde(default = "default_max_words")]
    pub max_words: usize,

    /// Keep each caption visible until the next one starts
    #[serde(default)]
    pub fill_gaps: bool,

    /// Multiplier undoing an audio speed-up, applied once when parsing
    #[serde(default = "default_time_multiplier")]
    pub time_multiplier: f64,

    /// Gaps shorter than this are always closed
    #[serde(default = "default_micro_gap_ms")]
    pub micro_gap_ms: u64,

    /// Largest gap closed by gap filling (unbounded when absent)
    #[serde(default)]
    pub bridge_max_ms: Option<u64>,

    /// Duration given to captions that end before they start
    #[serde(default = "default_min_duration_ms")]
    pub min_duration_ms: u64,
}

impl Default for NormalizationConfig {
    fn default() -> Self {
        Self {
            max_words: default_max_words(),
            fill_gaps: false,
            time_multiplier: default_time_multiplier(),
            micro_gap_ms: default_micro_gap_ms(),
            bridge_max_ms: None,
            min_duration_ms: default_min_duration_ms(),
        }
    }
}

impl NormalizationConfig {
    /// Build the pipeline configuration these settings describe
    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig::new(self.max_words).with_timing_config(TimingConfig {
            micro_gap_ms: self.micro_gap_ms,
            min_duration_ms: self.min_duration_ms,
            fill_gaps: self.fill_gaps,
            bridge_max_ms: self.bridge_max_ms,
        })
    }
}

/// Settings for the ffprobe duration lookup
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ProbeConfig {
    /// ffprobe executable
    #[serde(default = "default_ffprobe_path")]
    pub ffprobe_path: String,

    /// Timeout in seconds
    #[serde(default = "default_probe_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            ffprobe_path: default_ffprobe_path(),
            timeout_secs: default_probe_timeout_secs(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Matching filter for the `log` crate
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_max_words() -> usize {
    crate::pipeline::orchestrator::DEFAULT_MAX_WORDS
}

fn default_time_multiplier() -> f64 {
    1.0
}

fn default_micro_gap_ms() -> u64 {
    crate::pipeline::timing::DEFAULT_MICRO_GAP_MS
}

fn default_min_duration_ms() -> u64 {
    crate::pipeline::timing::DEFAULT_MIN_DURATION_MS
}

fn default_ffprobe_path() -> String {
    "ffprobe".to_string()
}

fn default_probe_timeout_secs() -> u64 {
    60
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<(), AppError> {
        let normalization = &self.normalization;

        if normalization.max_words == 0 {
            return Err(AppError::Config("max_words must be at least 1".to_string()));
        }

        if !normalization.time_multiplier.is_finite() || normalization.time_multiplier <= 0.0 {
            return Err(AppError::Config(format!(
                "time_multiplier must be a positive number, got {}",
                normalization.time_multiplier
            )));
        }

        if normalization.min_duration_ms == 0 {
            return Err(AppError::Config("min_duration_ms must be at least 1".to_string()));
        }

        if self.probe.timeout_secs == 0 {
            return Err(AppError::Config("probe timeout_secs must be at least 1".to_string()));
        }

        Ok(())
    }

    /// Load a configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Save the configuration as pretty-printed JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;
        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write config to file: {}", path.display()))
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            normalization: NormalizationConfig::default(),
            probe: ProbeConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
