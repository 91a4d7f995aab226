/*!
 * Tests for application configuration functionality
 */

use anyhow::Result;
use subnorm::app_config::{Config, LogLevel};
use crate::common;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.normalization.max_words, 7);
    assert!(!config.normalization.fill_gaps);
    assert_eq!(config.normalization.time_multiplier, 1.0);
    assert_eq!(config.normalization.micro_gap_ms, 300);
    assert_eq!(config.normalization.bridge_max_ms, None);
    assert_eq!(config.normalization.min_duration_ms, 1000);
    assert_eq!(config.probe.ffprobe_path, "ffprobe");
    assert_eq!(config.probe.timeout_secs, 60);
    assert_eq!(config.log_level, LogLevel::Info);
    assert!(config.validate().is_ok());
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();

    config.normalization.max_words = 0;
    assert!(config.validate().is_err());
    config.normalization.max_words = 1;
    assert!(config.validate().is_ok());

    config.normalization.time_multiplier = 0.0;
    assert!(config.validate().is_err());
    config.normalization.time_multiplier = f64::NAN;
    assert!(config.validate().is_err());
    config.normalization.time_multiplier = 1.5;
    assert!(config.validate().is_ok());

    config.normalization.min_duration_ms = 0;
    assert!(config.validate().is_err());
    config.normalization.min_duration_ms = 1000;

    config.probe.timeout_secs = 0;
    assert!(config.validate().is_err());
}

/// Test that a partial config file falls back to defaults for missing fields
#[test]
fn test_load_withPartialFile_shouldFillDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "conf.json",
        r#"{"normalization": {"max_words": 5, "fill_gaps": true}, "log_level": "debug"}"#,
    )?;

    let config = Config::load(&path)?;

    assert_eq!(config.normalization.max_words, 5);
    assert!(config.normalization.fill_gaps);
    assert_eq!(config.normalization.micro_gap_ms, 300);
    assert_eq!(config.probe.ffprobe_path, "ffprobe");
    assert_eq!(config.log_level, LogLevel::Debug);
    Ok(())
}

/// Test save then load gives the same configuration
#[test]
fn test_save_thenLoad_shouldPreserveValues() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("conf.json");

    let mut config = Config::default();
    config.normalization.bridge_max_ms = Some(3000);
    config.normalization.time_multiplier = 1.25;
    config.log_level = LogLevel::Trace;
    config.save(&path)?;

    assert_eq!(Config::load(&path)?, config);
    Ok(())
}

/// Test that a broken config file is reported
#[test]
fn test_load_withInvalidJson_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "conf.json", "{ not json")?;

    assert!(Config::load(&path).is_err());
    assert!(Config::load(temp_dir.path().join("missing.json")).is_err());
    Ok(())
}

/// Test that the pipeline configuration mirrors the settings
#[test]
fn test_pipelineConfig_shouldCarryTimingSettings() {
    let mut config = Config::default();
    config.normalization.max_words = 4;
    config.normalization.fill_gaps = true;
    config.normalization.bridge_max_ms = Some(2500);
    config.normalization.micro_gap_ms = 200;

    let pipeline_config = config.normalization.pipeline_config();

    assert_eq!(pipeline_config.max_words, 4);
    assert!(pipeline_config.timing.fill_gaps);
    assert_eq!(pipeline_config.timing.bridge_max_ms, Some(2500));
    assert_eq!(pipeline_config.timing.micro_gap_ms, 200);
    assert_eq!(pipeline_config.timing.min_duration_ms, 1000);
}

/// Test log level mapping
#[test]
fn test_logLevel_toLevelFilter_shouldMatch() {
    assert_eq!(LogLevel::Error.to_level_filter(), log::LevelFilter::Error);
    assert_eq!(LogLevel::Warn.to_level_filter(), log::LevelFilter::Warn);
    assert_eq!(LogLevel::Trace.to_level_filter(), log::LevelFilter::Trace);
}
