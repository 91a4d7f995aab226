// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow, Context};
use log::{warn, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::path::{Path, PathBuf};
use std::io::Write;
use clap::{Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use subnorm::app_config::{self, Config};
use subnorm::{Controller, DurationSource};

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Normalize transcription payloads into SubRip files (default command)
    Normalize(NormalizeArgs),

    /// Generate shell completions for subnorm
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct NormalizeArgs {
    /// Payload file or directory of payloads to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Output subtitle file (single payload only)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Maximum words per caption
    #[arg(short = 'w', long)]
    max_words: Option<usize>,

    /// Keep each caption on screen until the next one starts
    #[arg(long)]
    fill_gaps: bool,

    /// Speed-up factor of the transcribed audio
    #[arg(short, long)]
    time_multiplier: Option<f64>,

    /// True audio duration in milliseconds
    #[arg(short, long, conflicts_with = "probe_audio")]
    duration_ms: Option<f64>,

    /// Audio file to probe with ffprobe for the true duration
    #[arg(short, long)]
    probe_audio: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// subnorm - caption timing and segmentation normalizer
///
/// Converts the timed caption records of a transcription service into a
/// clean, readable SubRip file.
#[derive(Parser, Debug)]
#[command(name = "subnorm")]
#[command(version)]
#[command(about = "Normalize transcription captions into SubRip subtitles")]
#[command(long_about = "subnorm reads the JSON caption records of a transcription service, splits long
captions, repairs sentence boundaries and timing, rescales onto the true audio
duration and writes a UTF-8 SubRip file.

EXAMPLES:
    subnorm talk.json                          # Write talk.srt next to the payload
    subnorm -w 5 --fill-gaps talk.json         # Shorter captions, no blank gaps
    subnorm -t 1.5 -p talk.mp3 talk.json       # Audio was sped up 1.5x, probe the original
    subnorm -d 93500 -o out/talk.srt talk.json # Rescale onto a known duration
    subnorm --log-level debug /payloads/       # Process an entire directory
    subnorm completions bash > subnorm.bash    # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Payload file or directory of payloads to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Output subtitle file (single payload only)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Maximum words per caption
    #[arg(short = 'w', long)]
    max_words: Option<usize>,

    /// Keep each caption on screen until the next one starts
    #[arg(long)]
    fill_gaps: bool,

    /// Speed-up factor of the transcribed audio
    #[arg(short, long)]
    time_multiplier: Option<f64>,

    /// True audio duration in milliseconds
    #[arg(short, long, conflicts_with = "probe_audio")]
    duration_ms: Option<f64>,

    /// Audio file to probe with ffprobe for the true duration
    #[arg(short, long)]
    probe_audio: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Colored stderr logger
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger { level }))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color and emoji for a level
    fn decoration(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("1;31", "❌ "),
            Level::Warn => ("1;33", "🚧 "),
            Level::Info => ("1;32", " "),
            Level::Debug => ("1;36", "🔍 "),
            Level::Trace => ("1;35", "📋 "),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (color, emoji) = Self::decoration(record.level());
            let _ = writeln!(
                std::io::stderr(),
                "\x1B[{}m{} {} {}\x1B[0m",
                color, now, emoji, record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Trace is the ceiling; the effective level is set once the config is known
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "subnorm", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Normalize(args)) => run_normalize(args).await,
        None => {
            // Default behavior - top-level args
            let input_path = cli.input_path.ok_or_else(|| {
                anyhow!("INPUT_PATH is required when no subcommand is specified")
            })?;

            run_normalize(NormalizeArgs {
                input_path,
                output: cli.output,
                force_overwrite: cli.force_overwrite,
                max_words: cli.max_words,
                fill_gaps: cli.fill_gaps,
                time_multiplier: cli.time_multiplier,
                duration_ms: cli.duration_ms,
                probe_audio: cli.probe_audio,
                config_path: cli.config_path,
                log_level: cli.log_level,
            })
            .await
        }
    }
}

// Load the config file, or write a default one when it is missing
fn load_or_create_config(config_path: &str) -> Result<Config> {
    if Path::new(config_path).exists() {
        Config::load(config_path)
    } else {
        warn!("Config file not found at '{}', creating default config.", config_path);
        let config = Config::default();
        config.save(config_path)?;
        Ok(config)
    }
}

async fn run_normalize(options: NormalizeArgs) -> Result<()> {
    if let Some(cmd_log_level) = &options.log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let mut config = load_or_create_config(&options.config_path)?;

    // Command line overrides
    if let Some(max_words) = options.max_words {
        config.normalization.max_words = max_words;
    }
    if options.fill_gaps {
        config.normalization.fill_gaps = true;
    }
    if let Some(time_multiplier) = options.time_multiplier {
        config.normalization.time_multiplier = time_multiplier;
    }
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    config.validate()
        .context("Configuration validation failed")?;

    if options.log_level.is_none() {
        log::set_max_level(config.log_level.to_level_filter());
    }

    let controller = Controller::with_config(config)?;

    if options.input_path.is_file() {
        let duration = match (options.duration_ms, options.probe_audio) {
            (Some(duration_ms), _) => DurationSource::Explicit(duration_ms),
            (None, Some(audio_file)) => DurationSource::Probe(audio_file),
            (None, None) => DurationSource::Unknown,
        };

        controller.run(
            options.input_path,
            options.output,
            &duration,
            options.force_overwrite,
        ).await?;
    } else if options.input_path.is_dir() {
        if options.output.is_some() || options.duration_ms.is_some() || options.probe_audio.is_some() {
            return Err(anyhow!("--output, --duration-ms and --probe-audio apply to a single payload, not a directory"));
        }

        let summary = controller.run_folder(options.input_path, options.force_overwrite).await?;
        if summary.failed > 0 {
            return Err(anyhow!("{} payload(s) failed", summary.failed));
        }
    } else {
        return Err(anyhow!("Input path does not exist: {:?}", options.input_path));
    }

    Ok(())
}
