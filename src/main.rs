// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use log::{error, warn, debug, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use clap::{Args, Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use sdhclean::app_config::{self, Config, Mode, Preset, SdhOverrides};
use sdhclean::app_controller::Controller;
use sdhclean::errors::AppError;
use sdhclean::file_utils::FileManager;

/// CLI Wrapper for Mode to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliMode {
    /// Clean SDH annotations
    #[value(alias = "sdh_to_full")]
    SdhToFull,
    /// Keep only all-caps cues of a clean subtitle
    #[value(alias = "full_to_forced")]
    FullToForced,
    /// Clean, then keep only all-caps cues
    #[value(alias = "sdh_to_forced")]
    SdhToForced,
}

impl From<CliMode> for Mode {
    fn from(cli_mode: CliMode) -> Self {
        match cli_mode {
            CliMode::SdhToFull => Mode::SdhToFull,
            CliMode::FullToForced => Mode::FullToForced,
            CliMode::SdhToForced => Mode::SdhToForced,
        }
    }
}

/// CLI Wrapper for Preset to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliPreset {
    Aggressive,
    Netflix,
    Conservative,
}

impl From<CliPreset> for Preset {
    fn from(cli_preset: CliPreset) -> Self {
        match cli_preset {
            CliPreset::Aggressive => Preset::Aggressive,
            CliPreset::Netflix => Preset::Netflix,
            CliPreset::Conservative => Preset::Conservative,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
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

/// Rule toggles; each `--x` has a `--no-x` twin and the last one given wins
#[derive(Args, Debug, Default)]
struct RuleFlags {
    /// Remove text inside [] brackets
    #[arg(long, overrides_with = "no_remove_between_square")]
    remove_between_square: bool,
    #[arg(long, overrides_with = "remove_between_square", hide = true)]
    no_remove_between_square: bool,

    /// Remove text inside () parentheses
    #[arg(long, overrides_with = "no_remove_between_paren")]
    remove_between_paren: bool,
    #[arg(long, overrides_with = "remove_between_paren", hide = true)]
    no_remove_between_paren: bool,

    /// Only remove []/() spans that are alone on their line
    #[arg(long, overrides_with = "no_between_only_if_separate_line")]
    between_only_if_separate_line: bool,
    #[arg(long, overrides_with = "between_only_if_separate_line", hide = true)]
    no_between_only_if_separate_line: bool,

    /// Remove text before ':' (speaker tags)
    #[arg(long, overrides_with = "no_remove_text_before_colon")]
    remove_text_before_colon: bool,
    #[arg(long, overrides_with = "remove_text_before_colon", hide = true)]
    no_remove_text_before_colon: bool,

    /// Only remove speaker tags written in capitals
    #[arg(long, overrides_with = "no_colon_only_if_uppercase")]
    colon_only_if_uppercase: bool,
    #[arg(long, overrides_with = "colon_only_if_uppercase", hide = true)]
    no_colon_only_if_uppercase: bool,

    /// Drop lines holding only music symbols
    #[arg(long, overrides_with = "no_remove_if_only_music_symbols")]
    remove_if_only_music_symbols: bool,
    #[arg(long, overrides_with = "remove_if_only_music_symbols", hide = true)]
    no_remove_if_only_music_symbols: bool,
}

impl RuleFlags {
    fn pick(enable: bool, disable: bool) -> Option<bool> {
        match (enable, disable) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }

    fn overrides(&self) -> SdhOverrides {
        SdhOverrides {
            remove_between_square: Self::pick(self.remove_between_square, self.no_remove_between_square),
            remove_between_paren: Self::pick(self.remove_between_paren, self.no_remove_between_paren),
            between_only_if_separate_line: Self::pick(
                self.between_only_if_separate_line,
                self.no_between_only_if_separate_line,
            ),
            remove_text_before_colon: Self::pick(self.remove_text_before_colon, self.no_remove_text_before_colon),
            colon_only_if_uppercase: Self::pick(self.colon_only_if_uppercase, self.no_colon_only_if_uppercase),
            remove_if_only_music_symbols: Self::pick(
                self.remove_if_only_music_symbols,
                self.no_remove_if_only_music_symbols,
            ),
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate shell completions for sdhclean
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// sdhclean - SDH subtitle cleaner
///
/// Removes SDH annotations from SRT subtitles and derives forced tracks,
/// preserving HTML tags, ASS overrides and line breaks.
#[derive(Parser, Debug)]
#[command(name = "sdhclean")]
#[command(version)]
#[command(about = "Clean SDH subtitles into full and forced tracks")]
#[command(long_about = "sdhclean removes SDH annotations (sound cues, speaker tags, music lines) from
SRT subtitles and derives forced tracks made of all-caps cues.

EXAMPLES:
    sdhclean -i movie.srt -o movie.full.srt            # Clean with the aggressive preset
    sdhclean --preset conservative < in.srt > out.srt  # Only drop annotations on their own line
    sdhclean --mode sdh-to-forced -i movie.srt         # Build a forced track from an SDH file
    sdhclean --no-remove-between-paren -i movie.srt    # Keep (parenthesized) text
    sdhclean -i /movies/ -f                            # Process every .srt in a folder
    sdhclean completions bash > sdhclean.bash          # Generate bash completions

CONFIGURATION:
    An optional JSON file given with --config may set \"preset\", \"options\"
    (any of the rule toggles) and \"log_level\". Command line flags win.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input .srt file or directory (default: stdin)
    #[arg(short, long, value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Output .srt file (default: stdout; ignored for directories)
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Transform to apply
    #[arg(short, long, value_enum, default_value = "sdh-to-full")]
    mode: CliMode,

    /// Base preset for the rule toggles
    #[arg(short, long, value_enum)]
    preset: Option<CliPreset>,

    #[command(flatten)]
    rules: RuleFlags,

    /// Configuration file path (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Overwrite existing outputs when processing a directory
    #[arg(short, long)]
    force_overwrite: bool,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color and tag for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("1;31", "ERROR"),
            Level::Warn => ("1;33", "WARN "),
            Level::Info => ("1;32", "INFO "),
            Level::Debug => ("1;36", "DEBUG"),
            Level::Trace => ("1;35", "TRACE"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        // The ceiling set at init is raised or lowered through log::set_max_level
        metadata.level() <= self.level.max(log::max_level())
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (color, tag) = Self::style_for_level(record.level());

            // Logs go to stderr so stdout stays a clean SRT stream
            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "\x1B[{}m{} {} {}\x1B[0m", color, now, tag, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> ExitCode {
    // Initialize the logger once with info level by default
    // The level is updated once the config is resolved
    if let Err(e) = CustomLogger::init(LevelFilter::Info) {
        eprintln!("Failed to initialize logger: {}", e);
    }

    let cli = CommandLineOptions::parse();

    if let Some(Commands::Completions { shell }) = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "sdhclean", &mut std::io::stdout());
        return ExitCode::SUCCESS;
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

fn run(options: CommandLineOptions) -> Result<(), AppError> {
    // If log level is set via command line, apply it immediately
    if let Some(cli_level) = options.log_level {
        let level: app_config::LogLevel = cli_level.into();
        log::set_max_level(level.to_level_filter());
    }

    let config = match &options.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    // If log level was not set via command line, take it from the config file
    if options.log_level.is_none() {
        if let Some(level) = config.log_level {
            log::set_max_level(level.to_level_filter());
        }
    }

    let sdh_config = config.resolve(options.preset.map(Preset::from), &options.rules.overrides());
    let mode: Mode = options.mode.into();
    debug!("Mode {} with options {:?}", mode, sdh_config);

    let controller = Controller::with_config(sdh_config, mode);

    match &options.input {
        Some(input) if FileManager::dir_exists(input) => {
            if options.output.is_some() {
                warn!("--output is ignored when the input is a directory");
            }
            let summary = controller.run_folder(input, options.force_overwrite)?;
            if summary.failed > 0 {
                return Err(AppError::File(format!("{} file(s) failed", summary.failed)));
            }
        }
        Some(input) if !FileManager::file_exists(input) => {
            return Err(AppError::File(format!("Input path does not exist: {:?}", input)));
        }
        input => {
            controller.run(input.as_deref(), options.output.as_deref())?;
        }
    }

    Ok(())
}
