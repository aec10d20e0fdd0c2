use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::errors::ConfigError;

/// Application configuration module
/// This module holds the SDH cleaning options, the named presets that
/// supply their defaults, the transform mode and the optional JSON
/// configuration file layered between the preset and the command line.

/// Boolean cleaning options applied by the rule engine
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct SdhConfig {
    /// Strip `[...]` spans
    #[serde(default = "default_true")]
    pub remove_between_square: bool,

    /// Strip `(...)` spans
    #[serde(default = "default_true")]
    pub remove_between_paren: bool,

    /// Only strip bracketed spans that stand alone on their line
    #[serde(default)]
    pub between_only_if_separate_line: bool,

    /// Strip a leading `SPEAKER:` prefix
    #[serde(default = "default_true")]
    pub remove_text_before_colon: bool,

    /// Only strip the speaker prefix when it is written in capitals
    #[serde(default = "default_true")]
    pub colon_only_if_uppercase: bool,

    /// Drop lines made only of music symbols
    #[serde(default = "default_true")]
    pub remove_if_only_music_symbols: bool,
}

impl SdhConfig {
    // @returns: Option set for a named preset
    pub const fn from_preset(preset: Preset) -> Self {
        match preset {
            Preset::Aggressive | Preset::Netflix => Self {
                remove_between_square: true,
                remove_between_paren: true,
                between_only_if_separate_line: false,
                remove_text_before_colon: true,
                colon_only_if_uppercase: true,
                remove_if_only_music_symbols: true,
            },
            Preset::Conservative => Self {
                remove_between_square: true,
                remove_between_paren: true,
                between_only_if_separate_line: true,
                remove_text_before_colon: true,
                colon_only_if_uppercase: true,
                remove_if_only_music_symbols: true,
            },
        }
    }

    /// Return a copy with every `Some` override applied
    pub fn with_overrides(self, overrides: &SdhOverrides) -> Self {
        Self {
            remove_between_square: overrides.remove_between_square.unwrap_or(self.remove_between_square),
            remove_between_paren: overrides.remove_between_paren.unwrap_or(self.remove_between_paren),
            between_only_if_separate_line: overrides
                .between_only_if_separate_line
                .unwrap_or(self.between_only_if_separate_line),
            remove_text_before_colon: overrides.remove_text_before_colon.unwrap_or(self.remove_text_before_colon),
            colon_only_if_uppercase: overrides.colon_only_if_uppercase.unwrap_or(self.colon_only_if_uppercase),
            remove_if_only_music_symbols: overrides
                .remove_if_only_music_symbols
                .unwrap_or(self.remove_if_only_music_symbols),
        }
    }
}

impl Default for SdhConfig {
    fn default() -> Self {
        Self::from_preset(Preset::default())
    }
}

/// Per-option overrides; `None` keeps the preset value
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct SdhOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remove_between_square: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remove_between_paren: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub between_only_if_separate_line: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remove_text_before_colon: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colon_only_if_uppercase: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remove_if_only_music_symbols: Option<bool>,
}

impl SdhOverrides {
    /// Layer `other` on top of `self`; values set in `other` win
    pub fn merged_with(self, other: &SdhOverrides) -> Self {
        Self {
            remove_between_square: other.remove_between_square.or(self.remove_between_square),
            remove_between_paren: other.remove_between_paren.or(self.remove_between_paren),
            between_only_if_separate_line: other
                .between_only_if_separate_line
                .or(self.between_only_if_separate_line),
            remove_text_before_colon: other.remove_text_before_colon.or(self.remove_text_before_colon),
            colon_only_if_uppercase: other.colon_only_if_uppercase.or(self.colon_only_if_uppercase),
            remove_if_only_music_symbols: other
                .remove_if_only_music_symbols
                .or(self.remove_if_only_music_symbols),
        }
    }
}

/// Named cleaning preset
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    // @preset: Remove every annotation, inline or not
    #[default]
    Aggressive,
    // @preset: Alias of aggressive
    Netflix,
    // @preset: Only remove annotations standing on their own line
    Conservative,
}

impl Preset {
    // @returns: Lowercase preset identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Aggressive => "aggressive",
            Self::Netflix => "netflix",
            Self::Conservative => "conservative",
        }
    }
}

impl std::fmt::Display for Preset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Preset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "aggressive" => Ok(Self::Aggressive),
            "netflix" => Ok(Self::Netflix),
            "conservative" => Ok(Self::Conservative),
            _ => Err(ConfigError::InvalidPreset(s.to_string())),
        }
    }
}

/// Transform applied to a subtitle file
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Clean SDH annotations, producing a full subtitle
    #[default]
    SdhToFull,
    /// Keep only all-caps cues of an already clean subtitle
    FullToForced,
    /// Clean, then keep only all-caps cues
    SdhToForced,
}

impl Mode {
    // @returns: Snake case mode identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SdhToFull => "sdh_to_full",
            Self::FullToForced => "full_to_forced",
            Self::SdhToForced => "sdh_to_forced",
        }
    }

    /// File name suffix for outputs of this mode (`movie.full.srt`)
    pub fn output_suffix(&self) -> &'static str {
        match self {
            Self::SdhToFull => "full",
            Self::FullToForced | Self::SdhToForced => "forced",
        }
    }

    /// Whether the mode runs the SDH rule engine
    pub fn cleans(&self) -> bool {
        matches!(self, Self::SdhToFull | Self::SdhToForced)
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Mode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "sdh_to_full" => Ok(Self::SdhToFull),
            "full_to_forced" => Ok(Self::FullToForced),
            "sdh_to_forced" => Ok(Self::SdhToForced),
            _ => Err(ConfigError::InvalidMode(s.to_string())),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
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
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "error" => Ok(Self::Error),
            "warn" | "warning" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            "trace" => Ok(Self::Trace),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

/// Contents of the optional JSON configuration file
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Base preset; the command line preset wins when given
    #[serde(default)]
    pub preset: Option<Preset>,

    /// Option overrides applied on top of the preset
    #[serde(default)]
    pub options: SdhOverrides,

    /// Log level used when none is given on the command line
    #[serde(default)]
    pub log_level: Option<LogLevel>,
}

impl Config {
    /// Load a configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| ConfigError::Unreadable(format!("{}: {}", path.display(), e)))?;

        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .map_err(|e| ConfigError::Invalid(format!("{}: {}", path.display(), e)))
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Resolve the final option set
    ///
    /// Layering, lowest to highest priority: preset defaults, file options,
    /// command line overrides. A preset given on the command line replaces
    /// the file's preset.
    pub fn resolve(&self, cli_preset: Option<Preset>, cli_overrides: &SdhOverrides) -> SdhConfig {
        let preset = cli_preset.or(self.preset).unwrap_or_default();
        let overrides = self.options.merged_with(cli_overrides);
        SdhConfig::from_preset(preset).with_overrides(&overrides)
    }
}

fn default_true() -> bool {
    true
}
