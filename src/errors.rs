/*!
 * Error types for the sdhclean application.
 *
 * The cleaning engine itself is total and never fails; these types cover
 * the collaborators around it (configuration, subtitle input, files),
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors raised while resolving configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Unknown preset name
    #[error("Invalid preset: {0} (expected aggressive, netflix or conservative)")]
    InvalidPreset(String),

    /// Unknown transform mode
    #[error("Invalid mode: {0} (expected sdh_to_full, full_to_forced or sdh_to_forced)")]
    InvalidMode(String),

    /// Unknown log level
    #[error("Invalid log level: {0}")]
    InvalidLogLevel(String),

    /// Configuration file could not be opened
    #[error("Cannot read config file: {0}")]
    Unreadable(String),

    /// Configuration file is not valid JSON for the expected schema
    #[error("Invalid config file: {0}")]
    Invalid(String),
}

/// Errors that can occur while reading subtitle input
#[derive(Error, Debug)]
pub enum SubtitleError {
    /// Input bytes are not UTF-8 text
    #[error("Subtitle input is not valid UTF-8: {0}")]
    InvalidEncoding(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from configuration
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Error from subtitle input
    #[error("Subtitle error: {0}")]
    Subtitle(#[from] SubtitleError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl AppError {
    /// Process exit code for this error
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Config(_) => 2,
            Self::Subtitle(_) => 3,
            Self::File(_) | Self::Unknown(_) => 1,
        }
    }
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        let error = match error.downcast::<ConfigError>() {
            Ok(config_error) => return Self::Config(config_error),
            Err(error) => error,
        };
        let error = match error.downcast::<SubtitleError>() {
            Ok(subtitle_error) => return Self::Subtitle(subtitle_error),
            Err(error) => error,
        };

        if error.chain().any(|cause| cause.is::<std::io::Error>()) {
            Self::File(format!("{:#}", error))
        } else {
            Self::Unknown(format!("{:#}", error))
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
