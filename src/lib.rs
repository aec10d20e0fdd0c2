/*!
 * # sdhclean - SDH subtitle cleaner
 *
 * A Rust library for turning SDH subtitles (subtitles for the deaf and
 * hard-of-hearing) into plain full subtitles, and for deriving a forced
 * subtitle track from them.
 *
 * ## Features
 *
 * - Remove bracketed sound cues (`[DOOR SLAMS]`, `(sighs)`)
 * - Remove speaker tags (`JOHN: Hi there`)
 * - Drop music-only lines (`♪ ♫`)
 * - Preserve HTML tags, ASS override blocks and `\N` breaks byte for byte
 * - Keep only all-caps cues to build a forced track
 * - Presets (aggressive/netflix, conservative) with per-option overrides
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `sdh`: the cleaning engine:
 *   - `sdh::markup`: markup protection
 *   - `sdh::rules`: SDH rule engine
 *   - `sdh::forced`: forced-cue classifier
 *   - `sdh::pipeline`: block transforms
 * - `app_config`: Options, presets, modes and the config file
 * - `subtitle_processor`: SRT parsing and serialization
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod file_utils;
pub mod subtitle_processor;
pub mod sdh;
pub mod app_controller;
pub mod errors;

// Re-export main types for easier usage
pub use app_config::{Config, Mode, Preset, SdhConfig, SdhOverrides};
pub use subtitle_processor::{SubtitleBlock, SubtitleCollection, format_srt, parse_srt};
pub use sdh::{
    LineOutcome, clean_line, full_to_forced, full_to_forced_lines, is_all_caps_cue, is_forced_block,
    sdh_to_forced, sdh_to_full, sdh_to_full_lines,
};
pub use errors::{AppError, ConfigError, SubtitleError};
