/*!
 * SDH cleaning engine.
 *
 * - `markup`: protection of tags, overrides and break escapes
 * - `rules`: the configurable line-cleaning rules
 * - `forced`: the all-caps forced-cue classifier
 * - `pipeline`: block transforms built from the three above
 */

pub mod markup;
pub mod rules;
pub mod forced;
pub mod pipeline;

// Re-export main types for easier usage
pub use forced::{is_all_caps_cue, is_all_caps_text, is_forced_block};
pub use markup::{protect, restore, ProtectedLine, ProtectedSpan, SpanKind};
pub use pipeline::{
    clean_line, full_to_forced, full_to_forced_lines, full_to_forced_lines_with, full_to_forced_with,
    sdh_to_forced, sdh_to_full, sdh_to_full_lines, transform, TransformStats,
};
pub use rules::{LineOutcome, SdhRuleEngine, MUSIC_SYMBOLS};
