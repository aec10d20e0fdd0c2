/*!
 * SDH rule engine.
 *
 * Applies the configured removal rules to a protected line (see
 * [`crate::sdh::markup`]). Rules run in a fixed order within a pass:
 *
 * 1. music-symbol-only lines are dropped
 * 2. `[...]` then `(...)` spans are removed, either only when they fill
 *    the line or everywhere, depending on configuration
 * 3. a leading `SPEAKER:` tag is removed
 * 4. whitespace is collapsed and trimmed
 *
 * Passes repeat until the line stops changing, so cleaned text is a fixed
 * point of the engine.
 */

use log::trace;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::app_config::SdhConfig;
use crate::sdh::forced::is_all_caps_text;
use crate::sdh::markup::{collect_placeholders, strip_placeholders};

/// Symbols marking a cue as music rather than speech
pub const MUSIC_SYMBOLS: [char; 6] = ['♪', '♫', '♬', '♩', '♭', '♯'];

/// `[...]` with no nested brackets or placeholders inside
static SQUARE_SPAN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[[^\[\]\x{FDD0}\x{FDD1}]*\]").expect("Invalid square span regex")
});

/// `(...)` with no nested parentheses or placeholders inside
static PAREN_SPAN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\([^()\x{FDD0}\x{FDD1}]*\)").expect("Invalid paren span regex")
});

/// A line holding one `[...]` span and nothing but placeholders around it
static SQUARE_LINE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^\s*(?:\x{FDD0}\d+\x{FDD1}\s*)*\[[^\[\]\x{FDD0}\x{FDD1}]*\](?:\s*\x{FDD0}\d+\x{FDD1})*\s*$",
    )
    .expect("Invalid square line regex")
});

/// A line holding one `(...)` span and nothing but placeholders around it
static PAREN_LINE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^\s*(?:\x{FDD0}\d+\x{FDD1}\s*)*\([^()\x{FDD0}\x{FDD1}]*\)(?:\s*\x{FDD0}\d+\x{FDD1})*\s*$",
    )
    .expect("Invalid paren line regex")
});

static WHITESPACE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s+").expect("Invalid whitespace regex")
});

/// Result of cleaning one line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    /// The line survives, possibly emptied
    Kept(String),
    /// The line must be removed from its block
    Dropped,
}

impl LineOutcome {
    pub fn is_dropped(&self) -> bool {
        matches!(self, Self::Dropped)
    }

    /// Kept text, `None` when dropped
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Kept(text) => Some(text),
            Self::Dropped => None,
        }
    }

    pub fn into_text(self) -> Option<String> {
        match self {
            Self::Kept(text) => Some(text),
            Self::Dropped => None,
        }
    }

    /// Apply `f` to kept text
    pub fn map<F: FnOnce(String) -> String>(self, f: F) -> Self {
        match self {
            Self::Kept(text) => Self::Kept(f(text)),
            Self::Dropped => Self::Dropped,
        }
    }
}

/// True when the readable text is nothing but music symbols and whitespace,
/// with at least one symbol present
pub fn is_music_only(text: &str) -> bool {
    let visible = strip_placeholders(text);
    let mut symbols = 0;

    for c in visible.chars().filter(|c| !c.is_whitespace()) {
        if !MUSIC_SYMBOLS.contains(&c) {
            return false;
        }
        symbols += 1;
    }

    symbols > 0
}

/// Collapse whitespace runs to one space and trim
pub fn normalize_whitespace(text: &str) -> String {
    WHITESPACE_REGEX.replace_all(text, " ").trim().to_string()
}

/// Rule engine bound to one configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SdhRuleEngine {
    config: SdhConfig,
}

impl SdhRuleEngine {
    pub fn new(config: SdhConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SdhConfig {
        &self.config
    }

    /// Clean a protected line until it reaches a fixed point
    pub fn apply(&self, protected: &str) -> LineOutcome {
        let mut current = protected.to_string();

        loop {
            match self.apply_once(&current) {
                LineOutcome::Dropped => return LineOutcome::Dropped,
                LineOutcome::Kept(next) if next == current => return LineOutcome::Kept(next),
                LineOutcome::Kept(next) => current = next,
            }
        }
    }

    /// One ordered pass of every enabled rule
    pub fn apply_once(&self, protected: &str) -> LineOutcome {
        if self.config.remove_if_only_music_symbols && is_music_only(protected) {
            trace!("Dropping music-only line: {:?}", protected);
            return LineOutcome::Dropped;
        }

        let text = self.remove_brackets(protected);
        let text = self.remove_speaker_tag(&text);
        let text = normalize_whitespace(&text);

        // A line can turn music-only once its annotations are gone
        if self.config.remove_if_only_music_symbols && is_music_only(&text) {
            trace!("Dropping line left with music symbols only: {:?}", protected);
            return LineOutcome::Dropped;
        }

        if strip_placeholders(&text).trim().is_empty() {
            return LineOutcome::Kept(String::new());
        }

        LineOutcome::Kept(text)
    }

    /// Rule 2: bracketed spans, square kind first
    pub fn remove_brackets(&self, text: &str) -> String {
        let config = &self.config;

        if config.between_only_if_separate_line {
            let whole_square = config.remove_between_square && SQUARE_LINE_REGEX.is_match(text);
            let whole_paren = config.remove_between_paren && PAREN_LINE_REGEX.is_match(text);
            if whole_square || whole_paren {
                return String::new();
            }
            return text.to_string();
        }

        let mut result = text.to_string();
        if config.remove_between_square {
            result = SQUARE_SPAN_REGEX.replace_all(&result, "").into_owned();
        }
        if config.remove_between_paren {
            result = PAREN_SPAN_REGEX.replace_all(&result, "").into_owned();
        }
        result
    }

    /// Rule 3: leading speaker tag
    ///
    /// The tag is the text before the first colon. Placeholders inside it
    /// are kept so markup stays balanced.
    pub fn remove_speaker_tag(&self, text: &str) -> String {
        if !self.config.remove_text_before_colon {
            return text.to_string();
        }

        let trimmed = text.trim();
        let Some(colon) = trimmed.find(':') else {
            return text.to_string();
        };

        let prefix = &trimmed[..colon];
        let rest = &trimmed[colon + 1..];

        let visible_prefix = strip_placeholders(prefix);
        let visible_prefix = visible_prefix.trim();
        if visible_prefix.is_empty() {
            return text.to_string();
        }
        if self.config.colon_only_if_uppercase && !is_all_caps_text(visible_prefix) {
            return text.to_string();
        }

        trace!("Removing speaker tag {:?}", visible_prefix);
        let rest = rest.strip_prefix(' ').unwrap_or(rest);
        format!("{}{}", collect_placeholders(prefix), rest)
    }
}

impl Default for SdhRuleEngine {
    fn default() -> Self {
        Self::new(SdhConfig::default())
    }
}
