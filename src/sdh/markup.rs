/*!
 * Markup protection for subtitle lines.
 *
 * Inline markup (HTML-style tags, ASS override blocks and the `\N` / `\n`
 * break escapes) must survive SDH cleaning byte for byte. Before the rules
 * run, every such span is swapped for a placeholder token; afterwards the
 * tokens are swapped back.
 *
 * Placeholders are `U+FDD0 <index> U+FDD1`. Both delimiters are Unicode
 * noncharacters, and any literal occurrence of them in the input is itself
 * protected, so raw delimiters never reach the rules and a token can never
 * be forged by subtitle text.
 */

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Opening delimiter of a placeholder token
pub const PLACEHOLDER_OPEN: char = '\u{FDD0}';

/// Closing delimiter of a placeholder token
pub const PLACEHOLDER_CLOSE: char = '\u{FDD1}';

/// Protected spans, leftmost-first: break escape, HTML tag, ASS override, stray delimiter
static PROTECTED_SPAN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\\[Nn])|(<[^<>]*>)|(\{[^}]*\})|([\x{FDD0}\x{FDD1}])")
        .expect("Invalid protected span regex")
});

/// A placeholder token inside protected text
static PLACEHOLDER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\x{FDD0}(\d+)\x{FDD1}").expect("Invalid placeholder regex")
});

/// Kind of protected span
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanKind {
    /// `\N` or `\n`
    Break,
    /// `<i>`, `</font>`, `<br/>` ...
    Tag,
    /// `{\an8}` and other brace blocks
    Override,
    /// A literal placeholder delimiter found in the input
    Reserved,
}

/// A span lifted out of a line before cleaning
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtectedSpan {
    pub kind: SpanKind,
    pub text: String,
}

/// A line with its markup replaced by placeholder tokens
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtectedLine {
    /// Line text with placeholders in place of protected spans
    pub text: String,
    /// Original spans, indexed by placeholder number
    pub spans: Vec<ProtectedSpan>,
}

impl ProtectedLine {
    /// Restore this line's own text
    pub fn restore(&self) -> String {
        restore(&self.text, &self.spans)
    }

    /// Text a reader would see: protected text minus placeholders
    pub fn visible_text(&self) -> String {
        strip_placeholders(&self.text)
    }

    /// Whether the line holds any protected span of the given kind
    pub fn has_kind(&self, kind: SpanKind) -> bool {
        self.spans.iter().any(|span| span.kind == kind)
    }
}

/// Replace every protected span in `line` with a placeholder token
pub fn protect(line: &str) -> ProtectedLine {
    let mut spans = Vec::new();

    let text = PROTECTED_SPAN_REGEX.replace_all(line, |caps: &Captures| {
        let kind = if caps.get(1).is_some() {
            SpanKind::Break
        } else if caps.get(2).is_some() {
            SpanKind::Tag
        } else if caps.get(3).is_some() {
            SpanKind::Override
        } else {
            SpanKind::Reserved
        };

        let token = placeholder(spans.len());
        spans.push(ProtectedSpan {
            kind,
            text: caps[0].to_string(),
        });
        token
    });

    ProtectedLine {
        text: text.into_owned(),
        spans,
    }
}

/// Substitute placeholder tokens in `text` with their original spans
///
/// Tokens whose index has no span are left untouched.
pub fn restore(text: &str, spans: &[ProtectedSpan]) -> String {
    PLACEHOLDER_REGEX
        .replace_all(text, |caps: &Captures| {
            caps[1]
                .parse::<usize>()
                .ok()
                .and_then(|index| spans.get(index))
                .map_or_else(|| caps[0].to_string(), |span| span.text.clone())
        })
        .into_owned()
}

/// Token standing in for the span at `index`
pub fn placeholder(index: usize) -> String {
    format!("{}{}{}", PLACEHOLDER_OPEN, index, PLACEHOLDER_CLOSE)
}

/// Remove every placeholder token from protected text
pub fn strip_placeholders(text: &str) -> String {
    PLACEHOLDER_REGEX.replace_all(text, "").into_owned()
}

/// Concatenation of every placeholder token in protected text, in order
pub fn collect_placeholders(text: &str) -> String {
    PLACEHOLDER_REGEX.find_iter(text).map(|m| m.as_str()).collect()
}

/// Remove protected spans from a raw line, keeping only readable text
pub fn visible_text(line: &str) -> String {
    PROTECTED_SPAN_REGEX.replace_all(line, "").into_owned()
}
