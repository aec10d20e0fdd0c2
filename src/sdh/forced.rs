/*!
 * Forced-cue classification.
 *
 * A forced subtitle track only shows on-screen text and foreign dialogue,
 * which SDH sources conventionally write in capitals. A line qualifies
 * when its readable text has at least two letters and none of them is
 * lowercase. Markup (override blocks, tags, break escapes) never takes
 * part in the decision.
 */

use crate::sdh::markup;

/// Fewest letters a line needs before it can count as all caps
pub const MIN_LETTERS: usize = 2;

/// Whether `c` equals its own uppercase form
fn is_uppercase_letter(c: char) -> bool {
    let mut upper = c.to_uppercase();
    upper.next() == Some(c) && upper.next().is_none()
}

/// All-caps test on text that is already free of markup
///
/// Non-alphabetic characters are ignored; they neither count toward
/// [`MIN_LETTERS`] nor fail the check.
pub fn is_all_caps_text(text: &str) -> bool {
    let mut letters = 0;

    for c in text.chars().filter(|c| c.is_alphabetic()) {
        if !is_uppercase_letter(c) {
            return false;
        }
        letters += 1;
    }

    letters >= MIN_LETTERS
}

/// Whether a subtitle line qualifies as a forced cue
pub fn is_all_caps_cue(line: &str) -> bool {
    is_all_caps_text(&markup::visible_text(line))
}

/// Whether every line of a block qualifies; an empty block never does
pub fn is_forced_block<S: AsRef<str>>(lines: &[S]) -> bool {
    is_forced_block_with(lines, is_all_caps_cue)
}

/// [`is_forced_block`] with a caller-supplied cue checker
pub fn is_forced_block_with<S, F>(lines: &[S], checker: F) -> bool
where
    S: AsRef<str>,
    F: Fn(&str) -> bool,
{
    !lines.is_empty() && lines.iter().all(|line| checker(line.as_ref()))
}
