/*!
 * Tests for the forced-cue classifier
 */

use sdhclean::sdh::forced::{is_all_caps_cue, is_all_caps_text, is_forced_block, is_forced_block_with, MIN_LETTERS};

/// Single letters never qualify
#[test]
fn test_is_all_caps_cue_withMinimumLetters_shouldRequireTwo() {
    assert_eq!(MIN_LETTERS, 2);
    assert!(!is_all_caps_cue("I"));
    assert!(!is_all_caps_cue("A!"));
    assert!(is_all_caps_cue("HI"));
    assert!(is_all_caps_cue("OK"));
}

/// Override content never counts
#[test]
fn test_is_all_caps_cue_withOverrides_shouldIgnoreOverrideContent() {
    assert!(!is_all_caps_cue("{ov} hi"));
    assert!(is_all_caps_cue(r"{\an8}HELLO"));
    assert!(!is_all_caps_cue(r"{\an8}"));
    assert!(!is_all_caps_cue("{HELLO} I"));
}

/// Tags and break escapes never count either
#[test]
fn test_is_all_caps_cue_withTagsAndBreaks_shouldUseVisibleText() {
    assert!(is_all_caps_cue("<i>HELLO</i>"));
    assert!(is_all_caps_cue(r"HELLO\nWORLD"));
    assert!(is_all_caps_cue(r"HELLO\NWORLD"));
    assert!(!is_all_caps_cue("<I>hello</I>"));
}

/// Digits and punctuation are neutral
#[test]
fn test_is_all_caps_cue_withPunctuationAndDigits_shouldIgnoreThem() {
    assert!(is_all_caps_cue("HELLO, WORLD!"));
    assert!(is_all_caps_cue("ROOM 101 - 3RD FLOOR"));
    assert!(!is_all_caps_cue("123 !!"));
    assert!(!is_all_caps_cue("A 1"));
    assert!(!is_all_caps_cue(""));
}

/// Any lowercase letter fails the line
#[test]
fn test_is_all_caps_cue_withLowercaseLetter_shouldFail() {
    assert!(!is_all_caps_cue("HELLo"));
    assert!(!is_all_caps_cue("Hello"));
}

/// Accented capitals are capitals
#[test]
fn test_is_all_caps_text_withAccentedLetters_shouldUseUnicodeCase() {
    assert!(is_all_caps_text("ÁRBOL Ñ"));
    assert!(is_all_caps_text("ÜBER STRASSE"));
    assert!(!is_all_caps_text("Ünter"));
    assert!(!is_all_caps_text("GROß"));
}

/// Blocks need every line to qualify
#[test]
fn test_is_forced_block_withMixedLines_shouldRequireEveryLine() {
    assert!(is_forced_block(&["HELLO", "WORLD"]));
    assert!(!is_forced_block(&["HELLO", "world"]));
    assert!(!is_forced_block::<&str>(&[]));
}

/// A custom checker replaces the caps test
#[test]
fn test_is_forced_block_with_withCustomChecker_shouldUseChecker() {
    let lines = vec![r"{\an8}sign text".to_string()];
    assert!(is_forced_block_with(&lines, |line| line.starts_with(r"{\an8}")));
    assert!(!is_forced_block(&lines));
}
