/*!
 * Tests for the block transforms
 */

use sdhclean::app_config::{Mode, Preset, SdhConfig};
use sdhclean::sdh::pipeline::{
    full_to_forced, full_to_forced_lines, full_to_forced_lines_with, full_to_forced_with, sdh_to_forced,
    sdh_to_full, sdh_to_full_lines, transform, TransformStats,
};
use sdhclean::subtitle_processor::SubtitleBlock;

fn block(index: &str, lines: &[&str]) -> SubtitleBlock {
    SubtitleBlock::new(
        index.to_string(),
        format!("00:00:0{},000 --> 00:00:0{},500", index, index),
        lines.iter().map(|line| line.to_string()).collect(),
    )
}

/// Mixed SDH lines clean down to dialogue
#[test]
fn test_sdh_to_full_lines_withAggressivePreset_shouldKeepDialogue() {
    let lines = ["[MUSIC PLAYING]", "(sigh)", "JOHN: Hi there", "Normal dialogue (leave this)", "♪ ♫"];
    let config = SdhConfig::from_preset(Preset::Aggressive);

    let full = sdh_to_full_lines(&lines, &config);
    assert_eq!(full, vec!["Hi there", "Normal dialogue"]);

    let forced = full_to_forced_lines(&full);
    assert!(forced.is_empty());
}

/// Conservative preset keeps inline annotations
#[test]
fn test_sdh_to_full_lines_withConservativePreset_shouldKeepInlineAnnotations() {
    let lines = ["[MUSIC PLAYING]", "Normal dialogue (leave this)"];
    let config = SdhConfig::from_preset(Preset::Conservative);

    assert_eq!(sdh_to_full_lines(&lines, &config), vec!["Normal dialogue (leave this)"]);
}

/// Line filter keeps caps lines in order
#[test]
fn test_full_to_forced_lines_withMixedLines_shouldFilterInOrder() {
    let lines = ["HELLO", "world", "GOOD BYE"];
    assert_eq!(full_to_forced_lines(&lines), vec!["HELLO", "GOOD BYE"]);
    assert_eq!(full_to_forced_lines_with(&lines, |line| line.len() == 5), vec!["HELLO", "world"]);
}

/// Emptied blocks are omitted and order is stable
#[test]
fn test_sdh_to_full_withAnnotationBlocks_shouldOmitEmptyBlocks() {
    let blocks = vec![
        block("1", &["[MUSIC]"]),
        block("2", &["JOHN: Hello.", "(coughs)"]),
        block("3", &["♪ ♫"]),
        block("4", &["Bye."]),
    ];

    let cleaned = sdh_to_full(&blocks, &SdhConfig::default());

    assert_eq!(cleaned.len(), 2);
    assert_eq!(cleaned[0].index, "2");
    assert_eq!(cleaned[0].lines, vec!["Hello."]);
    assert_eq!(cleaned[0].timing, blocks[1].timing);
    assert_eq!(cleaned[1].index, "4");
    assert_eq!(cleaned[1].lines, vec!["Bye."]);
}

/// Blocks without text never survive cleaning
#[test]
fn test_sdh_to_full_withMissingText_shouldOmitBlock() {
    let blocks = vec![block("1", &[])];
    assert!(sdh_to_full(&blocks, &SdhConfig::default()).is_empty());
}

/// One lowercase line excludes the whole block
#[test]
fn test_full_to_forced_withPartialCapsBlock_shouldExcludeBlock() {
    let blocks = vec![
        block("1", &["HELLO", "world"]),
        block("2", &["HELLO", "WORLD"]),
        block("3", &[]),
    ];

    let forced = full_to_forced(&blocks);

    assert_eq!(forced.len(), 1);
    assert_eq!(forced[0], blocks[1]);
}

/// Classification sees fully cleaned text
#[test]
fn test_sdh_to_forced_withAnnotatedCapsBlock_shouldCleanBeforeClassifying() {
    let blocks = vec![block("1", &["(sighs)", "GET OUT!"]), block("2", &["NARRATOR: Once upon a time"])];
    let config = SdhConfig::default();

    assert!(full_to_forced(&blocks).is_empty());

    let forced = sdh_to_forced(&blocks, &config);
    assert_eq!(forced.len(), 1);
    assert_eq!(forced[0].lines, vec!["GET OUT!"]);
}

/// Custom checker drives block retention
#[test]
fn test_full_to_forced_with_withCustomChecker_shouldUseChecker() {
    let blocks = vec![block("1", &[r"{\an8}sign"]), block("2", &["SHOUT"])];

    let forced = full_to_forced_with(&blocks, |line| line.starts_with('{'));

    assert_eq!(forced.len(), 1);
    assert_eq!(forced[0].index, "1");
}

/// Mode dispatch reports counts
#[test]
fn test_transform_withEachMode_shouldReportStats() {
    let blocks = vec![
        block("1", &["[MUSIC]"]),
        block("2", &["JOHN: Hello.", "(coughs)"]),
        block("3", &["♪"]),
        block("4", &["STOP!"]),
    ];
    let config = SdhConfig::default();

    let (full, stats) = transform(Mode::SdhToFull, &blocks, &config);
    assert_eq!(full.len(), 2);
    assert_eq!(
        stats,
        TransformStats {
            blocks_in: 4,
            blocks_out: 2,
            lines_in: 5,
            lines_out: 2,
            lines_dropped: 1,
            lines_emptied: 2,
        }
    );

    let (forced, stats) = transform(Mode::SdhToForced, &blocks, &config);
    assert_eq!(forced.len(), 1);
    assert_eq!(stats.blocks_out, 1);
    assert_eq!(stats.lines_out, 1);

    let (raw_forced, stats) = transform(Mode::FullToForced, &blocks, &config);
    assert_eq!(raw_forced.len(), 2);
    assert_eq!(stats.lines_in, 5);
    assert_eq!(stats.lines_dropped, 0);
}
