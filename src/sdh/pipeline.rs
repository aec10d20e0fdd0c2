/*!
 * Cue pipeline: composes markup protection, the SDH rule engine and the
 * forced-cue classifier into the three block transforms.
 *
 * Transforms are stable filters. Blocks keep their input order, lines
 * keep their order within a block, and timing is copied untouched.
 */

use log::debug;

use crate::app_config::{Mode, SdhConfig};
use crate::sdh::forced::{is_all_caps_cue, is_forced_block_with};
use crate::sdh::markup;
use crate::sdh::rules::{LineOutcome, SdhRuleEngine};
use crate::subtitle_processor::SubtitleBlock;

/// Counters describing one transform run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransformStats {
    pub blocks_in: usize,
    pub blocks_out: usize,
    pub lines_in: usize,
    pub lines_out: usize,
    /// Lines the rule engine dropped outright
    pub lines_dropped: usize,
    /// Lines that cleaned down to nothing
    pub lines_emptied: usize,
}

impl std::fmt::Display for TransformStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} of {} blocks kept, {} of {} lines kept ({} dropped, {} emptied)",
            self.blocks_out, self.blocks_in, self.lines_out, self.lines_in, self.lines_dropped, self.lines_emptied
        )
    }
}

/// Clean one line: protect, run the rules, restore
pub fn clean_line(line: &str, config: &SdhConfig) -> LineOutcome {
    clean_line_with(line, &SdhRuleEngine::new(*config))
}

fn clean_line_with(line: &str, engine: &SdhRuleEngine) -> LineOutcome {
    let line = line.trim_end_matches(['\r', '\n']);
    let protected = markup::protect(line);
    engine
        .apply(&protected.text)
        .map(|text| markup::restore(&text, &protected.spans))
}

/// Clean a sequence of lines, keeping the non-empty results in order
pub fn sdh_to_full_lines<S: AsRef<str>>(lines: &[S], config: &SdhConfig) -> Vec<String> {
    let engine = SdhRuleEngine::new(*config);
    lines
        .iter()
        .filter_map(|line| clean_line_with(line.as_ref(), &engine).into_text())
        .filter(|text| !text.is_empty())
        .collect()
}

/// Keep only the lines that qualify as forced cues
pub fn full_to_forced_lines<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
    full_to_forced_lines_with(lines, is_all_caps_cue)
}

/// [`full_to_forced_lines`] with a caller-supplied cue checker
pub fn full_to_forced_lines_with<S, F>(lines: &[S], checker: F) -> Vec<String>
where
    S: AsRef<str>,
    F: Fn(&str) -> bool,
{
    lines
        .iter()
        .map(|line| line.as_ref())
        .filter(|line| checker(*line))
        .map(str::to_string)
        .collect()
}

/// Clean every block; blocks left without text are omitted
pub fn sdh_to_full(blocks: &[SubtitleBlock], config: &SdhConfig) -> Vec<SubtitleBlock> {
    sdh_to_full_with_stats(blocks, config).0
}

fn sdh_to_full_with_stats(blocks: &[SubtitleBlock], config: &SdhConfig) -> (Vec<SubtitleBlock>, TransformStats) {
    let engine = SdhRuleEngine::new(*config);
    let mut stats = TransformStats {
        blocks_in: blocks.len(),
        ..TransformStats::default()
    };
    let mut cleaned = Vec::with_capacity(blocks.len());

    for block in blocks {
        let mut lines = Vec::with_capacity(block.lines.len());

        for line in &block.lines {
            stats.lines_in += 1;
            match clean_line_with(line, &engine) {
                LineOutcome::Dropped => stats.lines_dropped += 1,
                LineOutcome::Kept(text) if text.is_empty() => stats.lines_emptied += 1,
                LineOutcome::Kept(text) => lines.push(text),
            }
        }

        if lines.is_empty() {
            debug!("Omitting block {} with no text left after cleaning", block.index);
            continue;
        }

        stats.lines_out += lines.len();
        cleaned.push(block.with_lines(lines));
    }

    stats.blocks_out = cleaned.len();
    (cleaned, stats)
}

/// Keep only blocks whose every line is a forced cue
pub fn full_to_forced(blocks: &[SubtitleBlock]) -> Vec<SubtitleBlock> {
    full_to_forced_with(blocks, is_all_caps_cue)
}

/// [`full_to_forced`] with a caller-supplied cue checker
pub fn full_to_forced_with<F>(blocks: &[SubtitleBlock], checker: F) -> Vec<SubtitleBlock>
where
    F: Fn(&str) -> bool,
{
    blocks
        .iter()
        .filter(|block| is_forced_block_with(&block.lines, &checker))
        .cloned()
        .collect()
}

/// Clean every block, then keep only forced blocks
pub fn sdh_to_forced(blocks: &[SubtitleBlock], config: &SdhConfig) -> Vec<SubtitleBlock> {
    full_to_forced(&sdh_to_full(blocks, config))
}

/// Run the transform selected by `mode`
pub fn transform(mode: Mode, blocks: &[SubtitleBlock], config: &SdhConfig) -> (Vec<SubtitleBlock>, TransformStats) {
    let (result, mut stats) = match mode {
        Mode::SdhToFull => sdh_to_full_with_stats(blocks, config),
        Mode::FullToForced => {
            let lines_in = blocks.iter().map(|block| block.lines.len()).sum();
            let stats = TransformStats {
                blocks_in: blocks.len(),
                lines_in,
                ..TransformStats::default()
            };
            (full_to_forced(blocks), stats)
        }
        Mode::SdhToForced => {
            let (full, stats) = sdh_to_full_with_stats(blocks, config);
            (full_to_forced(&full), stats)
        }
    };

    stats.blocks_out = result.len();
    stats.lines_out = result.iter().map(|block| block.lines.len()).sum();
    debug!("{}: {}", mode, stats);

    (result, stats)
}
