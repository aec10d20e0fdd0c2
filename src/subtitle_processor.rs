use std::fmt;
use std::fs;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use regex::Regex;
use once_cell::sync::Lazy;
use anyhow::{Result, Context, anyhow};
use log::{warn, debug};

// @module: SRT parsing and serialization

// @const: SRT timestamp regex
static TIMESTAMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(\d{1,2}):(\d{2}):(\d{2})[,.](\d{3})\s*-->\s*(\d{1,2}):(\d{2}):(\d{2})[,.](\d{3})")
        .expect("Invalid timestamp regex")
});

// @struct: One timed cue block
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubtitleBlock {
    // @field: Index line as read (may be empty for malformed blocks)
    pub index: String,

    // @field: Timing line as read, never rewritten
    pub timing: String,

    // @field: Text lines in order
    pub lines: Vec<String>,
}

impl SubtitleBlock {
    /// Creates a new block
    pub fn new<S: Into<String>>(index: S, timing: S, lines: Vec<String>) -> Self {
        SubtitleBlock {
            index: index.into(),
            timing: timing.into(),
            lines,
        }
    }

    // @returns: Copy of this block carrying other text lines
    pub fn with_lines(&self, lines: Vec<String>) -> Self {
        SubtitleBlock {
            index: self.index.clone(),
            timing: self.timing.clone(),
            lines,
        }
    }

    /// Whether the block has no text line
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Start and end of the timing line in milliseconds, when it parses
    pub fn time_range_ms(&self) -> Option<(u64, u64)> {
        let caps = TIMESTAMP_REGEX.captures(&self.timing)?;
        let start = parse_timestamp_to_ms(&caps, 1).ok()?;
        let end = parse_timestamp_to_ms(&caps, 5).ok()?;
        Some((start, end))
    }

    fn write_with_index(&self, f: &mut impl fmt::Write, index: &str) -> fmt::Result {
        writeln!(f, "{}", index)?;
        writeln!(f, "{}", self.timing)?;
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        writeln!(f)
    }
}

impl fmt::Display for SubtitleBlock {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.write_with_index(f, &self.index)
    }
}

/// Format a timestamp in milliseconds to SRT format (HH:MM:SS,mmm)
pub fn format_timestamp(ms: u64) -> String {
    let hours = ms / 3_600_000;
    let minutes = (ms % 3_600_000) / 60_000;
    let seconds = (ms % 60_000) / 1_000;
    let millis = ms % 1_000;

    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
}

/// Parse SRT content into cue blocks
///
/// Blocks are separated by blank lines. The first line of a block is its
/// index, the second its timing, the rest its text. Text is kept verbatim.
/// Malformed chunks are kept rather than rejected: a chunk shorter than two
/// lines becomes a block with empty index and timing.
pub fn parse_srt(content: &str) -> Vec<SubtitleBlock> {
    let content = content.strip_prefix('\u{FEFF}').unwrap_or(content);
    let mut blocks = Vec::new();
    let mut buffer: Vec<&str> = Vec::new();

    for line in content.lines() {
        if line.trim().is_empty() {
            if !buffer.is_empty() {
                blocks.push(make_block(&buffer));
                buffer.clear();
            }
        } else {
            buffer.push(line);
        }
    }

    if !buffer.is_empty() {
        blocks.push(make_block(&buffer));
    }

    blocks
}

fn make_block(chunk: &[&str]) -> SubtitleBlock {
    let to_strings = |lines: &[&str]| lines.iter().map(|line| line.to_string()).collect::<Vec<_>>();

    if chunk.len() < 2 {
        warn!("Malformed subtitle block without timing: {:?}", chunk);
        return SubtitleBlock::new(String::new(), String::new(), to_strings(chunk));
    }

    let block = SubtitleBlock::new(chunk[0].trim().to_string(), chunk[1].to_string(), to_strings(&chunk[2..]));

    if block.time_range_ms().is_none() {
        debug!("Unrecognized timing line in block {}: {}", block.index, block.timing);
    }
    if block.is_empty() {
        debug!("Subtitle block {} has no text", block.index);
    }

    block
}

/// Serialize blocks back to SRT
///
/// Blocks without text are skipped. With `renumber`, indices restart at 1;
/// otherwise each block keeps its index, falling back to its position when
/// the index is empty.
pub fn format_srt(blocks: &[SubtitleBlock], renumber: bool) -> String {
    let mut output = String::new();
    let mut counter = 1;

    for block in blocks.iter().filter(|block| !block.is_empty()) {
        let index = if renumber || block.index.is_empty() {
            counter.to_string()
        } else {
            block.index.clone()
        };

        // Writing into a String cannot fail
        let _ = block.write_with_index(&mut output, &index);
        counter += 1;
    }

    output
}

/// Parse timestamp captures to milliseconds
fn parse_timestamp_to_ms(caps: &regex::Captures, start_idx: usize) -> Result<u64> {
    let field = |offset: usize| -> Result<u64> {
        caps.get(start_idx + offset)
            .ok_or_else(|| anyhow!("Missing timestamp component"))?
            .as_str()
            .parse::<u64>()
            .context("Failed to parse timestamp component")
    };

    let (hours, minutes, seconds, millis) = (field(0)?, field(1)?, field(2)?, field(3)?);
    if minutes >= 60 || seconds >= 60 {
        return Err(anyhow!("Invalid time components in timestamp"));
    }

    Ok((hours * 3600 + minutes * 60 + seconds) * 1000 + millis)
}

/// Collection of cue blocks with their source
#[derive(Debug, Clone, Default)]
pub struct SubtitleCollection {
    /// Source filename, `None` for stdin
    pub source_file: Option<PathBuf>,

    /// Cue blocks in file order
    pub blocks: Vec<SubtitleBlock>,
}

impl SubtitleCollection {
    /// Parse a collection from SRT text
    pub fn parse(content: &str, source_file: Option<PathBuf>) -> Self {
        SubtitleCollection {
            source_file,
            blocks: parse_srt(content),
        }
    }

    /// Read and parse an SRT file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read subtitle file: {}", path.display()))?;
        Ok(Self::parse(&content, Some(path.to_path_buf())))
    }

    /// Total number of text lines
    pub fn line_count(&self) -> usize {
        self.blocks.iter().map(|block| block.lines.len()).sum()
    }

    /// Serialize with sequential indices
    pub fn to_srt_string(&self) -> String {
        format_srt(&self.blocks, true)
    }

    /// Write subtitles to an SRT file
    pub fn write_to_srt<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();

        // Create parent directory if needed
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let mut file = File::create(path)
            .with_context(|| format!("Failed to create subtitle file: {}", path.display()))?;
        file.write_all(self.to_srt_string().as_bytes())
            .with_context(|| format!("Failed to write subtitle file: {}", path.display()))?;

        Ok(())
    }
}

impl fmt::Display for SubtitleCollection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Subtitle Collection")?;
        match &self.source_file {
            Some(path) => writeln!(f, "Source: {:?}", path)?,
            None => writeln!(f, "Source: <stdin>")?,
        }
        writeln!(f, "Blocks: {}", self.blocks.len())?;
        writeln!(f, "Lines: {}", self.line_count())?;
        Ok(())
    }
}
