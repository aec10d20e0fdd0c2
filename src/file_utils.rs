use anyhow::{Result, Context};
use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::app_config::Mode;
use crate::errors::SubtitleError;

// @module: File and directory utilities

/// Extension of the subtitle files this tool reads and writes
pub const SUBTITLE_EXTENSION: &str = "srt";

/// Name suffixes marking files this tool produced
const DERIVED_SUFFIXES: [&str; 2] = ["full", "forced"];

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.as_os_str().is_empty() && !path.exists() {
            fs::create_dir_all(path)
                .with_context(|| format!("Failed to create directory: {:?}", path))?;
        }
        Ok(())
    }

    // @generates: Output path for a derived subtitle
    // @params: input_file, mode
    pub fn generate_output_path<P: AsRef<Path>>(input_file: P, mode: Mode) -> PathBuf {
        let input_file = input_file.as_ref();

        // Get the file stem (filename without extension)
        let stem = input_file.file_stem().unwrap_or_default();

        let mut output_filename = stem.to_string_lossy().to_string();
        output_filename.push('.');
        output_filename.push_str(mode.output_suffix());
        output_filename.push('.');
        output_filename.push_str(SUBTITLE_EXTENSION);

        input_file.with_file_name(output_filename)
    }

    /// Whether a file name looks like an output of this tool (`movie.full.srt`)
    pub fn is_derived_output<P: AsRef<Path>>(path: P) -> bool {
        let path = path.as_ref();
        let stem = path.file_stem().map(|s| s.to_string_lossy().to_string()).unwrap_or_default();

        Path::new(&stem)
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .is_some_and(|ext| DERIVED_SUFFIXES.contains(&ext.as_str()))
    }

    /// Find source subtitle files in a directory, skipping derived outputs
    pub fn find_subtitle_files<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
        let mut result = Vec::new();

        for entry in WalkDir::new(dir.as_ref()).follow_links(true).sort_by_file_name() {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if !path.is_file() || Self::is_derived_output(path) {
                continue;
            }

            if let Some(ext) = path.extension() {
                if ext.to_string_lossy().eq_ignore_ascii_case(SUBTITLE_EXTENSION) {
                    result.push(path.to_path_buf());
                }
            }
        }

        Ok(result)
    }

    /// Read a file as UTF-8 subtitle text
    pub fn read_subtitle_file<P: AsRef<Path>>(path: P) -> Result<String> {
        let path = path.as_ref();
        let bytes = fs::read(path)
            .with_context(|| format!("Failed to read file: {:?}", path))?;

        let text = String::from_utf8(bytes)
            .map_err(|e| SubtitleError::InvalidEncoding(format!("{:?}: {}", path, e)))?;
        Ok(text)
    }

    /// Read all of stdin as UTF-8 subtitle text
    pub fn read_stdin() -> Result<String> {
        let mut bytes = Vec::new();
        std::io::stdin()
            .lock()
            .read_to_end(&mut bytes)
            .context("Failed to read from stdin")?;

        let text = String::from_utf8(bytes)
            .map_err(|e| SubtitleError::InvalidEncoding(format!("<stdin>: {}", e)))?;
        Ok(text)
    }

    /// Write a string to a file
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Write a string to stdout
    pub fn write_stdout(content: &str) -> Result<()> {
        let mut stdout = std::io::stdout().lock();
        stdout
            .write_all(content.as_bytes())
            .and_then(|_| stdout.flush())
            .context("Failed to write to stdout")?;
        Ok(())
    }
}
