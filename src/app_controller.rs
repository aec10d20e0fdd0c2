use log::{error, warn, info, debug};
use std::path::{Path, PathBuf};
use indicatif::{ProgressBar, ProgressStyle};

use crate::app_config::{Mode, SdhConfig};
use crate::errors::AppError;
use crate::file_utils::FileManager;
use crate::sdh::pipeline::{self, TransformStats};
use crate::subtitle_processor::{self, SubtitleCollection};

// @module: Application controller for subtitle cleaning

/// Summary of a folder run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FolderSummary {
    pub processed: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Main application controller for subtitle cleaning
pub struct Controller {
    // @field: Resolved cleaning options
    config: SdhConfig,

    // @field: Transform to apply
    mode: Mode,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: SdhConfig, mode: Mode) -> Self {
        Self { config, mode }
    }

    pub fn config(&self) -> &SdhConfig {
        &self.config
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Transform SRT text and serialize the result with fresh indices
    pub fn process_content(&self, content: &str) -> (String, TransformStats) {
        let collection = SubtitleCollection::parse(content, None);
        let (blocks, stats) = pipeline::transform(self.mode, &collection.blocks, &self.config);
        (subtitle_processor::format_srt(&blocks, true), stats)
    }

    /// Process one input (file or stdin) into one output (file or stdout)
    pub fn run(&self, input: Option<&Path>, output: Option<&Path>) -> Result<TransformStats, AppError> {
        let content = match input {
            Some(path) => {
                debug!("Reading subtitles from {:?}", path);
                FileManager::read_subtitle_file(path)?
            }
            None => {
                debug!("Reading subtitles from stdin");
                FileManager::read_stdin()?
            }
        };

        let (rendered, stats) = self.process_content(&content);

        match output {
            Some(path) => {
                FileManager::write_to_file(path, &rendered)?;
                info!("{} ({}): {:?}", self.mode, stats, path);
            }
            None => {
                FileManager::write_stdout(&rendered)?;
                info!("{} ({})", self.mode, stats);
            }
        }

        Ok(stats)
    }

    /// Process one file into its derived output next to it
    pub fn run_file(&self, input_file: &Path, force_overwrite: bool) -> Result<Option<PathBuf>, AppError> {
        let output_file = FileManager::generate_output_path(input_file, self.mode);

        if FileManager::file_exists(&output_file) && !force_overwrite {
            warn!("Output file already exists: {:?}. Use -f to force overwrite.", output_file);
            return Ok(None);
        }

        self.run(Some(input_file), Some(&output_file))?;
        Ok(Some(output_file))
    }

    /// Process every source subtitle in a directory tree
    ///
    /// Failures are logged and counted; they do not stop the run.
    pub fn run_folder(&self, input_dir: &Path, force_overwrite: bool) -> Result<FolderSummary, AppError> {
        if !FileManager::dir_exists(input_dir) {
            return Err(AppError::File(format!("Input directory does not exist: {:?}", input_dir)));
        }

        let files = FileManager::find_subtitle_files(input_dir)?;
        let mut summary = FolderSummary::default();

        if files.is_empty() {
            warn!("No subtitle files found in {:?}", input_dir);
            return Ok(summary);
        }

        info!("Processing {} subtitle file(s) in {:?}", files.len(), input_dir);

        let progress = ProgressBar::new(files.len() as u64);
        progress.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );

        for file in &files {
            let name = file.file_name().map(|n| n.to_string_lossy().to_string()).unwrap_or_default();
            progress.set_message(name);

            match self.run_file(file, force_overwrite) {
                Ok(Some(_)) => summary.processed += 1,
                Ok(None) => summary.skipped += 1,
                Err(e) => {
                    error!("Error processing file {:?}: {}", file, e);
                    summary.failed += 1;
                }
            }
            progress.inc(1);
        }

        progress.finish_and_clear();
        info!(
            "Finished: {} processed, {} skipped, {} failed",
            summary.processed, summary.skipped, summary.failed
        );

        Ok(summary)
    }
}
