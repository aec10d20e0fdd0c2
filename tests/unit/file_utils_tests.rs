/*!
 * Tests for file utilities
 */

use std::fs;
use std::path::{Path, PathBuf};
use anyhow::Result;
use sdhclean::app_config::Mode;
use sdhclean::errors::SubtitleError;
use sdhclean::file_utils::FileManager;
use crate::common;

/// Output names carry the mode suffix
#[test]
fn test_generate_output_path_withEachMode_shouldAppendSuffix() {
    let input = Path::new("/movies/film.en.srt");

    assert_eq!(
        FileManager::generate_output_path(input, Mode::SdhToFull),
        PathBuf::from("/movies/film.en.full.srt")
    );
    assert_eq!(
        FileManager::generate_output_path(input, Mode::SdhToForced),
        PathBuf::from("/movies/film.en.forced.srt")
    );
    assert_eq!(
        FileManager::generate_output_path("film.srt", Mode::FullToForced),
        PathBuf::from("film.forced.srt")
    );
}

/// Derived outputs are recognized by name
#[test]
fn test_is_derived_output_withVariousNames_shouldDetectOutputs() {
    assert!(FileManager::is_derived_output("film.full.srt"));
    assert!(FileManager::is_derived_output("film.en.FORCED.srt"));
    assert!(!FileManager::is_derived_output("film.srt"));
    assert!(!FileManager::is_derived_output("film.en.srt"));
}

/// Folder search finds sources only
#[test]
fn test_find_subtitle_files_withMixedFolder_shouldSkipOutputsAndOtherFiles() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path();
    common::create_test_file(dir, "a.srt", "")?;
    common::create_test_file(dir, "a.full.srt", "")?;
    common::create_test_file(dir, "notes.txt", "")?;
    common::create_test_file(dir, "season/b.SRT", "")?;

    let mut files = FileManager::find_subtitle_files(dir)?;
    files.sort();

    assert_eq!(files, vec![dir.join("a.srt"), dir.join("season").join("b.SRT")]);
    Ok(())
}

/// Files round trip through write and read
#[test]
fn test_write_and_read_withNestedPath_shouldCreateParents() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("out").join("film.full.srt");

    FileManager::write_to_file(&path, "1\n00:00:01,000 --> 00:00:02,000\nHé\n\n")?;

    assert!(FileManager::file_exists(&path));
    assert!(FileManager::dir_exists(temp_dir.path().join("out")));
    assert_eq!(FileManager::read_subtitle_file(&path)?, "1\n00:00:01,000 --> 00:00:02,000\nHé\n\n");
    Ok(())
}

/// Non UTF-8 input is a subtitle error
#[test]
fn test_read_subtitle_file_withInvalidUtf8_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("latin1.srt");
    fs::write(&path, [0x31, 0x0a, 0xe9, 0xff])?;

    let err = FileManager::read_subtitle_file(&path).unwrap_err();
    assert!(matches!(err.downcast_ref::<SubtitleError>(), Some(SubtitleError::InvalidEncoding(_))));
    Ok(())
}
