/*!
 * Common test utilities for the sdhclean test suite
 */

use std::fs;
use std::path::{Path, PathBuf};
use anyhow::Result;
use tempfile::TempDir;

/// SDH sample exercising every rule
pub const SDH_SAMPLE: &str = r"1
00:00:01,000 --> 00:00:03,000
[MUSIC PLAYING]

2
00:00:04,000 --> 00:00:06,000
JOHN: Hi there.
(sighs) How are you?

3
00:00:07,000 --> 00:00:09,000
♪ ♫

4
00:00:10,000 --> 00:00:12,000
{\an8}WELCOME TO PARIS

5
00:00:13,000 --> 00:00:15,000
<i>MARY: Fine, thanks.</i>

6
00:00:16,000 --> 00:00:18,000
[DOOR SLAMS]
GET OUT!
";

/// Expected aggressive SDH to full output of [`SDH_SAMPLE`]
pub const FULL_SAMPLE: &str = r"1
00:00:04,000 --> 00:00:06,000
Hi there.
How are you?

2
00:00:10,000 --> 00:00:12,000
{\an8}WELCOME TO PARIS

3
00:00:13,000 --> 00:00:15,000
<i>Fine, thanks.</i>

4
00:00:16,000 --> 00:00:18,000
GET OUT!

";

/// Expected aggressive SDH to forced output of [`SDH_SAMPLE`]
pub const FORCED_SAMPLE: &str = r"1
00:00:10,000 --> 00:00:12,000
{\an8}WELCOME TO PARIS

2
00:00:16,000 --> 00:00:18,000
GET OUT!

";

/// Route log output through the test harness
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Creates the SDH sample subtitle file
pub fn create_sdh_subtitle(dir: &Path, filename: &str) -> Result<PathBuf> {
    create_test_file(dir, filename, SDH_SAMPLE)
}
