/*!
 * Tests for file and folder utilities
 */

use std::fs;
use std::path::{Path, PathBuf};
use anyhow::Result;
use srtvocab::file_utils::FileManager;
use crate::common;

/// Test existence checks
#[test]
fn test_exists_withFileAndDirectory_shouldDistinguish() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let file = common::create_test_subtitle(temp_dir.path(), "film.srt")?;

    assert!(FileManager::file_exists(&file));
    assert!(!FileManager::dir_exists(&file));
    assert!(FileManager::dir_exists(temp_dir.path()));
    assert!(!FileManager::file_exists(temp_dir.path()));
    assert!(!FileManager::file_exists(temp_dir.path().join("missing.srt")));

    Ok(())
}

/// Test subtitle detection and basename extraction
#[test]
fn test_basename_withSubtitlePaths_shouldStripExtension() -> Result<()> {
    assert!(FileManager::is_subtitle_file("a/b/Film.SRT"));
    assert!(!FileManager::is_subtitle_file("a/b/film.txt"));
    assert!(!FileManager::is_subtitle_file("a/b/srt"));

    assert_eq!(FileManager::basename("/filme/Der Film.srt")?, "Der Film");
    assert_eq!(FileManager::basename("folge.1.srt")?, "folge.1");
    assert!(FileManager::basename("/").is_err());

    Ok(())
}

/// Test the report folder sits next to the input
#[test]
fn test_report_dir_withRelativeAndAbsolutePaths_shouldUseParent() {
    assert_eq!(
        FileManager::report_dir("/filme/film.srt", "Analyse"),
        PathBuf::from("/filme/Analyse")
    );
    assert_eq!(FileManager::report_dir("film.srt", "Analyse"), Path::new(".").join("Analyse"));
}

/// Test recursive search, case-insensitive extension, sorted output
#[test]
fn test_find_files_withNestedFolders_shouldReturnSortedMatches() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let nested = temp_dir.path().join("staffel1");
    fs::create_dir(&nested)?;

    common::create_test_subtitle(temp_dir.path(), "b.srt")?;
    common::create_test_subtitle(&nested, "a.SRT")?;
    common::create_test_file(temp_dir.path(), "notes.txt", "nichts")?;

    let files = FileManager::find_files(temp_dir.path(), ".srt")?;

    assert_eq!(files.len(), 2);
    assert_eq!(files[0], temp_dir.path().join("b.srt"));
    assert_eq!(files[1], nested.join("a.SRT"));

    Ok(())
}

/// Test reading files
#[test]
fn test_read_to_string_withMissingFile_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let file = common::create_test_file(temp_dir.path(), "x.srt", "Grüße")?;

    assert_eq!(FileManager::read_to_string(&file)?, "Grüße");
    assert!(FileManager::read_to_string(temp_dir.path().join("nope.srt")).is_err());

    Ok(())
}
