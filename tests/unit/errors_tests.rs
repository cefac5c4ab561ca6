/*!
 * Tests for error types
 */

use std::io;
use std::path::PathBuf;
use srtvocab::errors::{AppError, ReportError, TaggerError};

/// Test tagger error messages
#[test]
fn test_tagger_error_display_withVariants_shouldDescribeFailure() {
    let spawn = TaggerError::SpawnFailed {
        command: "spacy-tagger".to_string(),
        message: "not found".to_string(),
    };
    assert_eq!(spawn.to_string(), "Failed to start tagger 'spacy-tagger': not found");
    assert_eq!(TaggerError::ProcessExited.to_string(), "Tagger process exited unexpectedly");
    assert_eq!(
        TaggerError::Protocol("bad".to_string()).to_string(),
        "Invalid tagger response: bad"
    );
}

/// Test wrapping into the application error
#[test]
fn test_app_error_from_withNestedErrors_shouldWrap() {
    let error: AppError = TaggerError::ProcessExited.into();
    assert!(matches!(error, AppError::Tagger(TaggerError::ProcessExited)));
    assert_eq!(error.to_string(), "Tagger error: Tagger process exited unexpectedly");

    let report = ReportError::Write {
        path: PathBuf::from("out.md"),
        source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
    };
    let error: AppError = report.into();
    assert!(matches!(error, AppError::Report(ReportError::Write { .. })));
}

/// Test the directory-run failure lists every failed file
#[test]
fn test_files_failed_display_withTwoFiles_shouldNameBoth() {
    let error = AppError::FilesFailed {
        failed: vec![PathBuf::from("a/eins.srt"), PathBuf::from("b/zwei.srt")],
        total: 3,
    };
    assert_eq!(
        error.to_string(),
        "2 of 3 subtitle files failed: a/eins.srt, b/zwei.srt"
    );
}

/// Test the io error source is kept for report errors
#[test]
fn test_report_error_source_withIoError_shouldExposeSource() {
    use std::error::Error;

    let error = ReportError::OutputDir {
        path: PathBuf::from("Analyse"),
        source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
    };
    assert!(error.source().is_some());
    assert!(error.to_string().starts_with("Could not create output folder"));
}
