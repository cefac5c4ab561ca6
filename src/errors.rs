/*!
 * Error types for the srtvocab application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while talking to a linguistic tagger
#[derive(Error, Debug)]
pub enum TaggerError {
    /// The tagger backend could not be started
    #[error("Failed to start tagger '{command}': {message}")]
    SpawnFailed {
        /// Command or resource that failed to start
        command: String,
        /// Underlying failure
        message: String,
    },

    /// Reading from or writing to the tagger failed
    #[error("Tagger I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The tagger answered with something we cannot interpret
    #[error("Invalid tagger response: {0}")]
    Protocol(String),

    /// The tagger process went away mid-run
    #[error("Tagger process exited unexpectedly")]
    ProcessExited,

    /// Lexicon file could not be loaded
    #[error("Failed to load lexicon {path:?}: {message}")]
    Lexicon {
        /// Lexicon location
        path: PathBuf,
        /// What went wrong
        message: String,
    },
}

/// Errors that can occur while writing reports
#[derive(Error, Debug)]
pub enum ReportError {
    /// The output directory could not be created
    #[error("Could not create output folder {path:?}: {source}")]
    OutputDir {
        /// Directory we tried to create
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// A report file could not be written
    #[error("Failed to write report {path:?}: {source}")]
    Write {
        /// Report file path
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from the tagger
    #[error("Tagger error: {0}")]
    Tagger(#[from] TaggerError),

    /// Error from report generation
    #[error("Report error: {0}")]
    Report(#[from] ReportError),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Some files of a directory run could not be analysed
    #[error("{} of {} subtitle files failed: {}", .failed.len(), .total, join_paths(.failed))]
    FilesFailed {
        /// Files whose analysis or report writing failed
        failed: Vec<PathBuf>,
        /// Files found in the directory
        total: usize,
    },
}

fn join_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
