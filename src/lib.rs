/*!
 * # srtvocab - vocabulary reports from German subtitles
 *
 * A Rust library that turns a German `.srt` subtitle file into vocabulary
 * study reports.
 *
 * ## Features
 *
 * - Parse SRT files into timed, markup-free sentences
 * - Tag sentences through a pluggable tagger:
 *   - an external model process (JSON lines over stdio)
 *   - an offline tab-separated lexicon
 * - Keep one entry per lemma and part of speech, with its first example sentence
 * - Write HTML and Markdown tables for nouns, verbs, adjectives, adverbs and a
 *   combined view, linking each word to a dictionary and each timestamp to a
 *   local video player
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `subtitle_processor`: Subtitle parsing
 * - `taggers`: Tagger trait and implementations
 * - `vocabulary`: Grouping of tagged words by lemma and category
 * - `report`: HTML and Markdown rendering
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod report;
pub mod subtitle_processor;
pub mod taggers;
pub mod vocabulary;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{AnalysisSummary, Controller};
pub use errors::{AppError, ReportError, TaggerError};
pub use subtitle_processor::SubtitleCue;
pub use taggers::{Article, TaggedToken, Tagger, WordCategory};
pub use vocabulary::{VocabularyAggregator, VocabularyEntry};
