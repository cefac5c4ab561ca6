use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::errors::AppError;
use crate::report::links::player_base_url;

/// Application configuration module
/// This module handles the application configuration including loading
/// and validating settings. Every field has a default, so running without a
/// configuration file is the normal case.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Tagger backend settings
    #[serde(default)]
    pub tagger: TaggerConfig,

    /// Hyperlink targets used in reports
    #[serde(default)]
    pub links: LinkConfig,

    /// Report folder created next to the input file
    #[serde(default = "default_output_dir_name")]
    pub output_dir_name: String,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            tagger: TaggerConfig::default(),
            links: LinkConfig::default(),
            output_dir_name: default_output_dir_name(),
            log_level: LogLevel::default(),
        }
    }
}

/// Tagger backend type
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TaggerKind {
    // @tagger: External model process (JSON lines over stdio)
    #[default]
    Command,
    // @tagger: Tab-separated lexicon file
    Lexicon,
}

impl std::fmt::Display for TaggerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Command => write!(f, "command"),
            Self::Lexicon => write!(f, "lexicon"),
        }
    }
}

/// Tagger configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TaggerConfig {
    // @field: Backend type
    #[serde(default)]
    pub kind: TaggerKind,

    // @field: Program speaking the JSON-lines protocol
    #[serde(default = "default_tagger_command")]
    pub command: String,

    // @field: Program arguments
    #[serde(default)]
    pub args: Vec<String>,

    // @field: Lexicon file for the lexicon backend
    #[serde(default)]
    pub lexicon_path: Option<PathBuf>,
}

impl Default for TaggerConfig {
    fn default() -> Self {
        Self {
            kind: TaggerKind::default(),
            command: default_tagger_command(),
            args: Vec::new(),
            lexicon_path: None,
        }
    }
}

/// Link targets
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LinkConfig {
    /// Dictionary URL prefix; the encoded word is appended
    #[serde(default = "default_dictionary_url")]
    pub dictionary_url: String,

    /// Host of the local video player
    #[serde(default = "default_player_host")]
    pub player_host: String,

    /// Port of the local video player
    #[serde(default = "default_player_port")]
    pub player_port: u16,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            dictionary_url: default_dictionary_url(),
            player_host: default_player_host(),
            player_port: default_player_port(),
        }
    }
}

/// Log level configuration
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_tagger_command() -> String {
    "srtvocab-tagger".to_string()
}

fn default_dictionary_url() -> String {
    "https://www.verbformen.es/?w=".to_string()
}

fn default_player_host() -> String {
    "localhost".to_string()
}

fn default_player_port() -> u16 {
    8080
}

fn default_output_dir_name() -> String {
    "Analyse".to_string()
}

impl Config {
    /// Load a JSON configuration file; missing fields take their defaults
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;

        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<(), AppError> {
        match self.tagger.kind {
            TaggerKind::Command => {
                if self.tagger.command.trim().is_empty() {
                    return Err(AppError::Config("Tagger command must not be empty".to_string()));
                }
            }
            TaggerKind::Lexicon => {
                if self.tagger.lexicon_path.is_none() {
                    return Err(AppError::Config(
                        "A lexicon path is required for the lexicon tagger".to_string(),
                    ));
                }
            }
        }

        if self.links.player_port == 0 {
            return Err(AppError::Config("Player port must not be 0".to_string()));
        }

        if self.links.player_host.trim().is_empty() {
            return Err(AppError::Config("Player host must not be empty".to_string()));
        }

        if let Err(e) = player_base_url(&self.links.player_host, self.links.player_port) {
            return Err(AppError::Config(format!(
                "Invalid player host {:?}: {}",
                self.links.player_host, e
            )));
        }

        if self.output_dir_name.trim().is_empty() {
            return Err(AppError::Config("Output folder name must not be empty".to_string()));
        }

        Ok(())
    }
}
