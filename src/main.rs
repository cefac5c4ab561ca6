// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow};
use log::{info, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;
use clap::{Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use srtvocab::app_config::{self, Config, TaggerKind};
use srtvocab::Controller;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate shell completions for srtvocab
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// srtvocab - vocabulary reports from German subtitles
///
/// Extracts nouns, verbs, adjectives and adverbs with their base forms and
/// example sentences from an SRT file and writes HTML and Markdown reports.
#[derive(Parser, Debug)]
#[command(name = "srtvocab")]
#[command(version)]
#[command(about = "Vocabulary reports from German subtitle files")]
#[command(long_about = "srtvocab tags every sentence of a German SRT file and writes ten reports
(HTML and Markdown for nouns, verbs, adjectives, adverbs and a combined view)
into an 'Analyse' folder next to the input file.

EXAMPLES:
    srtvocab film.srt                                   # Use the default tagger command
    srtvocab --tagger-command python3 --tagger-arg tag.py film.srt
    srtvocab --lexicon woerter.tsv film.srt             # Offline lexicon tagger
    srtvocab --log-level debug /filme/                  # Every .srt below a folder
    srtvocab completions bash > srtvocab.bash           # Generate bash completions

TAGGER PROTOCOL:
    The tagger command reads one JSON object per line on stdin, {\"text\": \"...\"},
    and answers each with one line holding a JSON array of tokens:
    {\"text\", \"lemma\", \"pos\" (NOUN/VERB/ADJ/ADV/...), \"idx\", \"morph\": {\"Gender\", \"Number\"}}")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input subtitle file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Configuration file path (JSON); defaults are used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Tagger program speaking the JSON-lines protocol
    #[arg(long)]
    tagger_command: Option<String>,

    /// Argument passed to the tagger program (repeatable)
    #[arg(long = "tagger-arg", allow_hyphen_values = true)]
    tagger_args: Vec<String>,

    /// Use the offline lexicon tagger with this TSV file
    #[arg(long, conflicts_with = "tagger_command")]
    lexicon: Option<PathBuf>,

    /// Port of the local video player used in timestamp links
    #[arg(long)]
    player_port: Option<u16>,

    /// Name of the report folder created next to the input
    #[arg(long)]
    output_dir_name: Option<String>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI colour and marker for level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("\x1B[1;31m", "❌ "),
            Level::Warn => ("\x1B[1;33m", "🚧 "),
            Level::Info => ("\x1B[1;32m", " "),
            Level::Debug => ("\x1B[1;36m", "🔍 "),
            Level::Trace => ("\x1B[1;35m", "📋 "),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level && metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (colour, marker) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {} {}\x1B[0m", colour, now, marker, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // Accept everything here; the effective level is set through log::set_max_level
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Some(Commands::Completions { shell }) = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "srtvocab", &mut std::io::stdout());
        return Ok(());
    }

    let input_path = cli.input_path.clone().ok_or_else(|| {
        anyhow!("INPUT_PATH is required when no subcommand is specified")
    })?;

    let config = build_config(&cli)?;
    log::set_max_level(config.log_level.into());

    let controller = Controller::with_config(config)?;
    let summaries = controller.run(&input_path)?;

    let reports: usize = summaries.iter().map(|s| s.written.len()).sum();
    info!("Success! {} reports written for {} file(s).", reports, summaries.len());

    Ok(())
}

/// Load the optional config file and apply command line overrides
fn build_config(cli: &CommandLineOptions) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    if let Some(log_level) = &cli.log_level {
        config.log_level = log_level.clone().into();
    }

    if let Some(command) = &cli.tagger_command {
        config.tagger.kind = TaggerKind::Command;
        config.tagger.command = command.clone();
        config.tagger.args = cli.tagger_args.clone();
    } else if !cli.tagger_args.is_empty() {
        config.tagger.args = cli.tagger_args.clone();
    }

    if let Some(lexicon) = &cli.lexicon {
        config.tagger.kind = TaggerKind::Lexicon;
        config.tagger.lexicon_path = Some(lexicon.clone());
    }

    if let Some(port) = cli.player_port {
        config.links.player_port = port;
    }

    if let Some(name) = &cli.output_dir_name {
        config.output_dir_name = name.clone();
    }

    Ok(config)
}
