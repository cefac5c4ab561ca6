use anyhow::Result;
use log::{error, warn, info, debug};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use indicatif::{ProgressBar, ProgressStyle};

use crate::app_config::Config;
use crate::errors::AppError;
use crate::file_utils::FileManager;
use crate::report::{self, LinkBuilder};
use crate::subtitle_processor::{self, SubtitleCue};
use crate::taggers::{self, Tagger};
use crate::vocabulary::VocabularyAggregator;

// @module: Application controller for subtitle vocabulary analysis

/// Outcome of analysing one subtitle file
#[derive(Debug, Clone)]
pub struct AnalysisSummary {
    pub input_file: PathBuf,
    pub output_dir: PathBuf,
    /// Cues parsed from the input
    pub cues: usize,
    /// Cues the tagger failed on
    pub failed_cues: usize,
    /// Vocabulary entries across all categories
    pub entries: usize,
    pub written: Vec<PathBuf>,
}

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Analyse a subtitle file, or every `.srt` file below a directory,
    /// using the configured tagger
    pub fn run(&self, input_path: &Path) -> Result<Vec<AnalysisSummary>> {
        let mut tagger = taggers::create_tagger(&self.config.tagger).map_err(AppError::from)?;
        tagger.prepare().map_err(AppError::from)?;
        info!("Tagger: {} ({})", tagger.name(), self.config.tagger.kind);

        if input_path.is_file() {
            Ok(vec![self.run_file(input_path, tagger.as_mut())?])
        } else if input_path.is_dir() {
            self.run_folder(input_path, tagger.as_mut())
        } else {
            Err(AppError::File(format!("Input path does not exist: {:?}", input_path)).into())
        }
    }

    /// Analyse one subtitle file with the given tagger and write its ten reports
    pub fn run_file(&self, input_file: &Path, tagger: &mut dyn Tagger) -> Result<AnalysisSummary> {
        let start_time = Instant::now();

        if !FileManager::file_exists(input_file) {
            return Err(AppError::File(format!("Input file does not exist: {:?}", input_file)).into());
        }

        if !FileManager::is_subtitle_file(input_file) {
            warn!("{:?} has no .srt extension, parsing it as SRT anyway", input_file);
        }

        let file_name = input_file
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let basename = FileManager::basename(input_file)?;
        let output_dir = FileManager::report_dir(input_file, &self.config.output_dir_name);

        info!("Reading file: {}", file_name);
        let content = FileManager::read_to_string(input_file)?;
        let cues = subtitle_processor::parse_srt_string(&content);
        info!("Parsed {} subtitle cues", cues.len());

        let (vocabulary, failed_cues) = Self::analyze_cues(&cues, tagger);
        if failed_cues > 0 {
            warn!("Tagger failed on {} of {} cues", failed_cues, cues.len());
        }

        let links = LinkBuilder::new(&self.config.links)?;
        let reports = report::render_reports(&vocabulary, &file_name, &links);
        let written = report::write_reports(&reports, &output_dir, &basename).map_err(AppError::from)?;

        info!(
            "Analysis of {} completed in {}: {} entries, {} reports saved in {:?}",
            file_name,
            Self::format_duration(start_time.elapsed()),
            vocabulary.total_entries(),
            written.len(),
            output_dir
        );

        Ok(AnalysisSummary {
            input_file: input_file.to_path_buf(),
            output_dir,
            cues: cues.len(),
            failed_cues,
            entries: vocabulary.total_entries(),
            written,
        })
    }

    /// Tag every cue and aggregate the results.
    ///
    /// Returns the vocabulary and the number of cues the tagger failed on;
    /// a failed cue contributes no tokens.
    pub fn analyze_cues(cues: &[SubtitleCue], tagger: &mut dyn Tagger) -> (VocabularyAggregator, usize) {
        let mut vocabulary = VocabularyAggregator::new();
        let mut failed = 0;

        let progress_bar = ProgressBar::new(cues.len() as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} cues ({percent}%) {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(style.progress_chars("█▓▒░"));
        progress_bar.set_message("Tagging");

        for cue in cues {
            match tagger.tag(&cue.text) {
                Ok(tokens) => vocabulary.add_cue(cue, &tokens),
                Err(e) => {
                    failed += 1;
                    warn!("Tagger failed on cue {} ({}): {}", cue.seq_num, cue.format_start_time(), e);
                }
            }
            progress_bar.inc(1);
        }

        progress_bar.finish_and_clear();

        if vocabulary.skipped_tokens() > 0 {
            debug!("{} tokens skipped (surface form not in sentence)", vocabulary.skipped_tokens());
        }

        (vocabulary, failed)
    }

    /// Process every subtitle file below `input_dir`.
    ///
    /// One failing file does not stop the rest, but the run as a whole fails
    /// with `AppError::FilesFailed` naming every file that could not be analysed.
    pub fn run_folder(&self, input_dir: &Path, tagger: &mut dyn Tagger) -> Result<Vec<AnalysisSummary>> {
        let start_time = Instant::now();

        if !FileManager::dir_exists(input_dir) {
            return Err(AppError::File(format!("Input directory does not exist: {:?}", input_dir)).into());
        }

        let files = FileManager::find_files(input_dir, "srt")?;
        if files.is_empty() {
            warn!("No subtitle files found in {:?}", input_dir);
            return Ok(Vec::new());
        }

        info!("Found {} subtitle files in {:?}", files.len(), input_dir);

        let mut summaries = Vec::with_capacity(files.len());
        let mut failed = Vec::new();
        for file in &files {
            match self.run_file(file, tagger) {
                Ok(summary) => summaries.push(summary),
                Err(e) => {
                    error!("Error processing {:?}: {:#}", file, e);
                    failed.push(file.clone());
                }
            }
        }

        info!(
            "Finished processing {}/{} files in {}",
            summaries.len(),
            files.len(),
            Self::format_duration(start_time.elapsed())
        );

        if !failed.is_empty() {
            return Err(AppError::FilesFailed {
                failed,
                total: files.len(),
            }
            .into());
        }

        Ok(summaries)
    }

    fn format_duration(duration: Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
