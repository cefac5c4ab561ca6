/*!
 * Report generation.
 *
 * Turns an aggregated vocabulary into ten documents: one HTML and one
 * Markdown report per tracked category, plus a combined report in each
 * format.
 * - `html`: HTML tables with highlighted context
 * - `markdown`: Markdown tables safe against pipes and line breaks
 * - `links`: dictionary and player hyperlink targets
 */

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use crate::errors::ReportError;
use crate::taggers::WordCategory;
use crate::vocabulary::VocabularyAggregator;

pub mod html;
pub mod links;
pub mod markdown;

pub use links::LinkBuilder;

/// Output format of a report file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Html,
    Markdown,
}

impl ReportFormat {
    pub const ALL: [ReportFormat; 2] = [ReportFormat::Html, ReportFormat::Markdown];

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Markdown => "md",
        }
    }
}

/// Which slice of the vocabulary a report covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Category(WordCategory),
    Combined,
}

impl ReportKind {
    /// The five report kinds in output order
    pub fn all() -> Vec<ReportKind> {
        WordCategory::TRACKED
            .iter()
            .map(|c| ReportKind::Category(*c))
            .chain(std::iter::once(ReportKind::Combined))
            .collect()
    }

    pub fn slug(&self) -> &'static str {
        match self {
            Self::Category(category) => category.slug(),
            Self::Combined => "combined",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.slug())
    }
}

/// A rendered report, not yet written
#[derive(Debug, Clone)]
pub struct Report {
    pub kind: ReportKind,
    pub format: ReportFormat,
    pub content: String,
    /// Table rows rendered into `content`
    pub rows: usize,
}

impl Report {
    /// `<basename>.<slug>.<ext>`
    pub fn file_name(&self, basename: &str) -> String {
        report_file_name(basename, self.kind, self.format)
    }
}

pub fn report_file_name(basename: &str, kind: ReportKind, format: ReportFormat) -> String {
    format!("{}.{}.{}", basename, kind.slug(), format.extension())
}

/// Render all ten reports for one analysed subtitle file
pub fn render_reports(
    vocabulary: &VocabularyAggregator,
    source_name: &str,
    links: &LinkBuilder,
) -> Vec<Report> {
    let mut reports = Vec::with_capacity(10);
    let combined = vocabulary.combined();

    for kind in ReportKind::all() {
        for format in ReportFormat::ALL {
            let (content, rows) = match kind {
                ReportKind::Category(category) => {
                    let Some(group) = vocabulary.group(category) else {
                        continue;
                    };
                    let content = match format {
                        ReportFormat::Html => html::render_category(category, source_name, group, links),
                        ReportFormat::Markdown => markdown::render_category(category, source_name, group, links),
                    };
                    (content, group.len())
                }
                ReportKind::Combined => {
                    let content = match format {
                        ReportFormat::Html => html::render_combined(source_name, &combined, links),
                        ReportFormat::Markdown => markdown::render_combined(source_name, &combined, links),
                    };
                    (content, combined.len())
                }
            };

            reports.push(Report { kind, format, content, rows });
        }
    }

    reports
}

/// Write reports into `output_dir`, creating it if needed; overwrites existing files
pub fn write_reports(
    reports: &[Report],
    output_dir: &Path,
    basename: &str,
) -> Result<Vec<PathBuf>, ReportError> {
    fs::create_dir_all(output_dir).map_err(|source| ReportError::OutputDir {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let mut written = Vec::with_capacity(reports.len());
    for report in reports {
        let path = output_dir.join(report.file_name(basename));
        fs::write(&path, &report.content).map_err(|source| ReportError::Write {
            path: path.clone(),
            source,
        })?;
        info!("Created {:?} ({} rows)", path, report.rows);
        written.push(path);
    }

    Ok(written)
}
