use std::fmt::Write;

use crate::report::links::LinkBuilder;
use crate::subtitle_processor::format_timestamp;
use crate::taggers::WordCategory;
use crate::vocabulary::{CategoryGroup, VocabularyEntry};

// @module: Markdown report rendering

/// Make text safe inside a table cell: no line breaks, no bare pipes.
///
/// Backslashes are escaped first so an input `\|` cannot turn into an
/// escaped backslash followed by a cell separator.
pub fn sanitize_cell(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace("\r\n", " ")
        .replace(['\r', '\n'], " ")
        .replace('|', "\\|")
}

/// Cell text that must not open or close emphasis
fn sanitize_plain(text: &str) -> String {
    sanitize_cell(text).replace('*', "\\*")
}

/// Like `sanitize_cell`, also escaping characters that would end link text
fn sanitize_link_text(text: &str) -> String {
    sanitize_cell(text).replace('[', "\\[").replace(']', "\\]")
}

fn lemma_cell(entry: &VocabularyEntry, links: &LinkBuilder) -> String {
    format!(
        "[{}]({})",
        sanitize_link_text(&entry.display_lemma()),
        links.dictionary_url(&entry.highlighted_surface_form)
    )
}

fn context_cell(entry: &VocabularyEntry) -> String {
    let (before, word, after) = entry.sentence_parts();
    format!(
        "{}**{}**{}",
        sanitize_plain(before),
        sanitize_plain(word),
        sanitize_plain(after)
    )
}

fn time_cell(entry: &VocabularyEntry, links: &LinkBuilder) -> String {
    format!(
        "[{}]({})",
        format_timestamp(entry.timestamp),
        links.player_url(entry.timestamp)
    )
}

/// Report for one category: entries table plus summary
pub fn render_category(
    category: WordCategory,
    source_name: &str,
    group: &CategoryGroup,
    links: &LinkBuilder,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# {} Analysis", category.title());
    let _ = writeln!(out, "## File: `{}`\n\n---\n", source_name.replace('`', "\\`"));

    if group.is_empty() {
        let _ = writeln!(out, "No {} found in text.", category.title().to_lowercase());
    } else {
        out.push_str("| Lemma | Context | Start Time | Count |\n");
        out.push_str("| :--- | :--- | :--- | ---: |\n");
        for entry in group.entries() {
            let _ = writeln!(
                out,
                "| {} | {} | {} | {} |",
                lemma_cell(entry, links),
                context_cell(entry),
                time_cell(entry, links),
                entry.occurrences
            );
        }
    }

    out.push_str("\n\n## Summary\n");
    if group.is_empty() {
        out.push_str("No instances found.\n");
    } else {
        let _ = writeln!(
            out,
            "Total instances found: **{}** ({} unique lemmas)",
            group.total_tokens(),
            group.len()
        );
        out.push_str("\n**Unique Lemmas List:**\n\n");
        for entry in group.sorted_by_lemma() {
            let _ = writeln!(out, "* `{}`", entry.display_lemma().replace('`', "\\`"));
        }
    }

    out
}

/// Report across all categories, category order then first appearance
pub fn render_combined(
    source_name: &str,
    entries: &[&VocabularyEntry],
    links: &LinkBuilder,
) -> String {
    let mut out = String::new();
    out.push_str("# Combined Analysis\n");
    let _ = writeln!(out, "## File: `{}`\n\n---\n", source_name.replace('`', "\\`"));

    if entries.is_empty() {
        out.push_str("No words found in text.\n");
        return out;
    }

    out.push_str("| Category | Lemma | Context | Start Time | Count |\n");
    out.push_str("| :--- | :--- | :--- | :--- | ---: |\n");
    for entry in entries {
        let _ = writeln!(
            out,
            "| {} | {} | {} | {} | {} |",
            entry.category.title(),
            lemma_cell(entry, links),
            context_cell(entry),
            time_cell(entry, links),
            entry.occurrences
        );
    }

    out
}
