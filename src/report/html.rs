use std::fmt::Write;

use crate::report::links::LinkBuilder;
use crate::subtitle_processor::format_timestamp;
use crate::taggers::WordCategory;
use crate::vocabulary::{CategoryGroup, VocabularyEntry};

// @module: HTML report rendering

const STYLE: &str = r#"
        body { font-family: -apple-system, "Segoe UI", Roboto, Helvetica, Arial, sans-serif; line-height: 1.6; margin: 2em; }
        table { width: 100%; border-collapse: collapse; margin-bottom: 2em; table-layout: fixed; }
        th, td { border: 1px solid #ddd; padding: 8px 12px; text-align: left; vertical-align: top; word-wrap: break-word; }
        th { background-color: #f4f4f4; }
        .single-report th:nth-child(1) { width: 20%; }
        .single-report th:nth-child(2) { width: 60%; }
        .single-report th:nth-child(3) { width: 12%; }
        .single-report th:nth-child(4) { width: 8%; }
        .combined th:nth-child(1) { width: 10%; }
        .combined th:nth-child(2) { width: 18%; }
        .combined th:nth-child(3) { width: 52%; }
        .combined th:nth-child(4) { width: 12%; }
        .combined th:nth-child(5) { width: 8%; }
        td strong.highlight { background-color: #fff8c5; padding: 0 2px; }
        td.time a { color: #444; font-size: 0.9em; }
        a { text-decoration: none; color: #005fcc; }
        a:hover { text-decoration: underline; }
"#;

/// Escape text for use in HTML content and attribute values
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            '\n' | '\r' => escaped.push(' '),
            c => escaped.push(c),
        }
    }
    escaped
}

fn header(title: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"de\">\n<head>\n    <meta charset=\"UTF-8\">\n    \
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n    \
         <title>{}</title>\n    <style>{}    </style>\n</head>\n<body>\n",
        escape(title),
        STYLE
    )
}

const FOOTER: &str = "</body>\n</html>\n";

fn lemma_cell(entry: &VocabularyEntry, links: &LinkBuilder) -> String {
    let surface = &entry.highlighted_surface_form;
    format!(
        "<a href=\"{}\" target=\"_blank\" title=\"Lookup: {}\"><strong>{}</strong></a>",
        escape(&links.dictionary_url(surface)),
        escape(surface),
        escape(&entry.display_lemma())
    )
}

fn context_cell(entry: &VocabularyEntry) -> String {
    let (before, word, after) = entry.sentence_parts();
    format!(
        "{}<strong class=\"highlight\">{}</strong>{}",
        escape(before),
        escape(word),
        escape(after)
    )
}

fn time_cell(entry: &VocabularyEntry, links: &LinkBuilder) -> String {
    format!(
        "<a href=\"{}\" target=\"_blank\" title=\"Jump to time (localhost)\">{}</a>",
        escape(&links.player_url(entry.timestamp)),
        format_timestamp(entry.timestamp)
    )
}

/// Report for one category: entries table plus summary
pub fn render_category(
    category: WordCategory,
    source_name: &str,
    group: &CategoryGroup,
    links: &LinkBuilder,
) -> String {
    let title = format!("{} Analysis", category.title());
    let mut out = header(&title);

    let _ = writeln!(out, "<h1>{}</h1>", escape(&title));
    let _ = writeln!(out, "<h2>File: <code>{}</code></h2>", escape(source_name));

    if group.is_empty() {
        let _ = writeln!(out, "<p>No {} found in text.</p>", category.title().to_lowercase());
    } else {
        out.push_str("<table class=\"single-report\">\n");
        out.push_str("  <thead><tr><th>Lemma</th><th>Context (Highlighted)</th><th>Start Time</th><th>Count</th></tr></thead>\n");
        out.push_str("  <tbody>\n");
        for entry in group.entries() {
            let _ = writeln!(
                out,
                "    <tr><td>{}</td><td>{}</td><td class=\"time\">{}</td><td>{}</td></tr>",
                lemma_cell(entry, links),
                context_cell(entry),
                time_cell(entry, links),
                entry.occurrences
            );
        }
        out.push_str("  </tbody>\n</table>\n");
    }

    out.push_str("<h3>Summary</h3>\n");
    if group.is_empty() {
        out.push_str("<p>No instances found.</p>\n");
    } else {
        let _ = writeln!(
            out,
            "<p>Total found: <strong>{}</strong> instances of <strong>{}</strong> unique lemmas.</p>",
            group.total_tokens(),
            group.len()
        );
        out.push_str("<h4>Unique Lemmas List:</h4>\n<ul>\n");
        for entry in group.sorted_by_lemma() {
            let _ = writeln!(out, "  <li>{}</li>", lemma_cell(entry, links));
        }
        out.push_str("</ul>\n");
    }

    out.push_str(FOOTER);
    out
}

/// Report across all categories, category order then first appearance
pub fn render_combined(
    source_name: &str,
    entries: &[&VocabularyEntry],
    links: &LinkBuilder,
) -> String {
    let mut out = header("Combined Analysis");

    out.push_str("<h1>Combined Analysis</h1>\n");
    let _ = writeln!(out, "<h2>File: <code>{}</code></h2>", escape(source_name));

    if entries.is_empty() {
        out.push_str("<p>No words found in text.</p>\n");
    } else {
        out.push_str("<table class=\"combined\">\n");
        out.push_str("  <thead><tr><th>Category</th><th>Lemma</th><th>Context (Highlighted)</th><th>Start Time</th><th>Count</th></tr></thead>\n");
        out.push_str("  <tbody>\n");
        for entry in entries {
            let _ = writeln!(
                out,
                "    <tr><td>{}</td><td>{}</td><td>{}</td><td class=\"time\">{}</td><td>{}</td></tr>",
                entry.category.title(),
                lemma_cell(entry, links),
                context_cell(entry),
                time_cell(entry, links),
                entry.occurrences
            );
        }
        out.push_str("  </tbody>\n</table>\n");
    }

    out.push_str(FOOTER);
    out
}
