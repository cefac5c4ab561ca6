use std::fmt;
use std::fs;
use std::path::Path;
use std::time::Duration;
use regex::Regex;
use once_cell::sync::Lazy;
use anyhow::{Result, Context, anyhow};
use log::{warn, debug};

// @module: Subtitle parsing into timed plain-text cues

// @const: SRT timing line, start time captured in groups 1-4
static TIMESTAMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{1,2}):(\d{2}):(\d{2})[,.](\d{3})\s*-->\s*\d{1,2}:\d{2}:\d{2}[,.]\d{3}").unwrap()
});

// @const: Blank line separating blocks
static BLOCK_SEPARATOR_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\n(?:[ \t]*\n)+").unwrap()
});

// @const: HTML-like markup (<i>, </b>, <font color="...">)
static MARKUP_TAG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<[^>]+>").unwrap()
});

// @const: SSA/ASS override blocks ({\an8}, {\i1})
static OVERRIDE_TAG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\\[^}]*\}").unwrap()
});

static WHITESPACE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s+").unwrap()
});

// @struct: One timed subtitle sentence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleCue {
    // @field: Sequence number from the file, or block ordinal when missing
    pub seq_num: usize,

    // @field: Start time of the block
    pub start: Duration,

    // @field: Single-line text without markup
    pub text: String,
}

impl SubtitleCue {
    pub fn new(seq_num: usize, start: Duration, text: impl Into<String>) -> Self {
        SubtitleCue {
            seq_num,
            start,
            text: text.into(),
        }
    }

    /// Start time formatted as `HH:MM:SS,mmm`
    pub fn format_start_time(&self) -> String {
        format_timestamp(self.start)
    }
}

impl fmt::Display for SubtitleCue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{}] {}", self.format_start_time(), self.text)
    }
}

/// Parse an SRT timestamp (`HH:MM:SS,mmm`, `.` also accepted) into a duration
pub fn parse_timestamp(timestamp: &str) -> Result<Duration> {
    let parts: Vec<&str> = timestamp.trim().split(&[':', ',', '.'][..]).collect();

    if parts.len() != 4 {
        return Err(anyhow!("Invalid timestamp format: {}", timestamp));
    }

    let hours: u64 = parts[0].parse().context("Failed to parse hours")?;
    let minutes: u64 = parts[1].parse().context("Failed to parse minutes")?;
    let seconds: u64 = parts[2].parse().context("Failed to parse seconds")?;
    let millis: u64 = parts[3].parse().context("Failed to parse milliseconds")?;

    if minutes >= 60 || seconds >= 60 || millis >= 1000 {
        return Err(anyhow!("Invalid time components in timestamp: {}", timestamp));
    }

    Ok(Duration::from_millis(hours * 3_600_000 + minutes * 60_000 + seconds * 1_000 + millis))
}

/// Format a duration in SRT style (HH:MM:SS,mmm)
pub fn format_timestamp(time: Duration) -> String {
    let ms = time.as_millis();
    let hours = ms / 3_600_000;
    let minutes = (ms % 3_600_000) / 60_000;
    let seconds = (ms % 60_000) / 1_000;
    let millis = ms % 1_000;

    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
}

/// Remove markup and fold all whitespace, including line breaks, into single spaces.
///
/// Tags are replaced by a space rather than removed so that words on either
/// side of a tag never get glued together.
pub fn clean_text(raw: &str) -> String {
    let without_markup = MARKUP_TAG_REGEX.replace_all(raw, " ");
    let without_overrides = OVERRIDE_TAG_REGEX.replace_all(&without_markup, " ");
    WHITESPACE_REGEX
        .replace_all(&without_overrides, " ")
        .trim()
        .to_string()
}

/// Parse SRT file content into cues
pub fn parse_srt_file<P: AsRef<Path>>(path: P) -> Result<Vec<SubtitleCue>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read subtitle file: {}", path.display()))?;
    Ok(parse_srt_string(&content))
}

/// Parse SRT format text into cues.
///
/// Blocks without a timing line or with an empty body are skipped with a
/// warning; this never fails.
pub fn parse_srt_string(content: &str) -> Vec<SubtitleCue> {
    let normalized = content
        .trim_start_matches('\u{feff}')
        .replace("\r\n", "\n")
        .replace('\r', "\n");

    let mut cues = Vec::new();
    let mut skipped = 0;

    for (ordinal, block) in BLOCK_SEPARATOR_REGEX.split(&normalized).enumerate() {
        let block = block.trim();
        if block.is_empty() {
            continue;
        }

        match parse_block(block, ordinal + 1) {
            Ok(cue) => cues.push(cue),
            Err(e) => {
                skipped += 1;
                warn!("Skipping subtitle block {}: {}", ordinal + 1, e);
            }
        }
    }

    if cues.is_empty() {
        warn!("No valid subtitle entries found in content");
    } else {
        debug!("Parsed {} cues ({} blocks skipped)", cues.len(), skipped);
    }

    cues
}

/// Parse one blank-line separated block
fn parse_block(block: &str, ordinal: usize) -> Result<SubtitleCue> {
    let caps = TIMESTAMP_REGEX
        .captures(block)
        .ok_or_else(|| anyhow!("missing timing line"))?;

    let timing = caps.get(0).ok_or_else(|| anyhow!("missing timing line"))?;
    let start = parse_timestamp(&format!(
        "{}:{}:{},{}",
        &caps[1], &caps[2], &caps[3], &caps[4]
    ))?;

    // Whatever precedes the timing line is the sequence number, if it is one
    let seq_num = block[..timing.start()]
        .trim()
        .parse::<usize>()
        .unwrap_or(ordinal);

    // Body starts on the line after the timing line (skips position hints like X1:..)
    let body_start = block[timing.end()..]
        .find('\n')
        .map_or(block.len(), |i| timing.end() + i);

    let text = clean_text(&block[body_start..]);
    if text.is_empty() {
        return Err(anyhow!("empty subtitle text"));
    }

    Ok(SubtitleCue::new(seq_num, start, text))
}
