/*!
 * Tagger backed by an external model process.
 *
 * The process is started once per run and spoken to over JSON lines:
 * one request `{"text": "..."}` per sentence on stdin, one response line on
 * stdout holding an array of tokens:
 *
 * ```json
 * [{"text": "ging", "lemma": "gehen", "pos": "VERB", "idx": 3,
 *   "morph": {"Gender": null, "Number": "Sing"}}]
 * ```
 *
 * `idx` is the character offset of the token in the sentence, as spaCy
 * reports it. An empty sentence is sent once at start-up and must be answered
 * (normally with `[]`) before the run begins.
 */

use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::errors::TaggerError;
use crate::taggers::{Article, TaggedToken, Tagger, WordCategory};

// @const: Shown when the tagger program cannot be found
const MISSING_TAGGER_HINT: &str = "the command tagger needs a program speaking the JSON-lines \
     protocol on PATH, such as scripts/srtvocab-tagger.py, which uses spaCy with the \
     de_core_news_lg model (install it with: python -m spacy download de_core_news_lg)";

/// Request line sent to the tagger process
#[derive(Debug, Serialize)]
struct TagRequest<'a> {
    text: &'a str,
}

/// Morphological features of one token
#[derive(Debug, Default, Deserialize)]
pub struct WireMorphology {
    #[serde(rename = "Gender", default)]
    pub gender: Option<String>,
    #[serde(rename = "Number", default)]
    pub number: Option<String>,
}

/// One token as emitted by the tagger process
#[derive(Debug, Deserialize)]
pub struct WireToken {
    pub text: String,
    #[serde(default)]
    pub lemma: String,
    pub pos: String,
    #[serde(default)]
    pub idx: Option<usize>,
    #[serde(default)]
    pub morph: Option<WireMorphology>,
}

impl WireToken {
    /// Convert into a token for `sentence`, translating the character offset to bytes
    pub fn into_token(self, sentence: &str) -> TaggedToken {
        let category = WordCategory::from_upos(&self.pos);
        let article = match (&category, &self.morph) {
            (WordCategory::Noun, Some(morph)) => {
                Article::from_morphology(morph.gender.as_deref(), morph.number.as_deref())
            }
            _ => None,
        };
        let offset = self.idx.and_then(|idx| char_to_byte_offset(sentence, idx));

        TaggedToken {
            text: self.text,
            lemma: self.lemma,
            category,
            article,
            offset,
        }
    }
}

/// Parse one response line into tokens for `sentence`
pub fn parse_response_line(line: &str, sentence: &str) -> Result<Vec<TaggedToken>, TaggerError> {
    let tokens: Vec<WireToken> = serde_json::from_str(line.trim())
        .map_err(|e| TaggerError::Protocol(format!("{} (line: {:?})", e, line.trim())))?;

    Ok(tokens.into_iter().map(|t| t.into_token(sentence)).collect())
}

fn char_to_byte_offset(text: &str, char_idx: usize) -> Option<usize> {
    text.char_indices()
        .map(|(byte, _)| byte)
        .chain(std::iter::once(text.len()))
        .nth(char_idx)
}

/// Running tagger process
struct TaggerProcess {
    child: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
}

/// Tagger that delegates to an external command
#[derive(Debug)]
pub struct CommandTagger {
    program: String,
    args: Vec<String>,
    process: Option<TaggerProcess>,
}

impl std::fmt::Debug for TaggerProcess {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaggerProcess")
            .field("pid", &self.child.id())
            .finish()
    }
}

impl CommandTagger {
    /// Create a tagger; the process is started on first use
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            process: None,
        }
    }

    /// Start the process now instead of on the first sentence
    pub fn start(&mut self) -> Result<(), TaggerError> {
        if self.process.is_some() {
            return Ok(());
        }

        debug!("Starting tagger process: {} {}", self.program, self.args.join(" "));

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| TaggerError::SpawnFailed {
                command: self.program.clone(),
                message: match e.kind() {
                    std::io::ErrorKind::NotFound => format!("{}; {}", e, MISSING_TAGGER_HINT),
                    _ => e.to_string(),
                },
            })?;

        let stdin = child.stdin.take().ok_or_else(|| TaggerError::SpawnFailed {
            command: self.program.clone(),
            message: "stdin not available".to_string(),
        })?;
        let stdout = child.stdout.take().ok_or_else(|| TaggerError::SpawnFailed {
            command: self.program.clone(),
            message: "stdout not available".to_string(),
        })?;

        self.process = Some(TaggerProcess {
            child,
            stdin,
            stdout: BufReader::new(stdout),
        });

        Ok(())
    }

    fn round_trip(&mut self, sentence: &str) -> Result<String, TaggerError> {
        self.start()?;
        let process = self.process.as_mut().ok_or(TaggerError::ProcessExited)?;

        let request = serde_json::to_string(&TagRequest { text: sentence })
            .map_err(|e| TaggerError::Protocol(e.to_string()))?;
        writeln!(process.stdin, "{}", request)?;
        process.stdin.flush()?;

        let mut line = String::new();
        if process.stdout.read_line(&mut line)? == 0 {
            return Err(TaggerError::ProcessExited);
        }

        Ok(line)
    }

    /// Kill and reap the process, if one is running
    fn stop(&mut self) {
        if let Some(mut process) = self.process.take() {
            drop(process.stdin);
            if let Err(e) = process.child.kill() {
                debug!("Tagger process already stopped: {}", e);
            }
            if let Err(e) = process.child.wait() {
                warn!("Failed to reap tagger process: {}", e);
            }
        }
    }
}

impl Tagger for CommandTagger {
    /// Start the process and check it answers an empty sentence
    fn prepare(&mut self) -> Result<(), TaggerError> {
        self.start()?;
        match self.tag("") {
            Ok(_) => Ok(()),
            Err(TaggerError::ProcessExited) => Err(TaggerError::SpawnFailed {
                command: self.program.clone(),
                message: format!("process exited before answering; {}", MISSING_TAGGER_HINT),
            }),
            Err(e) => Err(e),
        }
    }

    fn tag(&mut self, sentence: &str) -> Result<Vec<TaggedToken>, TaggerError> {
        match self.round_trip(sentence) {
            Ok(line) => parse_response_line(&line, sentence),
            Err(TaggerError::ProcessExited) => {
                // Later sentences would fail the same way; restart on next use
                self.stop();
                Err(TaggerError::ProcessExited)
            }
            Err(TaggerError::Io(e)) if e.kind() == std::io::ErrorKind::BrokenPipe => {
                self.stop();
                Err(TaggerError::ProcessExited)
            }
            Err(e) => Err(e),
        }
    }

    fn name(&self) -> &str {
        &self.program
    }
}

impl Drop for CommandTagger {
    fn drop(&mut self) {
        self.stop();
    }
}
