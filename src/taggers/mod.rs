/*!
 * Linguistic tagger implementations.
 *
 * A tagger turns one sentence into tokens annotated with part of speech,
 * lemma and, for nouns, the nominative article:
 * - `command`: external model process spoken to over JSON lines
 * - `lexicon`: offline lookup in a tab-separated word list
 */

use std::fmt::{self, Debug};
use std::str::FromStr;

use crate::app_config::{TaggerConfig, TaggerKind};
use crate::errors::TaggerError;

pub mod command;
pub mod lexicon;

pub use command::CommandTagger;
pub use lexicon::LexiconTagger;

/// Part of speech as far as the reports care
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WordCategory {
    Noun,
    Verb,
    Adjective,
    Adverb,
    Other,
}

impl WordCategory {
    /// The four tracked categories, in report order
    pub const TRACKED: [WordCategory; 4] = [
        WordCategory::Noun,
        WordCategory::Verb,
        WordCategory::Adjective,
        WordCategory::Adverb,
    ];

    /// Map a Universal Dependencies POS tag (NOUN, VERB, ADJ, ADV)
    pub fn from_upos(tag: &str) -> Self {
        match tag.trim().to_ascii_uppercase().as_str() {
            "NOUN" => Self::Noun,
            "VERB" => Self::Verb,
            "ADJ" => Self::Adjective,
            "ADV" => Self::Adverb,
            _ => Self::Other,
        }
    }

    pub fn is_tracked(&self) -> bool {
        !matches!(self, Self::Other)
    }

    /// German slug used in report file names
    pub fn slug(&self) -> &'static str {
        match self {
            Self::Noun => "nomen",
            Self::Verb => "verben",
            Self::Adjective => "adjektive",
            Self::Adverb => "adverbien",
            Self::Other => "andere",
        }
    }

    /// Plural title used in report headings
    pub fn title(&self) -> &'static str {
        match self {
            Self::Noun => "Nouns",
            Self::Verb => "Verbs",
            Self::Adjective => "Adjectives",
            Self::Adverb => "Adverbs",
            Self::Other => "Other words",
        }
    }
}

impl fmt::Display for WordCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Noun => "noun",
            Self::Verb => "verb",
            Self::Adjective => "adjective",
            Self::Adverb => "adverb",
            Self::Other => "other",
        };
        write!(f, "{}", name)
    }
}

/// Nominative definite article of a German noun
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Article {
    Der,
    Die,
    Das,
}

impl Article {
    /// Derive the article from morphological features.
    ///
    /// Plural always takes `die`; otherwise the grammatical gender decides.
    pub fn from_morphology(gender: Option<&str>, number: Option<&str>) -> Option<Self> {
        if number.is_some_and(|n| n.eq_ignore_ascii_case("plur")) {
            return Some(Self::Die);
        }

        match gender?.to_ascii_lowercase().as_str() {
            "masc" => Some(Self::Der),
            "fem" => Some(Self::Die),
            "neut" => Some(Self::Das),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Der => "der",
            Self::Die => "die",
            Self::Das => "das",
        }
    }
}

impl fmt::Display for Article {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Article {
    type Err = TaggerError;

    /// Accepts either the article itself or a gender feature value
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "der" | "masc" | "m" => Ok(Self::Der),
            "die" | "fem" | "f" | "plur" => Ok(Self::Die),
            "das" | "neut" | "n" => Ok(Self::Das),
            other => Err(TaggerError::Protocol(format!("Unknown article or gender: {}", other))),
        }
    }
}

/// One word of a tagged sentence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedToken {
    /// Surface form as it appears in the sentence
    pub text: String,
    /// Dictionary base form
    pub lemma: String,
    pub category: WordCategory,
    /// Nouns only
    pub article: Option<Article>,
    /// Byte offset of `text` inside the sentence, when the tagger reports it
    pub offset: Option<usize>,
}

impl TaggedToken {
    pub fn new(text: impl Into<String>, lemma: impl Into<String>, category: WordCategory) -> Self {
        Self {
            text: text.into(),
            lemma: lemma.into(),
            category,
            article: None,
            offset: None,
        }
    }

    pub fn with_article(mut self, article: Article) -> Self {
        self.article = Some(article);
        self
    }

    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }
}

/// Common trait for all taggers
///
/// Output is best-effort: an inaccurate lemma is not an error. Callers treat
/// an `Err` for one sentence as "no tokens" and keep going.
pub trait Tagger: Debug {
    /// Acquire whatever the backend needs before the first sentence.
    /// Failing here aborts the run.
    fn prepare(&mut self) -> Result<(), TaggerError> {
        Ok(())
    }

    /// Tag a single sentence
    fn tag(&mut self, sentence: &str) -> Result<Vec<TaggedToken>, TaggerError>;

    /// Short human-readable backend name for logs
    fn name(&self) -> &str;
}

/// Build the tagger selected by the configuration
pub fn create_tagger(config: &TaggerConfig) -> Result<Box<dyn Tagger>, TaggerError> {
    match config.kind {
        TaggerKind::Command => Ok(Box::new(CommandTagger::new(
            config.command.clone(),
            config.args.clone(),
        ))),
        TaggerKind::Lexicon => {
            let path = config.lexicon_path.as_ref().ok_or_else(|| TaggerError::SpawnFailed {
                command: "lexicon".to_string(),
                message: "no lexicon path configured".to_string(),
            })?;
            Ok(Box::new(LexiconTagger::from_file(path)?))
        }
    }
}
