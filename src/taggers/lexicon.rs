/*!
 * Offline tagger backed by a tab-separated lexicon.
 *
 * Each non-empty, non-comment line reads
 * `surface<TAB>lemma<TAB>POS[<TAB>gender-or-article]`, e.g.
 *
 * ```text
 * # surface  lemma   pos   gender
 * ging       gehen   VERB
 * Hause      Haus    NOUN  Neut
 * ```
 */

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::TaggerError;
use crate::taggers::{Article, TaggedToken, Tagger, WordCategory};

// @const: Word runs, allowing inner hyphens and apostrophes (Auto-Bahn, geht's)
static WORD_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\p{L}\p{M}]+(?:['’-][\p{L}\p{M}]+)*").unwrap()
});

#[derive(Debug, Clone)]
struct LexiconEntry {
    lemma: String,
    category: WordCategory,
    article: Option<Article>,
}

/// Dictionary-lookup tagger
#[derive(Debug, Default)]
pub struct LexiconTagger {
    source: Option<PathBuf>,
    exact: HashMap<String, LexiconEntry>,
    lowercase: HashMap<String, LexiconEntry>,
}

impl LexiconTagger {
    /// Load a lexicon file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TaggerError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| TaggerError::Lexicon {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let mut tagger = Self::parse(&content);
        tagger.source = Some(path.to_path_buf());
        debug!("Loaded {} lexicon entries from {:?}", tagger.len(), path);
        Ok(tagger)
    }

    /// Build a lexicon from its text form; bad lines are skipped with a warning
    pub fn parse(content: &str) -> Self {
        let mut tagger = Self::default();

        for (line_no, line) in content.lines().enumerate() {
            let line = line.trim_end();
            if line.trim().is_empty() || line.trim_start().starts_with('#') {
                continue;
            }

            let fields: Vec<&str> = line.split('\t').map(str::trim).collect();
            if fields.len() < 3 || fields[0].is_empty() {
                warn!("Skipping lexicon line {}: expected surface, lemma and POS", line_no + 1);
                continue;
            }

            let category = WordCategory::from_upos(fields[2]);
            let article = match (category, fields.get(3)) {
                (WordCategory::Noun, Some(value)) if !value.is_empty() => value.parse().ok(),
                _ => None,
            };
            let lemma = if fields[1].is_empty() { fields[0] } else { fields[1] };

            tagger.insert(fields[0], LexiconEntry {
                lemma: lemma.to_string(),
                category,
                article,
            });
        }

        tagger
    }

    fn insert(&mut self, surface: &str, entry: LexiconEntry) {
        self.lowercase
            .entry(surface.to_lowercase())
            .or_insert_with(|| entry.clone());
        self.exact.entry(surface.to_string()).or_insert(entry);
    }

    fn lookup(&self, word: &str) -> Option<&LexiconEntry> {
        self.exact
            .get(word)
            .or_else(|| self.lowercase.get(&word.to_lowercase()))
    }

    /// Number of distinct surface forms
    pub fn len(&self) -> usize {
        self.exact.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exact.is_empty()
    }
}

impl Tagger for LexiconTagger {
    fn tag(&mut self, sentence: &str) -> Result<Vec<TaggedToken>, TaggerError> {
        let tokens = WORD_REGEX
            .find_iter(sentence)
            .map(|word| match self.lookup(word.as_str()) {
                Some(entry) => TaggedToken {
                    text: word.as_str().to_string(),
                    lemma: entry.lemma.clone(),
                    category: entry.category,
                    article: entry.article,
                    offset: Some(word.start()),
                },
                None => TaggedToken::new(word.as_str(), word.as_str(), WordCategory::Other)
                    .with_offset(word.start()),
            })
            .collect();

        Ok(tokens)
    }

    fn name(&self) -> &str {
        self.source
            .as_deref()
            .and_then(|p| p.to_str())
            .unwrap_or("lexicon")
    }
}
