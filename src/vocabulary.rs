/*!
 * Vocabulary aggregation.
 *
 * Collects tagged tokens into one entry per `(lemma, category)`. The first
 * occurrence provides the example sentence and timestamp; later occurrences
 * only bump the counters.
 */

use std::collections::HashMap;
use std::ops::Range;
use std::time::Duration;

use log::debug;

use crate::subtitle_processor::SubtitleCue;
use crate::taggers::{Article, TaggedToken, WordCategory};

/// One vocabulary item with its first example
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocabularyEntry {
    pub lemma: String,
    pub category: WordCategory,
    pub article: Option<Article>,
    pub example_sentence: String,
    /// Surface form that triggered the entry
    pub highlighted_surface_form: String,
    /// Byte range of the surface form within `example_sentence`
    pub highlight: Range<usize>,
    pub timestamp: Duration,
    /// Tokens that mapped to this entry, the first one included
    pub occurrences: usize,
    /// Distinct surface forms in first-seen order
    pub surface_forms: Vec<String>,
}

impl VocabularyEntry {
    /// Lemma as shown in reports, nouns prefixed with their article
    pub fn display_lemma(&self) -> String {
        match (self.category, self.article) {
            (WordCategory::Noun, Some(article)) => format!("{} {}", article, self.lemma),
            _ => self.lemma.clone(),
        }
    }

    /// Sentence split around the highlighted word
    pub fn sentence_parts(&self) -> (&str, &str, &str) {
        let s = &self.example_sentence;
        (
            &s[..self.highlight.start],
            &s[self.highlight.clone()],
            &s[self.highlight.end..],
        )
    }
}

/// Ordered entries of one category
#[derive(Debug, Default, Clone)]
pub struct CategoryGroup {
    entries: Vec<VocabularyEntry>,
    index: HashMap<String, usize>,
    /// All matched tokens, repeats included
    total_tokens: usize,
}

impl CategoryGroup {
    pub fn entries(&self) -> &[VocabularyEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_tokens(&self) -> usize {
        self.total_tokens
    }

    pub fn get(&self, lemma: &str) -> Option<&VocabularyEntry> {
        self.index.get(lemma).map(|&i| &self.entries[i])
    }

    /// Entries sorted alphabetically by display lemma (summary lists)
    pub fn sorted_by_lemma(&self) -> Vec<&VocabularyEntry> {
        let mut sorted: Vec<&VocabularyEntry> = self.entries.iter().collect();
        sorted.sort_by_key(|e| e.display_lemma().to_lowercase());
        sorted
    }
}

/// Per-run accumulator of vocabulary entries
#[derive(Debug, Default)]
pub struct VocabularyAggregator {
    nouns: CategoryGroup,
    verbs: CategoryGroup,
    adjectives: CategoryGroup,
    adverbs: CategoryGroup,
    skipped_tokens: usize,
}

impl VocabularyAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record all tokens of one cue
    pub fn add_cue(&mut self, cue: &SubtitleCue, tokens: &[TaggedToken]) {
        for token in tokens {
            self.add_token(cue, token);
        }
    }

    /// Record a single token; untracked categories are ignored
    pub fn add_token(&mut self, cue: &SubtitleCue, token: &TaggedToken) {
        let surface = token.text.trim();
        if surface.is_empty() {
            return;
        }

        let Some(group) = self.group_mut(token.category) else {
            return;
        };

        let lemma = match token.lemma.trim() {
            "" => surface,
            lemma => lemma,
        };

        if let Some(&i) = group.index.get(lemma) {
            let entry = &mut group.entries[i];
            entry.occurrences += 1;
            if !entry.surface_forms.iter().any(|f| f == surface) {
                entry.surface_forms.push(surface.to_string());
            }
            group.total_tokens += 1;
            return;
        }

        let Some(highlight) = locate(&cue.text, surface, token.offset) else {
            debug!(
                "Token '{}' not found in cue {} sentence, skipping",
                surface, cue.seq_num
            );
            self.skipped_tokens += 1;
            return;
        };

        group.index.insert(lemma.to_string(), group.entries.len());
        group.entries.push(VocabularyEntry {
            lemma: lemma.to_string(),
            category: token.category,
            article: token.article,
            example_sentence: cue.text.clone(),
            highlighted_surface_form: surface.to_string(),
            highlight,
            timestamp: cue.start,
            occurrences: 1,
            surface_forms: vec![surface.to_string()],
        });
        group.total_tokens += 1;
    }

    fn group_mut(&mut self, category: WordCategory) -> Option<&mut CategoryGroup> {
        match category {
            WordCategory::Noun => Some(&mut self.nouns),
            WordCategory::Verb => Some(&mut self.verbs),
            WordCategory::Adjective => Some(&mut self.adjectives),
            WordCategory::Adverb => Some(&mut self.adverbs),
            WordCategory::Other => None,
        }
    }

    /// Grouping for a category; `Other` has none
    pub fn group(&self, category: WordCategory) -> Option<&CategoryGroup> {
        match category {
            WordCategory::Noun => Some(&self.nouns),
            WordCategory::Verb => Some(&self.verbs),
            WordCategory::Adjective => Some(&self.adjectives),
            WordCategory::Adverb => Some(&self.adverbs),
            WordCategory::Other => None,
        }
    }

    /// All entries ordered by category, then by first appearance
    pub fn combined(&self) -> Vec<&VocabularyEntry> {
        WordCategory::TRACKED
            .iter()
            .filter_map(|c| self.group(*c))
            .flat_map(|g| g.entries.iter())
            .collect()
    }

    pub fn total_entries(&self) -> usize {
        WordCategory::TRACKED
            .iter()
            .filter_map(|c| self.group(*c))
            .map(CategoryGroup::len)
            .sum()
    }

    /// Tokens dropped because their surface form was not in the sentence
    pub fn skipped_tokens(&self) -> usize {
        self.skipped_tokens
    }
}

/// Find the byte range of `word` in `sentence`.
///
/// Tries the tagger-provided offset, then the first whole-word match, then
/// any substring match.
pub fn locate(sentence: &str, word: &str, offset: Option<usize>) -> Option<Range<usize>> {
    if word.is_empty() {
        return None;
    }

    if let Some(start) = offset {
        let end = start + word.len();
        if sentence.get(start..end) == Some(word) {
            return Some(start..end);
        }
    }

    let mut first_substring = None;
    for (start, _) in sentence.match_indices(word) {
        let end = start + word.len();
        first_substring.get_or_insert(start..end);

        let before = sentence[..start].chars().next_back();
        let after = sentence[end..].chars().next();
        if !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric) {
            return Some(start..end);
        }
    }

    first_substring
}
