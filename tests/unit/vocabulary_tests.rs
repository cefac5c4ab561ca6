/*!
 * Tests for vocabulary aggregation
 */

use std::collections::HashSet;
use std::time::Duration;
use srtvocab::subtitle_processor::SubtitleCue;
use srtvocab::taggers::{Article, TaggedToken, WordCategory};
use srtvocab::vocabulary::VocabularyAggregator;

fn cue(seq_num: usize, secs: u64, text: &str) -> SubtitleCue {
    SubtitleCue::new(seq_num, Duration::from_secs(secs), text)
}

/// Test the documented single-verb scenario
#[test]
fn test_add_cue_withSingleVerb_shouldCreateEntry() {
    let mut vocabulary = VocabularyAggregator::new();
    let first = cue(1, 1, "Er ging nach Hause.");

    vocabulary.add_cue(&first, &[
        TaggedToken::new("Er", "er", WordCategory::Other),
        TaggedToken::new("ging", "gehen", WordCategory::Verb),
    ]);

    let verbs = vocabulary.group(WordCategory::Verb).unwrap();
    assert_eq!(verbs.len(), 1);

    let entry = verbs.get("gehen").unwrap();
    assert_eq!(entry.lemma, "gehen");
    assert_eq!(entry.category, WordCategory::Verb);
    assert_eq!(entry.example_sentence, "Er ging nach Hause.");
    assert_eq!(entry.highlighted_surface_form, "ging");
    assert_eq!(entry.timestamp, Duration::from_secs(1));
    assert_eq!(entry.sentence_parts(), ("Er ", "ging", " nach Hause."));

    // Tokens of category "other" never become entries
    assert_eq!(vocabulary.total_entries(), 1);
}

/// Test that the first occurrence keeps its example
#[test]
fn test_add_cue_withRepeatedLemma_shouldKeepFirstExample() {
    let mut vocabulary = VocabularyAggregator::new();

    vocabulary.add_cue(&cue(1, 1, "Er ging nach Hause."), &[
        TaggedToken::new("ging", "gehen", WordCategory::Verb),
    ]);
    vocabulary.add_cue(&cue(2, 5, "Wir gehen jetzt."), &[
        TaggedToken::new("gehen", "gehen", WordCategory::Verb),
    ]);
    vocabulary.add_cue(&cue(3, 9, "Sie ging auch."), &[
        TaggedToken::new("ging", "gehen", WordCategory::Verb),
    ]);

    let verbs = vocabulary.group(WordCategory::Verb).unwrap();
    assert_eq!(verbs.len(), 1);
    assert_eq!(verbs.total_tokens(), 3);

    let entry = &verbs.entries()[0];
    assert_eq!(entry.example_sentence, "Er ging nach Hause.");
    assert_eq!(entry.timestamp, Duration::from_secs(1));
    assert_eq!(entry.occurrences, 3);
    assert_eq!(entry.surface_forms, vec!["ging".to_string(), "gehen".to_string()]);
}

/// Test that one lemma may appear once per category
#[test]
fn test_add_cue_withSameLemmaInTwoCategories_shouldKeepBoth() {
    let mut vocabulary = VocabularyAggregator::new();

    vocabulary.add_cue(&cue(1, 1, "Das ist schnell."), &[
        TaggedToken::new("schnell", "schnell", WordCategory::Adjective),
    ]);
    vocabulary.add_cue(&cue(2, 2, "Er läuft schnell."), &[
        TaggedToken::new("schnell", "schnell", WordCategory::Adverb),
    ]);

    assert_eq!(vocabulary.group(WordCategory::Adjective).unwrap().len(), 1);
    assert_eq!(vocabulary.group(WordCategory::Adverb).unwrap().len(), 1);
    assert_eq!(vocabulary.total_entries(), 2);
}

/// Test noun display with article
#[test]
fn test_display_lemma_withNounArticle_shouldPrefixArticle() {
    let mut vocabulary = VocabularyAggregator::new();

    vocabulary.add_cue(&cue(1, 1, "Der Mann und das Haus."), &[
        TaggedToken::new("Mann", "Mann", WordCategory::Noun).with_article(Article::Der),
        TaggedToken::new("Haus", "Haus", WordCategory::Noun),
    ]);

    let nouns = vocabulary.group(WordCategory::Noun).unwrap();
    assert_eq!(nouns.get("Mann").unwrap().display_lemma(), "der Mann");
    assert_eq!(nouns.get("Haus").unwrap().display_lemma(), "Haus");
}

/// Test the combined ordering: category first, then first appearance
#[test]
fn test_combined_withMixedCategories_shouldOrderByCategoryThenAppearance() {
    let mut vocabulary = VocabularyAggregator::new();

    vocabulary.add_cue(&cue(1, 1, "Alt ging der Mann schnell."), &[
        TaggedToken::new("Alt", "alt", WordCategory::Adjective),
        TaggedToken::new("ging", "gehen", WordCategory::Verb),
        TaggedToken::new("Mann", "Mann", WordCategory::Noun),
        TaggedToken::new("schnell", "schnell", WordCategory::Adverb),
    ]);
    vocabulary.add_cue(&cue(2, 2, "Die Frau lief."), &[
        TaggedToken::new("Frau", "Frau", WordCategory::Noun),
        TaggedToken::new("lief", "laufen", WordCategory::Verb),
    ]);

    let lemmas: Vec<&str> = vocabulary.combined().iter().map(|e| e.lemma.as_str()).collect();
    assert_eq!(lemmas, vec!["Mann", "Frau", "gehen", "laufen", "alt", "schnell"]);

    let sum: usize = WordCategory::TRACKED
        .iter()
        .map(|c| vocabulary.group(*c).unwrap().len())
        .sum();
    assert_eq!(vocabulary.combined().len(), sum);
}

/// Test that tokens not present in their sentence are dropped
#[test]
fn test_add_token_withSurfaceNotInSentence_shouldSkipToken() {
    let mut vocabulary = VocabularyAggregator::new();

    vocabulary.add_cue(&cue(1, 1, "Er ging nach Hause."), &[
        TaggedToken::new("gegangen", "gehen", WordCategory::Verb),
        TaggedToken::new("  ", "leer", WordCategory::Noun),
    ]);

    assert_eq!(vocabulary.total_entries(), 0);
    assert_eq!(vocabulary.skipped_tokens(), 1);
}

/// Test fallback of an empty lemma to the surface form
#[test]
fn test_add_token_withEmptyLemma_shouldUseSurfaceForm() {
    let mut vocabulary = VocabularyAggregator::new();

    vocabulary.add_cue(&cue(1, 1, "Heute regnet es."), &[
        TaggedToken::new("Heute", "", WordCategory::Adverb),
    ]);

    assert!(vocabulary.group(WordCategory::Adverb).unwrap().get("Heute").is_some());
}

/// Test the tagger offset is used to pick the right occurrence
#[test]
fn test_add_token_withOffset_shouldHighlightThatOccurrence() {
    let mut vocabulary = VocabularyAggregator::new();

    vocabulary.add_cue(&cue(1, 1, "Gut, sehr gut."), &[
        TaggedToken::new("gut", "gut", WordCategory::Adjective).with_offset(10),
    ]);

    let entry = &vocabulary.group(WordCategory::Adjective).unwrap().entries()[0];
    assert_eq!(entry.highlight, 10..13);
}

/// Test the uniqueness and containment properties over a larger run
#[test]
fn test_aggregation_withManyCues_shouldHoldInvariants() {
    let mut vocabulary = VocabularyAggregator::new();
    let sentences = [
        ("Der Hund bellt laut.", vec![("Hund", "Hund", WordCategory::Noun), ("bellt", "bellen", WordCategory::Verb), ("laut", "laut", WordCategory::Adverb)]),
        ("Die Hunde bellen.", vec![("Hunde", "Hund", WordCategory::Noun), ("bellen", "bellen", WordCategory::Verb)]),
        ("Ein lauter Hund!", vec![("lauter", "laut", WordCategory::Adjective), ("Hund", "Hund", WordCategory::Noun)]),
    ];

    for (i, (sentence, words)) in sentences.iter().enumerate() {
        let tokens: Vec<TaggedToken> = words
            .iter()
            .map(|(text, lemma, category)| TaggedToken::new(*text, *lemma, *category))
            .collect();
        vocabulary.add_cue(&cue(i + 1, i as u64, sentence), &tokens);
    }

    for category in WordCategory::TRACKED {
        let group = vocabulary.group(category).unwrap();
        let lemmas: HashSet<&str> = group.entries().iter().map(|e| e.lemma.as_str()).collect();
        assert_eq!(lemmas.len(), group.len());

        for entry in group.entries() {
            assert!(entry.example_sentence.contains(&entry.highlighted_surface_form));
        }
    }

    assert!(vocabulary.group(WordCategory::Other).is_none());
    assert_eq!(vocabulary.total_entries(), 4);
}
