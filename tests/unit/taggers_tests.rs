/*!
 * Tests for tagger implementations
 */

use anyhow::Result;
use srtvocab::app_config::{TaggerConfig, TaggerKind};
use srtvocab::errors::TaggerError;
use srtvocab::taggers::command::parse_response_line;
use srtvocab::taggers::{create_tagger, Article, CommandTagger, LexiconTagger, Tagger, WordCategory};
use crate::common;

/// Test mapping of Universal POS tags
#[test]
fn test_word_category_from_upos_withKnownTags_shouldMapToCategories() {
    assert_eq!(WordCategory::from_upos("NOUN"), WordCategory::Noun);
    assert_eq!(WordCategory::from_upos("verb"), WordCategory::Verb);
    assert_eq!(WordCategory::from_upos("ADJ"), WordCategory::Adjective);
    assert_eq!(WordCategory::from_upos(" ADV "), WordCategory::Adverb);
    assert_eq!(WordCategory::from_upos("AUX"), WordCategory::Other);
    assert_eq!(WordCategory::from_upos("PROPN"), WordCategory::Other);
    assert!(!WordCategory::Other.is_tracked());
}

/// Test the report slugs of each category
#[test]
fn test_word_category_slug_withTrackedCategories_shouldUseGermanNames() {
    let slugs: Vec<&str> = WordCategory::TRACKED.iter().map(|c| c.slug()).collect();
    assert_eq!(slugs, vec!["nomen", "verben", "adjektive", "adverbien"]);
}

/// Test article derivation from morphology
#[test]
fn test_article_from_morphology_withGenderAndNumber_shouldPreferPlural() {
    assert_eq!(Article::from_morphology(Some("Masc"), Some("Sing")), Some(Article::Der));
    assert_eq!(Article::from_morphology(Some("Fem"), None), Some(Article::Die));
    assert_eq!(Article::from_morphology(Some("Neut"), Some("Sing")), Some(Article::Das));
    assert_eq!(Article::from_morphology(Some("Masc"), Some("Plur")), Some(Article::Die));
    assert_eq!(Article::from_morphology(None, Some("Plur")), Some(Article::Die));
    assert_eq!(Article::from_morphology(None, None), None);
    assert_eq!(Article::from_morphology(Some("Unknown"), None), None);
}

/// Test parsing articles and gender values from text
#[test]
fn test_article_from_str_withArticlesAndGenders_shouldParse() {
    assert_eq!("der".parse::<Article>().unwrap(), Article::Der);
    assert_eq!("Neut".parse::<Article>().unwrap(), Article::Das);
    assert_eq!("f".parse::<Article>().unwrap(), Article::Die);
    assert!("xyz".parse::<Article>().is_err());
}

/// Test decoding a tagger response line
#[test]
fn test_parse_response_line_withSpacyStyleTokens_shouldConvertOffsetsAndArticles() -> Result<()> {
    let sentence = "Für den Mann.";
    let line = r#"[{"text":"Für","lemma":"für","pos":"ADP","idx":0},
                   {"text":"Mann","lemma":"Mann","pos":"NOUN","idx":8,"morph":{"Gender":"Masc","Number":"Sing"}},
                   {"text":".","lemma":".","pos":"PUNCT"}]"#
        .replace('\n', " ");

    let tokens = parse_response_line(&line, sentence)?;

    assert_eq!(tokens.len(), 3);
    assert_eq!(tokens[0].category, WordCategory::Other);
    assert_eq!(tokens[1].category, WordCategory::Noun);
    assert_eq!(tokens[1].article, Some(Article::Der));
    // "Für" has a two-byte character, so char index 8 is byte index 9
    assert_eq!(tokens[1].offset, Some(9));
    assert_eq!(&sentence[9..13], "Mann");
    assert_eq!(tokens[2].offset, None);

    Ok(())
}

/// Test that garbage is reported as a protocol error
#[test]
fn test_parse_response_line_withInvalidJson_shouldReturnProtocolError() {
    let result = parse_response_line("not json", "Hallo");
    assert!(matches!(result, Err(TaggerError::Protocol(_))));
}

/// Test lexicon lookups, including lowercase fallback
#[test]
fn test_lexicon_tagger_withSampleLexicon_shouldTagKnownWords() -> Result<()> {
    let mut tagger = LexiconTagger::parse(common::SAMPLE_LEXICON);
    assert_eq!(tagger.len(), 8);

    let tokens = tagger.tag("Der Mann geht schnell nach Hause.")?;
    let words: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(words, vec!["Der", "Mann", "geht", "schnell", "nach", "Hause"]);

    assert_eq!(tokens[0].category, WordCategory::Other);
    assert_eq!(tokens[1].category, WordCategory::Noun);
    assert_eq!(tokens[1].article, Some(Article::Der));
    assert_eq!(tokens[1].offset, Some(4));
    assert_eq!(tokens[2].lemma, "gehen");
    assert_eq!(tokens[3].category, WordCategory::Adverb);
    assert_eq!(tokens[5].lemma, "Haus");
    assert_eq!(tokens[5].article, Some(Article::Das));

    // Sentence-initial capitalisation still finds the lowercase entry
    let tokens = tagger.tag("Schnell!")?;
    assert_eq!(tokens[0].category, WordCategory::Adverb);
    assert_eq!(tokens[0].text, "Schnell");

    Ok(())
}

/// Test that malformed lexicon lines are skipped
#[test]
fn test_lexicon_tagger_withBadLines_shouldSkipThem() {
    let tagger = LexiconTagger::parse("# comment\n\nnur-ein-feld\nHund\tHund\tNOUN\tMasc\n");
    assert_eq!(tagger.len(), 1);
}

/// Test loading a lexicon that does not exist
#[test]
fn test_lexicon_tagger_from_file_withMissingFile_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let result = LexiconTagger::from_file(temp_dir.path().join("missing.tsv"));
    assert!(matches!(result, Err(TaggerError::Lexicon { .. })));
    Ok(())
}

/// Test building the configured tagger
#[test]
fn test_create_tagger_withLexiconConfig_shouldLoadLexicon() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "lexicon.tsv", common::SAMPLE_LEXICON)?;

    let config = TaggerConfig {
        kind: TaggerKind::Lexicon,
        lexicon_path: Some(path),
        ..TaggerConfig::default()
    };
    let mut tagger = create_tagger(&config)?;
    assert_eq!(tagger.tag("alt")?[0].category, WordCategory::Adjective);

    let missing = TaggerConfig {
        kind: TaggerKind::Lexicon,
        lexicon_path: None,
        ..TaggerConfig::default()
    };
    assert!(create_tagger(&missing).is_err());

    Ok(())
}

/// Test starting a command that does not exist
#[test]
fn test_command_tagger_withMissingProgram_shouldFailToStart() {
    let mut tagger = CommandTagger::new("srtvocab-no-such-program-12345", Vec::new());

    match tagger.prepare() {
        Err(TaggerError::SpawnFailed { command, message }) => {
            assert_eq!(command, "srtvocab-no-such-program-12345");
            assert!(message.contains("de_core_news_lg"));
            assert!(message.contains("scripts/srtvocab-tagger.py"));
        }
        other => panic!("expected SpawnFailed, got {:?}", other),
    }
}

/// Test the JSON-lines round trip against a shell stand-in for the model
#[cfg(unix)]
#[test]
fn test_command_tagger_withShellResponder_shouldTagEachSentence() -> Result<()> {
    let script = r#"while IFS= read -r line; do echo '[{"text":"ging","lemma":"gehen","pos":"VERB","idx":3}]'; done"#;
    let mut tagger = CommandTagger::new("sh", vec!["-c".to_string(), script.to_string()]);
    tagger.prepare()?;

    for _ in 0..2 {
        let tokens = tagger.tag("Er ging nach Hause.")?;
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].lemma, "gehen");
        assert_eq!(tokens[0].category, WordCategory::Verb);
        assert_eq!(tokens[0].offset, Some(3));
    }

    Ok(())
}

/// Test a process that exits without answering
#[cfg(unix)]
#[test]
fn test_command_tagger_withExitingProcess_shouldReportProcessExited() {
    let mut tagger = CommandTagger::new("sh", vec!["-c".to_string(), "exit 0".to_string()]);
    let result = tagger.tag("Hallo");
    assert!(matches!(result, Err(TaggerError::ProcessExited)));
}

/// Test a model process that dies while loading is fatal at start-up
#[cfg(unix)]
#[test]
fn test_command_tagger_prepare_withProcessExitingAtStartup_shouldFailToStart() {
    let script = "exit 1";
    let mut tagger = CommandTagger::new("sh", vec!["-c".to_string(), script.to_string()]);

    match tagger.prepare() {
        Err(TaggerError::SpawnFailed { message, .. }) => {
            assert!(message.contains("python -m spacy download de_core_news_lg"));
        }
        other => panic!("expected SpawnFailed, got {:?}", other),
    }
}
