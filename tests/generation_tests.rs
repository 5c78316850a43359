/// Generation integration tests — titles end to end, with scripted and
/// seeded random sources.

use howto_engine::core::composer::{Composer, GenerationError};
use howto_engine::core::config::GeneratorConfig;
use howto_engine::core::expand::FALLBACK_LITERAL;
use howto_engine::core::query::MemoryLexicon;
use howto_engine::core::title::TitleGenerator;
use howto_engine::core::token::{syn_tags, Casing, SynTag, Token};
use howto_engine::schema::frame::{Part, VerbFrame};
use howto_engine::schema::selrestr::{CategoryTable, SelRestr};
use howto_engine::schema::word::{Inflection, PartOfSpeech, Word, WordId};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::collections::VecDeque;
use std::path::Path;

/// Random source that replays queued 64-bit draws, then returns the
/// maximum value forever. A maximal draw makes every `gen_bool` false and
/// every geometric draw zero; a zero draw makes any `gen_bool` true. 32-bit
/// draws are always zero, so uniform ranges settle on their low end.
struct ScriptedRng {
    queue: VecDeque<u64>,
}

impl ScriptedRng {
    fn all_false() -> Self {
        Self::with(&[])
    }

    fn with(draws: &[u64]) -> Self {
        Self {
            queue: draws.iter().copied().collect(),
        }
    }
}

impl RngCore for ScriptedRng {
    fn next_u32(&mut self) -> u32 {
        0
    }

    fn next_u64(&mut self) -> u64 {
        self.queue.pop_front().unwrap_or(u64::MAX)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        dest.fill(0);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

const TRUE: u64 = 0;

/// One verb "run" with frame [Agent NP, Verb] and one noun "dog".
fn run_dog_lexicon() -> MemoryLexicon {
    let mut lexicon = MemoryLexicon::new();
    lexicon
        .insert_word(
            Word::new(1, PartOfSpeech::Verb, "run")
                .with_tag_count(100)
                .with_inflection(Inflection::SForm, "runs")
                .with_inflection(Inflection::IngForm, "running")
                .with_inflection(Inflection::PastParticiple, "run"),
        )
        .unwrap();
    lexicon
        .insert_word(
            Word::new(2, PartOfSpeech::Noun, "dog")
                .with_inflection(Inflection::Plural, "dogs")
                .with_vowel_onset(false),
        )
        .unwrap();
    lexicon
        .insert_frame(
            WordId(1),
            VerbFrame::new(vec![
                Part::noun_phrase("Agent", SelRestr::Empty, &[]),
                Part::Verb,
            ]),
        )
        .unwrap();
    lexicon
}

fn sample_lexicon() -> MemoryLexicon {
    MemoryLexicon::load_from_ron(Path::new("lexicon_data/sample.ron")).unwrap()
}

fn assert_title_cased(title: &str) {
    for word in title.split(' ') {
        if let Some(first) = word.chars().find(|c| c.is_alphabetic()) {
            assert!(first.is_uppercase(), "'{word}' in '{title}'");
        }
    }
}

#[test]
fn all_false_title_is_bare_verb() {
    let generator = TitleGenerator::builder()
        .with_lexicon(run_dog_lexicon())
        .build()
        .unwrap();
    let mut rng = ScriptedRng::all_false();
    assert_eq!(generator.generate_with(&mut rng).unwrap(), "Run");
}

#[test]
fn negation_flip_leads_the_title() {
    let generator = TitleGenerator::builder()
        .with_lexicon(run_dog_lexicon())
        .build()
        .unwrap();
    let mut rng = ScriptedRng::with(&[TRUE]);
    assert_eq!(generator.generate_with(&mut rng).unwrap(), "Not Run");
}

#[test]
fn progressive_clause_renders_subject_and_s_form() {
    let lexicon = run_dog_lexicon();
    let config = GeneratorConfig::default();
    let categories = CategoryTable::standard();
    let composer = Composer::new(&lexicon, &config, &categories);
    let mut rng = ScriptedRng::all_false();

    let clause = composer
        .generate_clause(&syn_tags(&[SynTag::Progressive]), &mut rng)
        .unwrap();
    let title = Token::capitalize(Casing::TitleCase, clause).compile();
    assert_eq!(title, "A Dog Runs");
}

#[test]
fn negated_bare_infinitive_clause_keeps_base_form() {
    let lexicon = run_dog_lexicon();
    let config = GeneratorConfig::default();
    let categories = CategoryTable::standard();
    let composer = Composer::new(&lexicon, &config, &categories);
    let mut rng = ScriptedRng::all_false();

    let mut tree = Token::utterance();
    tree.push("not");
    tree.push(
        composer
            .generate_clause(
                &syn_tags(&[SynTag::InfinitivePhrase, SynTag::Bare]),
                &mut rng,
            )
            .unwrap(),
    );
    let title = Token::capitalize(Casing::TitleCase, tree).compile();
    assert_eq!(title, "Not A Dog Run");
}

#[test]
fn indefinite_article_follows_recorded_onset() {
    let mut lexicon = MemoryLexicon::new();
    lexicon
        .insert_word(Word::new(1, PartOfSpeech::Noun, "hour").with_vowel_onset(true))
        .unwrap();
    lexicon
        .insert_word(Word::new(2, PartOfSpeech::Noun, "unicorn").with_vowel_onset(false))
        .unwrap();
    lexicon
        .insert_word(
            Word::new(3, PartOfSpeech::Adjective, "honest")
                .with_tag_count(10)
                .with_vowel_onset(true),
        )
        .unwrap();
    let config = GeneratorConfig::default();
    let categories = CategoryTable::standard();
    let composer = Composer::new(&lexicon, &config, &categories);
    let hour = lexicon.get(WordId(1)).unwrap().clone();
    let unicorn = lexicon.get(WordId(2)).unwrap().clone();

    let phrase = composer
        .generate_noun_phrase(hour, "Theme", false, false, &mut ScriptedRng::all_false())
        .unwrap();
    assert_eq!(phrase.compile(), "an hour");

    let phrase = composer
        .generate_noun_phrase(unicorn.clone(), "Theme", false, false, &mut ScriptedRng::all_false())
        .unwrap();
    assert_eq!(phrase.compile(), "a unicorn");

    // The modifier flip fires, so the adjective's onset decides.
    let phrase = composer
        .generate_noun_phrase(unicorn, "Theme", false, false, &mut ScriptedRng::with(&[TRUE]))
        .unwrap();
    assert_eq!(phrase.compile(), "an honest unicorn");
}

#[test]
fn experiencer_clause_omits_direct_object() {
    let mut lexicon = MemoryLexicon::new();
    lexicon
        .insert_word(
            Word::new(1, PartOfSpeech::Verb, "tickle")
                .with_tag_count(100)
                .with_inflection(Inflection::SForm, "tickles")
                .with_inflection(Inflection::IngForm, "tickling")
                .with_inflection(Inflection::PastParticiple, "tickled"),
        )
        .unwrap();
    lexicon
        .insert_word(Word::new(2, PartOfSpeech::Noun, "plumber").with_hypernyms(&[100007846]))
        .unwrap();
    lexicon
        .insert_word(Word::new(3, PartOfSpeech::Noun, "cat").with_hypernyms(&[100015388]))
        .unwrap();
    lexicon
        .insert_word(Word::new(4, PartOfSpeech::Adjective, "tall").with_tag_count(500))
        .unwrap();
    lexicon
        .insert_frame(
            WordId(1),
            VerbFrame::new(vec![
                Part::noun_phrase("Agent", SelRestr::singleton("human", true), &[]),
                Part::Verb,
                Part::noun_phrase("Patient", SelRestr::singleton("animal", true), &[]),
            ]),
        )
        .unwrap();
    let config = GeneratorConfig::default();
    let categories = CategoryTable::standard();
    let composer = Composer::new(&lexicon, &config, &categories);

    for seed in 0..30 {
        let mut rng = StdRng::seed_from_u64(seed);
        let text = composer
            .generate_clause(&syn_tags(&[SynTag::Progressive, SynTag::Experiencer]), &mut rng)
            .unwrap()
            .compile();
        assert!(text.ends_with("plumber tickles") || text.ends_with("plumbers tickles"), "{text}");
        assert!(!text.contains("cat"), "{text}");
    }
}

#[test]
fn banned_verb_exhausts_title_attempts() {
    let config = GeneratorConfig {
        banned_words: vec!["run".to_string()],
        max_title_attempts: 5,
        ..GeneratorConfig::default()
    };
    let generator = TitleGenerator::builder()
        .with_lexicon(run_dog_lexicon())
        .with_config(config)
        .build()
        .unwrap();
    let mut rng = ScriptedRng::all_false();
    assert!(matches!(
        generator.generate_with(&mut rng),
        Err(GenerationError::TitleRejected { attempts: 5 })
    ));
}

#[test]
fn empty_lexicon_exhausts_verb_draws() {
    let generator = TitleGenerator::builder()
        .with_lexicon(MemoryLexicon::new())
        .build()
        .unwrap();
    let mut rng = ScriptedRng::all_false();
    assert!(matches!(
        generator.generate_with(&mut rng),
        Err(GenerationError::VerbExhausted { attempts: 64 })
    ));
}

#[test]
fn relaxed_noun_query_fills_unmatched_slot() {
    let mut lexicon = run_dog_lexicon();
    lexicon
        .insert_word(Word::new(3, PartOfSpeech::Adjective, "muddy").with_tag_count(500))
        .unwrap();
    lexicon
        .insert_frame(
            WordId(1),
            VerbFrame::new(vec![
                Part::noun_phrase("Agent", SelRestr::Empty, &[]),
                Part::Verb,
                Part::noun_phrase("Theme", SelRestr::singleton("vehicle", true), &[]),
                Part::Literal("home".to_string()),
            ]),
        )
        .unwrap();
    let config = GeneratorConfig::default();
    let categories = CategoryTable::standard();
    let composer = Composer::new(&lexicon, &config, &categories);

    let mut found = false;
    for seed in 0..20 {
        let mut rng = StdRng::seed_from_u64(seed);
        let text = composer
            .generate_clause(&syn_tags(&[SynTag::Subjectless]), &mut rng)
            .unwrap()
            .compile();
        if text.ends_with("home") {
            assert!(text.contains("dog"), "{text}");
            found = true;
        }
    }
    assert!(found);
}

#[test]
fn sample_lexicon_titles_are_clean_and_title_cased() {
    let mut generator = TitleGenerator::builder()
        .with_lexicon(sample_lexicon())
        .seed(2024)
        .build()
        .unwrap();
    let config = GeneratorConfig::default();

    for _ in 0..200 {
        let title = generator.generate().unwrap();
        assert!(!title.is_empty());
        assert!(!title.contains("  "));
        assert!(!title.to_lowercase().contains(FALLBACK_LITERAL), "{title}");
        assert_eq!(config.banned_word_in(&title), None);
        assert_title_cased(&title);
    }
}

#[test]
fn same_seed_same_titles() {
    let titles = |seed: u64| -> Vec<String> {
        let mut generator = TitleGenerator::builder()
            .with_lexicon(sample_lexicon())
            .seed(seed)
            .build()
            .unwrap();
        (0..20).map(|_| generator.generate().unwrap()).collect()
    };
    assert_eq!(titles(77), titles(77));
}

#[test]
fn caption_uses_configured_prefix() {
    let mut generator = TitleGenerator::builder()
        .lexicon_path("lexicon_data/sample.ron")
        .with_config(GeneratorConfig {
            prefix: "Learn to".to_string(),
            ..GeneratorConfig::default()
        })
        .seed(5)
        .build()
        .unwrap();
    let caption = generator.generate_with_prefix().unwrap();
    let title = caption.strip_prefix("Learn to ").unwrap();
    assert_title_cased(title);
}
