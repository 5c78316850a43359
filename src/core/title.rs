/// Title compiler — seeds a template, drives expansion to completion, and
/// rejects titles that trip the content filter. Also hosts the
/// `TitleGenerator` entry point and its builder.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::core::composer::{Composer, GenerationError};
use crate::core::config::{ConfigError, GeneratorConfig};
use crate::core::query::{Lexicon, LexiconError, MemoryLexicon};
use crate::core::token::{syn_tags, Casing, SynTag, Token};
use crate::schema::selrestr::CategoryTable;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("lexicon error: {0}")]
    Lexicon(#[from] LexiconError),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("no lexicon provided; use `with_lexicon` or `lexicon_path`")]
    MissingLexicon,
}

/// Draw the shape of a title: an optional "not", then either "be" plus an
/// adjective phrase or a bare infinitive (possibly "get" plus a past
/// participle), then an optional "without"/"while" adjunct.
///
/// The whole template is wrapped in title casing.
pub fn seed_template<R: Rng + ?Sized>(rng: &mut R) -> Token {
    let mut form = Token::utterance();

    if rng.gen_bool(1.0 / 6.0) {
        form.push("not");
    }

    if rng.gen_bool(1.0 / 6.0) {
        form.push("be");
        form.push(Token::fillin(&[SynTag::AdjectivePhrase]));
    } else {
        let mut tags = syn_tags(&[SynTag::InfinitivePhrase, SynTag::Bare, SynTag::Subjectless]);
        if rng.gen_bool(1.0 / 6.0) {
            form.push("get");
            tags.insert(SynTag::Experiencer);
            tags.insert(SynTag::PastParticiple);
        }
        form.push(tags);
    }

    if rng.gen_bool(1.0 / 5.0) {
        form.push(if rng.gen_bool(1.0 / 4.0) { "without" } else { "while" });
        form.push(Token::fillin(&[SynTag::ParticiplePhrase, SynTag::Subjectless]));
    }

    Token::capitalize(Casing::TitleCase, form)
}

impl<L: Lexicon + ?Sized> Composer<'_, L> {
    /// Generate one title-cased title.
    ///
    /// A title containing a banned word is thrown away whole and a fresh
    /// template is drawn, up to `max_title_attempts` times.
    pub fn compose_title<R: Rng>(&self, rng: &mut R) -> Result<String, GenerationError> {
        for attempt in 1..=self.config.max_title_attempts {
            let mut tree = seed_template(rng);
            self.expand(&mut tree, rng)?;
            let title = tree.compile();
            match self.config.banned_word_in(&title) {
                Some(word) => debug!(attempt, word, "content filter rejected title"),
                None => return Ok(title),
            }
        }
        Err(GenerationError::TitleRejected {
            attempts: self.config.max_title_attempts,
        })
    }
}

/// The top-level title generator. Built via `TitleGenerator::builder()`.
pub struct TitleGenerator {
    lexicon: Box<dyn Lexicon>,
    config: GeneratorConfig,
    categories: CategoryTable,
    seed: u64,
    generation_count: u64,
}

/// Builder for constructing a `TitleGenerator`.
pub struct TitleGeneratorBuilder {
    lexicon_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
    seed: u64,
    /// Directly provided lexicon (for testing without files).
    lexicon: Option<Box<dyn Lexicon>>,
    /// Directly provided config (for testing without files).
    config: Option<GeneratorConfig>,
    categories: Option<CategoryTable>,
}

impl TitleGenerator {
    pub fn builder() -> TitleGeneratorBuilder {
        TitleGeneratorBuilder {
            lexicon_path: None,
            config_path: None,
            seed: 0,
            lexicon: None,
            config: None,
            categories: None,
        }
    }

    pub fn composer(&self) -> Composer<'_, dyn Lexicon> {
        Composer::new(self.lexicon.as_ref(), &self.config, &self.categories)
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate the next title. Each call derives a fresh random source
    /// from the seed and the number of titles generated so far.
    pub fn generate(&mut self) -> Result<String, GenerationError> {
        let mut rng = StdRng::seed_from_u64(self.seed.wrapping_add(self.generation_count));
        self.generation_count += 1;
        self.generate_with(&mut rng)
    }

    /// Generate a title from a caller-owned random source.
    pub fn generate_with<R: Rng>(&self, rng: &mut R) -> Result<String, GenerationError> {
        self.composer().compose_title(rng)
    }

    /// The next title behind the configured prefix, e.g. "How to Eat Soup".
    pub fn generate_with_prefix(&mut self) -> Result<String, GenerationError> {
        let title = self.generate()?;
        Ok(format!("{} {}", self.config.prefix, title))
    }

    /// Rewind so the next call repeats the first title for this seed.
    pub fn reset(&mut self) {
        self.generation_count = 0;
    }
}

impl TitleGeneratorBuilder {
    pub fn lexicon_path(mut self, path: impl AsRef<Path>) -> Self {
        self.lexicon_path = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn config_path(mut self, path: impl AsRef<Path>) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Provide a lexicon directly. Takes precedence over `lexicon_path`.
    pub fn with_lexicon(mut self, lexicon: impl Lexicon + 'static) -> Self {
        self.lexicon = Some(Box::new(lexicon));
        self
    }

    /// Provide a config directly. Takes precedence over `config_path`.
    pub fn with_config(mut self, config: GeneratorConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn with_categories(mut self, categories: CategoryTable) -> Self {
        self.categories = Some(categories);
        self
    }

    pub fn build(self) -> Result<TitleGenerator, BuildError> {
        let lexicon = match (self.lexicon, self.lexicon_path) {
            (Some(lexicon), _) => lexicon,
            (None, Some(path)) => Box::new(MemoryLexicon::load_from_ron(&path)?),
            (None, None) => return Err(BuildError::MissingLexicon),
        };

        let config = match (self.config, self.config_path) {
            (Some(config), _) => config,
            (None, Some(path)) => GeneratorConfig::load_from_ron(&path)?,
            (None, None) => GeneratorConfig::default(),
        };

        Ok(TitleGenerator {
            lexicon,
            config,
            categories: self.categories.unwrap_or_default(),
            seed: self.seed,
            generation_count: 0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::frame::{Part, VerbFrame};
    use crate::schema::selrestr::SelRestr;
    use crate::schema::word::{Inflection, PartOfSpeech, Word, WordId};

    fn lexicon() -> MemoryLexicon {
        let mut lexicon = MemoryLexicon::new();
        for word in [
            Word::new(1, PartOfSpeech::Verb, "knit")
                .with_tag_count(300)
                .with_inflection(Inflection::SForm, "knits")
                .with_inflection(Inflection::IngForm, "knitting")
                .with_inflection(Inflection::PastParticiple, "knitted"),
            Word::new(2, PartOfSpeech::Noun, "scarf")
                .with_inflection(Inflection::Plural, "scarves"),
            Word::new(3, PartOfSpeech::Adjective, "warm").with_tag_count(300),
            Word::new(4, PartOfSpeech::Adverb, "slowly").with_tag_count(3000),
        ] {
            lexicon.insert_word(word).unwrap();
        }
        for frame in [
            VerbFrame::new(vec![Part::noun_phrase("Agent", SelRestr::Empty, &[]), Part::Verb]),
            VerbFrame::new(vec![
                Part::noun_phrase("Agent", SelRestr::Empty, &[]),
                Part::Verb,
                Part::noun_phrase("Patient", SelRestr::Empty, &[]),
            ]),
        ] {
            lexicon.insert_frame(WordId(1), frame).unwrap();
        }
        lexicon
    }

    #[test]
    fn seed_template_is_title_cased_and_incomplete() {
        let mut rng = StdRng::seed_from_u64(4);
        for _ in 0..50 {
            let template = seed_template(&mut rng);
            assert!(!template.is_complete());
            assert!(matches!(
                template,
                Token::Transform { rule: crate::core::token::Transform::Capitalize(Casing::TitleCase), .. }
            ));
        }
    }

    #[test]
    fn builder_requires_a_lexicon() {
        assert!(matches!(
            TitleGenerator::builder().build(),
            Err(BuildError::MissingLexicon)
        ));
    }

    #[test]
    fn builder_reports_missing_config_file() {
        let result = TitleGenerator::builder()
            .with_lexicon(lexicon())
            .config_path("does/not/exist.ron")
            .build();
        assert!(matches!(result, Err(BuildError::Config(ConfigError::Io(_)))));
    }

    #[test]
    fn generate_produces_title_cased_text() {
        let mut generator = TitleGenerator::builder()
            .with_lexicon(lexicon())
            .seed(42)
            .build()
            .unwrap();
        for _ in 0..30 {
            let title = generator.generate().unwrap();
            assert!(!title.is_empty());
            for word in title.split(' ') {
                let first = word.trim_start_matches('"').chars().next().unwrap();
                assert!(first.is_uppercase(), "{title}");
            }
        }
    }

    #[test]
    fn reset_repeats_the_sequence() {
        let mut generator = TitleGenerator::builder()
            .with_lexicon(lexicon())
            .seed(9)
            .build()
            .unwrap();
        let first: Vec<String> = (0..5).map(|_| generator.generate().unwrap()).collect();
        generator.reset();
        let second: Vec<String> = (0..5).map(|_| generator.generate().unwrap()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn prefix_is_prepended() {
        let mut generator = TitleGenerator::builder()
            .with_lexicon(lexicon())
            .build()
            .unwrap();
        let caption = generator.generate_with_prefix().unwrap();
        assert!(caption.starts_with("How to "), "{caption}");
    }
}
