/// Generation context shared by the noun, clause, and expansion
/// generators, plus the error type they all report through.

use rand::Rng;
use thiserror::Error;
use tracing::debug;

use crate::core::chance::geometric;
use crate::core::config::GeneratorConfig;
use crate::core::query::{Filter, Lexicon, LexiconError};
use crate::schema::selrestr::CategoryTable;
use crate::schema::word::{PartOfSpeech, Word};

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("lexicon error: {0}")]
    Lexicon(#[from] LexiconError),
    #[error("no {what} satisfies the query")]
    NoCandidate { what: &'static str },
    #[error("no verb found after {attempts} frequency draws")]
    VerbExhausted { attempts: u32 },
    #[error("every title was rejected by the content filter after {attempts} attempts")]
    TitleRejected { attempts: u32 },
}

/// Borrowed view over a lexicon and the settings that shape every query.
///
/// The random source is never stored; each operation takes it explicitly so
/// callers decide how it is shared.
pub struct Composer<'a, L: Lexicon + ?Sized> {
    pub(crate) lexicon: &'a L,
    pub(crate) config: &'a GeneratorConfig,
    pub(crate) categories: &'a CategoryTable,
    safety: Filter,
}

impl<'a, L: Lexicon + ?Sized> Composer<'a, L> {
    pub fn new(lexicon: &'a L, config: &'a GeneratorConfig, categories: &'a CategoryTable) -> Self {
        Self {
            lexicon,
            config,
            categories,
            safety: config.safety_filter(),
        }
    }

    /// `filter` with the configured exclusions ANDed in.
    pub(crate) fn safe(&self, filter: Filter) -> Filter {
        self.safety.clone().and(filter)
    }

    /// First entry matching `condition` and a tag-count floor drawn from
    /// geometric(`p`). An empty result redraws the floor, at most
    /// `max_verb_attempts` times.
    pub(crate) fn floored_word<R: Rng>(
        &self,
        condition: &Filter,
        p: f64,
        rng: &mut R,
    ) -> Option<Word> {
        for attempt in 1..=self.config.max_verb_attempts {
            let floor = geometric(rng, p);
            let filter = self.safe(condition.clone().and(Filter::TagCountAtLeast(floor)));
            if let Some(word) = self.lexicon.first_word(&filter, &mut *rng) {
                return Some(word);
            }
            debug!(floor, attempt, "frequency floor admitted nothing, redrawing");
        }
        None
    }

    pub fn generate_adjective<R: Rng>(&self, rng: &mut R) -> Result<Word, GenerationError> {
        self.floored_word(
            &Filter::PartOfSpeech(PartOfSpeech::Adjective),
            self.config.adjective_frequency_p,
            rng,
        )
        .ok_or(GenerationError::NoCandidate { what: "adjective" })
    }

    pub fn generate_adverb<R: Rng>(&self, rng: &mut R) -> Result<Word, GenerationError> {
        self.floored_word(
            &Filter::PartOfSpeech(PartOfSpeech::Adverb),
            self.config.adverb_frequency_p,
            rng,
        )
        .ok_or(GenerationError::NoCandidate { what: "adverb" })
    }
}
