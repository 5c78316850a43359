/// Noun and noun-phrase generators.

use rand::Rng;
use tracing::debug;

use crate::core::composer::{Composer, GenerationError};
use crate::core::query::{Filter, Lexicon};
use crate::core::selection::compile_filter;
use crate::core::token::Token;
use crate::schema::selrestr::SelRestr;
use crate::schema::word::{CategoryId, Inflection, PartOfSpeech, Word};

const ATTRIBUTE: CategoryId = CategoryId(100024264);
const TOOL: CategoryId = CategoryId(104451818);
const CAUSAL_AGENT: CategoryId = CategoryId(100007347);

/// Category used for a slot whose restriction constrains nothing.
fn role_default(role: &str) -> Filter {
    match role {
        "Attribute" => Filter::InCategory(ATTRIBUTE),
        "Instrument" => Filter::InCategory(TOOL),
        "Agent" => Filter::InCategory(CAUSAL_AGENT),
        _ => Filter::All,
    }
}

impl<L: Lexicon + ?Sized> Composer<'_, L> {
    /// Pick a common, non-proper noun for `role` that satisfies `restr`.
    ///
    /// When nothing matches, the query is repeated once with the selection
    /// dropped. The relaxed query has no random component, so a second
    /// empty result is reported instead of retried.
    pub fn generate_noun<R: Rng>(
        &self,
        role: &str,
        restr: &SelRestr,
        rng: &mut R,
    ) -> Result<Word, GenerationError> {
        let base = self.safe(
            Filter::PartOfSpeech(PartOfSpeech::Noun)
                .and(Filter::Proper(false))
                .and(Filter::TagCountAtLeast(1)),
        );

        let mut selection = compile_filter(restr, self.categories);
        if selection.is_unconstrained() {
            selection = role_default(role);
        }

        if let Some(noun) = self
            .lexicon
            .first_word(&base.clone().and(selection), &mut *rng)
        {
            return Ok(noun);
        }

        debug!(role, "selection admitted no noun, relaxing");
        self.lexicon
            .first_word(&base, &mut *rng)
            .ok_or(GenerationError::NoCandidate { what: "noun" })
    }

    /// Wrap `noun` with a determiner and an optional adjective.
    ///
    /// Renders `[determiner?, modifier?, head]`. When the indefinite
    /// article applies it is chosen from whichever word is pronounced first.
    pub fn generate_noun_phrase<R: Rng>(
        &self,
        noun: Word,
        role: &str,
        plural: bool,
        definite: bool,
        rng: &mut R,
    ) -> Result<Token, GenerationError> {
        let mut plural = plural;

        let modifier = if rng.gen_bool(1.0 / 8.0) {
            Some(self.generate_adjective(rng)?)
        } else {
            None
        };

        let mut determiner = None;
        let mut indefinite = false;
        if rng.gen_bool(1.0 / 3.0) && definite {
            determiner = Some("the");
            if rng.gen_bool(0.5) {
                plural = true;
            }
        } else if role != "Theme" && role != "Attribute" && rng.gen_bool(0.5) {
            determiner = Some("your");
        } else if !plural {
            indefinite = true;
        }

        let mut phrase = Token::utterance();
        if let Some(adjective) = modifier {
            phrase.push(adjective);
        }
        if plural && noun.has_inflection(Inflection::Plural) {
            phrase.push(Token::inflected(noun, Inflection::Plural));
        } else {
            phrase.push(noun);
        }

        if indefinite {
            return Ok(Token::indefinite_article(phrase));
        }

        let mut utterance = Token::utterance();
        if let Some(determiner) = determiner {
            utterance.push(determiner);
        }
        utterance.push(phrase);
        Ok(utterance)
    }
}
