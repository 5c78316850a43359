/// Expansion driver — resolves the leftmost outstanding placeholder of a
/// token tree, one rewrite per call.

use rand::Rng;
use tracing::warn;

use crate::core::composer::{Composer, GenerationError};
use crate::core::query::{Filter, Lexicon};
use crate::core::token::{SynTag, SynTags, Token};
use crate::schema::word::{Inflection, PartOfSpeech};

/// Substituted for a placeholder no rule knows how to resolve.
pub const FALLBACK_LITERAL: &str = "*the reality of the situation*";

impl<L: Lexicon + ?Sized> Composer<'_, L> {
    /// Apply one rewrite step to `token`.
    ///
    /// Utterances descend into their first incomplete child only, so
    /// placeholders are resolved left to right. Terminal tokens are left
    /// untouched.
    pub fn expand_step<R: Rng>(&self, token: &mut Token, rng: &mut R) -> Result<(), GenerationError> {
        match token {
            Token::Utterance(children) => {
                if let Some(child) = children.iter_mut().find(|c| !c.is_complete()) {
                    self.expand_step(child, rng)?;
                }
            }
            Token::Transform { inner, .. } => self.expand_step(inner, rng)?,
            Token::Fillin(tags) => {
                let resolved = self.resolve_fillin(tags, rng)?;
                *token = resolved;
            }
            Token::Word { .. } | Token::Literal(_) | Token::Part(_) => {}
        }
        Ok(())
    }

    /// Expand until no placeholder remains.
    pub fn expand<R: Rng>(&self, token: &mut Token, rng: &mut R) -> Result<(), GenerationError> {
        while !token.is_complete() {
            self.expand_step(token, rng)?;
        }
        Ok(())
    }

    fn resolve_fillin<R: Rng>(&self, tags: &SynTags, rng: &mut R) -> Result<Token, GenerationError> {
        if tags.contains(&SynTag::InfinitivePhrase) {
            self.generate_clause(tags, rng)
        } else if tags.contains(&SynTag::AdjectivePhrase) {
            let mut phrase = Token::utterance();
            if rng.gen_bool(1.0 / 6.0) {
                phrase.push(Token::fillin(&[SynTag::AdverbPhrase]));
            }
            if rng.gen_bool(1.0 / 4.0) {
                phrase.push(Token::fillin(&[SynTag::ParticiplePhrase, SynTag::Subjectless]));
            } else {
                phrase.push(self.generate_adjective(rng)?);
            }
            Ok(phrase)
        } else if tags.contains(&SynTag::AdverbPhrase) {
            Ok(Token::from(self.generate_adverb(rng)?))
        } else if tags.contains(&SynTag::ParticiplePhrase) {
            if rng.gen_bool(0.5) {
                let filter = self.safe(
                    Filter::PartOfSpeech(PartOfSpeech::Verb)
                        .and(Filter::HasInflection(Inflection::IngForm)),
                );
                let verb = self
                    .lexicon
                    .first_word(&filter, &mut *rng)
                    .ok_or(GenerationError::NoCandidate { what: "ing-form verb" })?;
                Ok(Token::inflected(verb, Inflection::IngForm))
            } else {
                self.generate_clause(tags, rng)
            }
        } else if tags.contains(&SynTag::PastParticiple) {
            self.generate_clause(tags, rng)
        } else {
            warn!(?tags, "no rule resolves placeholder, substituting fallback");
            Ok(Token::from(FALLBACK_LITERAL))
        }
    }
}
