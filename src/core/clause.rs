/// Clause generator — picks a verb and one of its frames, then renders
/// every remaining argument slot, recursing for embedded clauses.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::core::composer::{Composer, GenerationError};
use crate::core::query::{Filter, FrameFilter, Lexicon, PartFilter};
use crate::core::selection::requires_category;
use crate::core::token::SynTag as S;
use crate::core::token::{syn_tags, SynTag, SynTags, Token};
use crate::schema::frame::NounSynrestr as N;
use crate::schema::frame::{NounSynrestr, Part, PartType};
use crate::schema::selrestr::SelRestr;
use crate::schema::word::{Inflection, PartOfSpeech, Word};

const GERUNDS: [NounSynrestr; 5] = [N::BeScIng, N::AcIng, N::ScIng, N::NpOmitIng, N::OcIng];
const POSSESSIVE_GERUNDS: [NounSynrestr; 3] = [N::PossIng, N::Possing, N::PosIng];
const TO_INFINITIVES: [NounSynrestr; 5] =
    [N::ScToInf, N::AcToInf, N::VcToInf, N::RsToInf, N::OcToInf];

/// Wh-complements: lead words, then an embedded clause with these tags.
const WH_COMPLEMENTS: [(NounSynrestr, &[&str], &[SynTag]); 7] = [
    (N::WhComp, &["whether"], &[S::Progressive]),
    (N::ThatComp, &["that", "they"], &[S::Subjectless]),
    (N::WhatExtract, &["what"], &[S::Progressive, S::Experiencer]),
    (N::HowExtract, &["how"], &[S::Progressive]),
    (N::WhInf, &["how"], &[S::InfinitivePhrase, S::Subjectless]),
    (
        N::WhatInf,
        &["what"],
        &[S::InfinitivePhrase, S::Subjectless, S::Experiencer],
    ),
    (N::WhethInf, &["whether"], &[S::InfinitivePhrase, S::Subjectless]),
];

/// Frames usable as a clause: an Agent subject, then the verb, and no
/// adjectival complement anywhere.
pub fn clause_frame_filter(tags: &SynTags) -> FrameFilter {
    let mut filter = FrameFilter::LengthAtLeast(2)
        .and(FrameFilter::PartAt(
            0,
            PartFilter::Type(PartType::NounPhrase).and(PartFilter::role("Agent")),
        ))
        .and(FrameFilter::PartAt(1, PartFilter::Type(PartType::Verb)))
        .and(FrameFilter::AnyPart(PartFilter::HasSynrestr(N::Adjp)).negate());

    if tags.contains(&S::Experiencer) {
        filter = filter.and(FrameFilter::PartAt(
            2,
            PartFilter::Type(PartType::NounPhrase)
                .and(PartFilter::HasSynrestr(N::Genitive).negate())
                .and(PartFilter::role("Patient").or(PartFilter::role("Experiencer"))),
        ));
    }
    filter
}

/// Inflection the clause's verb must have available, if any.
fn required_inflection(tags: &SynTags) -> Option<Inflection> {
    if tags.contains(&S::ParticiplePhrase) {
        Some(Inflection::IngForm)
    } else if tags.contains(&S::Progressive) {
        Some(Inflection::SForm)
    } else if tags.contains(&S::PastParticiple) {
        Some(Inflection::PastParticiple)
    } else {
        None
    }
}

impl<L: Lexicon + ?Sized> Composer<'_, L> {
    /// Render a clause shaped by `tags`.
    ///
    /// The result may still hold placeholders for embedded phrases.
    pub fn generate_clause<R: Rng>(
        &self,
        tags: &SynTags,
        rng: &mut R,
    ) -> Result<Token, GenerationError> {
        let frame_filter = clause_frame_filter(tags);
        let mut verb_condition = Filter::PartOfSpeech(PartOfSpeech::Verb)
            .and(Filter::HasFrame(frame_filter.clone()));
        if let Some(inflection) = required_inflection(tags) {
            verb_condition = verb_condition.and(Filter::HasInflection(inflection));
        }

        let verb = self
            .floored_word(&verb_condition, self.config.verb_frequency_p, rng)
            .ok_or(GenerationError::VerbExhausted {
                attempts: self.config.max_verb_attempts,
            })?;
        let frame = self
            .lexicon
            .frames(&verb, &frame_filter, &mut *rng)
            .into_iter()
            .next()
            .ok_or(GenerationError::NoCandidate { what: "verb frame" })?;
        debug!(verb = %verb.text(), parts = frame.len(), "chose verb frame");

        let mut parts = frame.parts;
        if tags.contains(&S::Experiencer) && parts.len() > 2 {
            parts.remove(2);
        }
        if tags.contains(&S::Subjectless) && !parts.is_empty() {
            parts.remove(0);
        }

        let mut utterance = Token::utterance();
        for part in &parts {
            self.render_part(part, &verb, tags, &mut utterance, rng)?;
        }

        if parts.len() == 1 && rng.gen_bool(1.0 / 4.0) {
            utterance.push(Token::fillin(&[S::AdverbPhrase]));
        }
        Ok(utterance)
    }

    fn render_part<R: Rng>(
        &self,
        part: &Part,
        verb: &Word,
        tags: &SynTags,
        out: &mut Token,
        rng: &mut R,
    ) -> Result<(), GenerationError> {
        match part {
            Part::NounPhrase { role, selrestr, .. } => {
                debug!(role = %role, "rendering noun phrase slot");
                self.render_noun_slot(part, role, selrestr, out, rng)?;
            }
            Part::Verb => {
                let inflection = if tags.contains(&S::Progressive) {
                    Inflection::SForm
                } else if tags.contains(&S::PastParticiple) {
                    Inflection::PastParticiple
                } else if tags.contains(&S::InfinitivePhrase) {
                    if !tags.contains(&S::Bare) {
                        out.push("to");
                    }
                    Inflection::Base
                } else if tags.contains(&S::ParticiplePhrase) {
                    Inflection::IngForm
                } else {
                    Inflection::Base
                };
                out.push(Token::inflected(verb.clone(), inflection));
            }
            Part::Preposition {
                choices,
                literal: true,
            } => {
                let choice = choices
                    .choose(rng)
                    .ok_or(GenerationError::NoCandidate { what: "preposition" })?;
                out.push(choice.as_str());
            }
            Part::Preposition { choices, .. } => {
                let groups = choices
                    .iter()
                    .map(|group| Filter::PrepositionGroup(group.clone()))
                    .reduce(Filter::or)
                    .unwrap_or(Filter::All);
                let filter = self.safe(groups.and(Filter::PartOfSpeech(PartOfSpeech::Preposition)));
                let preposition = self
                    .lexicon
                    .first_word(&filter, &mut *rng)
                    .ok_or(GenerationError::NoCandidate { what: "preposition" })?;
                out.push(preposition);
            }
            Part::Adjective => out.push(Token::fillin(&[S::AdjectivePhrase])),
            Part::Adverb => out.push(Token::fillin(&[S::AdverbPhrase])),
            Part::Literal(text) => out.push(text.as_str()),
            Part::Invalid => {}
        }
        Ok(())
    }

    fn render_noun_slot<R: Rng>(
        &self,
        part: &Part,
        role: &str,
        selrestr: &SelRestr,
        out: &mut Token,
        rng: &mut R,
    ) -> Result<(), GenerationError> {
        let has = |tag: NounSynrestr| part.has_synrestr(tag);
        let has_any = |tags: &[NounSynrestr]| tags.iter().any(|t| part.has_synrestr(*t));

        if requires_category("currency", selrestr) {
            let lead: u32 = rng.gen_range(1..=9);
            let zeros: usize = rng.gen_range(0..=6);
            out.push(format!("${lead}{}", "0".repeat(zeros)));
        } else if has(N::Adjp) {
            out.push(Token::fillin(&[S::AdjectivePhrase]));
        } else if has_any(&GERUNDS) {
            out.push(Token::fillin(&[S::ParticiplePhrase, S::Subjectless]));
        } else if has_any(&POSSESSIVE_GERUNDS) {
            out.push("your");
            out.push(Token::fillin(&[S::ParticiplePhrase, S::Subjectless]));
        } else if has(N::Genitive) && selrestr.is_empty() {
            out.push("your");
        } else if has(N::AdvLoc) {
            out.push(if rng.gen_bool(0.5) { "here" } else { "there" });
        } else if has(N::Refl) {
            out.push("yourself");
        } else if has_any(&TO_INFINITIVES) {
            out.push(Token::fillin(&[S::InfinitivePhrase, S::Subjectless]));
        } else if has(N::OcBareInf) {
            out.push(Token::fillin(&[S::InfinitivePhrase, S::Bare, S::Subjectless]));
        } else if let Some((_, lead, embedded)) =
            WH_COMPLEMENTS.iter().find(|(tag, _, _)| has(*tag))
        {
            for word in lead.iter() {
                out.push(*word);
            }
            out.push(self.generate_clause(&syn_tags(embedded), rng)?);
        } else if has(N::Quotation) {
            out.push(Token::quote(Token::fillin(&[S::PastParticiple])));
        } else {
            if has(N::Genitive) {
                let owner = self.generate_noun("Passive", &SelRestr::singleton("animate", true), rng)?;
                let owner = self.generate_noun_phrase(owner, "Passive", false, true, rng)?;
                out.push(Token::possessive(owner));
            }

            let noun = self.generate_noun(role, selrestr, rng)?;
            let plural = has(N::Plural)
                || requires_category("plural", selrestr)
                || requires_category("group", selrestr);
            out.push(self.generate_noun_phrase(noun, role, plural, has(N::Definite), rng)?);

            if has(N::AccIng) || has(N::AcIng) {
                out.push(Token::fillin(&[S::ParticiplePhrase, S::Subjectless]));
            }
        }
        Ok(())
    }
}
