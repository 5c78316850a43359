use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::selrestr::SelRestr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PartType {
    NounPhrase,
    Verb,
    Preposition,
    Adjective,
    Adverb,
    Literal,
    Invalid,
}

/// Syntactic sub-restrictions a frame may place on a noun-phrase slot.
///
/// Names follow the VerbNet tag vocabulary; tags this engine does not
/// interpret deserialize to `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NounSynrestr {
    Genitive,
    Plural,
    Definite,
    Quotation,
    Adjp,
    BeScIng,
    AcIng,
    ScIng,
    NpOmitIng,
    OcIng,
    PossIng,
    Possing,
    PosIng,
    AdvLoc,
    Refl,
    ScToInf,
    AcToInf,
    VcToInf,
    RsToInf,
    OcToInf,
    OcBareInf,
    WhComp,
    ThatComp,
    WhatExtract,
    HowExtract,
    WhInf,
    WhatInf,
    WhethInf,
    AccIng,
    #[serde(other)]
    Other,
}

/// One argument slot of a verb frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Part {
    NounPhrase {
        role: String,
        #[serde(default)]
        selrestr: SelRestr,
        #[serde(default)]
        synrestrs: FxHashSet<NounSynrestr>,
    },
    Verb,
    /// Either a fixed set of literal prepositions, or a set of semantic
    /// preposition groups to query.
    Preposition {
        choices: Vec<String>,
        #[serde(default)]
        literal: bool,
    },
    Adjective,
    Adverb,
    Literal(String),
    Invalid,
}

impl Part {
    pub fn noun_phrase(role: &str, selrestr: SelRestr, synrestrs: &[NounSynrestr]) -> Self {
        Self::NounPhrase {
            role: role.to_string(),
            selrestr,
            synrestrs: synrestrs.iter().copied().collect(),
        }
    }

    pub fn literal_preposition(choices: &[&str]) -> Self {
        Self::Preposition {
            choices: choices.iter().map(|c| c.to_string()).collect(),
            literal: true,
        }
    }

    pub fn preposition_groups(groups: &[&str]) -> Self {
        Self::Preposition {
            choices: groups.iter().map(|g| g.to_string()).collect(),
            literal: false,
        }
    }

    pub fn part_type(&self) -> PartType {
        match self {
            Self::NounPhrase { .. } => PartType::NounPhrase,
            Self::Verb => PartType::Verb,
            Self::Preposition { .. } => PartType::Preposition,
            Self::Adjective => PartType::Adjective,
            Self::Adverb => PartType::Adverb,
            Self::Literal(_) => PartType::Literal,
            Self::Invalid => PartType::Invalid,
        }
    }

    /// Thematic role; only noun-phrase slots carry one.
    pub fn role(&self) -> Option<&str> {
        match self {
            Self::NounPhrase { role, .. } => Some(role.as_str()),
            _ => None,
        }
    }

    pub fn has_synrestr(&self, synrestr: NounSynrestr) -> bool {
        match self {
            Self::NounPhrase { synrestrs, .. } => synrestrs.contains(&synrestr),
            _ => false,
        }
    }

    /// Text this slot contributes without any lexicon lookup.
    pub fn fixed_text(&self) -> &str {
        match self {
            Self::Literal(text) => text,
            Self::Preposition {
                choices,
                literal: true,
            } => choices.first().map_or("", String::as_str),
            _ => "",
        }
    }
}

/// A subcategorization frame: the ordered argument slots a verb sense
/// accepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerbFrame {
    pub parts: Vec<Part>,
}

impl VerbFrame {
    pub fn new(parts: Vec<Part>) -> Self {
        Self { parts }
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn part(&self, index: usize) -> Option<&Part> {
        self.parts.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn part_accessors() {
        let np = Part::noun_phrase("Agent", SelRestr::Empty, &[NounSynrestr::Plural]);
        assert_eq!(np.part_type(), PartType::NounPhrase);
        assert_eq!(np.role(), Some("Agent"));
        assert!(np.has_synrestr(NounSynrestr::Plural));
        assert!(!np.has_synrestr(NounSynrestr::Genitive));

        assert_eq!(Part::Verb.role(), None);
        assert!(!Part::Verb.has_synrestr(NounSynrestr::Plural));
    }

    #[test]
    fn fixed_text_for_literal_slots() {
        assert_eq!(Part::Literal("up".to_string()).fixed_text(), "up");
        assert_eq!(Part::literal_preposition(&["with", "using"]).fixed_text(), "with");
        assert_eq!(Part::preposition_groups(&["path"]).fixed_text(), "");
        assert_eq!(Part::Verb.fixed_text(), "");
    }

    #[test]
    fn unknown_synrestr_deserializes_to_other() {
        let tags: Vec<NounSynrestr> = ron::from_str("[be_sc_ing, np_ppart, wheth_inf]").unwrap();
        assert_eq!(
            tags,
            vec![NounSynrestr::BeScIng, NounSynrestr::Other, NounSynrestr::WhethInf]
        );
    }

    #[test]
    fn frame_from_ron() {
        let frame: VerbFrame = ron::from_str(
            r#"(parts: [
                NounPhrase(role: "Agent", selrestr: Singleton(name: "animate", positive: true)),
                Verb,
                Preposition(choices: ["with"], literal: true),
                NounPhrase(role: "Instrument", synrestrs: [plural]),
            ])"#,
        )
        .unwrap();
        assert_eq!(frame.len(), 4);
        assert_eq!(frame.part(1), Some(&Part::Verb));
        assert!(frame.part(3).unwrap().has_synrestr(NounSynrestr::Plural));
        assert!(frame.part(4).is_none());
    }
}
