/// Knowledge-base query capability — declarative filters, the `Lexicon`
/// trait, and an in-memory lexicon loaded from RON.

use rand::seq::SliceRandom;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

use crate::schema::frame::{NounSynrestr, Part, PartType, VerbFrame};
use crate::schema::word::{CategoryId, Inflection, PartOfSpeech, Word, WordId};

#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("duplicate word id: {0:?}")]
    DuplicateWord(WordId),
    #[error("frame attached to unknown verb: {0:?}")]
    UnknownVerb(WordId),
    #[error("frame attached to non-verb entry: {0:?}")]
    NotAVerb(WordId),
}

/// A condition over lexical entries.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// No constraint.
    All,
    PartOfSpeech(PartOfSpeech),
    Proper(bool),
    TagCountAtLeast(u32),
    HasInflection(Inflection),
    /// Membership in the hypernym closure of a taxonomy node.
    InCategory(CategoryId),
    UsageDomain(CategoryId),
    PrepositionGroup(String),
    /// Base text equality.
    Text(String),
    /// The entry has at least one frame satisfying the inner condition.
    HasFrame(FrameFilter),
    And(Vec<Filter>),
    Or(Vec<Filter>),
    Not(Box<Filter>),
}

impl Filter {
    pub fn is_unconstrained(&self) -> bool {
        matches!(self, Self::All)
    }

    /// Conjunction; `All` is absorbed and nested conjunctions are flattened.
    pub fn and(self, other: Filter) -> Filter {
        match (self, other) {
            (Self::All, f) | (f, Self::All) => f,
            (Self::And(mut left), Self::And(right)) => {
                left.extend(right);
                Self::And(left)
            }
            (Self::And(mut left), f) => {
                left.push(f);
                Self::And(left)
            }
            (f, Self::And(mut right)) => {
                right.insert(0, f);
                Self::And(right)
            }
            (left, right) => Self::And(vec![left, right]),
        }
    }

    /// Disjunction; nested disjunctions are flattened.
    pub fn or(self, other: Filter) -> Filter {
        match (self, other) {
            (Self::All, _) | (_, Self::All) => Self::All,
            (Self::Or(mut left), Self::Or(right)) => {
                left.extend(right);
                Self::Or(left)
            }
            (Self::Or(mut left), f) => {
                left.push(f);
                Self::Or(left)
            }
            (left, right) => Self::Or(vec![left, right]),
        }
    }

    pub fn negate(self) -> Filter {
        match self {
            Self::Not(inner) => *inner,
            f => Self::Not(Box::new(f)),
        }
    }

    /// Evaluate against one entry. `frames` are the entry's verb frames.
    pub fn matches(&self, word: &Word, frames: &[VerbFrame]) -> bool {
        match self {
            Self::All => true,
            Self::PartOfSpeech(pos) => word.part_of_speech == *pos,
            Self::Proper(proper) => word.proper == *proper,
            Self::TagCountAtLeast(min) => word.tag_count >= *min,
            Self::HasInflection(inflection) => word.has_inflection(*inflection),
            Self::InCategory(category) => word.is_a(*category),
            Self::UsageDomain(domain) => word.in_usage_domain(*domain),
            Self::PrepositionGroup(group) => word.preposition_groups.iter().any(|g| g == group),
            Self::Text(text) => word.text() == text,
            Self::HasFrame(condition) => frames.iter().any(|f| condition.matches(f)),
            Self::And(filters) => filters.iter().all(|f| f.matches(word, frames)),
            Self::Or(filters) => filters.iter().any(|f| f.matches(word, frames)),
            Self::Not(inner) => !inner.matches(word, frames),
        }
    }
}

/// A condition over verb frames.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameFilter {
    LengthAtLeast(usize),
    /// The part at this position exists and satisfies the condition.
    PartAt(usize, PartFilter),
    AnyPart(PartFilter),
    And(Vec<FrameFilter>),
    Not(Box<FrameFilter>),
}

impl FrameFilter {
    pub fn and(self, other: FrameFilter) -> FrameFilter {
        match self {
            Self::And(mut filters) => {
                filters.push(other);
                Self::And(filters)
            }
            f => Self::And(vec![f, other]),
        }
    }

    pub fn negate(self) -> FrameFilter {
        Self::Not(Box::new(self))
    }

    pub fn matches(&self, frame: &VerbFrame) -> bool {
        match self {
            Self::LengthAtLeast(min) => frame.len() >= *min,
            Self::PartAt(index, condition) => {
                frame.part(*index).map_or(false, |p| condition.matches(p))
            }
            Self::AnyPart(condition) => frame.parts.iter().any(|p| condition.matches(p)),
            Self::And(filters) => filters.iter().all(|f| f.matches(frame)),
            Self::Not(inner) => !inner.matches(frame),
        }
    }
}

/// A condition over a single frame part.
#[derive(Debug, Clone, PartialEq)]
pub enum PartFilter {
    Type(PartType),
    Role(String),
    HasSynrestr(NounSynrestr),
    And(Vec<PartFilter>),
    Or(Vec<PartFilter>),
    Not(Box<PartFilter>),
}

impl PartFilter {
    pub fn role(role: &str) -> Self {
        Self::Role(role.to_string())
    }

    pub fn and(self, other: PartFilter) -> PartFilter {
        match self {
            Self::And(mut filters) => {
                filters.push(other);
                Self::And(filters)
            }
            f => Self::And(vec![f, other]),
        }
    }

    pub fn or(self, other: PartFilter) -> PartFilter {
        match self {
            Self::Or(mut filters) => {
                filters.push(other);
                Self::Or(filters)
            }
            f => Self::Or(vec![f, other]),
        }
    }

    pub fn negate(self) -> PartFilter {
        Self::Not(Box::new(self))
    }

    pub fn matches(&self, part: &Part) -> bool {
        match self {
            Self::Type(part_type) => part.part_type() == *part_type,
            Self::Role(role) => part.role() == Some(role.as_str()),
            Self::HasSynrestr(synrestr) => part.has_synrestr(*synrestr),
            Self::And(filters) => filters.iter().all(|f| f.matches(part)),
            Self::Or(filters) => filters.iter().any(|f| f.matches(part)),
            Self::Not(inner) => !inner.matches(part),
        }
    }
}

/// Read-only access to a lexical knowledge base.
pub trait Lexicon {
    /// Every entry satisfying `filter`, in shuffled order.
    fn words(&self, filter: &Filter, rng: &mut dyn RngCore) -> Vec<Word>;

    /// Frames of `verb` satisfying `filter`, in shuffled order.
    fn frames(&self, verb: &Word, filter: &FrameFilter, rng: &mut dyn RngCore) -> Vec<VerbFrame>;

    fn first_word(&self, filter: &Filter, rng: &mut dyn RngCore) -> Option<Word> {
        self.words(filter, rng).into_iter().next()
    }
}

// On-disk shape of a lexicon file; frames are listed per verb id.

#[derive(Debug, Serialize, Deserialize)]
struct RonLexicon {
    words: Vec<Word>,
    #[serde(default)]
    frames: Vec<RonVerbFrames>,
}

#[derive(Debug, Serialize, Deserialize)]
struct RonVerbFrames {
    verb: WordId,
    frames: Vec<VerbFrame>,
}

/// A lexicon held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryLexicon {
    words: Vec<Word>,
    frames: HashMap<WordId, Vec<VerbFrame>>,
}

impl MemoryLexicon {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a lexicon from a RON file.
    pub fn load_from_ron(path: &Path) -> Result<MemoryLexicon, LexiconError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    /// Parse a lexicon from a RON string.
    pub fn parse_ron(input: &str) -> Result<MemoryLexicon, LexiconError> {
        let raw: RonLexicon = ron::from_str(input)?;
        let mut lexicon = MemoryLexicon::new();
        for word in raw.words {
            lexicon.insert_word(word)?;
        }
        for entry in raw.frames {
            for frame in entry.frames {
                lexicon.insert_frame(entry.verb, frame)?;
            }
        }
        Ok(lexicon)
    }

    pub fn insert_word(&mut self, word: Word) -> Result<(), LexiconError> {
        if self.get(word.id).is_some() {
            return Err(LexiconError::DuplicateWord(word.id));
        }
        self.words.push(word);
        Ok(())
    }

    pub fn insert_frame(&mut self, verb: WordId, frame: VerbFrame) -> Result<(), LexiconError> {
        let entry = self.get(verb).ok_or(LexiconError::UnknownVerb(verb))?;
        if entry.part_of_speech != PartOfSpeech::Verb {
            return Err(LexiconError::NotAVerb(verb));
        }
        self.frames.entry(verb).or_default().push(frame);
        Ok(())
    }

    pub fn get(&self, id: WordId) -> Option<&Word> {
        self.words.iter().find(|w| w.id == id)
    }

    pub fn entries(&self) -> &[Word] {
        &self.words
    }

    pub fn frames_for(&self, verb: WordId) -> &[VerbFrame] {
        self.frames.get(&verb).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Lexicon for MemoryLexicon {
    fn words(&self, filter: &Filter, rng: &mut dyn RngCore) -> Vec<Word> {
        let mut found: Vec<Word> = self
            .words
            .iter()
            .filter(|w| filter.matches(w, self.frames_for(w.id)))
            .cloned()
            .collect();
        found.shuffle(rng);
        found
    }

    fn frames(&self, verb: &Word, filter: &FrameFilter, rng: &mut dyn RngCore) -> Vec<VerbFrame> {
        let mut found: Vec<VerbFrame> = self
            .frames_for(verb.id)
            .iter()
            .filter(|f| filter.matches(f))
            .cloned()
            .collect();
        found.shuffle(rng);
        found
    }
}
