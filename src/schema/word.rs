use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Newtype wrapper for lexical entry IDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WordId(pub u64);

/// Newtype wrapper for taxonomy node IDs (WordNet-style offsets).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PartOfSpeech {
    Noun,
    Verb,
    Adjective,
    Adverb,
    Preposition,
}

/// Inflected forms a lexical entry may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Inflection {
    Base,
    Plural,
    Comparative,
    Superlative,
    PastTense,
    PastParticiple,
    IngForm,
    SForm,
}

/// A surface form together with its recorded pronunciation onset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Form {
    pub text: String,
    /// Whether the first pronounced sound is a vowel. `None` falls back
    /// to a spelling check.
    #[serde(default)]
    pub vowel_onset: Option<bool>,
}

impl Form {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            vowel_onset: None,
        }
    }

    pub fn starts_with_vowel_sound(&self) -> bool {
        self.vowel_onset
            .unwrap_or_else(|| spelled_with_vowel_onset(&self.text))
    }
}

/// Spelling-based onset guess, used when no pronunciation is recorded.
pub fn spelled_with_vowel_onset(text: &str) -> bool {
    text.chars()
        .find(|c| c.is_alphanumeric())
        .map_or(false, |c| {
            matches!(c.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u' | '8')
        })
}

/// A lexical entry from the knowledge base.
///
/// `hypernyms` holds the full hypernym closure of the entry's notion,
/// including the notion itself, so category membership is a set lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Word {
    pub id: WordId,
    pub part_of_speech: PartOfSpeech,
    pub base: Form,
    #[serde(default)]
    pub inflections: HashMap<Inflection, Form>,
    #[serde(default)]
    pub tag_count: u32,
    #[serde(default)]
    pub proper: bool,
    #[serde(default)]
    pub hypernyms: FxHashSet<CategoryId>,
    #[serde(default)]
    pub usage_domains: FxHashSet<CategoryId>,
    #[serde(default)]
    pub preposition_groups: Vec<String>,
}

impl Word {
    pub fn new(id: u64, part_of_speech: PartOfSpeech, base: impl Into<String>) -> Self {
        Self {
            id: WordId(id),
            part_of_speech,
            base: Form::new(base),
            inflections: HashMap::new(),
            tag_count: 1,
            proper: false,
            hypernyms: FxHashSet::default(),
            usage_domains: FxHashSet::default(),
            preposition_groups: Vec::new(),
        }
    }

    pub fn with_inflection(mut self, inflection: Inflection, text: impl Into<String>) -> Self {
        self.inflections.insert(inflection, Form::new(text));
        self
    }

    pub fn with_tag_count(mut self, tag_count: u32) -> Self {
        self.tag_count = tag_count;
        self
    }

    pub fn with_vowel_onset(mut self, vowel_onset: bool) -> Self {
        self.base.vowel_onset = Some(vowel_onset);
        self
    }

    pub fn with_hypernyms(mut self, hypernyms: &[u64]) -> Self {
        self.hypernyms
            .extend(hypernyms.iter().map(|id| CategoryId(*id)));
        self
    }

    pub fn with_preposition_groups(mut self, groups: &[&str]) -> Self {
        self.preposition_groups
            .extend(groups.iter().map(|g| g.to_string()));
        self
    }

    pub fn text(&self) -> &str {
        &self.base.text
    }

    /// The base form is always available.
    pub fn has_inflection(&self, inflection: Inflection) -> bool {
        inflection == Inflection::Base || self.inflections.contains_key(&inflection)
    }

    /// The requested form, or the base form if this entry lacks it.
    pub fn form(&self, inflection: Inflection) -> &Form {
        if inflection == Inflection::Base {
            return &self.base;
        }
        self.inflections.get(&inflection).unwrap_or(&self.base)
    }

    pub fn is_a(&self, category: CategoryId) -> bool {
        self.hypernyms.contains(&category)
    }

    pub fn in_usage_domain(&self, domain: CategoryId) -> bool {
        self.usage_domains.contains(&domain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_dog() -> Word {
        Word::new(1, PartOfSpeech::Noun, "dog")
            .with_inflection(Inflection::Plural, "dogs")
            .with_hypernyms(&[100015388, 100004258])
            .with_tag_count(40)
    }

    #[test]
    fn word_creation() {
        let dog = make_dog();
        assert_eq!(dog.text(), "dog");
        assert_eq!(dog.id, WordId(1));
        assert_eq!(dog.tag_count, 40);
        assert!(!dog.proper);
    }

    #[test]
    fn inflection_lookup_falls_back_to_base() {
        let dog = make_dog();
        assert!(dog.has_inflection(Inflection::Base));
        assert!(dog.has_inflection(Inflection::Plural));
        assert!(!dog.has_inflection(Inflection::IngForm));
        assert_eq!(dog.form(Inflection::Plural).text, "dogs");
        assert_eq!(dog.form(Inflection::IngForm).text, "dog");
    }

    #[test]
    fn category_membership() {
        let dog = make_dog();
        assert!(dog.is_a(CategoryId(100015388)));
        assert!(!dog.is_a(CategoryId(100007846)));
        assert!(!dog.in_usage_domain(CategoryId(106718862)));
    }

    #[test]
    fn recorded_onset_overrides_spelling() {
        let hour = Word::new(2, PartOfSpeech::Noun, "hour").with_vowel_onset(true);
        let unicorn = Word::new(3, PartOfSpeech::Noun, "unicorn").with_vowel_onset(false);
        assert!(hour.base.starts_with_vowel_sound());
        assert!(!unicorn.base.starts_with_vowel_sound());
        assert!(Form::new("apple").starts_with_vowel_sound());
        assert!(!Form::new("pear").starts_with_vowel_sound());
    }

    #[test]
    fn spelling_onset_skips_punctuation() {
        assert!(spelled_with_vowel_onset("\"eaten"));
        assert!(!spelled_with_vowel_onset("*the"));
        assert!(!spelled_with_vowel_onset(""));
    }
}
