/// Token model — the tagged tree a title is built in.
///
/// A tree starts as a seed template full of `Fillin` placeholders and is
/// rewritten in place until no placeholder remains, then compiled to text.

use rustc_hash::FxHashSet;

use crate::schema::frame::Part;
use crate::schema::word::{spelled_with_vowel_onset, Inflection, Word};

/// Syntactic restriction tags carried by placeholders and clause requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SynTag {
    InfinitivePhrase,
    Bare,
    Subjectless,
    ParticiplePhrase,
    PastParticiple,
    Progressive,
    Experiencer,
    AdjectivePhrase,
    AdverbPhrase,
}

pub type SynTags = FxHashSet<SynTag>;

/// Build a tag set from a fixed list.
pub fn syn_tags(tags: &[SynTag]) -> SynTags {
    tags.iter().copied().collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Casing {
    /// Upper-case the first character of the whole text.
    Capitalize,
    /// Upper-case the first letter of every word.
    TitleCase,
    AllCaps,
}

/// A rendering rule applied to one inner token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transform {
    Quote { open: String, close: String },
    Capitalize(Casing),
    /// Appends the possessive clitic `'s`.
    Possessive,
    /// Prefixes "a" or "an" depending on the onset of the first
    /// pronounced word.
    IndefiniteArticle,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Utterance(Vec<Token>),
    Fillin(SynTags),
    Word { word: Word, inflection: Inflection },
    Literal(String),
    Part(Part),
    Transform { rule: Transform, inner: Box<Token> },
}

impl Default for Token {
    fn default() -> Self {
        Self::Utterance(Vec::new())
    }
}

impl From<&str> for Token {
    fn from(text: &str) -> Self {
        Self::Literal(text.to_string())
    }
}

impl From<String> for Token {
    fn from(text: String) -> Self {
        Self::Literal(text)
    }
}

impl From<Word> for Token {
    fn from(word: Word) -> Self {
        Self::Word {
            word,
            inflection: Inflection::Base,
        }
    }
}

impl From<SynTags> for Token {
    fn from(tags: SynTags) -> Self {
        Self::Fillin(tags)
    }
}

impl Token {
    pub fn utterance() -> Self {
        Self::default()
    }

    pub fn fillin(tags: &[SynTag]) -> Self {
        Self::Fillin(syn_tags(tags))
    }

    pub fn inflected(word: Word, inflection: Inflection) -> Self {
        Self::Word { word, inflection }
    }

    pub fn quote(inner: impl Into<Token>) -> Self {
        Self::transform(
            Transform::Quote {
                open: "\"".to_string(),
                close: "\"".to_string(),
            },
            inner,
        )
    }

    pub fn capitalize(casing: Casing, inner: impl Into<Token>) -> Self {
        Self::transform(Transform::Capitalize(casing), inner)
    }

    pub fn possessive(inner: impl Into<Token>) -> Self {
        Self::transform(Transform::Possessive, inner)
    }

    pub fn indefinite_article(inner: impl Into<Token>) -> Self {
        Self::transform(Transform::IndefiniteArticle, inner)
    }

    fn transform(rule: Transform, inner: impl Into<Token>) -> Self {
        Self::Transform {
            rule,
            inner: Box::new(inner.into()),
        }
    }

    /// Append a child. A non-utterance token is first wrapped into an
    /// utterance holding it.
    pub fn push(&mut self, token: impl Into<Token>) {
        if !matches!(self, Self::Utterance(_)) {
            let previous = std::mem::take(self);
            *self = Self::Utterance(vec![previous]);
        }
        if let Self::Utterance(children) = self {
            children.push(token.into());
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Utterance(children) if children.is_empty())
    }

    /// True when this is a placeholder carrying `tag`.
    pub fn has_tag(&self, tag: SynTag) -> bool {
        matches!(self, Self::Fillin(tags) if tags.contains(&tag))
    }

    /// A tree is complete once no `Fillin` remains anywhere in it.
    pub fn is_complete(&self) -> bool {
        match self {
            Self::Utterance(children) => children.iter().all(Token::is_complete),
            Self::Fillin(_) => false,
            Self::Word { .. } | Self::Literal(_) | Self::Part(_) => true,
            Self::Transform { inner, .. } => inner.is_complete(),
        }
    }

    /// Render the tree to text. Placeholders render as nothing.
    pub fn compile(&self) -> String {
        match self {
            Self::Utterance(children) => children
                .iter()
                .map(Token::compile)
                .filter(|text| !text.is_empty())
                .collect::<Vec<_>>()
                .join(" "),
            Self::Fillin(_) => String::new(),
            Self::Word { word, inflection } => word.form(*inflection).text.clone(),
            Self::Literal(text) => text.clone(),
            Self::Part(part) => part.fixed_text().to_string(),
            Self::Transform { rule, inner } => {
                let text = inner.compile();
                match rule {
                    Transform::Quote { open, close } => format!("{open}{text}{close}"),
                    Transform::Capitalize(casing) => apply_casing(*casing, &text),
                    Transform::Possessive => format!("{text}'s"),
                    Transform::IndefiniteArticle => {
                        if text.is_empty() {
                            return text;
                        }
                        let article = if inner.leading_vowel_sound().unwrap_or(false) {
                            "an"
                        } else {
                            "a"
                        };
                        format!("{article} {text}")
                    }
                }
            }
        }
    }

    /// Onset of the first pronounced word, if any word renders at all.
    fn leading_vowel_sound(&self) -> Option<bool> {
        match self {
            Self::Utterance(children) => children.iter().find_map(Token::leading_vowel_sound),
            Self::Fillin(_) => None,
            Self::Word { word, inflection } => {
                Some(word.form(*inflection).starts_with_vowel_sound())
            }
            Self::Literal(text) => non_blank_onset(text),
            Self::Part(part) => non_blank_onset(part.fixed_text()),
            Self::Transform { rule, inner } => match rule {
                Transform::IndefiniteArticle => {
                    inner.leading_vowel_sound().map(|_| true)
                }
                _ => inner.leading_vowel_sound(),
            },
        }
    }
}

fn non_blank_onset(text: &str) -> Option<bool> {
    if text.trim().is_empty() {
        None
    } else {
        Some(spelled_with_vowel_onset(text))
    }
}

fn apply_casing(casing: Casing, text: &str) -> String {
    match casing {
        Casing::Capitalize => capitalize_first(text),
        Casing::TitleCase => title_case(text),
        Casing::AllCaps => text.to_uppercase(),
    }
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Upper-case the first letter of every whitespace-separated word, skipping
/// any leading punctuation (`"eaten` becomes `"Eaten`). Words without a
/// letter are left as they are. Words are rejoined with single spaces.
pub fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| match word.char_indices().find(|(_, c)| c.is_alphabetic()) {
            Some((at, _)) => format!("{}{}", &word[..at], capitalize_first(&word[at..])),
            None => word.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
