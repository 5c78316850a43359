/// Generator configuration — content filters, retry caps, and frequency
/// parameters, loadable from RON.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::core::query::Filter;
use crate::schema::word::CategoryId;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("invalid probability for {name}: {value}")]
    Probability { name: &'static str, value: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Titles containing any of these (letters only, lower-cased) are
    /// discarded and regenerated.
    pub banned_words: Vec<String>,
    /// Entries used in any of these domains are never selected.
    pub banned_usage_domains: Vec<CategoryId>,
    /// Entries with any of these base texts are never selected.
    pub banned_texts: Vec<String>,
    /// Frequency-floor redraws before a verb or modifier lookup gives up.
    pub max_verb_attempts: u32,
    /// Content-filter regenerations before `generate` gives up.
    pub max_title_attempts: u32,
    pub verb_frequency_p: f64,
    pub adjective_frequency_p: f64,
    pub adverb_frequency_p: f64,
    /// Caption lead-in used by `generate_with_prefix`.
    pub prefix: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            banned_words: vec!["raped".to_string(), "negro".to_string()],
            banned_usage_domains: vec![CategoryId(106718862)],
            banned_texts: vec!["raped".to_string(), "Negro".to_string()],
            max_verb_attempts: 64,
            max_title_attempts: 256,
            verb_frequency_p: 0.07,
            adjective_frequency_p: 0.2,
            adverb_frequency_p: 1.0 / 23.0,
            prefix: "How to".to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Load a configuration from a RON file. Missing fields take defaults.
    pub fn load_from_ron(path: &Path) -> Result<GeneratorConfig, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    pub fn parse_ron(input: &str) -> Result<GeneratorConfig, ConfigError> {
        let config: GeneratorConfig = ron::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let params = [
            ("verb_frequency_p", self.verb_frequency_p),
            ("adjective_frequency_p", self.adjective_frequency_p),
            ("adverb_frequency_p", self.adverb_frequency_p),
        ];
        for (name, value) in params {
            if !(value > 0.0 && value <= 1.0) {
                return Err(ConfigError::Probability { name, value });
            }
        }
        Ok(())
    }

    /// Exclusions ANDed into every word query.
    pub fn safety_filter(&self) -> Filter {
        let mut filter = Filter::All;
        for text in &self.banned_texts {
            filter = filter.and(Filter::Text(text.clone()).negate());
        }
        for domain in &self.banned_usage_domains {
            filter = filter.and(Filter::UsageDomain(*domain).negate());
        }
        filter
    }

    /// The first word of `text` that hits the banned-word set, compared
    /// after stripping non-letters and lower-casing.
    pub fn banned_word_in<'t>(&self, text: &'t str) -> Option<&'t str> {
        text.split_whitespace().find(|word| {
            let normalized: String = word
                .chars()
                .filter(|c| c.is_alphabetic())
                .flat_map(char::to_lowercase)
                .collect();
            self.banned_words
                .iter()
                .any(|banned| banned.to_lowercase() == normalized)
        })
    }
}
