//! WASM bindings for howto-engine — powers the interactive web demo.

use wasm_bindgen::prelude::*;

use howto_engine::core::config::GeneratorConfig;
use howto_engine::core::query::MemoryLexicon;
use howto_engine::core::title::TitleGenerator;
use howto_engine::schema::word::PartOfSpeech;

// ---------------------------------------------------------------------------
// Embedded lexicon — compiled into the WASM binary
// ---------------------------------------------------------------------------
mod data {
    pub const SAMPLE_LEXICON: &str = include_str!("../../lexicon_data/sample.ron");
}

// ---------------------------------------------------------------------------
// JSON helper types for communication across the WASM boundary
// ---------------------------------------------------------------------------
#[derive(serde::Serialize)]
struct LexiconInfo {
    entries: usize,
    nouns: usize,
    verbs: usize,
    adjectives: usize,
    adverbs: usize,
    prepositions: usize,
}

fn lexicon_info(lexicon: &MemoryLexicon) -> LexiconInfo {
    let count = |pos: PartOfSpeech| {
        lexicon
            .entries()
            .iter()
            .filter(|w| w.part_of_speech == pos)
            .count()
    };
    LexiconInfo {
        entries: lexicon.len(),
        nouns: count(PartOfSpeech::Noun),
        verbs: count(PartOfSpeech::Verb),
        adjectives: count(PartOfSpeech::Adjective),
        adverbs: count(PartOfSpeech::Adverb),
        prepositions: count(PartOfSpeech::Preposition),
    }
}

// ---------------------------------------------------------------------------
// TitleDemo — the main exported struct
// ---------------------------------------------------------------------------
#[wasm_bindgen]
pub struct TitleDemo {
    generator: TitleGenerator,
    info: LexiconInfo,
    config_src: Option<String>,
}

#[wasm_bindgen]
impl TitleDemo {
    /// Create a new demo instance over the embedded lexicon.
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u64) -> Result<TitleDemo, JsError> {
        Self::build(seed, None)
    }

    /// Create a demo instance with a generator config given as RON text.
    pub fn with_config(seed: u64, config_ron: &str) -> Result<TitleDemo, JsError> {
        Self::build(seed, Some(config_ron.to_string()))
    }

    /// Generate one title, e.g. "Not Cook A Hungry Goose".
    pub fn generate(&mut self) -> Result<String, JsError> {
        self.generator
            .generate()
            .map_err(|e| JsError::new(&format!("Generation error: {e}")))
    }

    /// Generate one caption with the configured prefix, e.g. "How to Fix Your Bicycle".
    pub fn caption(&mut self) -> Result<String, JsError> {
        self.generator
            .generate_with_prefix()
            .map_err(|e| JsError::new(&format!("Generation error: {e}")))
    }

    /// Generate several titles. Returns a JSON array of strings.
    pub fn generate_batch(&mut self, count: usize) -> Result<String, JsError> {
        let mut titles = Vec::with_capacity(count);
        for _ in 0..count {
            titles.push(self.generate()?);
        }
        serde_json::to_string(&titles)
            .map_err(|e| JsError::new(&format!("Serialization error: {e}")))
    }

    /// Return a JSON summary of the embedded lexicon.
    pub fn lexicon_info(&self) -> Result<String, JsError> {
        serde_json::to_string(&self.info)
            .map_err(|e| JsError::new(&format!("Serialization error: {e}")))
    }

    /// Reset the generator with a new seed (same lexicon and config).
    pub fn reset(&mut self, seed: u64) -> Result<(), JsError> {
        let new_demo = TitleDemo::build(seed, self.config_src.clone())?;
        self.generator = new_demo.generator;
        Ok(())
    }
}

// Private helpers
impl TitleDemo {
    fn build(seed: u64, config_src: Option<String>) -> Result<TitleDemo, JsError> {
        let lexicon = MemoryLexicon::parse_ron(data::SAMPLE_LEXICON)
            .map_err(|e| JsError::new(&format!("Lexicon parse error: {e}")))?;
        let info = lexicon_info(&lexicon);

        let config = match config_src.as_deref() {
            Some(src) => GeneratorConfig::parse_ron(src)
                .map_err(|e| JsError::new(&format!("Config parse error: {e}")))?,
            None => GeneratorConfig::default(),
        };

        let generator = TitleGenerator::builder()
            .seed(seed)
            .with_lexicon(lexicon)
            .with_config(config)
            .build()
            .map_err(|e| JsError::new(&format!("Generator build error: {e}")))?;

        Ok(TitleDemo {
            generator,
            info,
            config_src,
        })
    }
}
