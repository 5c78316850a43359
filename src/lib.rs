//! How-to Engine — procedural "how to" title generation.
//!
//! Builds short, grammatically varied titles by expanding a randomly shaped
//! template against a lexical knowledge base: verbs are chosen by their
//! subcategorization frames, nouns by selectional restrictions over a
//! semantic taxonomy, and every placeholder is rewritten until the tree can
//! be rendered as text.
//!
//! ```no_run
//! use howto_engine::core::title::TitleGenerator;
//!
//! let mut generator = TitleGenerator::builder()
//!     .lexicon_path("lexicon_data/sample.ron")
//!     .seed(7)
//!     .build()?;
//! println!("{}", generator.generate_with_prefix()?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod core;
pub mod schema;
