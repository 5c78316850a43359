/// Lexicon Linter — validates that a lexicon can drive title generation.
///
/// Usage: lexicon_linter <lexicon.ron>

use clap::Parser;
use howto_engine::core::clause::clause_frame_filter;
use howto_engine::core::query::MemoryLexicon;
use howto_engine::core::token::SynTags;
use howto_engine::schema::frame::Part;
use howto_engine::schema::selrestr::CategoryTable;
use howto_engine::schema::word::{Inflection, PartOfSpeech};
use std::collections::HashSet;
use std::path::PathBuf;
use std::process;

/// Restriction names read for plurality rather than compiled to a filter.
const PLURALITY_NAMES: [&str; 2] = ["plural", "group"];

#[derive(Parser)]
#[command(author, version, about = "Validate a RON lexicon for title generation")]
struct Cli {
    #[arg(value_name = "FILE")]
    lexicon: PathBuf,
}

fn main() {
    let cli = Cli::parse();

    let lexicon = match MemoryLexicon::load_from_ron(&cli.lexicon) {
        Ok(lexicon) => lexicon,
        Err(e) => {
            eprintln!("ERROR: Failed to load lexicon: {}", e);
            process::exit(1);
        }
    };

    println!("Loaded {} entries", lexicon.len());

    let (errors, warnings) = lint_lexicon(&lexicon, &CategoryTable::standard());

    println!("\n=== Lexicon Lint Report ===\n");

    if errors.is_empty() && warnings.is_empty() {
        println!("All checks passed!");
    }

    for warning in &warnings {
        println!("WARNING: {}", warning);
    }

    for error in &errors {
        println!("ERROR: {}", error);
    }

    println!(
        "\nSummary: {} errors, {} warnings",
        errors.len(),
        warnings.len()
    );

    if errors.is_empty() {
        process::exit(0);
    } else {
        process::exit(1);
    }
}

fn lint_lexicon(lexicon: &MemoryLexicon, categories: &CategoryTable) -> (Vec<String>, Vec<String>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    // Every title needs at least one entry of these kinds.
    for (pos, label) in [
        (PartOfSpeech::Noun, "noun"),
        (PartOfSpeech::Verb, "verb"),
        (PartOfSpeech::Adjective, "adjective"),
        (PartOfSpeech::Adverb, "adverb"),
    ] {
        if !lexicon.entries().iter().any(|w| w.part_of_speech == pos) {
            errors.push(format!("lexicon has no {label} entries"));
        }
    }

    let carried_groups: HashSet<&str> = lexicon
        .entries()
        .iter()
        .filter(|w| w.part_of_speech == PartOfSpeech::Preposition)
        .flat_map(|w| w.preposition_groups.iter().map(String::as_str))
        .collect();

    let clause_filter = clause_frame_filter(&SynTags::default());

    for word in lexicon.entries() {
        match word.part_of_speech {
            PartOfSpeech::Noun if word.tag_count == 0 && !word.proper => {
                warnings.push(format!("noun '{}' has tag_count 0 and is never chosen", word.text()));
            }
            PartOfSpeech::Verb => {
                let frames = lexicon.frames_for(word.id);
                if frames.is_empty() {
                    warnings.push(format!("verb '{}' has no frames", word.text()));
                } else if !frames.iter().any(|f| clause_filter.matches(f)) {
                    warnings.push(format!(
                        "verb '{}' has no frame usable as a clause (Agent, Verb, no adjp)",
                        word.text()
                    ));
                }

                for inflection in [Inflection::SForm, Inflection::IngForm, Inflection::PastParticiple] {
                    if !word.has_inflection(inflection) {
                        warnings.push(format!(
                            "verb '{}' lacks a {:?} form",
                            word.text(),
                            inflection
                        ));
                    }
                }

                for (index, frame) in frames.iter().enumerate() {
                    lint_frame(
                        word.text(),
                        index,
                        &frame.parts,
                        &carried_groups,
                        categories,
                        &mut errors,
                        &mut warnings,
                    );
                }
            }
            _ => {}
        }
    }

    (errors, warnings)
}

fn lint_frame(
    verb: &str,
    index: usize,
    parts: &[Part],
    carried_groups: &HashSet<&str>,
    categories: &CategoryTable,
    errors: &mut Vec<String>,
    warnings: &mut Vec<String>,
) {
    for part in parts {
        match part {
            Part::NounPhrase { role, selrestr, .. } => {
                for name in selrestr.names() {
                    if !categories.contains(name) && !PLURALITY_NAMES.contains(&name) {
                        warnings.push(format!(
                            "verb '{verb}' frame {index}: {role} restriction '{name}' is not a known category"
                        ));
                    }
                }
            }
            Part::Preposition {
                choices,
                literal: true,
            } if choices.is_empty() => {
                errors.push(format!("verb '{verb}' frame {index}: literal preposition has no choices"));
            }
            Part::Preposition {
                choices,
                literal: false,
            } => {
                if !choices.iter().any(|g| carried_groups.contains(g.as_str())) {
                    errors.push(format!(
                        "verb '{verb}' frame {index}: no preposition carries any of {:?}",
                        choices
                    ));
                }
            }
            _ => {}
        }
    }
}
