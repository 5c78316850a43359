/// Preview — prints generated titles for a lexicon, with optional variety
/// statistics.
///
/// Usage: preview --lexicon <path> [--config <path>] [--seed <n>] [--count <n>] [--stats] [--verbose]

use clap::Parser;
use howto_engine::core::title::TitleGenerator;
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(author, version, about = "Generate \"how to\" titles from a RON lexicon")]
struct Cli {
    /// Lexicon file (RON).
    #[arg(short, long, value_name = "FILE", default_value = "lexicon_data/sample.ron")]
    lexicon: PathBuf,

    /// Generator config file (RON). Defaults apply when omitted.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Number of titles to print.
    #[arg(short = 'n', long, default_value_t = 10)]
    count: usize,

    /// Print the "How to" caption instead of the bare title.
    #[arg(long)]
    prefix: bool,

    /// Print variety statistics after the titles.
    #[arg(long)]
    stats: bool,

    /// Log every generation decision.
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let mut builder = TitleGenerator::builder()
        .lexicon_path(&cli.lexicon)
        .seed(cli.seed);
    if let Some(ref path) = cli.config {
        builder = builder.config_path(path);
    }

    let mut generator = match builder.build() {
        Ok(generator) => generator,
        Err(e) => {
            eprintln!("ERROR: Failed to build generator: {}", e);
            process::exit(1);
        }
    };

    let mut titles = Vec::with_capacity(cli.count);
    let mut errors = 0;

    for _ in 0..cli.count {
        let result = if cli.prefix {
            generator.generate_with_prefix()
        } else {
            generator.generate()
        };
        match result {
            Ok(title) => {
                println!("{}", title);
                titles.push(title);
            }
            Err(e) => {
                eprintln!("ERROR: {}", e);
                errors += 1;
            }
        }
    }

    if cli.stats {
        print_stats(&titles, errors);
    }
}

fn print_stats(titles: &[String], errors: usize) {
    println!("\n=== Generated {} titles ({} errors) ===\n", titles.len(), errors);

    let unique: HashSet<&String> = titles.iter().collect();
    println!("Unique titles: {} / {}", unique.len(), titles.len());

    let openings: HashSet<&str> = titles
        .iter()
        .filter_map(|t| t.split_whitespace().next())
        .collect();
    println!("Distinct first words: {}", openings.len());

    let avg_words: f64 = if titles.is_empty() {
        0.0
    } else {
        titles
            .iter()
            .map(|t| t.split_whitespace().count() as f64)
            .sum::<f64>()
            / titles.len() as f64
    };
    println!("Average length: {:.1} words", avg_words);

    // Word frequency distribution (top 10)
    let mut freq: HashMap<String, usize> = HashMap::new();
    for title in titles {
        for word in title.split_whitespace() {
            *freq.entry(word.to_lowercase()).or_insert(0) += 1;
        }
    }
    let mut sorted: Vec<(String, usize)> = freq.into_iter().collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    println!("\nMost frequent words:");
    for (word, count) in sorted.iter().take(10) {
        println!("  {:<16} {}", word, count);
    }
}
