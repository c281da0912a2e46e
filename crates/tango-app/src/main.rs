use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tango_config::{Config, ConfigOverrides};
use tango_lang_japanese::pipeline;

/// Build JLPT kanji and vocabulary flashcard decks as Anki-importable CSV
#[derive(Parser, Debug)]
#[command(name = "tango")]
#[command(version)]
struct Args {
    /// Directory the decks are written to
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// JMdict JSON (jmdict-simplified)
    #[arg(long)]
    jmdict: Option<PathBuf>,

    /// JMdict JSON with example sentences
    #[arg(long)]
    jmdict_examples: Option<PathBuf>,

    /// Kanjidic2 JSON
    #[arg(long)]
    kanjidic: Option<PathBuf>,

    /// Examples per card
    #[arg(long, value_name = "N")]
    max_examples: Option<usize>,

    /// Leave example sentences off every card
    #[arg(long)]
    no_examples: bool,

    /// Only include words marked common
    #[arg(long)]
    common_only: bool,

    /// How a word's tier is derived from its kanji: conservative, average or first
    #[arg(long)]
    tier_strategy: Option<String>,

    /// Output layout: general or tiered
    #[arg(long)]
    mode: Option<String>,

    /// Decks to build: kanji, vocab or all
    #[arg(long)]
    decks: Option<String>,

    /// Add grade, commonness and form tags to cards
    #[arg(long)]
    extra_tags: bool,

    /// JSON file with default settings, overridden by flags
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl Args {
    fn overrides(&self) -> ConfigOverrides {
        // switches only override when given
        let flag = |set: bool| set.then_some(true);
        ConfigOverrides {
            output_dir: self.output_dir.clone(),
            jmdict: self.jmdict.clone(),
            jmdict_examples: self.jmdict_examples.clone(),
            kanjidic: self.kanjidic.clone(),
            max_examples: self.max_examples,
            no_examples: flag(self.no_examples),
            common_only: flag(self.common_only),
            extra_tags: flag(self.extra_tags),
            tier_strategy: self.tier_strategy.clone(),
            mode: self.mode.clone(),
            decks: self.decks.clone(),
        }
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_env("TANGO_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(atty::is(atty::Stream::Stderr))
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let args = Args::parse();
    let config = Config::load(args.config.as_deref(), args.overrides())
        .context("Failed to load configuration")?;
    tracing::debug!("{config:?}");

    let summary = pipeline::run(&config).context("Deck generation failed")?;

    println!("\nCreated {} files:", summary.files.len());
    for (path, cards) in &summary.files {
        println!("  {} ({cards} cards)", path.display());
    }
    println!(
        "\nTotal: {} kanji cards, {} vocabulary cards",
        summary.kanji_cards, summary.vocab_cards
    );
    if summary.skipped_records > 0 {
        println!("Skipped {} malformed records", summary.skipped_records);
    }

    Ok(())
}
