use std::path::PathBuf;

use tango_anki::write_rows;
use tango_config::Config;
use tango_core::{Result, Tier};

use crate::assembler::{Assembled, DeckAssembler, DeckFile};
use crate::frequency::{KanjiTiers, TieredEntry, tier_histogram, tier_kanji, tier_words};
use crate::jlpt::classify_word;
use crate::loader::SourceLoader;

/// What a run produced
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Written paths under the output directory and their card counts
    pub files: Vec<(PathBuf, usize)>,
    pub kanji_cards: usize,
    pub vocab_cards: usize,
    /// Malformed source records skipped while loading
    pub skipped_records: usize,
    /// Entries with no deck in the chosen mode
    pub dropped: usize,
    pub not_common: usize,
}

impl RunSummary {
    pub fn total_cards(&self) -> usize {
        self.kanji_cards + self.vocab_cards
    }
}

/// Load, classify, tier, assemble and write every selected deck
pub fn run(config: &Config) -> Result<RunSummary> {
    let deck = &config.deck;
    tracing::info!(
        "Building {} decks ({}, tier strategy: {})",
        deck.mode,
        deck.decks,
        deck.tier_strategy
    );

    let sources = SourceLoader::load(&config.sources, deck)?;
    let kanjidic = &sources.kanjidic;
    if kanjidic.is_empty() {
        tracing::warn!("No usable characters in {}", config.sources.kanjidic.display());
    } else {
        tracing::info!("Loaded {} kanji", kanjidic.len());
    }

    let tiered_kanji = tier_kanji(kanjidic.entries());
    log_histogram("kanji", &tiered_kanji);

    let assembler = DeckAssembler::new(deck, &sources.examples);
    let mut summary = RunSummary {
        skipped_records: sources.skipped,
        ..RunSummary::default()
    };

    if deck.decks.kanji() {
        let assembled = assembler.kanji_decks(&tiered_kanji);
        summary.kanji_cards = emit(config, assembled, &mut summary)?;
    }

    if let Some(jmdict) = sources.jmdict.as_ref().filter(|_| deck.decks.vocab()) {
        tracing::info!("Loaded {} words", jmdict.entry_count());

        let kanji_tiers = KanjiTiers::from_tiered(&tiered_kanji);
        let classified = jmdict.entries().iter().map(|word| {
            let level = classify_word(word.jlpt, word.is_kana_only(), &word.kanji, |c| {
                kanjidic.jlpt_level(c)
            });
            (word, level)
        });
        let tiered_words = tier_words(classified, &kanji_tiers, deck.tier_strategy);
        log_histogram("words", &tiered_words);

        let assembled = assembler.vocab_decks(&tiered_words);
        summary.vocab_cards = emit(config, assembled, &mut summary)?;
    }

    tracing::info!(
        "Done: {} cards in {} files under {} (dropped: {}, not common: {}, skipped records: {})",
        summary.total_cards(),
        summary.files.len(),
        config.output_dir.display(),
        summary.dropped,
        summary.not_common,
        summary.skipped_records
    );
    Ok(summary)
}

/// Write every file of `assembled`, returning the number of cards written
fn emit(config: &Config, assembled: Assembled, summary: &mut RunSummary) -> Result<usize> {
    summary.dropped += assembled.dropped;
    summary.not_common += assembled.not_common;

    let mut cards = 0;
    for DeckFile { path, key, rows } in assembled.files {
        let path = config.output_dir.join(path);
        tracing::debug!("Writing {} rows for {}", rows.len(), key.tag());
        let written = write_rows(&path, &rows)?;
        cards += written;
        summary.files.push((path, written));
    }
    Ok(cards)
}

fn log_histogram<T>(what: &str, tiered: &[TieredEntry<'_, T>]) {
    let counts = tier_histogram(tiered);
    let parts: Vec<String> = Tier::all()
        .zip(counts)
        .map(|(tier, count)| format!("{}={count}", tier.label()))
        .collect();
    tracing::info!("Tiered {} {what}: {}", tiered.len(), parts.join(" "));
}
