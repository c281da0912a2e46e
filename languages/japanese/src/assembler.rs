use std::collections::BTreeMap;
use std::path::PathBuf;

use tango_anki::{BackField, DeckRow, Tags, escape, format_examples, join_lines};
use tango_config::{DeckConfig, DeckMode};
use tango_core::{ExampleCorpus, ExampleSelector, ExampleSentence, Tier};

use crate::dictionary::{Sense, WordEntry};
use crate::frequency::TieredEntry;
use crate::jlpt::DeckLevel;
use crate::kanjidic::KanjiEntry;

/// Shown when a dictionary record has no meanings
const UNKNOWN: &str = "(unknown)";

/// Output partition: a level, plus a tier in tiered mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PartitionKey {
    pub level: DeckLevel,
    pub tier: Option<Tier>,
}

impl PartitionKey {
    /// `N5` in general mode, `N5::Tier_2` in tiered mode
    pub fn tag(&self) -> String {
        match self.tier {
            Some(tier) => format!("{}::{}", self.level.tag(), tier.label()),
            None => self.level.tag().to_string(),
        }
    }

    fn tier_dir(&self, file_name: &str) -> Option<PathBuf> {
        self.tier.map(|tier| {
            PathBuf::from(self.level.file_label())
                .join(tier.label())
                .join(file_name)
        })
    }
}

/// Rows for one output file, path relative to the output directory
#[derive(Debug, Clone)]
pub struct DeckFile {
    pub path: PathBuf,
    pub key: PartitionKey,
    pub rows: Vec<DeckRow>,
}

#[derive(Debug, Default)]
pub struct Assembled {
    pub files: Vec<DeckFile>,
    /// Entries with no bucket in the current mode
    pub dropped: usize,
    /// Words removed by `common_only`
    pub not_common: usize,
}

/// Joins tiered entries with examples into deck rows
pub struct DeckAssembler<'a> {
    config: &'a DeckConfig,
    kanji_examples: ExampleSelector<'a>,
    vocab_examples: ExampleSelector<'a>,
}

impl<'a> DeckAssembler<'a> {
    pub fn new(config: &'a DeckConfig, corpus: &'a ExampleCorpus) -> Self {
        Self {
            config,
            kanji_examples: ExampleSelector::new(corpus, config.kanji_examples()),
            vocab_examples: ExampleSelector::new(corpus, config.vocab_examples()),
        }
    }

    /// Partition entries by level (general) or level and tier (tiered).
    ///
    /// Tiered mode only has numbered levels. `extra_buckets` keeps kana-only and
    /// non-JLPT partitions in general mode.
    fn partition<'e, T>(
        &self,
        tiered: impl IntoIterator<Item = TieredEntry<'e, T>>,
        extra_buckets: bool,
    ) -> (BTreeMap<PartitionKey, Vec<TieredEntry<'e, T>>>, usize) {
        let mut partitions: BTreeMap<PartitionKey, Vec<TieredEntry<'e, T>>> = BTreeMap::new();
        let mut dropped = 0;

        for entry in tiered {
            let numbered = entry.level.jlpt().is_some();
            let key = match self.config.mode {
                DeckMode::General if numbered || extra_buckets => PartitionKey {
                    level: entry.level,
                    tier: None,
                },
                DeckMode::Tiered if numbered => PartitionKey {
                    level: entry.level,
                    tier: Some(entry.tier),
                },
                _ => {
                    dropped += 1;
                    continue;
                }
            };
            partitions.entry(key).or_default().push(entry);
        }

        (partitions, dropped)
    }

    pub fn kanji_decks(&self, tiered: &[TieredEntry<'_, KanjiEntry>]) -> Assembled {
        let (partitions, dropped) = self.partition(tiered.iter().copied(), false);
        if dropped > 0 {
            tracing::info!("Dropped {dropped} kanji without a JLPT level");
        }

        let files = partitions
            .into_iter()
            .map(|(key, entries)| DeckFile {
                path: key.tier_dir("kanji.csv").unwrap_or_else(|| {
                    PathBuf::from("kanji").join(format!("jlpt_{}_kanji.csv", key.level.file_label()))
                }),
                rows: entries.iter().map(|t| self.kanji_row(t, &key)).collect(),
                key,
            })
            .collect();

        Assembled {
            files,
            dropped,
            not_common: 0,
        }
    }

    pub fn vocab_decks(&self, tiered: &[TieredEntry<'_, WordEntry>]) -> Assembled {
        let mut not_common = 0;
        let kept = tiered.iter().copied().filter(|t| {
            let keep = !self.config.common_only || t.entry.common;
            if !keep {
                not_common += 1;
            }
            keep
        });
        let (partitions, dropped) = self.partition(kept, true);
        if dropped > 0 {
            tracing::info!("Dropped {dropped} kana-only / non-JLPT words (tiered mode)");
        }
        if not_common > 0 {
            tracing::info!("Skipped (not common): {not_common} words");
        }

        let suffix = if self.vocab_examples.max_examples() > 0 {
            "_examples"
        } else {
            ""
        };

        let files = partitions
            .into_iter()
            .map(|(key, entries)| DeckFile {
                path: key.tier_dir("vocab.csv").unwrap_or_else(|| {
                    PathBuf::from("vocabulary").join(format!(
                        "jlpt_{}_vocab{suffix}.csv",
                        key.level.file_label()
                    ))
                }),
                rows: entries.iter().map(|t| self.word_row(t, &key)).collect(),
                key,
            })
            .collect();

        Assembled {
            files,
            dropped,
            not_common,
        }
    }

    pub fn kanji_row(&self, tiered: &TieredEntry<'_, KanjiEntry>, key: &PartitionKey) -> DeckRow {
        let kanji = tiered.entry;

        let meanings = if kanji.meanings.is_empty() {
            UNKNOWN.to_string()
        } else {
            kanji.meanings.join("; ")
        };

        let mut stats = Vec::new();
        if let Some(strokes) = kanji.stroke_count {
            stats.push(format!("Strokes: {strokes}"));
        }
        if let Some(radical) = &kanji.radical {
            stats.push(format!("Radical: {radical}"));
        }
        if let Some(rank) = kanji.frequency_rank {
            stats.push(format!("Freq: #{rank}"));
        }

        let mut heisig = Vec::new();
        if let Some(rtk) = &kanji.heisig {
            heisig.push(format!("RTK: #{rtk}"));
        }
        if let Some(rtk6) = &kanji.heisig6 {
            heisig.push(format!("RTK6: #{rtk6}"));
        }

        let examples = render_examples(self.kanji_examples.for_char(kanji.character));

        let back = BackField::new()
            .line("Meanings", &meanings)
            .line("On'yomi", &kanji.on_readings.join("; "))
            .line("Kun'yomi", &kanji.kun_readings.join("; "))
            .line("Name readings", &kanji.nanori.join("; "))
            .line("Stats", &stats.join(" | "))
            .line("Heisig", &heisig.join(" | "))
            .block("Examples", &examples)
            .render();

        let mut tags = Tags::new(key.tag());
        if self.config.extra_tags {
            if let Some(grade) = kanji.grade {
                tags.push(format!("grade{grade}"));
            }
            if key.tier.is_none() {
                tags.push(format!("freq_tier{}", tiered.tier));
            }
        }

        DeckRow::new(kanji.character.to_string(), back, &tags)
    }

    pub fn word_row(&self, tiered: &TieredEntry<'_, WordEntry>, key: &PartitionKey) -> DeckRow {
        let word = tiered.entry;

        let meanings = if word.senses.is_empty() {
            UNKNOWN.to_string()
        } else {
            join_lines(
                word.senses
                    .iter()
                    .enumerate()
                    .map(|(i, sense)| format!("{}. {}", i + 1, format_sense(sense))),
            )
        };

        let examples = render_examples(self.vocab_examples.for_word(word.id.as_deref(), &word.forms()));

        let back = BackField::new()
            .line("Reading", &word.readings.join(", "))
            .block("Meanings", &meanings)
            .block("Examples", &examples)
            .render();

        let mut tags = Tags::new(key.tag());
        if self.config.extra_tags {
            if word.common {
                tags.push("common");
            }
            tags.push(word.form_type.as_str());
        }

        DeckRow::new(word.surface.clone(), back, &tags)
    }
}

fn render_examples<'s>(examples: impl Iterator<Item = &'s ExampleSentence>) -> String {
    format_examples(examples.map(|s| (s.source_text.as_str(), s.target_text.as_str())))
}

/// `(pos; pos) gloss; gloss [info] <i>(misc)</i>`
fn format_sense(sense: &Sense) -> String {
    let mut parts = Vec::new();
    if !sense.part_of_speech.is_empty() {
        parts.push(format!("({})", escape(&sense.part_of_speech.join("; "))));
    }
    if !sense.glosses.is_empty() {
        parts.push(escape(&sense.glosses.join("; ")));
    }
    if !sense.info.is_empty() {
        parts.push(format!("[{}]", escape(&sense.info.join("; "))));
    }
    if !sense.misc.is_empty() {
        parts.push(format!("<i>({})</i>", escape(&sense.misc.join("; "))));
    }
    parts.join(" ")
}
