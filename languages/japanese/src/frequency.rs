use std::collections::{BTreeMap, HashMap};

use tango_core::{Tier, TierStrategy, assign_tiers};

use crate::dictionary::WordEntry;
use crate::jlpt::DeckLevel;
use crate::kanjidic::KanjiEntry;

/// An entry with its level and the tier computed over that level's population
#[derive(Debug)]
pub struct TieredEntry<'a, T> {
    pub entry: &'a T,
    pub level: DeckLevel,
    pub tier: Tier,
}

// manual impls: only the reference is copied, `T` need not be `Copy`
impl<T> Clone for TieredEntry<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for TieredEntry<'_, T> {}

/// Group by level, preserving load order inside each level
fn group_by_level<'a, T, I>(entries: I) -> BTreeMap<DeckLevel, Vec<&'a T>>
where
    I: IntoIterator<Item = (&'a T, DeckLevel)>,
{
    let mut groups: BTreeMap<DeckLevel, Vec<&'a T>> = BTreeMap::new();
    for (entry, level) in entries {
        groups.entry(level).or_default().push(entry);
    }
    groups
}

/// Tier every kanji within its level (non-JLPT kanji form their own population).
///
/// Output is ordered by level, then load order.
pub fn tier_kanji<'a, I>(entries: I) -> Vec<TieredEntry<'a, KanjiEntry>>
where
    I: IntoIterator<Item = &'a KanjiEntry>,
{
    let groups = group_by_level(entries.into_iter().map(|k| (k, k.level())));

    let mut tiered = Vec::new();
    for (level, population) in groups {
        let tiers = assign_tiers(&population);
        tracing::debug!("Tiered {} kanji at {level}", population.len());
        tiered.extend(
            population
                .into_iter()
                .zip(tiers)
                .map(|(entry, tier)| TieredEntry { entry, level, tier }),
        );
    }
    tiered
}

/// Lookup of kanji tiers used when tiering words
#[derive(Debug, Default)]
pub struct KanjiTiers {
    tiers: HashMap<char, Tier>,
}

impl KanjiTiers {
    pub fn from_tiered(tiered: &[TieredEntry<'_, KanjiEntry>]) -> Self {
        Self {
            tiers: tiered.iter().map(|t| (t.entry.character, t.tier)).collect(),
        }
    }

    pub fn get(&self, character: char) -> Option<Tier> {
        self.tiers.get(&character).copied()
    }

    /// Tier of a word from its constituent kanji, `None` if none are known
    pub fn word_tier(&self, kanji: &[char], strategy: TierStrategy) -> Option<Tier> {
        let tiers: Vec<Tier> = kanji.iter().filter_map(|&c| self.get(c)).collect();
        strategy.combine(&tiers)
    }
}

/// Tier words level by level.
///
/// Words with known constituent kanji take the strategy-combined kanji tier.
/// Kana-only words, and words whose kanji are all unknown, use their own rank
/// within the level's word population.
pub fn tier_words<'a, I>(words: I, kanji_tiers: &KanjiTiers, strategy: TierStrategy) -> Vec<TieredEntry<'a, WordEntry>>
where
    I: IntoIterator<Item = (&'a WordEntry, DeckLevel)>,
{
    let groups = group_by_level(words);

    let mut tiered = Vec::new();
    for (level, population) in groups {
        let by_rank = assign_tiers(&population);
        tiered.extend(population.into_iter().zip(by_rank).map(|(entry, rank_tier)| {
            let tier = kanji_tiers
                .word_tier(&entry.kanji, strategy)
                .unwrap_or(rank_tier);
            TieredEntry { entry, level, tier }
        }));
    }
    tiered
}

/// Counts per tier, most frequent first
pub fn tier_histogram<T>(tiered: &[TieredEntry<'_, T>]) -> [usize; Tier::COUNT as usize] {
    let mut counts = [0; Tier::COUNT as usize];
    for entry in tiered {
        counts[(entry.tier.get() - 1) as usize] += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::FormType;
    use crate::jlpt::JlptLevel;

    fn kanji(c: char, jlpt: Option<JlptLevel>, rank: Option<u32>) -> KanjiEntry {
        KanjiEntry {
            character: c,
            stroke_count: None,
            grade: None,
            frequency_rank: rank,
            jlpt,
            on_readings: vec![],
            kun_readings: vec![],
            nanori: vec![],
            meanings: vec![],
            radical: None,
            heisig: None,
            heisig6: None,
        }
    }

    fn word(surface: &str, rank: Option<u32>) -> WordEntry {
        WordEntry {
            id: None,
            surface: surface.to_string(),
            reading: surface.to_string(),
            readings: vec![surface.to_string()],
            form_type: FormType::Kana,
            jlpt: Some(JlptLevel::N5),
            common: true,
            frequency_rank: rank,
            senses: vec![],
            kanji: crate::script::constituent_kanji(surface),
        }
    }

    fn n5_kanji() -> Vec<KanjiEntry> {
        // ranks chosen so tiers are 日=1 月=2 水=3 火=4
        vec![
            kanji('水', Some(JlptLevel::N5), Some(223)),
            kanji('日', Some(JlptLevel::N5), Some(1)),
            kanji('火', Some(JlptLevel::N5), Some(574)),
            kanji('月', Some(JlptLevel::N5), Some(23)),
            kanji('憂', None, Some(1500)),
        ]
    }

    #[test]
    fn test_kanji_tiered_within_level() {
        let entries = n5_kanji();
        let tiered = tier_kanji(&entries);
        let tiers = KanjiTiers::from_tiered(&tiered);

        assert_eq!(tiers.get('日').map(Tier::get), Some(1));
        assert_eq!(tiers.get('月').map(Tier::get), Some(2));
        assert_eq!(tiers.get('水').map(Tier::get), Some(3));
        assert_eq!(tiers.get('火').map(Tier::get), Some(4));
        // alone in the non-JLPT population
        assert_eq!(tiers.get('憂').map(Tier::get), Some(1));
        // level order, then load order
        let order: Vec<char> = tiered.iter().map(|t| t.entry.character).collect();
        assert_eq!(order, vec!['水', '日', '火', '月', '憂']);
    }

    #[test]
    fn test_each_level_partitioned_exactly() {
        let entries = n5_kanji();
        let tiered = tier_kanji(&entries);
        assert_eq!(tiered.len(), entries.len());
        let n5: Vec<_> = tiered
            .iter()
            .filter(|t| t.level == DeckLevel::Jlpt(JlptLevel::N5))
            .copied()
            .collect();
        assert_eq!(tier_histogram(&n5), [1, 1, 1, 1]);
    }

    #[test]
    fn test_word_strategies() {
        let entries = n5_kanji();
        let tiers = KanjiTiers::from_tiered(&tier_kanji(&entries));
        // 日 tier 1, 水 tier 3
        let kanji = ['日', '水'];
        assert_eq!(tiers.word_tier(&kanji, TierStrategy::Conservative).map(Tier::get), Some(3));
        assert_eq!(tiers.word_tier(&kanji, TierStrategy::Average).map(Tier::get), Some(2));
        assert_eq!(tiers.word_tier(&kanji, TierStrategy::First).map(Tier::get), Some(1));
    }

    #[test]
    fn test_conservative_word_tier_is_max_of_kanji() {
        let entries = n5_kanji();
        let tiers = KanjiTiers::from_tiered(&tier_kanji(&entries));
        let words = vec![word("水曜日", None), word("月火", None)];
        let tiered = tier_words(
            words.iter().map(|w| (w, DeckLevel::Jlpt(JlptLevel::N5))),
            &tiers,
            TierStrategy::Conservative,
        );
        for t in &tiered {
            let max = t.entry.kanji.iter().filter_map(|&c| tiers.get(c)).max();
            assert_eq!(Some(t.tier), max);
        }
    }

    #[test]
    fn test_kana_words_tiered_by_own_rank() {
        let tiers = KanjiTiers::default();
        let words = vec![
            word("これ", Some(42)),
            word("それ", Some(61)),
            word("あれ", None),
            word("どれ", Some(900)),
        ];
        let tiered = tier_words(
            words.iter().map(|w| (w, DeckLevel::Jlpt(JlptLevel::N5))),
            &tiers,
            TierStrategy::Conservative,
        );
        let got: Vec<u8> = tiered.iter().map(|t| t.tier.get()).collect();
        assert_eq!(got, vec![1, 2, 4, 3]);
    }

    #[test]
    fn test_unknown_kanji_fall_back_to_rank() {
        let tiers = KanjiTiers::default();
        let words = vec![word("鬱", Some(3))];
        let tiered = tier_words(
            words.iter().map(|w| (w, DeckLevel::NonJlpt)),
            &tiers,
            TierStrategy::First,
        );
        assert_eq!(tiered[0].tier, Tier::MOST_FREQUENT);
    }
}
