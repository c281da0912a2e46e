use std::collections::HashMap;
use std::path::Path;

use tango_core::{DeckError, Ranked, Result};

use crate::jlpt::{DeckLevel, JlptLevel, classify_kanji};
use crate::loader::read_source;
use crate::schema::{CharacterJson, KanjidicJson};

/// Kanjidic2 character entry
#[derive(Debug, Clone, PartialEq)]
pub struct KanjiEntry {
    pub character: char,
    pub stroke_count: Option<u32>,
    pub grade: Option<u8>,
    /// Newspaper frequency rank, 1 = most frequent
    pub frequency_rank: Option<u32>,
    pub jlpt: Option<JlptLevel>,
    pub on_readings: Vec<String>,
    pub kun_readings: Vec<String>,
    pub nanori: Vec<String>,
    pub meanings: Vec<String>,
    /// Classical radical number
    pub radical: Option<String>,
    pub heisig: Option<String>,
    pub heisig6: Option<String>,
}

impl KanjiEntry {
    pub fn level(&self) -> DeckLevel {
        classify_kanji(self.jlpt)
    }

    fn from_json(json: CharacterJson) -> std::result::Result<Self, String> {
        let literal = json.literal.ok_or("missing literal")?;
        let mut chars = literal.chars();
        let character = match (chars.next(), chars.next()) {
            (Some(c), None) => c,
            _ => return Err(format!("literal '{literal}' is not a single character")),
        };

        let mut on_readings = Vec::new();
        let mut kun_readings = Vec::new();
        let mut meanings = Vec::new();
        let mut nanori = Vec::new();

        if let Some(reading_meaning) = json.reading_meaning {
            for group in reading_meaning.groups {
                for reading in group.readings {
                    match reading.kind.as_str() {
                        "ja_on" => on_readings.push(reading.value),
                        "ja_kun" => kun_readings.push(reading.value),
                        _ => {}
                    }
                }
                meanings.extend(
                    group
                        .meanings
                        .into_iter()
                        .filter(|m| m.lang == "en" && !m.value.is_empty())
                        .map(|m| m.value),
                );
            }
            nanori = reading_meaning.nanori;
        }

        let reference = |kind: &str| {
            json.dictionary_references
                .iter()
                .find(|r| r.kind == kind)
                .and_then(|r| r.text())
        };

        Ok(Self {
            character,
            stroke_count: json.misc.stroke_counts.first().copied(),
            grade: json.misc.grade,
            frequency_rank: json.misc.frequency,
            jlpt: json
                .misc
                .jlpt_level
                .and_then(|old| JlptLevel::from_kanjidic(old, json.misc.grade)),
            on_readings,
            kun_readings,
            nanori,
            meanings,
            radical: json
                .radicals
                .iter()
                .find(|r| r.kind == "classical")
                .or(json.radicals.first())
                .and_then(|r| r.text()),
            heisig: reference("heisig"),
            heisig6: reference("heisig6"),
        })
    }
}

impl Ranked for KanjiEntry {
    fn frequency_rank(&self) -> Option<u32> {
        self.frequency_rank
    }
}

/// Kanjidic2 characters in file order, indexed by character
#[derive(Debug, Default)]
pub struct Kanjidic {
    entries: Vec<KanjiEntry>,
    index: HashMap<char, usize>,
    skipped: usize,
}

impl Kanjidic {
    pub fn load(path: &Path) -> Result<Self> {
        tracing::info!("Loading Kanjidic2 from file: {}", path.display());
        let json = read_source(path)?;
        let dict = Self::from_json(&json, path)?;
        tracing::info!(
            "Loaded {} kanji ({} with JLPT levels)",
            dict.entries.len(),
            dict.entries.iter().filter(|k| k.jlpt.is_some()).count()
        );
        Ok(dict)
    }

    /// Parse a Kanjidic2 document; `path` is used for error reporting
    pub fn from_json(json: &str, path: &Path) -> Result<Self> {
        let data: KanjidicJson = serde_json::from_str(json).map_err(|source| DeckError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        let characters = data
            .characters
            .ok_or_else(|| DeckError::malformed(path, 0, "missing 'characters' array"))?;

        let mut dict = Self::default();
        for (record, value) in characters.into_iter().enumerate() {
            let parsed = serde_json::from_value::<CharacterJson>(value)
                .map_err(|e| e.to_string())
                .and_then(KanjiEntry::from_json);

            match parsed {
                Ok(entry) if dict.index.contains_key(&entry.character) => {
                    dict.skip(DeckError::malformed(
                        path,
                        record,
                        format!("duplicate character {}", entry.character),
                    ));
                }
                Ok(entry) => {
                    dict.index.insert(entry.character, dict.entries.len());
                    dict.entries.push(entry);
                }
                Err(reason) => dict.skip(DeckError::malformed(path, record, reason)),
            }
        }

        Ok(dict)
    }

    fn skip(&mut self, err: DeckError) {
        tracing::warn!("Skipping record: {err}");
        self.skipped += 1;
    }

    pub fn get(&self, character: char) -> Option<&KanjiEntry> {
        self.index.get(&character).map(|&idx| &self.entries[idx])
    }

    pub fn jlpt_level(&self, character: char) -> Option<JlptLevel> {
        self.get(character).and_then(|k| k.jlpt)
    }

    pub fn entries(&self) -> &[KanjiEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Malformed records dropped while loading
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "characters": [
            {
                "literal": "学",
                "misc": {"grade": 1, "strokeCounts": [8], "frequency": 63, "jlptLevel": 4},
                "radicals": [{"type": "classical", "value": 39}],
                "dictionaryReferences": [
                    {"type": "heisig", "morohashi": null, "value": "315"},
                    {"type": "heisig6", "morohashi": null, "value": "339"}
                ],
                "readingMeaning": {
                    "groups": [{
                        "readings": [
                            {"type": "pinyin", "value": "xue2"},
                            {"type": "ja_on", "value": "ガク"},
                            {"type": "ja_kun", "value": "まな.ぶ"}
                        ],
                        "meanings": [
                            {"lang": "en", "value": "study"},
                            {"lang": "fr", "value": "étude"},
                            {"value": "learning"}
                        ]
                    }],
                    "nanori": ["さね"]
                }
            },
            {"misc": {"jlptLevel": 3}},
            {"literal": "校", "misc": {"grade": 1, "jlptLevel": 2}},
            {"literal": "学"},
            {"literal": "憂", "misc": {}}
        ]
    }"#;

    fn sample() -> Kanjidic {
        Kanjidic::from_json(SAMPLE, Path::new("kanjidic.json")).unwrap()
    }

    #[test]
    fn test_full_record() {
        let dict = sample();
        let gaku = dict.get('学').unwrap();
        assert_eq!(gaku.stroke_count, Some(8));
        assert_eq!(gaku.frequency_rank, Some(63));
        assert_eq!(gaku.jlpt, Some(JlptLevel::N5));
        assert_eq!(gaku.on_readings, vec!["ガク"]);
        assert_eq!(gaku.kun_readings, vec!["まな.ぶ"]);
        assert_eq!(gaku.meanings, vec!["study", "learning"]);
        assert_eq!(gaku.nanori, vec!["さね"]);
        assert_eq!(gaku.radical.as_deref(), Some("39"));
        assert_eq!(gaku.heisig.as_deref(), Some("315"));
        assert_eq!(gaku.heisig6.as_deref(), Some("339"));
    }

    #[test]
    fn test_missing_literal_and_duplicates_are_skipped() {
        let dict = sample();
        assert_eq!(dict.len(), 3);
        assert_eq!(dict.skipped(), 2);
    }

    #[test]
    fn test_optional_fields_use_sentinels() {
        let dict = sample();
        let yuu = dict.get('憂').unwrap();
        assert_eq!(yuu.frequency_rank, None);
        assert_eq!(yuu.jlpt, None);
        assert!(yuu.meanings.is_empty());
        assert_eq!(yuu.level(), DeckLevel::NonJlpt);
    }

    #[test]
    fn test_old_level_two_split_by_grade() {
        let dict = sample();
        assert_eq!(dict.jlpt_level('校'), Some(JlptLevel::N3));
    }

    #[test]
    fn test_missing_characters_array_is_malformed() {
        let err = Kanjidic::from_json("{}", Path::new("k.json")).unwrap_err();
        assert!(matches!(err, DeckError::MalformedData { .. }));
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let err = Kanjidic::from_json("{invalid json}", Path::new("k.json")).unwrap_err();
        assert!(matches!(err, DeckError::Parse { .. }));
        assert!(err.to_string().contains("k.json"));
    }
}
