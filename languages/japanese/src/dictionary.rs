use std::collections::HashMap;
use std::path::Path;

use tango_core::{DeckError, Ranked, Result};

use crate::jlpt::JlptLevel;
use crate::loader::read_source;
use crate::schema::{FormJson, JMdictJson, SenseJson, WordJson};
use crate::script::constituent_kanji;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormType {
    Kanji,
    Kana,
}

impl FormType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormType::Kanji => "kanji",
            FormType::Kana => "kana",
        }
    }
}

/// One sense with tag codes expanded to labels
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Sense {
    pub part_of_speech: Vec<String>,
    pub glosses: Vec<String>,
    pub info: Vec<String>,
    pub misc: Vec<String>,
}

impl Sense {
    fn from_json(sense: &SenseJson, tags: &HashMap<String, String>) -> Self {
        let label = |code: &String| tags.get(code).cloned().unwrap_or_else(|| code.clone());
        Self {
            part_of_speech: sense.part_of_speech.iter().map(label).collect(),
            glosses: sense
                .gloss
                .iter()
                .filter(|g| g.lang == "eng" && !g.text.is_empty())
                .map(|g| g.text.clone())
                .collect(),
            info: sense.info.clone(),
            misc: sense.misc.iter().map(label).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.glosses.is_empty()
    }
}

/// JMdict word, keyed by surface form + reading
#[derive(Debug, Clone, PartialEq)]
pub struct WordEntry {
    pub id: Option<String>,
    pub surface: String,
    pub reading: String,
    /// All kana forms
    pub readings: Vec<String>,
    pub form_type: FormType,
    /// Explicit level tag, when the source carries one
    pub jlpt: Option<JlptLevel>,
    pub common: bool,
    pub frequency_rank: Option<u32>,
    pub senses: Vec<Sense>,
    /// Distinct kanji of the surface form, empty for kana-only words
    pub kanji: Vec<char>,
}

impl WordEntry {
    /// No kanji form: the surface is a kana spelling
    pub fn is_kana_only(&self) -> bool {
        self.form_type == FormType::Kana
    }

    /// Surface form first, then every reading
    pub fn forms(&self) -> Vec<&str> {
        let mut forms = vec![self.surface.as_str()];
        forms.extend(
            self.readings
                .iter()
                .map(String::as_str)
                .filter(|r| *r != self.surface),
        );
        forms
    }

    fn from_json(word: WordJson, tags: &HashMap<String, String>) -> std::result::Result<Self, String> {
        let (surface, form_type) = primary_form(&word).ok_or("missing surface form")?;
        let reading = primary(&word.kana).ok_or("missing reading")?;

        let jlpt = word.jlpt.as_deref().and_then(|tag| {
            let level = JlptLevel::from_str(tag);
            if level.is_none() {
                tracing::warn!("Ignoring unknown JLPT tag '{tag}' on {surface}");
            }
            level
        });

        Ok(Self {
            id: word.id(),
            kanji: constituent_kanji(&surface),
            surface,
            reading,
            readings: word
                .kana
                .iter()
                .filter(|k| !k.text.is_empty())
                .map(|k| k.text.clone())
                .collect(),
            form_type,
            jlpt,
            common: word.kanji.iter().chain(&word.kana).any(|f| f.common),
            frequency_rank: word.frequency,
            senses: word
                .sense
                .iter()
                .map(|s| Sense::from_json(s, tags))
                .filter(|s| !s.is_empty())
                .collect(),
        })
    }

    /// Fold a homograph entry sharing this key into `self`
    fn absorb(&mut self, other: WordEntry) {
        self.common |= other.common;
        self.jlpt = self.jlpt.or(other.jlpt);
        self.frequency_rank = match (self.frequency_rank, other.frequency_rank) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };
        for reading in other.readings {
            if !self.readings.contains(&reading) {
                self.readings.push(reading);
            }
        }
        self.senses.extend(other.senses);
    }
}

impl Ranked for WordEntry {
    fn frequency_rank(&self) -> Option<u32> {
        self.frequency_rank
    }
}

/// First common form, else first form
fn primary(forms: &[FormJson]) -> Option<String> {
    forms
        .iter()
        .find(|f| f.common && !f.text.is_empty())
        .or_else(|| forms.iter().find(|f| !f.text.is_empty()))
        .map(|f| f.text.clone())
}

fn primary_form(word: &WordJson) -> Option<(String, FormType)> {
    primary(&word.kanji)
        .map(|text| (text, FormType::Kanji))
        .or_else(|| primary(&word.kana).map(|text| (text, FormType::Kana)))
}

/// JMdict words in file order, indexed by `(surface, reading)`
#[derive(Debug, Default)]
pub struct JMdict {
    entries: Vec<WordEntry>,
    key_index: HashMap<(String, String), usize>,
    merged: usize,
    skipped: usize,
}

impl JMdict {
    pub fn load(path: &Path) -> Result<Self> {
        tracing::info!("Loading JMdict from file: {}", path.display());
        let json = read_source(path)?;
        let dict = Self::from_json(&json, path)?;
        tracing::info!(
            "Loaded {} dictionary entries ({} homographs merged)",
            dict.entry_count(),
            dict.merged
        );
        Ok(dict)
    }

    /// Parse a JMdict document; `path` is used for error reporting
    pub fn from_json(json: &str, path: &Path) -> Result<Self> {
        let data: JMdictJson = serde_json::from_str(json).map_err(|source| DeckError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        let words = data
            .words
            .ok_or_else(|| DeckError::malformed(path, 0, "missing 'words' array"))?;

        let mut dict = Self::default();
        for (record, value) in words.into_iter().enumerate() {
            let parsed = serde_json::from_value::<WordJson>(value)
                .map_err(|e| e.to_string())
                .and_then(|word| WordEntry::from_json(word, &data.tags));

            match parsed {
                Ok(entry) => dict.insert(entry),
                Err(reason) => {
                    tracing::warn!("Skipping record: {}", DeckError::malformed(path, record, reason));
                    dict.skipped += 1;
                }
            }
        }

        Ok(dict)
    }

    fn insert(&mut self, entry: WordEntry) {
        let key = (entry.surface.clone(), entry.reading.clone());
        if let Some(&idx) = self.key_index.get(&key) {
            self.entries[idx].absorb(entry);
            self.merged += 1;
            return;
        }

        self.key_index.insert(key, self.entries.len());
        self.entries.push(entry);
    }

    /// Get the number of entries in the dictionary
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> &[WordEntry] {
        &self.entries
    }

    pub fn get(&self, surface: &str, reading: &str) -> Option<&WordEntry> {
        self.key_index
            .get(&(surface.to_string(), reading.to_string()))
            .map(|&idx| &self.entries[idx])
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "tags": {"n": "noun (common) (futsuumeishi)", "uk": "word usually written using kana alone"},
        "words": [
            {
                "id": "1",
                "kanji": [{"text": "學校", "common": false}, {"text": "学校", "common": true}],
                "kana": [{"text": "がっこう", "common": true}],
                "sense": [{"partOfSpeech": ["n"], "gloss": [{"lang": "eng", "text": "school"}]}]
            },
            {
                "id": "2",
                "kana": [{"text": "ありがとう", "common": true}],
                "sense": [{"partOfSpeech": ["int"], "misc": ["uk"], "gloss": [{"lang": "eng", "text": "thank you"}]}],
                "jlpt": "N5"
            },
            {"id": "3", "kanji": [{"text": "鬱"}], "sense": []},
            {
                "id": "4",
                "kanji": [{"text": "学校"}],
                "kana": [{"text": "がっこう"}],
                "sense": [{"gloss": [{"lang": "eng", "text": "academy"}]}],
                "frequency": 120
            },
            {"id": 5, "kana": [{"text": "ねこ"}], "sense": [{"gloss": [{"lang": "ger", "text": "Katze"}]}]}
        ]
    }"#;

    fn sample() -> JMdict {
        JMdict::from_json(SAMPLE, Path::new("jmdict.json")).unwrap()
    }

    #[test]
    fn test_primary_form_prefers_common_kanji() {
        let dict = sample();
        let word = dict.get("学校", "がっこう").unwrap();
        assert_eq!(word.form_type, FormType::Kanji);
        assert_eq!(word.kanji, vec!['学', '校']);
        assert!(word.common);
        assert_eq!(word.senses[0].part_of_speech, vec!["noun (common) (futsuumeishi)"]);
    }

    #[test]
    fn test_homographs_merge_on_composite_key() {
        let dict = sample();
        let word = dict.get("学校", "がっこう").unwrap();
        assert_eq!(word.senses.len(), 2);
        assert_eq!(word.senses[1].glosses, vec!["academy"]);
        assert_eq!(word.frequency_rank, Some(120));
        assert_eq!(word.id.as_deref(), Some("1"));
    }

    #[test]
    fn test_kana_only_word() {
        let dict = sample();
        let word = dict.get("ありがとう", "ありがとう").unwrap();
        assert!(word.is_kana_only());
        assert_eq!(word.form_type, FormType::Kana);
        assert_eq!(word.jlpt, Some(JlptLevel::N5));
        assert_eq!(word.senses[0].misc, vec!["word usually written using kana alone"]);
        // unknown tag codes are kept as-is
        assert_eq!(word.senses[0].part_of_speech, vec!["int"]);
    }

    #[test]
    fn test_missing_reading_skipped_missing_glosses_tolerated() {
        let dict = sample();
        assert_eq!(dict.skipped(), 1);
        let neko = dict.get("ねこ", "ねこ").unwrap();
        assert!(neko.senses.is_empty());
        assert_eq!(neko.id.as_deref(), Some("5"));
        assert_eq!(dict.entry_count(), 3);
    }

    #[test]
    fn test_forms() {
        let dict = sample();
        assert_eq!(dict.get("学校", "がっこう").unwrap().forms(), vec!["学校", "がっこう"]);
        assert_eq!(dict.get("ありがとう", "ありがとう").unwrap().forms(), vec!["ありがとう"]);
    }
}
