//! Serde mirrors of the jmdict-simplified JSON releases.
//!
//! Only fields used for deck building are declared. Records are decoded one
//! at a time from `serde_json::Value` so a single bad record can be skipped.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

// Kanjidic2

#[derive(Debug, Deserialize)]
pub(crate) struct KanjidicJson {
    pub characters: Option<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CharacterJson {
    pub literal: Option<String>,
    #[serde(default)]
    pub misc: MiscJson,
    #[serde(default)]
    pub radicals: Vec<TypedValueJson>,
    #[serde(default)]
    pub dictionary_references: Vec<TypedValueJson>,
    pub reading_meaning: Option<ReadingMeaningJson>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MiscJson {
    pub grade: Option<u8>,
    #[serde(default)]
    pub stroke_counts: Vec<u32>,
    pub frequency: Option<u32>,
    pub jlpt_level: Option<u8>,
}

/// `{"type": ..., "value": ...}` pairs, value is a number or a string
#[derive(Debug, Deserialize)]
pub(crate) struct TypedValueJson {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub value: Value,
}

impl TypedValueJson {
    pub fn text(&self) -> Option<String> {
        value_text(&self.value)
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ReadingMeaningJson {
    #[serde(default)]
    pub groups: Vec<GroupJson>,
    #[serde(default)]
    pub nanori: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct GroupJson {
    #[serde(default)]
    pub readings: Vec<KanjiReadingJson>,
    #[serde(default)]
    pub meanings: Vec<KanjiMeaningJson>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct KanjiReadingJson {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
}

fn default_meaning_lang() -> String {
    "en".to_string()
}

#[derive(Debug, Deserialize)]
pub(crate) struct KanjiMeaningJson {
    #[serde(default = "default_meaning_lang")]
    pub lang: String,
    pub value: String,
}

// JMdict (with or without examples)

#[derive(Debug, Deserialize)]
pub(crate) struct JMdictJson {
    #[serde(default)]
    pub tags: HashMap<String, String>,
    pub words: Option<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WordJson {
    #[serde(default)]
    pub id: Value,
    #[serde(default)]
    pub kanji: Vec<FormJson>,
    #[serde(default)]
    pub kana: Vec<FormJson>,
    #[serde(default)]
    pub sense: Vec<SenseJson>,
    /// Not part of upstream JMdict, honoured when a build adds it
    pub jlpt: Option<String>,
    /// Not part of upstream JMdict, honoured when a build adds it
    pub frequency: Option<u32>,
}

impl WordJson {
    pub fn id(&self) -> Option<String> {
        value_text(&self.id)
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct FormJson {
    pub text: String,
    #[serde(default)]
    pub common: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SenseJson {
    #[serde(default)]
    pub part_of_speech: Vec<String>,
    #[serde(default)]
    pub gloss: Vec<GlossJson>,
    #[serde(default)]
    pub info: Vec<String>,
    #[serde(default)]
    pub misc: Vec<String>,
    #[serde(default)]
    pub examples: Vec<ExampleJson>,
}

fn default_gloss_lang() -> String {
    "eng".to_string()
}

#[derive(Debug, Deserialize)]
pub(crate) struct GlossJson {
    #[serde(default = "default_gloss_lang")]
    pub lang: String,
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ExampleJson {
    /// Form of the word used in the sentence
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub sentences: Vec<ExampleTextJson>,
    #[serde(default)]
    pub common: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ExampleTextJson {
    // upstream spells the key "land"
    #[serde(alias = "land")]
    pub lang: String,
    pub text: String,
}

pub(crate) fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
