use std::path::Path;

use tango_core::{DeckError, ExampleCorpus, ExampleSentence, Result};

use crate::loader::read_source;
use crate::schema::{ExampleJson, JMdictJson, WordJson};

/// Example sentences from a JMdict build with Tatoeba examples
pub struct ExamplesLoader;

impl ExamplesLoader {
    pub fn load(path: &Path) -> Result<(ExampleCorpus, usize)> {
        tracing::info!("Loading example sentences from file: {}", path.display());
        let json = read_source(path)?;
        let (corpus, skipped) = Self::from_json(&json, path)?;
        tracing::info!("Loaded {} example sentences", corpus.len());
        Ok((corpus, skipped))
    }

    /// Returns the corpus and the number of malformed records skipped
    pub fn from_json(json: &str, path: &Path) -> Result<(ExampleCorpus, usize)> {
        let data: JMdictJson = serde_json::from_str(json).map_err(|source| DeckError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        let words = data
            .words
            .ok_or_else(|| DeckError::malformed(path, 0, "missing 'words' array"))?;

        let mut sentences = Vec::new();
        let mut skipped = 0;
        for (record, value) in words.into_iter().enumerate() {
            let word = match serde_json::from_value::<WordJson>(value) {
                Ok(word) => word,
                Err(e) => {
                    tracing::warn!("Skipping record: {}", DeckError::malformed(path, record, e.to_string()));
                    skipped += 1;
                    continue;
                }
            };

            let word_id = word.id();
            let fallback_key = word
                .kanji
                .first()
                .or(word.kana.first())
                .map(|f| f.text.clone())
                .unwrap_or_default();

            for example in word.sense.iter().flat_map(|s| &s.examples) {
                match to_sentence(example, word_id.clone(), &fallback_key) {
                    Some(sentence) => sentences.push(sentence),
                    None => {
                        tracing::warn!(
                            "Skipping example: {}",
                            DeckError::malformed(path, record, "example lacks a jpn/eng sentence pair")
                        );
                        skipped += 1;
                    }
                }
            }
        }

        Ok((ExampleCorpus::new(sentences), skipped))
    }
}

fn to_sentence(example: &ExampleJson, word_id: Option<String>, fallback_key: &str) -> Option<ExampleSentence> {
    let text = |lang: &str| {
        example
            .sentences
            .iter()
            .find(|s| s.lang == lang && !s.text.trim().is_empty())
            .map(|s| s.text.clone())
    };

    let word_key = if example.text.is_empty() {
        fallback_key.to_string()
    } else {
        example.text.clone()
    };

    Some(ExampleSentence {
        source_text: text("jpn")?,
        target_text: text("eng")?,
        word_key,
        word_id,
        common: example.common,
    })
}
