use std::collections::{HashMap, HashSet};

use crate::preprocess::{DefaultPreprocessor, Preprocessor};

/// Bilingual example sentence attached to a dictionary word
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExampleSentence {
    /// Sentence in the studied language
    pub source_text: String,
    /// Translation
    pub target_text: String,
    /// Word form the corpus attached the sentence to
    pub word_key: String,
    /// Dictionary id of the owning word, if known
    pub word_id: Option<String>,
    pub common: bool,
}

/// Example sentences in corpus order, with lookup indices built once
#[derive(Debug, Default)]
pub struct ExampleCorpus {
    sentences: Vec<ExampleSentence>,
    key_index: HashMap<String, Vec<usize>>,
    id_index: HashMap<String, Vec<usize>>,
    char_index: HashMap<char, Vec<usize>>,
}

impl ExampleCorpus {
    pub fn new(sentences: Vec<ExampleSentence>) -> Self {
        let preprocessor = DefaultPreprocessor;
        let mut key_index: HashMap<String, Vec<usize>> = HashMap::new();
        let mut id_index: HashMap<String, Vec<usize>> = HashMap::new();
        let mut char_index: HashMap<char, Vec<usize>> = HashMap::new();

        for (idx, sentence) in sentences.iter().enumerate() {
            let key = preprocessor.process(&sentence.word_key);
            if !key.is_empty() {
                key_index.entry(key).or_default().push(idx);
            }
            if let Some(id) = &sentence.word_id {
                id_index.entry(id.clone()).or_default().push(idx);
            }

            let mut seen = HashSet::new();
            for c in sentence.source_text.chars() {
                if !c.is_ascii() && c.is_alphabetic() && seen.insert(c) {
                    char_index.entry(c).or_default().push(idx);
                }
            }
        }

        tracing::debug!(
            "Indexed {} example sentences ({} keys, {} characters)",
            sentences.len(),
            key_index.len(),
            char_index.len()
        );

        Self {
            sentences,
            key_index,
            id_index,
            char_index,
        }
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    /// Sentences attached to the word id or to any of its written forms
    fn word_candidates(&self, word_id: Option<&str>, forms: &[&str]) -> Vec<usize> {
        let preprocessor = DefaultPreprocessor;
        let mut candidates = Vec::new();

        if let Some(indices) = word_id.and_then(|id| self.id_index.get(id)) {
            candidates.extend(indices);
        }
        for form in forms {
            if let Some(indices) = self.key_index.get(&preprocessor.process(form)) {
                candidates.extend(indices);
            }
        }

        candidates.sort_unstable();
        candidates.dedup();
        candidates
    }

    /// Sentences whose source text contains `c`
    fn char_candidates(&self, c: char) -> Vec<usize> {
        self.char_index.get(&c).cloned().unwrap_or_default()
    }
}

/// Picks a bounded, deterministic subset of examples per entry
#[derive(Debug, Clone, Copy)]
pub struct ExampleSelector<'a> {
    corpus: &'a ExampleCorpus,
    max_examples: usize,
}

impl<'a> ExampleSelector<'a> {
    pub fn new(corpus: &'a ExampleCorpus, max_examples: usize) -> Self {
        Self {
            corpus,
            max_examples,
        }
    }

    pub fn max_examples(&self) -> usize {
        self.max_examples
    }

    /// Examples for a word, matched by id, surface form or reading
    pub fn for_word(&self, word_id: Option<&str>, forms: &[&str]) -> Selection<'a> {
        self.select(self.corpus.word_candidates(word_id, forms))
    }

    /// Examples whose sentence uses the character
    pub fn for_char(&self, c: char) -> Selection<'a> {
        self.select(self.corpus.char_candidates(c))
    }

    fn select(&self, mut candidates: Vec<usize>) -> Selection<'a> {
        let sentences = &self.corpus.sentences;
        // common first, then shorter, then corpus order
        candidates.sort_by_key(|&idx| {
            let s = &sentences[idx];
            (!s.common, s.source_text.chars().count(), idx)
        });

        Selection {
            corpus: self.corpus,
            order: candidates.into_iter(),
            seen: HashSet::new(),
            remaining: self.max_examples,
        }
    }
}

/// Lazy selection result. Each `ExampleSelector` call recomputes it.
pub struct Selection<'a> {
    corpus: &'a ExampleCorpus,
    order: std::vec::IntoIter<usize>,
    seen: HashSet<&'a str>,
    remaining: usize,
}

impl<'a> Iterator for Selection<'a> {
    type Item = &'a ExampleSentence;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let corpus = self.corpus;
        for idx in self.order.by_ref() {
            let sentence = &corpus.sentences[idx];
            // same sentence can be attached to several senses
            if self.seen.insert(sentence.source_text.as_str()) {
                self.remaining -= 1;
                return Some(sentence);
            }
        }

        self.remaining = 0;
        None
    }
}
