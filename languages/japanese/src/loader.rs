use std::fs;
use std::path::Path;

use tango_config::{DeckConfig, SourcesConfig};
use tango_core::error::require_file;
use tango_core::{ExampleCorpus, Result};

use crate::dictionary::JMdict;
use crate::examples::ExamplesLoader;
use crate::kanjidic::Kanjidic;

/// Everything a run needs, loaded once and never mutated
pub struct Sources {
    pub kanjidic: Kanjidic,
    /// Absent when no vocabulary deck is requested
    pub jmdict: Option<JMdict>,
    /// Empty when examples are disabled
    pub examples: ExampleCorpus,
    /// Malformed records dropped across all files
    pub skipped: usize,
}

pub struct SourceLoader;

impl SourceLoader {
    /// Check every required path up front, then load.
    ///
    /// Kanjidic is always required: vocabulary levels and tiers derive from it.
    pub fn load(sources: &SourcesConfig, deck: &DeckConfig) -> Result<Sources> {
        let want_examples = deck.include_examples
            && ((deck.decks.kanji() && deck.kanji_examples() > 0)
                || (deck.decks.vocab() && deck.vocab_examples() > 0));

        require_file(&sources.kanjidic)?;
        if deck.decks.vocab() {
            require_file(&sources.jmdict)?;
        }
        if want_examples {
            require_file(&sources.jmdict_examples)?;
        }

        let kanjidic = Kanjidic::load(&sources.kanjidic)?;
        let mut skipped = kanjidic.skipped();

        let jmdict = if deck.decks.vocab() {
            let dict = JMdict::load(&sources.jmdict)?;
            skipped += dict.skipped();
            Some(dict)
        } else {
            None
        };

        let examples = if want_examples {
            let (corpus, bad) = ExamplesLoader::load(&sources.jmdict_examples)?;
            skipped += bad;
            corpus
        } else {
            tracing::info!("Example sentences disabled");
            ExampleCorpus::default()
        };

        if skipped > 0 {
            tracing::warn!("Skipped {skipped} malformed records");
        }

        Ok(Sources {
            kanjidic,
            jmdict,
            examples,
            skipped,
        })
    }
}

/// Read a source file, `MissingFile` when absent
pub(crate) fn read_source(path: &Path) -> Result<String> {
    require_file(path)?;
    fs::read_to_string(path).map_err(|e| tango_core::DeckError::io(path, e))
}
