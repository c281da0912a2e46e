use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_jmdict() -> PathBuf {
    PathBuf::from("jmdict-eng-3.6.2.json")
}

fn default_jmdict_examples() -> PathBuf {
    PathBuf::from("jmdict-examples-eng-3.6.2.json")
}

fn default_kanjidic() -> PathBuf {
    PathBuf::from("kanjidic2-en-3.6.2.json")
}

/// Dictionary input files (jmdict-simplified JSON releases)
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SourcesConfig {
    #[serde(default = "default_jmdict")]
    pub jmdict: PathBuf,
    /// JMdict build with Tatoeba examples attached to senses
    #[serde(default = "default_jmdict_examples")]
    pub jmdict_examples: PathBuf,
    #[serde(default = "default_kanjidic")]
    pub kanjidic: PathBuf,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            jmdict: default_jmdict(),
            jmdict_examples: default_jmdict_examples(),
            kanjidic: default_kanjidic(),
        }
    }
}
