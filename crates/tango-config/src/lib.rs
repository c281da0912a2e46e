use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::error::Category;
use tango_core::{DeckError, Result};

pub use self::deck::{DeckConfig, DeckMode, DeckSelection};
pub use self::sources::SourcesConfig;

pub mod deck;
pub mod sources;

fn default_output_dir() -> PathBuf {
    PathBuf::from("anki_decks")
}

/// Run configuration. Built once at startup, read-only afterwards.
///
/// The `--config` file uses this shape, every field optional.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    pub sources: SourcesConfig,
    pub deck: DeckConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            sources: SourcesConfig::default(),
            deck: DeckConfig::default(),
        }
    }
}

impl Config {
    /// Defaults, then config file, then environment, then `cli`
    pub fn load(config_file: Option<&Path>, cli: ConfigOverrides) -> Result<Self> {
        let base = match config_file {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };
        let config = base.apply(&ConfigOverrides::from_env().merge(cli))?;
        tracing::debug!(
            "Effective config: {}",
            serde_json::to_string(&config).unwrap_or_default()
        );
        Ok(config)
    }

    /// Load a JSON config file. Unknown keys and bad values are `InvalidConfiguration`.
    pub fn from_file(path: &Path) -> Result<Self> {
        tracing::info!("Loading config from {}", path.display());
        if !path.exists() {
            return Err(DeckError::MissingFile {
                path: path.to_path_buf(),
            });
        }
        let data = fs::read_to_string(path).map_err(|e| DeckError::io(path, e))?;
        serde_json::from_str(&data).map_err(|source| match source.classify() {
            Category::Data => {
                DeckError::InvalidConfiguration(format!("{}: {source}", path.display()))
            }
            _ => DeckError::Parse {
                path: path.to_path_buf(),
                source,
            },
        })
    }

    /// Apply an override layer. String-valued choices are validated here.
    pub fn apply(mut self, overrides: &ConfigOverrides) -> Result<Self> {
        if let Some(dir) = &overrides.output_dir {
            self.output_dir = dir.clone();
        }
        if let Some(path) = &overrides.jmdict {
            self.sources.jmdict = path.clone();
        }
        if let Some(path) = &overrides.jmdict_examples {
            self.sources.jmdict_examples = path.clone();
        }
        if let Some(path) = &overrides.kanjidic {
            self.sources.kanjidic = path.clone();
        }

        if let Some(strategy) = &overrides.tier_strategy {
            self.deck.tier_strategy = strategy.parse()?;
        }
        if let Some(mode) = &overrides.mode {
            self.deck.mode = mode.parse()?;
        }
        if let Some(decks) = &overrides.decks {
            self.deck.decks = decks.parse()?;
        }

        if let Some(max) = overrides.max_examples {
            self.deck.max_examples = Some(max);
        }
        if let Some(no_examples) = overrides.no_examples {
            self.deck.include_examples = !no_examples;
        }
        if let Some(common_only) = overrides.common_only {
            self.deck.common_only = common_only;
        }
        if let Some(extra_tags) = overrides.extra_tags {
            self.deck.extra_tags = extra_tags;
        }

        Ok(self)
    }
}

/// Partial configuration from the environment or the command line
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ConfigOverrides {
    pub output_dir: Option<PathBuf>,
    pub jmdict: Option<PathBuf>,
    pub jmdict_examples: Option<PathBuf>,
    pub kanjidic: Option<PathBuf>,
    pub max_examples: Option<usize>,
    pub no_examples: Option<bool>,
    pub common_only: Option<bool>,
    pub extra_tags: Option<bool>,
    pub tier_strategy: Option<String>,
    pub mode: Option<String>,
    pub decks: Option<String>,
}

impl ConfigOverrides {
    pub fn from_env() -> Self {
        Self {
            output_dir: env::var_os("TANGO_OUTPUT_DIR").map(PathBuf::from),
            tier_strategy: env::var("TANGO_TIER_STRATEGY").ok(),
            mode: env::var("TANGO_MODE").ok(),
            max_examples: env::var("TANGO_MAX_EXAMPLES")
                .ok()
                .and_then(|v| v.parse().ok()),
            ..Self::default()
        }
    }

    /// Fields set in `other` win
    pub fn merge(self, other: ConfigOverrides) -> Self {
        Self {
            output_dir: other.output_dir.or(self.output_dir),
            jmdict: other.jmdict.or(self.jmdict),
            jmdict_examples: other.jmdict_examples.or(self.jmdict_examples),
            kanjidic: other.kanjidic.or(self.kanjidic),
            max_examples: other.max_examples.or(self.max_examples),
            no_examples: other.no_examples.or(self.no_examples),
            common_only: other.common_only.or(self.common_only),
            extra_tags: other.extra_tags.or(self.extra_tags),
            tier_strategy: other.tier_strategy.or(self.tier_strategy),
            mode: other.mode.or(self.mode),
            decks: other.decks.or(self.decks),
        }
    }
}
