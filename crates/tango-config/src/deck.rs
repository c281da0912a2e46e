use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tango_core::{DeckError, TierStrategy};

/// Examples per kanji card unless overridden
pub const DEFAULT_KANJI_EXAMPLES: usize = 3;
/// Cap on examples per vocabulary card unless overridden
pub const DEFAULT_VOCAB_EXAMPLES: usize = 5;

/// Output layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeckMode {
    /// One file per JLPT level
    #[default]
    General,
    /// One file per JLPT level and frequency tier
    Tiered,
}

impl FromStr for DeckMode {
    type Err = DeckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "general" => Ok(DeckMode::General),
            "tiered" => Ok(DeckMode::Tiered),
            other => Err(DeckError::InvalidConfiguration(format!(
                "unknown deck mode '{other}' (expected general or tiered)"
            ))),
        }
    }
}

impl fmt::Display for DeckMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeckMode::General => f.write_str("general"),
            DeckMode::Tiered => f.write_str("tiered"),
        }
    }
}

/// Which deck kinds to build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeckSelection {
    Kanji,
    Vocab,
    #[default]
    All,
}

impl DeckSelection {
    pub fn kanji(&self) -> bool {
        matches!(self, DeckSelection::Kanji | DeckSelection::All)
    }

    pub fn vocab(&self) -> bool {
        matches!(self, DeckSelection::Vocab | DeckSelection::All)
    }
}

impl FromStr for DeckSelection {
    type Err = DeckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "kanji" => Ok(DeckSelection::Kanji),
            "vocab" | "vocabulary" => Ok(DeckSelection::Vocab),
            "all" => Ok(DeckSelection::All),
            other => Err(DeckError::InvalidConfiguration(format!(
                "unknown deck selection '{other}' (expected kanji, vocab or all)"
            ))),
        }
    }
}

impl fmt::Display for DeckSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeckSelection::Kanji => f.write_str("kanji"),
            DeckSelection::Vocab => f.write_str("vocab"),
            DeckSelection::All => f.write_str("kanji + vocab"),
        }
    }
}

fn default_include_examples() -> bool {
    true
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct DeckConfig {
    pub mode: DeckMode,
    pub decks: DeckSelection,
    pub tier_strategy: TierStrategy,
    #[serde(default = "default_include_examples")]
    pub include_examples: bool,
    /// Overrides both per-kind defaults
    pub max_examples: Option<usize>,
    pub common_only: bool,
    /// Append grade / commonness / form tags after the level tag
    pub extra_tags: bool,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            mode: DeckMode::default(),
            decks: DeckSelection::default(),
            tier_strategy: TierStrategy::default(),
            include_examples: default_include_examples(),
            max_examples: None,
            common_only: false,
            extra_tags: false,
        }
    }
}

impl DeckConfig {
    pub fn kanji_examples(&self) -> usize {
        if !self.include_examples {
            return 0;
        }
        self.max_examples.unwrap_or(DEFAULT_KANJI_EXAMPLES)
    }

    pub fn vocab_examples(&self) -> usize {
        if !self.include_examples {
            return 0;
        }
        self.max_examples.unwrap_or(DEFAULT_VOCAB_EXAMPLES)
    }
}
