pub mod assembler;
pub mod dictionary;
pub mod examples;
pub mod frequency;
pub mod jlpt;
pub mod kanjidic;
pub mod loader;
pub mod pipeline;
mod schema;
pub mod script;


pub use assembler::{DeckAssembler, DeckFile, PartitionKey};
pub use dictionary::{FormType, JMdict, Sense, WordEntry};
pub use examples::ExamplesLoader;
pub use frequency::{KanjiTiers, TieredEntry, tier_kanji, tier_words};
pub use jlpt::{DeckLevel, JlptLevel, classify_kanji, classify_word};
pub use kanjidic::{KanjiEntry, Kanjidic};
pub use loader::{SourceLoader, Sources};
pub use pipeline::{RunSummary, run};
