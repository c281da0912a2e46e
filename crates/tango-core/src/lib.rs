pub mod error;
pub mod examples;
pub mod preprocess;
pub mod tier;

pub use error::{DeckError, Result};
pub use examples::{ExampleCorpus, ExampleSelector, ExampleSentence, Selection};
pub use tier::{Ranked, Tier, TierStrategy, assign_tiers};
