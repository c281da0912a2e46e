use std::path::{Path, PathBuf};

/// Errors raised while building decks
#[derive(Debug, thiserror::Error)]
pub enum DeckError {
    #[error("Input file not found: {}", path.display())]
    MissingFile { path: PathBuf },

    #[error("Malformed record #{record} in {}: {reason}", path.display())]
    MalformedData {
        path: PathBuf,
        record: usize,
        reason: String,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Invalid JSON in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}: {reason}", path.display())]
    Emit { path: PathBuf, reason: String },
}

pub type Result<T> = std::result::Result<T, DeckError>;

impl DeckError {
    pub fn malformed(path: &Path, record: usize, reason: impl Into<String>) -> Self {
        DeckError::MalformedData {
            path: path.to_path_buf(),
            record,
            reason: reason.into(),
        }
    }

    pub fn io(path: &Path, source: std::io::Error) -> Self {
        DeckError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Fail with `MissingFile` if `path` does not exist
pub fn require_file(path: &Path) -> Result<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(DeckError::MissingFile {
            path: path.to_path_buf(),
        })
    }
}
