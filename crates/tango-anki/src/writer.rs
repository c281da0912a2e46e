use std::fs::{self, File};
use std::path::Path;

use tango_core::{DeckError, Result};

use crate::row::DeckRow;

/// Write rows as headerless `front,back,tags` CSV, replacing any existing file.
///
/// Rows are validated before the file is touched. Returns the row count.
pub fn write_rows(path: &Path, rows: &[DeckRow]) -> Result<usize> {
    for row in rows {
        row.validate().map_err(|reason| DeckError::Emit {
            path: path.to_path_buf(),
            reason,
        })?;
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| DeckError::io(parent, e))?;
    }

    let file = File::create(path).map_err(|e| DeckError::io(path, e))?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);

    let emit_error = |e: csv::Error| DeckError::Emit {
        path: path.to_path_buf(),
        reason: e.to_string(),
    };

    for row in rows {
        writer
            .write_record([row.front.as_str(), row.back.as_str(), row.tags.as_str()])
            .map_err(emit_error)?;
    }
    writer.flush().map_err(|e| DeckError::io(path, e))?;

    tracing::info!("Created: {} ({} cards)", path.display(), rows.len());
    Ok(rows.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row::Tags;

    fn row(front: &str, back: &str, tag: &str) -> DeckRow {
        DeckRow::new(front, back, &Tags::new(tag))
    }

    fn read_back(path: &Path) -> Vec<Vec<String>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_path(path)
            .unwrap();
        reader
            .records()
            .map(|r| r.unwrap().iter().map(str::to_string).collect())
            .collect()
    }

    #[test]
    fn test_writes_three_columns_without_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deck.csv");
        let rows = vec![
            row("日", "<b>Meanings:</b> day, sun", "N5"),
            row("本", "say \"book\"<br>line\nbreak", "N5"),
        ];

        assert_eq!(write_rows(&path, &rows).unwrap(), 2);

        let records = read_back(&path);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], vec!["日", "<b>Meanings:</b> day, sun", "N5"]);
        assert_eq!(records[1][1], "say \"book\"<br>line\nbreak");
    }

    #[test]
    fn test_creates_parent_dirs_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("N5").join("Tier_1").join("kanji.csv");

        write_rows(&path, &[row("a", "b", "N5"), row("c", "d", "N5")]).unwrap();
        write_rows(&path, &[row("e", "f", "N5")]).unwrap();

        let records = read_back(&path);
        assert_eq!(records, vec![vec!["e", "f", "N5"]]);
    }

    #[test]
    fn test_invalid_row_leaves_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deck.csv");
        write_rows(&path, &[row("a", "b", "N5")]).unwrap();

        let err = write_rows(&path, &[row("x", "", "N5")]).unwrap_err();
        assert!(matches!(err, DeckError::Emit { .. }));
        assert_eq!(read_back(&path).len(), 1);
    }
}
