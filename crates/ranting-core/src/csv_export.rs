//! CSV export of flat records.
//!
//! The header comes from the first record's field order. A cell is quoted only
//! when it contains a comma, a double quote or a line break, and embedded quotes
//! are doubled. Rows are joined by `\n` with no trailing terminator. An empty
//! collection produces nothing at all, not even a header.

use std::fs;
use std::path::{Path, PathBuf};

use csv::{QuoteStyle, Terminator, WriterBuilder};
use serde::Serialize;

use crate::error::{CoreError, Result};

/// Render `rows` as CSV text, or `None` when there is nothing to export.
pub fn to_csv<T: Serialize>(rows: &[T]) -> Result<Option<String>> {
    if rows.is_empty() {
        return Ok(None);
    }
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    for row in rows {
        writer.serialize(row)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| CoreError::Csv(csv::Error::from(e.into_error())))?;
    let mut text = String::from_utf8_lossy(&bytes).into_owned();
    if text.ends_with('\n') {
        text.pop();
    }
    Ok(Some(text))
}

/// Write `rows` to `<dir>/<name>.csv` and return the path.
///
/// Returns `None` without touching the filesystem when `rows` is empty.
pub fn write_csv<T: Serialize>(dir: &Path, name: &str, rows: &[T]) -> Result<Option<PathBuf>> {
    let Some(text) = to_csv(rows)? else {
        tracing::info!(name, "nothing to export");
        return Ok(None);
    };
    let path = dir.join(format!("{name}.csv"));
    fs::write(&path, text).map_err(|e| CoreError::io(&path, e))?;
    tracing::info!(path = %path.display(), rows = rows.len(), "CSV exported");
    Ok(Some(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Row {
        a: String,
        b: u32,
    }

    #[derive(Serialize)]
    struct Sparse {
        name: &'static str,
        note: Option<&'static str>,
    }

    #[test]
    fn quotes_cells_with_commas() {
        let rows = [Row {
            a: "x,y".to_string(),
            b: 1,
        }];
        assert_eq!(to_csv(&rows).unwrap().as_deref(), Some("a,b\n\"x,y\",1"));
    }

    #[test]
    fn doubles_embedded_quotes_and_keeps_newlines() {
        let rows = [Row {
            a: "say \"hi\"\nnow".to_string(),
            b: 2,
        }];
        assert_eq!(
            to_csv(&rows).unwrap().as_deref(),
            Some("a,b\n\"say \"\"hi\"\"\nnow\",2")
        );
    }

    #[test]
    fn missing_values_render_empty() {
        let rows = [
            Sparse {
                name: "Ahmad",
                note: None,
            },
            Sparse {
                name: "Siti",
                note: Some("ok"),
            },
        ];
        assert_eq!(
            to_csv(&rows).unwrap().as_deref(),
            Some("name,note\nAhmad,\nSiti,ok")
        );
    }

    #[test]
    fn empty_collection_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let rows: Vec<Row> = Vec::new();
        assert_eq!(to_csv(&rows).unwrap(), None);
        assert_eq!(write_csv(dir.path(), "program_data", &rows).unwrap(), None);
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn writes_named_file() {
        let dir = tempfile::tempdir().unwrap();
        let rows = [Row {
            a: "x".to_string(),
            b: 3,
        }];
        let path = write_csv(dir.path(), "kader_data", &rows).unwrap().unwrap();
        assert_eq!(path.file_name().unwrap(), "kader_data.csv");
        assert_eq!(fs::read_to_string(path).unwrap(), "a,b\nx,3");
    }
}
