//! CSV export of a table.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{Error, Result};
use crate::table::Table;

pub const CSV_CONTENT_TYPE: &str = "text/csv";
pub const DEFAULT_EXPORT_FILENAME: &str = "data.csv";

/// A serialized file ready to be saved
#[derive(Debug, Clone, PartialEq)]
pub struct Export {
    pub filename: String,
    pub content_type: &'static str,
    pub content: String,
}

impl Export {
    /// Save the export as `filename` inside `dir`, returning the written path
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(&self.filename);
        fs::write(&path, &self.content).map_err(|e| Error::io(&path, e))?;
        info!(path = %path.display(), bytes = self.content.len(), "export written");
        Ok(path)
    }
}

/// Double embedded quotes; wrap in quotes only when the cell holds a comma
fn escape_field(cell: &str) -> String {
    let escaped = cell.replace('"', "\"\"");
    if escaped.contains(',') {
        format!("\"{}\"", escaped)
    } else {
        escaped
    }
}

/// One line of `width` trimmed, escaped cells
fn line<'a>(cells: impl Iterator<Item = &'a str>, width: usize) -> String {
    let mut fields: Vec<String> = cells.map(|c| escape_field(c.trim())).collect();
    fields.resize(width, String::new());
    fields.join(",")
}

/// Serialize the header row and every row (visible or not) in table order.
///
/// Cells are trimmed, embedded quotes are doubled and a cell containing a
/// comma is quoted. Lines are joined with `\n`, with no trailing newline.
pub fn to_csv(table: &Table) -> String {
    let width = table.col_count();
    let mut lines = Vec::with_capacity(table.row_count() + 1);

    if !table.headers().is_empty() {
        lines.push(line(table.headers().iter().map(|s| s.as_str()), width));
    }
    for row in table.rows_iter() {
        lines.push(line(row.cells.iter().map(|s| s.as_str()), width));
    }

    lines.join("\n")
}

/// One row as a single CSV line
pub fn row_to_csv_line(cells: &[String]) -> String {
    line(cells.iter().map(|s| s.as_str()), cells.len())
}

pub fn export_table(table: &Table, filename: &str) -> Export {
    Export {
        filename: filename.to_string(),
        content_type: CSV_CONTENT_TYPE,
        content: to_csv(table),
    }
}
