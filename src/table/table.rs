use rayon::prelude::*;

use super::row::Row;
use super::sort::SortState;

/// Threshold for using parallel processing (rows * cols)
pub const PARALLEL_THRESHOLD: usize = 10_000;

/// In-memory table of records: header names, rows in display order, and
/// the active sort indicator.
#[derive(Debug, Clone, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Row>,
    /// Column holding the category tag, if any
    category_col: Option<usize>,
    /// Column holding the status tag, if any
    status_col: Option<usize>,
    pub(super) sort: Option<SortState>,
}

impl Table {
    pub fn new(headers: Vec<String>, rows: Vec<Row>) -> Self {
        Self {
            headers,
            rows,
            category_col: None,
            status_col: None,
            sort: None,
        }
    }

    /// Build a table from raw records, tagging each row from the given
    /// category and status columns.
    pub fn from_records(
        headers: Vec<String>,
        records: Vec<Vec<String>>,
        category_col: Option<usize>,
        status_col: Option<usize>,
    ) -> Self {
        let mut table = Self {
            headers,
            rows: Vec::with_capacity(records.len()),
            category_col,
            status_col,
            sort: None,
        };
        for cells in records {
            let row = table.tag_row(cells);
            table.rows.push(row);
        }
        table
    }

    fn tag_row(&self, cells: Vec<String>) -> Row {
        let tag = |col: Option<usize>| {
            col.and_then(|c| cells.get(c))
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };
        let category = tag(self.category_col);
        let status = tag(self.status_col);
        Row { cells, category, status }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn header(&self, col: usize) -> Option<&str> {
        self.headers.get(col).map(|s| s.as_str())
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub(super) fn rows_mut(&mut self) -> &mut Vec<Row> {
        &mut self.rows
    }

    pub fn rows_iter(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn col_count(&self) -> usize {
        self.rows
            .iter()
            .map(|r| r.cells.len())
            .max()
            .unwrap_or(0)
            .max(self.headers.len())
    }

    pub fn get_row(&self, row: usize) -> Option<&Row> {
        self.rows.get(row)
    }

    pub fn get_cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.cell(col)
    }

    pub fn category_col(&self) -> Option<usize> {
        self.category_col
    }

    pub fn status_col(&self) -> Option<usize> {
        self.status_col
    }

    /// Find a column by header name, ignoring case and surrounding whitespace
    pub fn column_index(&self, name: &str) -> Option<usize> {
        let wanted = name.trim().to_lowercase();
        self.headers
            .iter()
            .position(|h| h.trim().to_lowercase() == wanted)
    }

    /// Column by 1-based number or by header name
    pub fn resolve_column(&self, name: &str) -> Option<usize> {
        match name.trim().parse::<usize>() {
            Ok(n) if n >= 1 && n <= self.col_count() => Some(n - 1),
            Ok(_) => None,
            Err(_) => self.column_index(name),
        }
    }

    /// Append a record at the end of the table.
    /// The row order is no longer sorted afterwards, so the sort indicator is cleared.
    pub fn push_row(&mut self, cells: Vec<String>) {
        let row = self.tag_row(cells);
        self.rows.push(row);
        self.sort = None;
    }

    /// Every distinct category and status tag, in first-seen order
    pub fn distinct_tags(&self) -> Vec<String> {
        let mut tags: Vec<String> = Vec::new();
        for row in &self.rows {
            for tag in [&row.category, &row.status].into_iter().flatten() {
                if !tags.iter().any(|t| t == tag) {
                    tags.push(tag.clone());
                }
            }
        }
        tags
    }

    /// Display width of each column (header included), clamped to `[3, max_width]`.
    /// Uses parallel processing for large tables
    pub fn col_widths(&self, max_width: usize) -> Vec<usize> {
        let col_count = self.col_count();
        let width_of = |col: usize| -> usize {
            let header = self.header(col).map(crate::util::display_width).unwrap_or(0);
            self.rows
                .iter()
                .filter_map(|row| row.cell(col))
                .map(crate::util::display_width)
                .max()
                .unwrap_or(0)
                .max(header)
                .max(3)
                .min(max_width)
        };

        if self.row_count() * col_count >= PARALLEL_THRESHOLD && col_count > 1 {
            (0..col_count).into_par_iter().map(width_of).collect()
        } else {
            (0..col_count).map(width_of).collect()
        }
    }
}
