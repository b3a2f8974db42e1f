//! Sorting functionality for Table

use std::cmp::Ordering;

use rayon::prelude::*;
use tracing::debug;

use super::table::{Table, PARALLEL_THRESHOLD};

/// Sorting direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    /// Header marker shown next to the active sort column
    pub fn marker(self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Ascending => "ascending",
            SortDirection::Descending => "descending",
        }
    }
}

/// The active sort column. At most one column carries it at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub column: usize,
    pub direction: SortDirection,
}

impl Table {
    pub fn sort_state(&self) -> Option<SortState> {
        self.sort
    }

    /// Direction the next sort on `col` will use: the same column flips,
    /// any other column starts ascending.
    pub fn next_direction(&self, col: usize) -> SortDirection {
        match self.sort {
            Some(state) if state.column == col => state.direction.toggled(),
            _ => SortDirection::Ascending,
        }
    }

    /// Sort rows by `col`, toggling direction when `col` is already the
    /// active sort column. Returns the new sort state, or `None` (and leaves
    /// the table untouched) when the column does not exist.
    pub fn sort_by_column(&mut self, col: usize) -> Option<SortState> {
        if col >= self.col_count() {
            return None;
        }
        let direction = self.next_direction(col);
        self.sort_rows(col, direction);
        self.sort
    }

    /// Sort rows by `col` in an explicit direction.
    ///
    /// Descending order is the exact reverse of the ascending order of the
    /// current rows, so toggling a sorted column reverses it row for row.
    /// Returns the permutation applied: new row `i` was old row `perm[i]`.
    pub fn sort_rows(&mut self, col: usize, direction: SortDirection) -> Vec<usize> {
        if col >= self.col_count() {
            return (0..self.row_count()).collect();
        }
        let mut permutation = self.get_sorted_row_indices(col);
        if direction == SortDirection::Descending {
            permutation.reverse();
        }
        self.apply_row_permutation(&permutation);
        self.sort = Some(SortState { column: col, direction });
        debug!(column = col, direction = direction.as_str(), rows = self.row_count(), "sorted rows");
        permutation
    }

    /// Row indices in ascending order of the trimmed text in `col`.
    /// Equal keys keep their current relative order.
    /// Uses parallel processing for large tables
    pub fn get_sorted_row_indices(&self, col: usize) -> Vec<usize> {
        let use_parallel = self.row_count() >= PARALLEL_THRESHOLD;

        let key_of = |(idx, row): (usize, &super::Row)| -> (usize, String) {
            (idx, row.cell(col).map(|s| s.trim().to_owned()).unwrap_or_default())
        };

        let mut keyed: Vec<(usize, String)> = if use_parallel {
            self.rows().par_iter().enumerate().map(key_of).collect()
        } else {
            self.rows().iter().enumerate().map(key_of).collect()
        };

        let cmp_fn = |(i, a): &(usize, String), (j, b): &(usize, String)| -> Ordering {
            a.cmp(b).then(i.cmp(j))
        };

        if use_parallel {
            keyed.par_sort_unstable_by(cmp_fn);
        } else {
            keyed.sort_unstable_by(cmp_fn);
        }

        keyed.into_iter().map(|(idx, _)| idx).collect()
    }

    /// Reorder rows so that new row `i` is old row `permutation[i]`
    fn apply_row_permutation(&mut self, permutation: &[usize]) {
        let mut old: Vec<Option<super::Row>> = std::mem::take(self.rows_mut())
            .into_iter()
            .map(Some)
            .collect();
        let sorted = permutation
            .iter()
            .filter_map(|&idx| old.get_mut(idx).and_then(Option::take))
            .collect();
        *self.rows_mut() = sorted;
    }
}
