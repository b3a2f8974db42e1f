use std::time::{Duration, Instant};

use rayon::prelude::*;
use tracing::debug;

use crate::debounce::Debouncer;
use super::filter::CategoryFilter;
use super::search::SearchFilter;
use super::table::{Table, PARALLEL_THRESHOLD};

/// Default quiet period before a typed search term is applied
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Query state of one table instance: the applied search term, the
/// selected category filter, and the search control's pending debounce.
///
/// Visibility is never cached: [`TableQuery::visible_rows`] reads the live
/// rows every time, so sorting or appending rows cannot leave stale indices.
#[derive(Debug, Clone)]
pub struct TableQuery {
    search: SearchFilter,
    category: CategoryFilter,
    pending_search: Debouncer<String>,
}

impl Default for TableQuery {
    fn default() -> Self {
        Self::new(SEARCH_DEBOUNCE)
    }
}

impl TableQuery {
    pub fn new(search_debounce: Duration) -> Self {
        Self {
            search: SearchFilter::default(),
            category: CategoryFilter::All,
            pending_search: Debouncer::new(search_debounce),
        }
    }

    pub fn search(&self) -> &SearchFilter {
        &self.search
    }

    pub fn category(&self) -> &CategoryFilter {
        &self.category
    }

    /// Apply a search term immediately, dropping any pending input
    pub fn set_search(&mut self, term: &str) {
        self.pending_search.cancel();
        self.search = SearchFilter::new(term);
        debug!(term = %self.search.term(), "search applied");
    }

    /// Record a keystroke in the search control. The term is applied once
    /// input has been stable for the debounce window.
    pub fn input_search(&mut self, term: &str, now: Instant) {
        self.pending_search.trigger(term.to_string(), now);
    }

    pub fn search_pending(&self) -> bool {
        self.pending_search.is_pending()
    }

    /// Apply pending search input whose window has elapsed.
    /// Returns true when the visible set may have changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.pending_search.poll(now) {
            Some(term) => {
                self.set_search(&term);
                true
            }
            None => false,
        }
    }

    /// Apply pending search input now (e.g. on Enter)
    pub fn commit_search(&mut self) -> bool {
        match self.pending_search.flush() {
            Some(term) => {
                self.set_search(&term);
                true
            }
            None => false,
        }
    }

    pub fn set_category(&mut self, filter: CategoryFilter) {
        debug!(filter = %filter, "category filter applied");
        self.category = filter;
    }

    pub fn is_visible(&self, row: &super::Row) -> bool {
        self.search.matches(row) && self.category.matches(row)
    }

    /// Indices of visible rows, in table order.
    /// Uses parallel processing for large tables
    pub fn visible_rows(&self, table: &Table) -> Vec<usize> {
        let rows = table.rows();
        if rows.len() * table.col_count().max(1) >= PARALLEL_THRESHOLD {
            rows.par_iter()
                .enumerate()
                .filter(|(_, row)| self.is_visible(row))
                .map(|(idx, _)| idx)
                .collect()
        } else {
            rows.iter()
                .enumerate()
                .filter(|(_, row)| self.is_visible(row))
                .map(|(idx, _)| idx)
                .collect()
        }
    }

    pub fn visible_count(&self, table: &Table) -> usize {
        table.rows_iter().filter(|row| self.is_visible(row)).count()
    }
}
