use super::row::Row;

/// Case-insensitive containment filter over a row's whole text content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilter {
    /// Lower-cased search term; empty passes every row
    term: String,
}

impl SearchFilter {
    pub fn new(term: &str) -> Self {
        Self { term: term.to_lowercase() }
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn is_empty(&self) -> bool {
        self.term.is_empty()
    }

    pub fn matches(&self, row: &Row) -> bool {
        self.term.is_empty() || row.search_text().contains(&self.term)
    }
}
