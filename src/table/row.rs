/// One record of the table: its cell text plus the two tags the
/// category filter looks at.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Row {
    pub cells: Vec<String>,
    pub category: Option<String>,
    pub status: Option<String>,
}

impl Row {
    pub fn new(cells: Vec<String>) -> Self {
        Self { cells, category: None, status: None }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn cell(&self, col: usize) -> Option<&str> {
        self.cells.get(col).map(|s| s.as_str())
    }

    /// Text content of the whole row, cells separated by a single space
    pub fn text(&self) -> String {
        self.cells.join(" ")
    }

    /// Lower-cased text content, the haystack for the search filter
    pub fn search_text(&self) -> String {
        self.text().to_lowercase()
    }

    /// Whether either tag equals `value`
    pub fn has_tag(&self, value: &str) -> bool {
        self.category.as_deref() == Some(value) || self.status.as_deref() == Some(value)
    }
}
