use std::fmt;

use super::row::Row;

/// Sentinel filter value that shows every row
pub const ALL: &str = "all";

/// Filter on a row's category or status tag.
///
/// A row passes when *either* tag equals the selected value, so one control
/// spans both attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Tag(String),
}

impl CategoryFilter {
    /// Parse a control value; `"all"` selects the sentinel
    pub fn from_value(value: &str) -> Self {
        if value == ALL {
            CategoryFilter::All
        } else {
            CategoryFilter::Tag(value.to_string())
        }
    }

    pub fn value(&self) -> &str {
        match self {
            CategoryFilter::All => ALL,
            CategoryFilter::Tag(tag) => tag,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, CategoryFilter::All)
    }

    pub fn matches(&self, row: &Row) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Tag(tag) => row.has_tag(tag),
        }
    }

    /// The filter after this one in `choices` ("all" first), wrapping around.
    /// Cycling backwards when `forward` is false.
    pub fn cycle(&self, choices: &[String], forward: bool) -> Self {
        let mut options: Vec<CategoryFilter> = vec![CategoryFilter::All];
        options.extend(choices.iter().map(|c| CategoryFilter::from_value(c)));
        options.dedup();

        let len = options.len();
        let current = options.iter().position(|o| o == self).unwrap_or(0);
        let next = if forward {
            (current + 1) % len
        } else {
            (current + len - 1) % len
        };
        options.swap_remove(next)
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}
