#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Quit,
    Sort(Option<String>),   // Sort by named/numbered column, or the cursor column
    Filter(String),         // Category/status filter value ("all" clears)
    Search(String),         // Apply a search term immediately
    Export(Option<String>), // Export to file name, or the configured default
    Add,                    // Open the add-record form
    Help,
    NavigateRow(usize),     // Jump to the n-th visible row
    Unknown(String),
}

impl Command {
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();

        if let Ok(row_dest) = trimmed.parse::<usize>() {
            return Some(Command::NavigateRow(row_dest.saturating_sub(1)));
        }

        let (name, arg) = match trimmed.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, Some(rest.trim())),
            None => (trimmed, None),
        };
        let arg = arg.filter(|a| !a.is_empty());

        match name {
            "q" | "quit" => Some(Command::Quit),
            "sort" => Some(Command::Sort(arg.map(str::to_string))),
            "filter" => Some(Command::Filter(arg.unwrap_or(crate::table::filter::ALL).to_string())),
            "nofilter" => Some(Command::Filter(crate::table::filter::ALL.to_string())),
            "search" => Some(Command::Search(arg.unwrap_or("").to_string())),
            "export" | "w" => Some(Command::Export(arg.map(str::to_string))),
            "add" => Some(Command::Add),
            "help" | "h" => Some(Command::Help),
            _ => Some(Command::Unknown(trimmed.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_commands() {
        assert_eq!(Command::parse("q"), Some(Command::Quit));
        assert_eq!(Command::parse("quit"), Some(Command::Quit));
        assert_eq!(Command::parse("add"), Some(Command::Add));
        assert_eq!(Command::parse("help"), Some(Command::Help));
    }

    #[test]
    fn test_parse_sort_commands() {
        assert_eq!(Command::parse("sort"), Some(Command::Sort(None)));
        assert_eq!(Command::parse("sort Name"), Some(Command::Sort(Some("Name".into()))));
        assert_eq!(Command::parse("sort  2 "), Some(Command::Sort(Some("2".into()))));
    }

    #[test]
    fn test_parse_filter_commands() {
        assert_eq!(Command::parse("filter Active"), Some(Command::Filter("Active".into())));
        assert_eq!(Command::parse("filter"), Some(Command::Filter("all".into())));
        assert_eq!(Command::parse("nofilter"), Some(Command::Filter("all".into())));
    }

    #[test]
    fn test_parse_search_keeps_inner_spaces() {
        assert_eq!(
            Command::parse("search winter wheat"),
            Some(Command::Search("winter wheat".into()))
        );
        assert_eq!(Command::parse("search"), Some(Command::Search(String::new())));
    }

    #[test]
    fn test_parse_export() {
        assert_eq!(Command::parse("export"), Some(Command::Export(None)));
        assert_eq!(
            Command::parse("w crops_export.csv"),
            Some(Command::Export(Some("crops_export.csv".into())))
        );
    }

    #[test]
    fn test_parse_row_navigation() {
        assert_eq!(Command::parse("1"), Some(Command::NavigateRow(0)));
        assert_eq!(Command::parse("10"), Some(Command::NavigateRow(9)));
        assert_eq!(Command::parse("0"), Some(Command::NavigateRow(0)));
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(
            Command::parse("foobar"),
            Some(Command::Unknown("foobar".to_string()))
        );
        assert_eq!(Command::parse(""), Some(Command::Unknown(String::new())));
    }

    #[test]
    fn test_parse_with_whitespace() {
        assert_eq!(Command::parse("  q  "), Some(Command::Quit));
        assert_eq!(Command::parse("\tsort\n"), Some(Command::Sort(None)));
    }
}
