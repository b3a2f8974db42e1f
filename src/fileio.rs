use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::table::Table;

/// Header names recognized as the category column when none is configured
const CATEGORY_HEADERS: &[&str] = &["type", "category"];
/// Header names recognized as the status column when none is configured
const STATUS_HEADERS: &[&str] = &["status"];

/// Detected file format
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FileFormat {
    Csv,
    Tsv,
}

impl FileFormat {
    /// Detect format from file extension
    fn from_extension(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "csv" => Some(FileFormat::Csv),
            "tsv" => Some(FileFormat::Tsv),
            _ => None,
        }
    }

    fn delimiter(&self) -> u8 {
        match self {
            FileFormat::Csv => b',',
            FileFormat::Tsv => b'\t',
        }
    }
}

/// Which columns feed the row tags. `None` means detect from the header row.
#[derive(Debug, Clone, Default)]
pub struct TagColumns {
    pub category: Option<String>,
    pub status: Option<String>,
}

/// Result of loading a file, including any warnings
pub struct LoadResult {
    pub table: Table,
    pub warnings: Vec<String>,
}

pub struct FileIO {
    pub file_path: PathBuf,
    format: FileFormat,
}

fn find_header(headers: &[String], wanted: &str) -> Option<usize> {
    headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(wanted.trim()))
}

/// Resolve a configured column name, or detect one from `candidates`
fn resolve_column(
    headers: &[String],
    configured: Option<&str>,
    candidates: &[&str],
    warnings: &mut Vec<String>,
) -> Option<usize> {
    match configured {
        Some(name) => {
            let col = find_header(headers, name);
            if col.is_none() {
                warnings.push(format!("Column not found: {}", name));
            }
            col
        }
        None => candidates.iter().find_map(|c| find_header(headers, c)),
    }
}

impl FileIO {
    pub fn new(file_path: PathBuf) -> Self {
        // Default to CSV for unknown extensions
        let format = FileFormat::from_extension(&file_path).unwrap_or(FileFormat::Csv);
        Self { file_path, format }
    }

    pub fn file_name(&self) -> String {
        self.file_path.display().to_string()
    }

    pub fn format(&self) -> FileFormat {
        self.format
    }

    /// Directory exports are written to: the one holding the loaded file
    pub fn export_dir(&self) -> PathBuf {
        self.file_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Load the table. The first record is the header row; short rows are
    /// padded to the widest row.
    pub fn load_table(&self, tags: &TagColumns) -> Result<LoadResult> {
        let path = &self.file_path;
        let file = File::open(path).map_err(|e| Error::io(path, e))?;
        let reader = BufReader::with_capacity(1 << 20, file); // 1 MB

        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(self.format.delimiter())
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::Fields)
            .from_reader(reader);

        let mut records: Vec<Vec<String>> = Vec::new();
        let mut max_cols: usize = 0;
        let mut needs_padding = false;

        for result in csv_reader.records() {
            let record = result?;
            let row: Vec<String> = record.iter().map(|s| s.to_string()).collect();

            if row.len() > max_cols {
                if max_cols > 0 {
                    needs_padding = true;
                }
                max_cols = row.len();
            } else if row.len() < max_cols {
                needs_padding = true;
            }
            records.push(row);
        }

        let mut warnings = Vec::new();

        if needs_padding {
            warnings.push(format!(
                "Padded rows with empty cells (max width: {} columns)",
                max_cols
            ));
            for row in records.iter_mut() {
                row.resize(max_cols, String::new());
            }
        }

        let mut records = records.into_iter();
        let headers = match records.next() {
            Some(headers) => headers,
            None => {
                warnings.push(format!("Empty file: {}", path.display()));
                Vec::new()
            }
        };
        let records: Vec<Vec<String>> = records.collect();

        let category_col = resolve_column(&headers, tags.category.as_deref(), CATEGORY_HEADERS, &mut warnings);
        let status_col = resolve_column(&headers, tags.status.as_deref(), STATUS_HEADERS, &mut warnings);
        debug!(?category_col, ?status_col, "tag columns resolved");

        let table = Table::from_records(headers, records, category_col, status_col);
        info!(
            path = %path.display(),
            rows = table.row_count(),
            cols = table.col_count(),
            "table loaded"
        );

        Ok(LoadResult { table, warnings })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(suffix: &str, lines: &[&str]) -> NamedTempFile {
        let mut file = NamedTempFile::with_suffix(suffix).unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        file
    }

    #[test]
    fn test_format_detection() {
        assert_eq!(FileFormat::from_extension(Path::new("crops.csv")), Some(FileFormat::Csv));
        assert_eq!(FileFormat::from_extension(Path::new("crops.TSV")), Some(FileFormat::Tsv));
        assert_eq!(FileFormat::from_extension(Path::new("crops.txt")), None);
    }

    #[test]
    fn test_detects_tag_columns() {
        let file = write_csv(".csv", &[
            "Name,Type,Status",
            "Wheat,grain,Active",
            "Cow,livestock,Sold",
        ]);
        let result = FileIO::new(file.path().to_path_buf())
            .load_table(&TagColumns::default())
            .unwrap();

        let table = result.table;
        assert_eq!(table.headers(), &["Name", "Type", "Status"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.category_col(), Some(1));
        assert_eq!(table.status_col(), Some(2));
        let cow = table.get_row(1).unwrap();
        assert_eq!(cow.category.as_deref(), Some("livestock"));
        assert_eq!(cow.status.as_deref(), Some("Sold"));
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_configured_tag_columns() {
        let file = write_csv(".csv", &["Field,Crop,Stage", "North,Corn,Growing"]);
        let tags = TagColumns { category: Some("crop".into()), status: Some("Phase".into()) };
        let result = FileIO::new(file.path().to_path_buf()).load_table(&tags).unwrap();

        assert_eq!(result.table.category_col(), Some(1));
        assert_eq!(result.table.status_col(), None);
        assert_eq!(result.warnings, vec!["Column not found: Phase".to_string()]);
    }

    #[test]
    fn test_padding_warning() {
        let file = write_csv(".csv", &["a,b,c", "1,2", "3,4,5"]);
        let result = FileIO::new(file.path().to_path_buf())
            .load_table(&TagColumns::default())
            .unwrap();

        assert_eq!(result.table.col_count(), 3);
        assert_eq!(result.table.get_cell(0, 2), Some(""));
        assert!(result.warnings[0].contains("Padded"));
    }

    #[test]
    fn test_tsv() {
        let file = write_csv(".tsv", &["Name\tStatus", "Oats\tPlanned"]);
        let result = FileIO::new(file.path().to_path_buf())
            .load_table(&TagColumns::default())
            .unwrap();
        assert_eq!(result.table.get_row(0).unwrap().status.as_deref(), Some("Planned"));
    }

    #[test]
    fn test_missing_file() {
        let result = FileIO::new(PathBuf::from("/nonexistent/crops.csv")).load_table(&TagColumns::default());
        assert!(matches!(result, Err(Error::Io { .. })));
    }

    #[test]
    fn test_export_dir() {
        assert_eq!(FileIO::new(PathBuf::from("crops.csv")).export_dir(), PathBuf::from("."));
        assert_eq!(FileIO::new(PathBuf::from("/data/crops.csv")).export_dir(), PathBuf::from("/data"));
    }
}
