//! Error types for fieldbook.

use std::path::{Path, PathBuf};

/// Result type alias for fieldbook operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised at the IO edges of the viewer.
///
/// Table operations themselves never fail; everything here comes from
/// files, the config, or the system clipboard.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error{}: {source}", at_path(.path))]
    Io {
        path: Option<PathBuf>,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to read config file {path:?}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path:?}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Clipboard error: {message}")]
    Clipboard { message: String },
}

fn at_path(path: &Option<PathBuf>) -> String {
    match path {
        Some(path) => format!(" at {}", path.display()),
        None => String::new(),
    }
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io { path: None, source }
    }
}

impl Error {
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Error::Io { path: Some(path.to_path_buf()), source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_display() {
        let err = Error::io(Path::new("/tmp/crops.csv"), std::io::Error::other("gone"));
        assert_eq!(err.to_string(), "I/O error at /tmp/crops.csv: gone");

        let err: Error = std::io::Error::other("closed").into();
        assert_eq!(err.to_string(), "I/O error: closed");
    }
}
