/// Structured error types for salarymap-core operations.
///
/// Uses `thiserror` for better API surface and error composition.
/// The binary crate (salarymap-cli) can still use `anyhow` for convenience,
/// but library consumers get structured, composable errors.
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for dataset acquisition and normalization
#[derive(Error, Debug)]
pub enum EtlError {
    /// The remote dataset could not be retrieved. Fatal at startup:
    /// no query traffic is ever served without data.
    #[error("dataset fetch failed: {reason}")]
    Fetch { reason: String },

    /// Raw CSV is missing from the data directory
    #[error("raw dataset not found: {path:?}")]
    MissingFile { path: PathBuf },

    /// A row does not match the expected shape. Fatal at load time;
    /// there is no partial-success mode.
    #[error("malformed row {row}: {reason}")]
    Parse { row: usize, reason: String },

    /// CSV reading or writing failed
    #[error("CSV error in {path:?}: {source}")]
    Csv { path: PathBuf, source: csv::Error },

    /// Archive extraction failed
    #[error("archive error: {source}")]
    Archive {
        #[from]
        source: zip::result::ZipError,
    },

    /// I/O operation failed
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

/// Result type alias for salarymap-core operations
pub type Result<T> = std::result::Result<T, EtlError>;

impl EtlError {
    /// Create a fetch error
    pub fn fetch(reason: impl Into<String>) -> Self {
        Self::Fetch {
            reason: reason.into(),
        }
    }

    /// Create a missing file error
    pub fn missing_file(path: impl Into<PathBuf>) -> Self {
        Self::MissingFile { path: path.into() }
    }

    /// Create a parse error for the given 0-based data row
    pub fn parse(row: usize, reason: impl Into<String>) -> Self {
        Self::Parse {
            row,
            reason: reason.into(),
        }
    }

    /// Create a CSV error with the offending path
    pub fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        Self::Csv {
            path: path.into(),
            source,
        }
    }
}
