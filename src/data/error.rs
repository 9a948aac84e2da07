use std::path::PathBuf;

use thiserror::Error;

/// Convenience result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Terminal failures: the file cannot be read as a series at all.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Raised by the dispatcher before the file is opened.
    #[error("unsupported file extension: .{extension} (expected .csv or .json)")]
    UnsupportedFormat { extension: String },

    /// A line of the strict whitespace-delimited format could not be parsed.
    #[error("line {line}: {message} (raw='{raw}')")]
    StrictRowParse {
        line: usize,
        raw: String,
        message: String,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

/// The JSON document as a whole could not be decoded.
///
/// Reported alongside an empty series rather than propagated.
#[derive(Debug, Error)]
pub enum DocumentDecodeError {
    #[error("invalid JSON document: {0}")]
    Syntax(#[from] serde_json::Error),

    #[error("JSON document must be an array of objects, found {found}")]
    NotAnArray { found: &'static str },
}

/// A single record was skipped; ingestion continues with the next one.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordError {
    #[error("record {record}: field '{field}' value '{raw}' is not a valid {expected}")]
    Coercion {
        record: usize,
        field: &'static str,
        raw: String,
        expected: &'static str,
    },

    #[error("record {record}: expected a JSON object")]
    NotAnObject { record: usize },

    #[error("record {record}: {message}")]
    Malformed { record: usize, message: String },
}

impl RecordError {
    /// 1-based position of the offending record (data rows, header excluded).
    pub fn record(&self) -> usize {
        match self {
            RecordError::Coercion { record, .. }
            | RecordError::NotAnObject { record }
            | RecordError::Malformed { record, .. } => *record,
        }
    }
}
