// ABOUTME: Error types for parameter table loading
// ABOUTME: Distinguishes unreadable inputs, malformed tables, and tables without data rows

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TableError {
    #[error("Parameter table not found or unreadable: {path}: {source}")]
    NotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed parameter table: {0}")]
    Schema(#[from] SchemaError),

    #[error("Parameter table {path} has no data rows")]
    EmptyTable { path: String },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("duplicate column name '{column}' in header")]
    DuplicateColumn { column: String },

    #[error("line {line}: expected {expected} field(s), found {found}")]
    FieldCountMismatch {
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: {message}")]
    Malformed { line: u64, message: String },
}

impl TableError {
    /// Line number of the offending row, when the error concerns a single row
    pub fn line(&self) -> Option<u64> {
        match self {
            TableError::Schema(SchemaError::FieldCountMismatch { line, .. })
            | TableError::Schema(SchemaError::Malformed { line, .. }) => Some(*line),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, TableError>;
