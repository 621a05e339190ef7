use thiserror::Error;

/// Errors reported while loading or reading tables.
///
/// Allocator exhaustion and out-of-range vector access are not represented
/// here: both are invariant violations and abort through a panic.
#[derive(Error, Debug)]
pub enum SqlviewError {
    #[error("Table '{0}' not found")]
    TableNotFound(String),

    #[error("Column '{column}' not found in table '{table}'")]
    ColumnNotFound { table: String, column: String },

    #[error("Duplicate column '{column}' in table '{table}'")]
    DuplicateColumn { table: String, column: String },

    #[error("Row width mismatch in table '{table}': expected {expected} values, found {found}")]
    RowWidthMismatch {
        table: String,
        expected: usize,
        found: usize,
    },

    #[error("Row {row} out of range: table '{table}' has {row_count} rows")]
    RowOutOfRange {
        table: String,
        row: usize,
        row_count: usize,
    },

    #[error("Foreign key cycle detected: {path}")]
    ForeignKeyCycle { path: String },

    #[error("Source error: {0}")]
    Source(String),
}

pub type Result<T> = std::result::Result<T, SqlviewError>;
