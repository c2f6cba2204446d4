use std::path::PathBuf;

use thiserror::Error;

/// Error type definitions
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error")]
    Io(#[source] std::io::Error),

    #[error("Source '{table}' not found: {}", path.display())]
    SourceNotFound { table: String, path: PathBuf },

    #[error("Unsupported source format: {0}")]
    UnsupportedFormat(String),

    #[error("Excel error: {0}")]
    Excel(String),

    #[error("CSV error")]
    Csv(#[source] csv::Error),

    #[error("JSON error")]
    Json(#[source] serde_json::Error),

    #[error("Column not found: table '{table}', column '{column}'")]
    ColumnNotFound { table: String, column: String },

    #[error("Invalid value in table '{table}', row {row}, column '{column}': '{value}'")]
    InvalidValue {
        table: String,
        row: usize,
        column: String,
        value: String,
    },

    #[error("Duplicate join key in table '{table}': '{key}'")]
    DuplicateJoinKey { table: String, key: String },

    #[error("Empty data: {0}")]
    EmptyData(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Csv(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<calamine::Error> for Error {
    fn from(err: calamine::Error) -> Self {
        Error::Excel(err.to_string())
    }
}
