use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to read log file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize report rows: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Invalid line grammar: {0}")]
    InvalidGrammar(String),

    #[error(
        "Too many unparsed lines: {failed} of {total} exceed the {max_error_percent}% threshold, \
         the log format has probably changed"
    )]
    ParseQuality {
        failed: u64,
        total: u64,
        max_error_percent: f64,
    },

    #[error("No log files found in {0}")]
    NoLogFound(PathBuf),

    #[error("Report template error: {0}")]
    Template(String),
}

pub type Result<T> = std::result::Result<T, Error>;
