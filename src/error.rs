use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RosterError {
    #[error("Required sheet '{table}' not found at {}", path.display())]
    MissingInputTable { table: &'static str, path: PathBuf },

    #[error("No existing schedule data found")]
    EmptySchedule,

    #[error("No valid date found in existing schedule")]
    NoValidDate,

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),
}

pub type Result<T> = std::result::Result<T, RosterError>;
