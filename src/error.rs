// Error types for the grouping library
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, GroupError>;

#[derive(Error, Debug)]
pub enum GroupError {
    #[error("Unknown key kind: {0}. Supported: length, bytes, initial, final, vowels")]
    UnknownKey(String),
    #[error("Unknown bucket order: {0}. Supported: key, first-seen")]
    UnknownOrder(String),
    #[error("Unknown separator: {0}. Supported: whitespace, lines, comma")]
    UnknownSeparator(String),
    #[error("Unknown output format: {0}. Supported: human, plain, json, table")]
    UnknownFormat(String),
    #[error("Invalid config file {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("Failed to read {path}: {source}")]
    Input {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
