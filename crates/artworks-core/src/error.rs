use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while reading artwork datasets.
#[derive(Error, Debug)]
pub enum ArtworksError {
    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A JSON document could not be parsed.
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// The top-level JSON array is structurally broken.
    #[error("Malformed JSON array at byte {offset}: {reason}")]
    MalformedArray { offset: u64, reason: String },

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the artwork crates.
pub type Result<T> = std::result::Result<T, ArtworksError>;
