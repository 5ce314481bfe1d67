use artworks_core::error::ArtworksError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Column '{column}' cannot store a JSON {kind}")]
    UnsupportedValue { column: &'static str, kind: &'static str },

    #[error(transparent)]
    Read(#[from] ArtworksError),
}

pub type Result<T> = std::result::Result<T, StoreError>;
