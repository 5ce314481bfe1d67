//! The `paintings` table and the ingestion sink that fills it.

use std::path::Path;

use artworks_core::models::{PaintingRow, Record};
use artworks_data::projector::{matches_classification, project_painting};
use rusqlite::types::Value as SqlValue;
use rusqlite::{params_from_iter, Connection};
use serde_json::Value;
use tracing::{debug, info};

use crate::error::{Result, StoreError};

const CREATE_PAINTINGS: &str = "CREATE TABLE IF NOT EXISTS paintings (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT,
    artist TEXT,
    date TEXT,
    medium TEXT,
    accession_number TEXT,
    url TEXT,
    image_url TEXT,
    height REAL,
    width REAL
)";

const INSERT_PAINTING: &str = "INSERT INTO paintings
    (title, artist, date, medium, accession_number, url, image_url, height, width)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)";

/// SQLite-backed store of painting rows.
///
/// The connection stays in autocommit mode, so every insert is its own
/// committed transaction.
pub struct PaintingStore {
    conn: Connection,
}

impl PaintingStore {
    /// Open (or create) the database at `path` and ensure the table exists.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        debug!("Opened database {}", path.display());
        Self::from_connection(conn)
    }

    /// Wrap an existing connection and ensure the table exists.
    pub fn from_connection(conn: Connection) -> Result<Self> {
        let store = Self { conn };
        store.create_table()?;
        Ok(store)
    }

    /// Create the `paintings` table unless it already exists.
    pub fn create_table(&self) -> Result<()> {
        self.conn.execute(CREATE_PAINTINGS, [])?;
        Ok(())
    }

    /// Insert one row and return its id.
    pub fn insert(&self, row: &PaintingRow) -> Result<i64> {
        let values = row
            .columns()
            .into_iter()
            .map(|(column, value)| to_sql_value(column, value))
            .collect::<Result<Vec<SqlValue>>>()?;

        let mut stmt = self.conn.prepare_cached(INSERT_PAINTING)?;
        stmt.execute(params_from_iter(values))?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

/// Insert the projection of every record classified as `target`.
///
/// Returns the number of inserted rows. The first read or insert error
/// aborts the run; rows inserted before it stay committed.
pub fn ingest_paintings<I>(store: &PaintingStore, records: I, target: &str) -> Result<u64>
where
    I: IntoIterator<Item = artworks_core::error::Result<Record>>,
{
    let mut inserted = 0u64;
    for record in records {
        let record = record?;
        if !matches_classification(&record, target) {
            continue;
        }
        store.insert(&project_painting(&record))?;
        inserted += 1;
    }
    info!("Inserted {} '{}' rows", inserted, target);
    Ok(inserted)
}

/// Map one JSON value onto an SQLite value.
///
/// Booleans become 0/1 integers. Arrays and objects have no column
/// representation and are rejected.
pub fn to_sql_value(column: &'static str, value: &Value) -> Result<SqlValue> {
    match value {
        Value::Null => Ok(SqlValue::Null),
        Value::Bool(b) => Ok(SqlValue::Integer(i64::from(*b))),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(SqlValue::Integer(i))
            } else if let Some(f) = n.as_f64() {
                Ok(SqlValue::Real(f))
            } else {
                Err(StoreError::UnsupportedValue {
                    column,
                    kind: "number",
                })
            }
        }
        Value::String(s) => Ok(SqlValue::Text(s.clone())),
        Value::Array(_) => Err(StoreError::UnsupportedValue {
            column,
            kind: "array",
        }),
        Value::Object(_) => Err(StoreError::UnsupportedValue {
            column,
            kind: "object",
        }),
    }
}
