//! Read-only views of a finished database, used to sanity-check ingestion.

use std::path::Path;

use artworks_core::models::PaintingRow;
use rusqlite::types::Value as SqlValue;
use rusqlite::Connection;
use serde::Serialize;
use serde_json::{Number, Value};

use crate::error::Result;

/// Shape and size of one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableSummary {
    pub name: String,
    pub columns: usize,
    pub rows: u64,
    /// Rows with a non-null, non-empty `image_url`; `None` when the table
    /// has no such column.
    pub valid_image_urls: Option<u64>,
}

/// One stored row of `paintings`, nulls included.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoredPainting {
    pub id: i64,
    #[serde(flatten)]
    pub row: PaintingRow,
}

/// Open (or create) the database at `path` for inspection.
pub fn open_database(path: &Path) -> Result<Connection> {
    Ok(Connection::open(path)?)
}

/// Summarize every table of the database.
pub fn summarize(conn: &Connection) -> Result<Vec<TableSummary>> {
    let names: Vec<String> = {
        let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type = 'table'")?;
        let rows = stmt.query_map([], |row| row.get(0))?;
        rows.collect::<rusqlite::Result<Vec<String>>>()?
    };

    let mut summaries = Vec::with_capacity(names.len());
    for name in names {
        let table = quote_identifier(&name);

        let column_names: Vec<String> = {
            let mut stmt = conn.prepare(&format!("PRAGMA table_info({})", table))?;
            let rows = stmt.query_map([], |row| row.get(1))?;
            rows.collect::<rusqlite::Result<Vec<String>>>()?
        };

        let rows: i64 = conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
            row.get(0)
        })?;

        let valid_image_urls = if column_names.iter().any(|c| c == "image_url") {
            let valid: i64 = conn.query_row(
                &format!(
                    "SELECT COUNT(*) FROM {} WHERE image_url IS NOT NULL AND image_url != ''",
                    table
                ),
                [],
                |row| row.get(0),
            )?;
            Some(valid as u64)
        } else {
            None
        };

        summaries.push(TableSummary {
            name,
            columns: column_names.len(),
            rows: rows as u64,
            valid_image_urls,
        });
    }

    Ok(summaries)
}

/// Every row of `paintings` in id order.
pub fn dump_paintings(conn: &Connection) -> Result<Vec<StoredPainting>> {
    let mut stmt = conn.prepare(
        "SELECT id, title, artist, date, medium, accession_number, url, image_url, height, width
         FROM paintings ORDER BY id",
    )?;
    let rows = stmt.query_map([], |row| {
        let cell = |idx: usize| row.get::<_, SqlValue>(idx).map(sql_to_json);
        Ok(StoredPainting {
            id: row.get(0)?,
            row: PaintingRow {
                title: cell(1)?,
                artist: cell(2)?,
                date: cell(3)?,
                medium: cell(4)?,
                accession_number: cell(5)?,
                url: cell(6)?,
                image_url: cell(7)?,
                height: cell(8)?,
                width: cell(9)?,
            },
        })
    })?;
    let paintings = rows.collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(paintings)
}

fn sql_to_json(value: SqlValue) -> Value {
    match value {
        SqlValue::Null => Value::Null,
        SqlValue::Integer(i) => Value::from(i),
        SqlValue::Real(f) => Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null),
        SqlValue::Text(s) => Value::String(s),
        SqlValue::Blob(b) => Value::from(b),
    }
}

fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
