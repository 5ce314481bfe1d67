//! One function per task, each writing its report to `out`.

use std::io::Write;
use std::path::Path;

use anyhow::{bail, Result};
use artworks_core::formatting::{
    format_classification_total, format_ingest_done, format_tally_line, format_total,
};
use artworks_core::settings::Settings;
use artworks_data::counter::{count_classification, count_records, tally_classifications};
use artworks_data::reader::RecordStream;
use artworks_store::error::StoreError;
use artworks_store::inspect::{dump_paintings, open_database, summarize, TableSummary};
use artworks_store::paintings::{ingest_paintings, PaintingStore};
use tracing::info;

/// Dispatch on `settings.task`.
pub fn run(settings: &Settings, out: &mut dyn Write) -> Result<()> {
    match settings.task.as_str() {
        "count" => run_count(&settings.input, out),
        "classification" => run_classification(&settings.input, &settings.classification, out),
        "tally" => run_tally(&settings.input, out),
        "ingest" => run_ingest(
            &settings.input,
            &settings.database,
            &settings.classification,
            out,
        ),
        "inspect" => run_inspect(&settings.database, out),
        "dump" => run_dump(&settings.database, out),
        unknown => bail!("Unknown task: {}", unknown),
    }
}

pub fn run_count(input: &Path, out: &mut dyn Write) -> Result<()> {
    let total = count_records(RecordStream::open(input)?)?;
    writeln!(out, "{}", format_total(total))?;
    Ok(())
}

pub fn run_classification(input: &Path, label: &str, out: &mut dyn Write) -> Result<()> {
    let total = count_classification(RecordStream::open(input)?, label)?;
    writeln!(out, "{}", format_classification_total(label, total))?;
    Ok(())
}

pub fn run_tally(input: &Path, out: &mut dyn Write) -> Result<()> {
    let tally = tally_classifications(RecordStream::open(input)?)?;
    for (label, count) in tally.sorted() {
        writeln!(out, "{}", format_tally_line(&label, count))?;
    }
    Ok(())
}

/// Create the table, stream the input and insert every matching record.
pub fn run_ingest(input: &Path, database: &Path, label: &str, out: &mut dyn Write) -> Result<()> {
    let store = PaintingStore::open(database)?;
    let inserted = ingest_paintings(&store, RecordStream::open(input)?, label)?;
    drop(store);

    info!("Ingested {} rows into {}", inserted, database.display());
    writeln!(out, "{}", format_ingest_done(database))?;
    Ok(())
}

/// Print table shapes. SQLite failures are reported, not propagated.
pub fn run_inspect(database: &Path, out: &mut dyn Write) -> Result<()> {
    let summaries = match open_database(database).and_then(|conn| summarize(&conn)) {
        Ok(s) => s,
        Err(err @ StoreError::Sqlite(_)) => {
            writeln!(out, "{}", err)?;
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    if summaries.is_empty() {
        writeln!(out, "No tables found in the database.")?;
        return Ok(());
    }

    writeln!(
        out,
        "Database '{}' contains {} table(s):\n",
        database.display(),
        summaries.len()
    )?;
    for summary in &summaries {
        write_summary(summary, out)?;
    }
    Ok(())
}

fn write_summary(summary: &TableSummary, out: &mut dyn Write) -> Result<()> {
    writeln!(out, "Table: {}", summary.name)?;
    writeln!(out, "  Number of columns: {}", summary.columns)?;
    writeln!(out, "  Number of rows: {}", summary.rows)?;
    if let Some(valid) = summary.valid_image_urls {
        writeln!(out, "  Rows with valid image_url: {}", valid)?;
    }
    writeln!(out)?;
    Ok(())
}

/// Print every stored painting as one JSON object per line.
pub fn run_dump(database: &Path, out: &mut dyn Write) -> Result<()> {
    let conn = open_database(database)?;
    for painting in dump_paintings(&conn)? {
        writeln!(out, "{}", serde_json::to_string(&painting)?)?;
    }
    Ok(())
}

// ── Tests ──────────────────────────────────────────────────────────────────────
