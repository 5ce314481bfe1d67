//! Counting sinks over a record stream.

use artworks_core::error::Result;
use artworks_core::models::{ClassificationTally, Record};
use tracing::debug;

use crate::projector::{classification_label, matches_classification};

/// Count every record in the stream.
pub fn count_records<I>(records: I) -> Result<u64>
where
    I: IntoIterator<Item = Result<Record>>,
{
    let mut count = 0u64;
    for record in records {
        record?;
        count += 1;
    }
    debug!("Counted {} records", count);
    Ok(count)
}

/// Count the records whose `Classification` equals `target`.
pub fn count_classification<I>(records: I, target: &str) -> Result<u64>
where
    I: IntoIterator<Item = Result<Record>>,
{
    let mut seen = 0u64;
    let mut matched = 0u64;
    for record in records {
        seen += 1;
        if matches_classification(&record?, target) {
            matched += 1;
        }
    }
    debug!("{} of {} records classified as '{}'", matched, seen, target);
    Ok(matched)
}

/// Tally records per classification label. Records without one are ignored.
pub fn tally_classifications<I>(records: I) -> Result<ClassificationTally>
where
    I: IntoIterator<Item = Result<Record>>,
{
    let mut tally = ClassificationTally::new();
    for record in records {
        if let Some(label) = classification_label(&record?) {
            tally.record(label);
        }
    }
    debug!(
        "Tallied {} records across {} classifications",
        tally.total(),
        tally.len()
    );
    Ok(tally)
}
