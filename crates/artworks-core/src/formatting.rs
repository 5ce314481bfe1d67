//! Plain-text lines printed by the dataset tasks.

use std::path::Path;

/// Summary line of the plain record count.
///
/// # Examples
///
/// ```
/// use artworks_core::formatting::format_total;
///
/// assert_eq!(format_total(138_151), "Total objects: 138151");
/// ```
pub fn format_total(count: u64) -> String {
    format!("Total objects: {}", count)
}

/// Summary line of the count restricted to one classification.
///
/// # Examples
///
/// ```
/// use artworks_core::formatting::format_classification_total;
///
/// assert_eq!(
///     format_classification_total("Painting", 2_300),
///     "Total objects with Classification 'Painting': 2300"
/// );
/// ```
pub fn format_classification_total(label: &str, count: u64) -> String {
    format!("Total objects with Classification '{}': {}", label, count)
}

/// One line of the classification tally.
pub fn format_tally_line(label: &str, count: u64) -> String {
    format!("{} ({})", label, count)
}

/// Confirmation printed once ingestion has finished.
pub fn format_ingest_done(database: &Path) -> String {
    format!("Database created and stored in '{}'", database.display())
}
