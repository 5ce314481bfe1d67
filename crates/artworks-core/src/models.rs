use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// One artwork record: the untyped key/value mapping of a single JSON object.
///
/// No field is guaranteed to be present; lookups must treat absence as null.
pub type Record = serde_json::Map<String, Value>;

/// Source keys read from an artwork record.
pub mod fields {
    pub const TITLE: &str = "Title";
    pub const ARTIST: &str = "Artist";
    pub const DATE: &str = "Date";
    pub const MEDIUM: &str = "Medium";
    pub const ACCESSION_NUMBER: &str = "AccessionNumber";
    pub const URL: &str = "URL";
    pub const IMAGE_URL: &str = "ImageURL";
    pub const CLASSIFICATION: &str = "Classification";
    pub const HEIGHT_CM: &str = "Height (cm)";
    pub const WIDTH_CM: &str = "Width (cm)";
}

/// Fixed nine-column projection of a painting record.
///
/// Values stay untyped so that whatever the source held (including null)
/// reaches the store unchanged, apart from the artist flattening and the
/// decimal-to-float coercion of the dimensions.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PaintingRow {
    pub title: Value,
    pub artist: Value,
    pub date: Value,
    pub medium: Value,
    pub accession_number: Value,
    pub url: Value,
    pub image_url: Value,
    pub height: Value,
    pub width: Value,
}

impl PaintingRow {
    /// Column names in insertion order, paired with their values.
    pub fn columns(&self) -> [(&'static str, &Value); 9] {
        [
            ("title", &self.title),
            ("artist", &self.artist),
            ("date", &self.date),
            ("medium", &self.medium),
            ("accession_number", &self.accession_number),
            ("url", &self.url),
            ("image_url", &self.image_url),
            ("height", &self.height),
            ("width", &self.width),
        ]
    }
}

/// Running count of records per classification label.
///
/// Labels keep their first-encounter order so that ties in [`sorted`]
/// come out deterministically.
///
/// [`sorted`]: ClassificationTally::sorted
#[derive(Debug, Clone, Default)]
pub struct ClassificationTally {
    counts: Vec<(String, u64)>,
    index: HashMap<String, usize>,
}

impl ClassificationTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one more record carrying `label`.
    pub fn record(&mut self, label: impl Into<String>) {
        let label = label.into();
        match self.index.get(&label) {
            Some(&pos) => self.counts[pos].1 += 1,
            None => {
                self.index.insert(label.clone(), self.counts.len());
                self.counts.push((label, 1));
            }
        }
    }

    /// Count for `label`, zero when never seen.
    pub fn get(&self, label: &str) -> u64 {
        self.index
            .get(label)
            .map(|&pos| self.counts[pos].1)
            .unwrap_or(0)
    }

    /// Number of distinct labels.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|(_, n)| n).sum()
    }

    /// `(label, count)` pairs by count descending; ties keep encounter order.
    pub fn sorted(&self) -> Vec<(String, u64)> {
        let mut out = self.counts.clone();
        out.sort_by(|a, b| b.1.cmp(&a.1));
        out
    }
}
