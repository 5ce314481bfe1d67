//! Field extraction and painting-row projection.

use artworks_core::models::{fields, PaintingRow, Record};
use serde_json::{Number, Value};

/// `true` when the record's `Classification` is exactly the string `target`.
///
/// Records without a classification, or with a non-string one, never match.
pub fn matches_classification(record: &Record, target: &str) -> bool {
    record
        .get(fields::CLASSIFICATION)
        .and_then(|v| v.as_str())
        .map(|label| label == target)
        .unwrap_or(false)
}

/// Label used when tallying classifications.
///
/// Strings are used as-is, any other non-null value by its JSON text.
/// Returns `None` when the field is absent or null.
pub fn classification_label(record: &Record) -> Option<String> {
    match record.get(fields::CLASSIFICATION)? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Project a record onto the nine painting columns.
pub fn project_painting(record: &Record) -> PaintingRow {
    PaintingRow {
        title: field(record, fields::TITLE),
        artist: flatten_artist(record.get(fields::ARTIST)),
        date: field(record, fields::DATE),
        medium: field(record, fields::MEDIUM),
        accession_number: field(record, fields::ACCESSION_NUMBER),
        url: field(record, fields::URL),
        image_url: field(record, fields::IMAGE_URL),
        height: coerce_dimension(record.get(fields::HEIGHT_CM)),
        width: coerce_dimension(record.get(fields::WIDTH_CM)),
    }
}

fn field(record: &Record, key: &str) -> Value {
    record.get(key).cloned().unwrap_or(Value::Null)
}

/// Join an artist list with `", "`; any other value passes through.
///
/// String elements are used verbatim, other elements by their JSON text.
pub fn flatten_artist(value: Option<&Value>) -> Value {
    match value {
        Some(Value::Array(items)) => {
            let names: Vec<String> = items
                .iter()
                .map(|item| match item {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect();
            Value::String(names.join(", "))
        }
        Some(other) => other.clone(),
        None => Value::Null,
    }
}

/// Convert a non-integer decimal to a float; leave everything else alone.
///
/// Numbers are kept at full precision by the parser, so `12.50` arrives as
/// an exact decimal and leaves here as the float `12.5`.
pub fn coerce_dimension(value: Option<&Value>) -> Value {
    match value {
        Some(Value::Number(n)) if !(n.is_i64() || n.is_u64()) => n
            .as_f64()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .unwrap_or_else(|| Value::Number(n.clone())),
        Some(other) => other.clone(),
        None => Value::Null,
    }
}
