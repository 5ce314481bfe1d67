//! Input framing detection.
//!
//! A dataset is either one JSON array of objects or newline-delimited JSON.
//! The first non-whitespace character decides which.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use artworks_core::error::{ArtworksError, Result};

/// How the records of an input file are framed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordFormat {
    /// A single top-level JSON array of objects.
    JsonArray,
    /// One JSON object per line.
    JsonLines,
}

impl RecordFormat {
    /// `[` selects array framing; anything else, including an empty file,
    /// selects line framing.
    pub fn from_first_char(first: Option<char>) -> Self {
        match first {
            Some('[') => RecordFormat::JsonArray,
            _ => RecordFormat::JsonLines,
        }
    }
}

/// Detect the framing of the file at `path`.
pub fn detect_format(path: &Path) -> Result<RecordFormat> {
    sniff_first_char(path).map(RecordFormat::from_first_char)
}

/// Return the first non-whitespace character of the file at `path`, or
/// `None` when the file is empty or all whitespace.
///
/// Only a prefix of the file is read and the handle is closed on return, so
/// the caller must open the file again for the actual parse.
pub fn sniff_first_char(path: &Path) -> Result<Option<char>> {
    let file_read = |source| ArtworksError::FileRead {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(file_read)?;
    first_non_whitespace(BufReader::new(file)).map_err(file_read)
}

/// Decode UTF-8 characters from `reader` until one is not whitespace.
pub fn first_non_whitespace<R: Read>(reader: R) -> std::io::Result<Option<char>> {
    let mut bytes = reader.bytes();
    let mut buf = [0u8; 4];

    while let Some(lead) = bytes.next() {
        let lead = lead?;
        let width = utf8_width(lead).ok_or_else(invalid_utf8)?;
        buf[0] = lead;
        for slot in buf.iter_mut().take(width).skip(1) {
            *slot = bytes.next().transpose()?.ok_or_else(invalid_utf8)?;
        }

        let decoded = std::str::from_utf8(&buf[..width]).map_err(|_| invalid_utf8())?;
        if let Some(ch) = decoded.chars().next() {
            if !ch.is_whitespace() {
                return Ok(Some(ch));
            }
        }
    }

    Ok(None)
}

/// Encoded length announced by a UTF-8 lead byte.
fn utf8_width(lead: u8) -> Option<usize> {
    match lead {
        0x00..=0x7F => Some(1),
        0xC2..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF4 => Some(4),
        _ => None,
    }
}

fn invalid_utf8() -> std::io::Error {
    std::io::Error::new(
        std::io::ErrorKind::InvalidData,
        "stream did not contain valid UTF-8",
    )
}
