//! Streaming record reader.
//!
//! Turns a dataset file into a single-pass sequence of [`Record`]s whatever
//! its framing. Array files are decoded one element at a time so the whole
//! array never sits in memory; line files are parsed line by line. In both
//! framings a value that is not a JSON object is dropped without a trace.

use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

use artworks_core::error::{ArtworksError, Result};
use artworks_core::models::Record;
use serde::de::IgnoredAny;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::format::{detect_format, RecordFormat};

// ── RecordStream ──────────────────────────────────────────────────────────────

/// Lazy sequence of records read from one input.
///
/// Not rewindable: reading again means opening the file again.
pub enum RecordStream<R: BufRead = BufReader<File>> {
    Array(ArrayRecords<R>),
    Lines(LineRecords<R>),
}

impl RecordStream<BufReader<File>> {
    /// Sniff the framing of `path`, then re-open it for the real parse.
    pub fn open(path: &Path) -> Result<Self> {
        let format = detect_format(path)?;
        let file = File::open(path).map_err(|source| ArtworksError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Reading {} as {:?}", path.display(), format);

        let reader = BufReader::new(file);
        Ok(match format {
            RecordFormat::JsonArray => Self::array(reader),
            RecordFormat::JsonLines => Self::lines(reader),
        })
    }
}

impl<R: BufRead> RecordStream<R> {
    /// Read `reader` as one top-level JSON array of objects.
    pub fn array(reader: R) -> Self {
        RecordStream::Array(ArrayRecords::new(reader))
    }

    /// Read `reader` as newline-delimited JSON.
    pub fn lines(reader: R) -> Self {
        RecordStream::Lines(LineRecords::new(reader))
    }

    pub fn format(&self) -> RecordFormat {
        match self {
            RecordStream::Array(_) => RecordFormat::JsonArray,
            RecordStream::Lines(_) => RecordFormat::JsonLines,
        }
    }
}

impl<R: BufRead> Iterator for RecordStream<R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            RecordStream::Array(inner) => inner.next(),
            RecordStream::Lines(inner) => inner.next(),
        }
    }
}

// ── ArrayRecords ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ArrayState {
    /// Nothing consumed yet.
    Start,
    /// After `[`, before the first element.
    First,
    /// After at least one element.
    Rest,
    Done,
}

/// Records of a top-level JSON array, decoded one element at a time.
///
/// The brackets and separators are walked byte by byte; each object is
/// handed to `serde_json` straight from the reader, which stops exactly at
/// the closing brace. Other elements are validated and skipped. Numbers
/// are scanned here because the decoder would swallow the byte after them.
/// Any structural problem is fatal and ends the sequence.
pub struct ArrayRecords<R> {
    reader: countio::Counter<R>,
    state: ArrayState,
}

impl<R: BufRead> ArrayRecords<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader: countio::Counter::new(reader),
            state: ArrayState::Start,
        }
    }

    fn advance(&mut self) -> Result<Option<Record>> {
        if self.state == ArrayState::Start {
            match self.skip_whitespace()? {
                Some(b'[') => {
                    self.bump();
                    self.state = ArrayState::First;
                }
                _ => return Err(self.malformed("expected '[' at start of input")),
            }
        }

        loop {
            match (self.skip_whitespace()?, self.state) {
                (Some(b']'), _) => {
                    self.bump();
                    self.expect_end()?;
                    return Ok(None);
                }
                (None, _) => return Err(self.malformed("unterminated array")),
                (Some(b','), ArrayState::Rest) => self.bump(),
                (Some(_), ArrayState::First) => {}
                (Some(_), _) => return Err(self.malformed("expected ',' or ']' after element")),
            }

            let first = match self.skip_whitespace()? {
                Some(byte) => byte,
                None => return Err(self.malformed("unterminated array")),
            };
            self.state = ArrayState::Rest;

            match first {
                b'{' => {
                    let mut de = serde_json::Deserializer::from_reader(&mut self.reader);
                    return Ok(Some(Record::deserialize(&mut de)?));
                }
                b'-' | b'0'..=b'9' => self.skip_number()?,
                _ => {
                    let mut de = serde_json::Deserializer::from_reader(&mut self.reader);
                    IgnoredAny::deserialize(&mut de)?;
                }
            }
        }
    }

    /// Consume one number element and check that it is valid JSON.
    fn skip_number(&mut self) -> Result<()> {
        let mut text = String::new();
        while let Some(byte) = self.peek()? {
            if !matches!(byte, b'0'..=b'9' | b'-' | b'+' | b'.' | b'e' | b'E') {
                break;
            }
            text.push(char::from(byte));
            self.bump();
        }
        serde_json::from_str::<serde_json::Number>(&text)?;
        Ok(())
    }

    /// Anything but whitespace after the closing bracket is an error.
    fn expect_end(&mut self) -> Result<()> {
        match self.skip_whitespace()? {
            None => Ok(()),
            Some(_) => Err(self.malformed("trailing characters after array")),
        }
    }

    fn skip_whitespace(&mut self) -> Result<Option<u8>> {
        loop {
            match self.peek()? {
                Some(b' ' | b'\t' | b'\n' | b'\r') => self.bump(),
                other => return Ok(other),
            }
        }
    }

    fn peek(&mut self) -> Result<Option<u8>> {
        Ok(self.reader.fill_buf()?.first().copied())
    }

    fn bump(&mut self) {
        self.reader.consume(1);
    }

    fn malformed(&self, reason: &str) -> ArtworksError {
        ArtworksError::MalformedArray {
            offset: self.reader.reader_bytes() as u64,
            reason: reason.to_string(),
        }
    }
}

impl<R: BufRead> Iterator for ArrayRecords<R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.state == ArrayState::Done {
            return None;
        }
        match self.advance() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => {
                self.state = ArrayState::Done;
                None
            }
            Err(e) => {
                self.state = ArrayState::Done;
                Some(Err(e))
            }
        }
    }
}

// ── LineRecords ───────────────────────────────────────────────────────────────

/// Records of a newline-delimited JSON input.
///
/// Blank lines are skipped. A line that fails to parse, or that parses to
/// something other than an object, is dropped silently and not counted,
/// the same way array elements that are not objects are skipped.
/// Read errors are fatal.
pub struct LineRecords<R> {
    lines: Lines<R>,
    done: bool,
}

impl<R: BufRead> LineRecords<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            done: false,
        }
    }
}

impl<R: BufRead> Iterator for LineRecords<R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        for line_result in self.lines.by_ref() {
            let line = match line_result {
                Ok(l) => l,
                Err(e) => {
                    self.done = true;
                    return Some(Err(e.into()));
                }
            };
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            if let Ok(Value::Object(record)) = serde_json::from_str::<Value>(trimmed) {
                return Some(Ok(record));
            }
        }

        self.done = true;
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use std::path::PathBuf;
    use tempfile::TempDir;

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    fn array_of(input: &str) -> RecordStream<Cursor<Vec<u8>>> {
        RecordStream::array(Cursor::new(input.as_bytes().to_vec()))
    }

    fn lines_of(input: &str) -> RecordStream<Cursor<Vec<u8>>> {
        RecordStream::lines(Cursor::new(input.as_bytes().to_vec()))
    }

    fn titles<I: Iterator<Item = Result<Record>>>(records: I) -> Vec<String> {
        records
            .map(|r| {
                r.unwrap()
                    .get("Title")
                    .and_then(|v| v.as_str())
                    .unwrap_or_default()
                    .to_string()
            })
            .collect()
    }

    // ── Array framing ─────────────────────────────────────────────────────────

    #[test]
    fn test_array_yields_each_element() {
        let stream = array_of(r#"[{"Title":"A"},{"Title":"B"},{"Title":"C"}]"#);
        assert_eq!(titles(stream), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_array_tolerates_whitespace() {
        let stream = array_of("\n [ \n {\"Title\": \"A\"} ,\r\n\t{\"Title\": \"B\"}\n ]\n\n");
        assert_eq!(titles(stream), vec!["A", "B"]);
    }

    #[test]
    fn test_array_empty() {
        let mut stream = array_of("  [ ]  ");
        assert!(stream.next().is_none());
    }

    #[test]
    fn test_array_nested_values_and_tricky_strings() {
        let stream = array_of(
            r#"[{"Title":"a ] b, {c}","Artist":["X","Y"],"Dims":{"h":[1,2]}},{"Title":"Z"}]"#,
        );
        let records: Vec<Record> = stream.map(|r| r.unwrap()).collect();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["Title"], "a ] b, {c}");
        assert_eq!(records[0]["Artist"].as_array().unwrap().len(), 2);
        assert_eq!(records[1]["Title"], "Z");
    }

    #[test]
    fn test_array_missing_separator_is_fatal() {
        let mut stream = array_of(r#"[{"Title":"A"} {"Title":"B"}]"#);
        assert!(stream.next().unwrap().is_ok());
        let err = stream.next().unwrap().unwrap_err();
        assert!(matches!(err, ArtworksError::MalformedArray { .. }));
        assert!(stream.next().is_none(), "stream must end after an error");
    }

    #[test]
    fn test_array_broken_element_is_fatal() {
        let mut stream = array_of(r#"[{"Title":"A"},{"Title": }]"#);
        assert!(stream.next().unwrap().is_ok());
        let err = stream.next().unwrap().unwrap_err();
        assert!(matches!(err, ArtworksError::JsonParse(_)));
        assert!(stream.next().is_none());
    }

    #[test]
    fn test_array_unterminated_is_fatal() {
        let results: Vec<Result<Record>> = array_of(r#"[{"Title":"A"},"#).collect();
        assert_eq!(results.len(), 2);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
    }

    #[test]
    fn test_array_skips_non_object_elements() {
        let stream = array_of(
            r#"[42, {"Title":"A"}, "x", [1, [2.5, -3e2]], null, true, -0.5,{"Title":"B"},7]"#,
        );
        assert_eq!(titles(stream), vec!["A", "B"]);
    }

    #[test]
    fn test_array_only_non_objects_yields_nothing() {
        let results: Vec<Result<Record>> = array_of("[1,2,3]").collect();
        assert!(results.is_empty());
    }

    #[test]
    fn test_array_invalid_number_is_fatal() {
        let mut stream = array_of(r#"[1.2.3, {"Title":"A"}]"#);
        assert!(matches!(
            stream.next().unwrap().unwrap_err(),
            ArtworksError::JsonParse(_)
        ));
        assert!(stream.next().is_none());
    }

    #[test]
    fn test_array_number_without_separator_is_fatal() {
        let mut stream = array_of(r#"[1 {"Title":"A"}]"#);
        assert!(matches!(
            stream.next().unwrap().unwrap_err(),
            ArtworksError::MalformedArray { .. }
        ));
    }

    #[test]
    fn test_array_trailing_garbage_is_fatal() {
        let results: Vec<Result<Record>> = array_of(r#"[{"Title":"A"}] extra"#).collect();
        assert_eq!(results.len(), 2);
        assert!(results[1].is_err());
    }

    #[test]
    fn test_array_reports_offset() {
        let mut stream = array_of(r#"[{"Title":"A"};"#);
        stream.next().unwrap().unwrap();
        match stream.next().unwrap().unwrap_err() {
            ArtworksError::MalformedArray { offset, .. } => assert_eq!(offset, 14),
            other => panic!("unexpected error: {other}"),
        }
    }

    // ── Line framing ──────────────────────────────────────────────────────────

    #[test]
    fn test_lines_skip_malformed_silently() {
        let stream = lines_of("{\"Title\":\"A\"}\n{not valid json{{\n{\"Title\":\"B\"}\n");
        assert_eq!(titles(stream), vec!["A", "B"]);
    }

    #[test]
    fn test_lines_skip_blank_and_whitespace_lines() {
        let stream = lines_of("\n   \n  {\"Title\":\"A\"}  \r\n\t\n");
        assert_eq!(titles(stream), vec!["A"]);
    }

    #[test]
    fn test_lines_drop_non_object_values() {
        let stream = lines_of("42\n\"text\"\n[1,2]\nnull\n{\"Title\":\"A\"}\n");
        assert_eq!(titles(stream), vec!["A"]);
    }

    #[test]
    fn test_lines_drop_non_finite_numbers() {
        // serde_json has no NaN or Infinity literals, so such lines are malformed.
        let stream = lines_of(
            "{\"Title\":\"A\",\"Height (cm)\":NaN}\n{\"Width (cm)\":Infinity}\n{\"Title\":\"B\"}\n",
        );
        assert_eq!(titles(stream), vec!["B"]);
    }

    #[test]
    fn test_lines_last_line_without_newline() {
        let stream = lines_of("{\"Title\":\"A\"}\n{\"Title\":\"B\"}");
        assert_eq!(titles(stream), vec!["A", "B"]);
    }

    #[test]
    fn test_lines_invalid_utf8_is_fatal() {
        let mut bytes = b"{\"Title\":\"A\"}\n".to_vec();
        bytes.extend_from_slice(&[0xFF, 0xFE, b'\n']);
        let mut stream = RecordStream::lines(Cursor::new(bytes));
        assert!(stream.next().unwrap().is_ok());
        assert!(stream.next().unwrap().is_err());
        assert!(stream.next().is_none());
    }

    // ── open ──────────────────────────────────────────────────────────────────

    #[test]
    fn test_open_detects_array() {
        let dir = TempDir::new().unwrap();
        let path = write_file(dir.path(), "a.json", "  [{\"Title\":\"A\"}]");
        let stream = RecordStream::open(&path).unwrap();
        assert_eq!(stream.format(), RecordFormat::JsonArray);
        assert_eq!(titles(stream), vec!["A"]);
    }

    #[test]
    fn test_open_detects_lines() {
        let dir = TempDir::new().unwrap();
        let path = write_file(dir.path(), "a.jsonl", "{\"Title\":\"A\"}\n");
        let stream = RecordStream::open(&path).unwrap();
        assert_eq!(stream.format(), RecordFormat::JsonLines);
        assert_eq!(titles(stream), vec!["A"]);
    }

    #[test]
    fn test_open_empty_file_yields_nothing() {
        let dir = TempDir::new().unwrap();
        let path = write_file(dir.path(), "empty.json", "");
        let mut stream = RecordStream::open(&path).unwrap();
        assert_eq!(stream.format(), RecordFormat::JsonLines);
        assert!(stream.next().is_none());
    }

    #[test]
    fn test_open_missing_file() {
        let result = RecordStream::open(Path::new("/tmp/does-not-exist-artworks-xyz.json"));
        assert!(matches!(result, Err(ArtworksError::FileRead { .. })));
    }

    #[test]
    fn test_array_and_lines_framing_agree() {
        let dir = TempDir::new().unwrap();
        let array = write_file(
            dir.path(),
            "array.json",
            r#"[{"Title":"A","Classification":"Painting"},{"Title":"B"},{"Title":"C"}]"#,
        );
        let lines = write_file(
            dir.path(),
            "lines.json",
            "{\"Title\":\"A\",\"Classification\":\"Painting\"}\n{\"Title\":\"B\"}\n{\"Title\":\"C\"}\n",
        );

        let from_array: Vec<Record> = RecordStream::open(&array).unwrap().map(|r| r.unwrap()).collect();
        let from_lines: Vec<Record> = RecordStream::open(&lines).unwrap().map(|r| r.unwrap()).collect();
        assert_eq!(from_array, from_lines);
    }
}
