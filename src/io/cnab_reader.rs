//! CNAB file reader with record iterator interface
//!
//! Reads a whole CNAB file in one scoped call, decodes it with the first
//! matching encoding and exposes its detail records as an iterator.
//!
//! ```no_run
//! use cnab_converter::core::{layout::UY3_AGGREGATED, LineParser};
//! use cnab_converter::io::{decoder::DEFAULT_ENCODINGS, CnabReader};
//! use std::path::Path;
//!
//! let parser = LineParser::new(UY3_AGGREGATED).unwrap();
//! let reader = CnabReader::open(Path::new("CNABs/remessa.rem"), &DEFAULT_ENCODINGS).unwrap();
//! for record in reader.records(&parser) {
//!     println!("{} {}", record.operation_id, record.amount);
//! }
//! ```
//!
//! # Error Handling
//!
//! - Missing or unreadable files and undecodable content are returned from
//!   `open()`
//! - Lines that are not detail records are skipped silently (logged at
//!   debug level)

use crate::core::LineParser;
use crate::io::decoder::{decode_first, TextEncoding};
use crate::types::{CnabError, DetailRecord};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// A decoded CNAB file
#[derive(Debug)]
pub struct CnabReader {
    path: PathBuf,
    encoding: TextEncoding,
    text: String,
}

impl CnabReader {
    /// Read and decode a file
    ///
    /// The file handle is closed before this returns, whether decoding
    /// succeeds or not.
    ///
    /// # Errors
    ///
    /// * `CnabError::FileNotFound` if the path does not exist
    /// * `CnabError::IoError` if the file cannot be read
    /// * `CnabError::DecodeError` if no encoding of `encodings` accepts it
    pub fn open(path: &Path, encodings: &[TextEncoding]) -> Result<Self, CnabError> {
        let bytes = fs::read(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => CnabError::file_not_found(path),
            _ => CnabError::IoError {
                message: format!("Failed to read '{}': {}", path.display(), e),
            },
        })?;

        let (encoding, text) = decode_first(&bytes, encodings).ok_or_else(|| {
            let labels: Vec<_> = encodings.iter().map(|e| e.label()).collect();
            CnabError::decode_failed(path, &labels)
        })?;

        debug!(
            path = %path.display(),
            encoding = encoding.label(),
            bytes = bytes.len(),
            "decoded file"
        );

        Ok(Self {
            path: path.to_path_buf(),
            encoding,
            text,
        })
    }

    /// The encoding that decoded the file
    pub fn encoding(&self) -> TextEncoding {
        self.encoding
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Lines of the file, without line terminators
    ///
    /// `\r\n`, `\n` and a lone `\r` all end a line; older bank systems
    /// still emit CR-only files.
    pub fn lines(&self) -> RecordLines<'_> {
        RecordLines { rest: &self.text }
    }

    /// Detail records of the file, in line order
    ///
    /// Lines shorter than the layout's record length are not offered to the
    /// parser at all; other non-detail lines are skipped.
    pub fn records<'a>(
        &'a self,
        parser: &'a LineParser,
    ) -> impl Iterator<Item = DetailRecord> + 'a {
        self.lines()
            .enumerate()
            .filter(move |(_, line)| parser.is_record_length(line))
            .filter_map(move |(index, line)| {
                let record = parser.parse(line);
                match &record {
                    Some(record) => trace!(line = index + 1, operation = %record.operation_id, "parsed detail record"),
                    None => debug!(line = index + 1, "skipping non-detail record"),
                }
                record
            })
    }
}

/// Iterator over the lines of a decoded file
///
/// A terminator at the very end of the text does not produce an empty
/// trailing line.
#[derive(Debug, Clone)]
pub struct RecordLines<'a> {
    rest: &'a str,
}

impl<'a> Iterator for RecordLines<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.rest.is_empty() {
            return None;
        }
        match self.rest.find(|c: char| c == '\r' || c == '\n') {
            Some(end) => {
                let line = &self.rest[..end];
                let terminator = if self.rest[end..].starts_with("\r\n") { 2 } else { 1 };
                self.rest = &self.rest[end + terminator..];
                Some(line)
            }
            None => {
                let line = self.rest;
                self.rest = "";
                Some(line)
            }
        }
    }
}

/// Records read from one file
#[derive(Debug, Clone, PartialEq)]
pub struct Ingested {
    pub encoding: TextEncoding,
    pub records: Vec<DetailRecord>,
}

/// Read, decode and parse a whole file
///
/// Returns the records in line order, possibly none.
pub fn ingest_file(
    path: &Path,
    parser: &LineParser,
    encodings: &[TextEncoding],
) -> Result<Ingested, CnabError> {
    let reader = CnabReader::open(path, encodings)?;
    let records = reader.records(parser).collect();
    Ok(Ingested {
        encoding: reader.encoding(),
        records,
    })
}
