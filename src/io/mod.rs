//! I/O module
//!
//! Handles reading CNAB files and writing export tables.
//!
//! # Components
//!
//! - `decoder` - Text decoding with an ordered encoding fallback
//! - `cnab_reader` - Whole-file reader with a detail record iterator
//! - `csv_format` - CSV export (row serialization, BOM-prefixed sink)
//! - `scan` - Input directory listing and output directory creation

pub mod cnab_reader;
pub mod csv_format;
pub mod decoder;
pub mod scan;

pub use cnab_reader::{ingest_file, CnabReader, Ingested, RecordLines};
pub use csv_format::{write_table_csv, CsvExportSink};
pub use decoder::{decode_first, TextEncoding, DEFAULT_ENCODINGS};
pub use scan::{ensure_dir, list_input_files};
