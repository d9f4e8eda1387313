//! CNAB Converter Library
//! # Overview
//!
//! This library converts CNAB-400 remittance files (fixed-width, 400
//! characters per line) into CSV tables, either one row per operation with
//! its installment count and total, or one row per installment.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (DetailRecord, OperationSummary, Money, etc.)
//! - [`cli`] - CLI arguments parsing
//! - [`config`] - Run configuration (directories, layout, encodings)
//! - [`core`] - Conversion logic:
//!   - [`core::layout`] - Field tables of the supported layouts
//!   - [`core::line_parser`] - Detail line extraction
//!   - [`core::aggregator`] - Per-operation aggregation
//!   - [`core::converter`] - The per-file pipeline
//! - [`io`] - Decoding, reading and CSV export
//! - [`strategy`] - Sequential and parallel scheduling of files
//!
//! # Detail Records
//!
//! Only lines of at least 400 characters starting with `1` are detail
//! records; header (`0`) and trailer (`9`) lines are skipped. Malformed
//! fields never fail a line: they degrade to empty text or a zero amount.
//!
//! # Failures
//!
//! A file that cannot be read, cannot be decoded, yields no detail records
//! or cannot be exported is reported in the run summary and skipped. Other
//! files of the run are still converted.

// Module declarations
pub mod cli;
pub mod config;
pub mod core;
pub mod io;
pub mod strategy;
pub mod types;

pub use config::RunConfig;
pub use core::{FileConverter, LineParser, OperationAggregator};
pub use io::write_table_csv;
pub use types::{
    CnabError, DetailRecord, ExportTable, FileOutcome, FileReport, Money, OperationSummary,
    RunSummary,
};
