//! Core conversion logic
//!
//! This module contains the parsing and conversion components:
//! - `layout` - Declarative field tables of the supported CNAB-400 variants
//! - `formatters` - Normalization of documents, postal codes, phones and money
//! - `line_parser` - Detail line extraction driven by a layout
//! - `traits` - Collector and export sink abstractions
//! - `aggregator` - Per-operation aggregation and per-installment collection
//! - `converter` - The per-file pipeline shared by every strategy

pub mod aggregator;
pub mod converter;
pub mod formatters;
pub mod layout;
pub mod line_parser;
pub mod traits;

pub use aggregator::{aggregate_operations, InstallmentCollector, OperationAggregator};
pub use converter::FileConverter;
pub use layout::Layout;
pub use line_parser::LineParser;
pub use traits::{ExportSink, RecordCollector};
