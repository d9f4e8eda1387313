//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `money`: Fixed-point amounts in reais
//! - `record`: Parsed detail records and per-operation summaries
//! - `table`: Export tables and their header sets
//! - `report`: Per-file and per-run outcomes
//! - `error`: Error types for the converter

pub mod error;
pub mod money;
pub mod record;
pub mod report;
pub mod table;

pub use error::CnabError;
pub use money::Money;
pub use record::{DetailRecord, OperationSummary};
pub use report::{FileOutcome, FileReport, RunSummary};
pub use table::{ExportTable, INSTALLMENT_HEADERS, OPERATION_HEADERS};
