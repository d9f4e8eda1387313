//! Core traits for record collection and table export
//!
//! These traits are the seams between the parsing core and its
//! collaborators: a collector decides the output shape of a file, a sink
//! decides how the resulting table is persisted.

use crate::types::{CnabError, DetailRecord, ExportTable};
use std::path::Path;

/// Consumes the detail records of one file, in line order, and produces
/// its export table
///
/// Implementations can aggregate (one row per operation) or pass records
/// through (one row per installment).
pub trait RecordCollector {
    /// Accept the next record of the file
    fn push(&mut self, record: DetailRecord);

    /// Finish the file and return the rows in output order
    fn finish(self) -> ExportTable;

    /// Push every record of an iterator, in order
    fn extend<I>(&mut self, records: I)
    where
        I: IntoIterator<Item = DetailRecord>,
        Self: Sized,
    {
        for record in records {
            self.push(record);
        }
    }
}

/// Persists an export table
///
/// `destination` is the output path chosen by the converter; sinks may not
/// change it.
pub trait ExportSink: Send + Sync {
    /// File extension (without dot) of the files this sink writes
    fn extension(&self) -> &'static str;

    /// Write the table to `destination`, replacing any existing file
    fn export(&self, table: &ExportTable, destination: &Path) -> Result<(), CnabError>;
}
