//! CSV export of converted tables
//!
//! This module centralizes all CSV format concerns, providing:
//! - Row structures for serialization of both table shapes
//! - `write_table_csv`, a pure writer over any `Write`
//! - `CsvExportSink`, the file-backed export sink
//!
//! Spreadsheet programs configured for Brazilian Portuguese expect `;` as
//! the field separator (the comma is the decimal separator), and only detect
//! UTF-8 when the file starts with a byte-order mark.

use crate::core::traits::ExportSink;
use crate::types::{CnabError, DetailRecord, ExportTable, OperationSummary};
use csv::WriterBuilder;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// UTF-8 byte-order mark written at the start of every export file
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Default field delimiter
pub const DEFAULT_DELIMITER: u8 = b';';

#[derive(Debug, Serialize)]
struct OperationRow<'a> {
    customer_name: &'a str,
    document: &'a str,
    installments: u32,
    total: String,
    operation_id: &'a str,
    address: &'a str,
    postal_code: &'a str,
    email: &'a str,
    phone: &'a str,
}

impl<'a> From<&'a OperationSummary> for OperationRow<'a> {
    fn from(summary: &'a OperationSummary) -> Self {
        OperationRow {
            customer_name: &summary.customer_name,
            document: &summary.document,
            installments: summary.installments,
            total: summary.total.to_string(),
            operation_id: &summary.operation_id,
            address: &summary.address,
            postal_code: &summary.postal_code,
            email: summary.email.as_deref().unwrap_or_default(),
            phone: summary.phone.as_deref().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Serialize)]
struct InstallmentRow<'a> {
    customer_name: &'a str,
    document: &'a str,
    installment: &'a str,
    amount: String,
    title_id: &'a str,
    address: &'a str,
    postal_code: &'a str,
    email: &'a str,
    phone: &'a str,
}

impl<'a> From<&'a DetailRecord> for InstallmentRow<'a> {
    fn from(record: &'a DetailRecord) -> Self {
        InstallmentRow {
            customer_name: &record.customer_name,
            document: &record.document,
            installment: &record.installment,
            amount: record.amount.to_string(),
            title_id: &record.operation_id,
            address: &record.address,
            postal_code: &record.postal_code,
            email: record.email.as_deref().unwrap_or_default(),
            phone: record.phone.as_deref().unwrap_or_default(),
        }
    }
}

/// Write a table as CSV: the fixed header row, then one row per entry
///
/// # Arguments
///
/// * `table` - Rows to write, already in output order
/// * `output` - Destination writer
/// * `delimiter` - Field separator byte
pub fn write_table_csv(
    table: &ExportTable,
    output: &mut dyn Write,
    delimiter: u8,
) -> Result<(), CnabError> {
    let mut writer = WriterBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .from_writer(output);

    writer.write_record(table.headers())?;

    match table {
        ExportTable::Operations(rows) => {
            for row in rows {
                writer.serialize(OperationRow::from(row))?;
            }
        }
        ExportTable::Installments(rows) => {
            for row in rows {
                writer.serialize(InstallmentRow::from(row))?;
            }
        }
    }

    writer.flush()?;
    Ok(())
}

/// Export sink writing `;`-separated, BOM-prefixed UTF-8 CSV files
#[derive(Debug, Clone, Copy)]
pub struct CsvExportSink {
    delimiter: u8,
}

impl CsvExportSink {
    pub fn new(delimiter: u8) -> Self {
        Self { delimiter }
    }
}

impl Default for CsvExportSink {
    fn default() -> Self {
        Self::new(DEFAULT_DELIMITER)
    }
}

impl ExportSink for CsvExportSink {
    fn extension(&self) -> &'static str {
        "csv"
    }

    fn export(&self, table: &ExportTable, destination: &Path) -> Result<(), CnabError> {
        let file = File::create(destination)
            .map_err(|e| CnabError::export_failed(destination, e))?;
        let mut output = BufWriter::new(file);

        output
            .write_all(UTF8_BOM)
            .map_err(|e| CnabError::export_failed(destination, e))?;
        write_table_csv(table, &mut output, self.delimiter).map_err(|e| match e {
            CnabError::ExportError { message, .. } => {
                CnabError::export_failed(destination, message)
            }
            other => other,
        })?;
        output
            .flush()
            .map_err(|e| CnabError::export_failed(destination, e))?;

        Ok(())
    }
}
