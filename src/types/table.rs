//! Export tables handed to the export sink
//!
//! A converted file produces one of two table shapes: aggregated operation
//! rows or raw installment rows. Each shape has a fixed header set.

use super::record::{DetailRecord, OperationSummary};

/// Column headers of the aggregated (one row per operation) export
///
/// Customer name, document, installment count, total amount, operation
/// number, address, postal code, email, phone.
pub const OPERATION_HEADERS: [&str; 9] = [
    "Nome Cliente",
    "CPF/CNPJ",
    "Parcelas",
    "Valor Total",
    "Numero Operacao",
    "Endereco",
    "CEP",
    "Email",
    "Telefone",
];

/// Column headers of the per-installment export
pub const INSTALLMENT_HEADERS: [&str; 9] = [
    "Nome Cliente",
    "CPF/CNPJ",
    "Parcela",
    "Valor",
    "ID Titulo",
    "Endereco",
    "CEP",
    "Email",
    "Telefone",
];

/// Rows of one converted file, in output order
#[derive(Debug, Clone, PartialEq)]
pub enum ExportTable {
    /// One row per distinct operation identifier, first-seen order
    Operations(Vec<OperationSummary>),
    /// One row per detail record, line order
    Installments(Vec<DetailRecord>),
}

impl ExportTable {
    /// The fixed header set of this table shape
    pub fn headers(&self) -> &'static [&'static str] {
        match self {
            ExportTable::Operations(_) => &OPERATION_HEADERS,
            ExportTable::Installments(_) => &INSTALLMENT_HEADERS,
        }
    }

    /// Number of data rows (header excluded)
    pub fn len(&self) -> usize {
        match self {
            ExportTable::Operations(rows) => rows.len(),
            ExportTable::Installments(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
