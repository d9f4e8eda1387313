//! Parsed and aggregated record types
//!
//! This module defines the detail record produced by the line parser and the
//! per-operation summary produced by the aggregator.

use super::money::Money;

/// One parsed installment line (CNAB detail record, type "1")
///
/// Created by the line parser from a single 400-column line. All text fields
/// are already trimmed and formatted for display.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailRecord {
    /// Payer name, trimmed
    pub customer_name: String,

    /// Formatted CPF (or CNPJ, depending on the layout)
    pub document: String,

    /// Installment amount
    pub amount: Money,

    /// Grouping key derived from the title identifier
    ///
    /// For the aggregated layout this is the core operation number without
    /// bank prefix and installment suffix; for the installment layout it is
    /// the full `core-suffix` identifier.
    pub operation_id: String,

    /// Installment number from the identifier suffix, without leading zeros
    ///
    /// `"0"` when the suffix is all zeros, empty when there is no suffix.
    pub installment: String,

    /// Payer street address, trimmed
    pub address: String,

    /// Formatted postal code (CEP), empty when none was found
    pub postal_code: String,

    /// Lowercased email address
    pub email: Option<String>,

    /// Formatted phone number
    pub phone: Option<String>,
}

/// One aggregated output row per operation identifier
///
/// Descriptive fields come from the first detail record seen for the
/// operation; later records only update the installment count and total.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationSummary {
    pub customer_name: String,
    pub document: String,
    /// Number of detail records folded into this row (always >= 1)
    pub installments: u32,
    /// Sum of the constituent installment amounts
    pub total: Money,
    pub operation_id: String,
    pub address: String,
    pub postal_code: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl OperationSummary {
    /// Start a summary from the first record of an operation
    pub fn seed(record: DetailRecord) -> Self {
        OperationSummary {
            customer_name: record.customer_name,
            document: record.document,
            installments: 1,
            total: record.amount,
            operation_id: record.operation_id,
            address: record.address,
            postal_code: record.postal_code,
            email: record.email,
            phone: record.phone,
        }
    }

    /// Fold a further installment of the same operation into the summary
    pub fn absorb(&mut self, record: &DetailRecord) {
        self.installments = self.installments.saturating_add(1);
        self.total += record.amount;
    }
}
