//! Record collectors: per-operation aggregation and per-installment passthrough
//!
//! The [`OperationAggregator`] collapses the installment lines of a file into
//! one [`OperationSummary`] per operation identifier. Grouping uses an
//! insertion-ordered index so the output rows follow the order in which each
//! operation was first seen, independent of hashing.
//!
//! # First-seen wins
//!
//! The first record of an operation seeds the descriptive fields (name,
//! document, address, contact). Later records with the same identifier only
//! increment the installment count and add to the total.

use crate::core::traits::RecordCollector;
use crate::types::{DetailRecord, ExportTable, OperationSummary};
use std::collections::HashMap;

/// Groups detail records by exact operation identifier
#[derive(Debug, Default)]
pub struct OperationAggregator {
    /// Operation identifier to position in `summaries`
    index: HashMap<String, usize>,
    /// Summaries in first-seen order
    summaries: Vec<OperationSummary>,
}

impl OperationAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct operations seen so far
    pub fn len(&self) -> usize {
        self.summaries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.summaries.is_empty()
    }

    /// Current summary of an operation, if it was seen
    pub fn get(&self, operation_id: &str) -> Option<&OperationSummary> {
        self.index.get(operation_id).map(|&i| &self.summaries[i])
    }

    /// Consume the aggregator, returning summaries in first-seen order
    pub fn into_summaries(self) -> Vec<OperationSummary> {
        self.summaries
    }
}

impl RecordCollector for OperationAggregator {
    fn push(&mut self, record: DetailRecord) {
        match self.index.get(&record.operation_id) {
            Some(&i) => self.summaries[i].absorb(&record),
            None => {
                self.index
                    .insert(record.operation_id.clone(), self.summaries.len());
                self.summaries.push(OperationSummary::seed(record));
            }
        }
    }

    fn finish(self) -> ExportTable {
        ExportTable::Operations(self.into_summaries())
    }
}

/// Keeps every detail record as its own row
#[derive(Debug, Default)]
pub struct InstallmentCollector {
    records: Vec<DetailRecord>,
}

impl InstallmentCollector {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordCollector for InstallmentCollector {
    fn push(&mut self, record: DetailRecord) {
        self.records.push(record);
    }

    fn finish(self) -> ExportTable {
        ExportTable::Installments(self.records)
    }
}

/// Aggregate an ordered list of records into per-operation summaries
pub fn aggregate_operations<I>(records: I) -> Vec<OperationSummary>
where
    I: IntoIterator<Item = DetailRecord>,
{
    let mut aggregator = OperationAggregator::new();
    aggregator.extend(records);
    aggregator.into_summaries()
}
