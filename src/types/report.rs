//! Per-file and per-run processing outcomes

use super::error::CnabError;
use std::path::PathBuf;

/// Result of a successful file conversion
#[derive(Debug, Clone, PartialEq)]
pub struct FileReport {
    /// The CNAB file that was read
    pub input: PathBuf,
    /// The export file that was written
    pub output: PathBuf,
    /// Name of the text encoding that decoded the file
    pub encoding: &'static str,
    /// Number of detail records parsed
    pub records: usize,
    /// Number of rows written (excluding the header)
    pub rows: usize,
}

/// Outcome of one input file within a run
#[derive(Debug, Clone, PartialEq)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub result: Result<FileReport, CnabError>,
}

impl FileOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Aggregate outcome of a run over a directory of files
///
/// Outcomes are kept in input order regardless of the processing strategy.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub outcomes: Vec<FileOutcome>,
}

impl RunSummary {
    /// Total number of files attempted
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    /// Number of files converted successfully
    pub fn successes(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    /// Number of files that failed
    pub fn failures(&self) -> usize {
        self.total() - self.successes()
    }

    /// Failed files with their error, in input order
    pub fn failed(&self) -> impl Iterator<Item = (&PathBuf, &CnabError)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (&o.path, e)))
    }
}
