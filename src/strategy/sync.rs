//! Synchronous processing strategy
//!
//! Converts files one after another on the calling thread. This is the
//! default strategy: runs are usually a handful of files, and sequential
//! processing keeps log output in file order.

use crate::core::FileConverter;
use crate::strategy::{log_outcome, ProcessingStrategy};
use crate::types::{CnabError, FileOutcome, RunSummary};
use std::path::PathBuf;
use std::sync::Arc;

/// Synchronous processing strategy
///
/// # Examples
///
/// ```no_run
/// use cnab_converter::config::RunConfig;
/// use cnab_converter::strategy::{self, SyncProcessingStrategy};
/// use std::path::Path;
///
/// let config = RunConfig::from_base_dir(Path::new("."));
/// let summary = strategy::run(&config, &SyncProcessingStrategy).expect("Run failed");
/// println!("{} of {} files converted", summary.successes(), summary.total());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SyncProcessingStrategy;

impl ProcessingStrategy for SyncProcessingStrategy {
    fn run(
        &self,
        converter: Arc<FileConverter>,
        files: &[PathBuf],
    ) -> Result<RunSummary, CnabError> {
        let outcomes = files
            .iter()
            .map(|path| {
                let outcome = FileOutcome {
                    path: path.clone(),
                    result: converter.convert_file(path),
                };
                log_outcome(&outcome);
                outcome
            })
            .collect();

        Ok(RunSummary { outcomes })
    }
}
