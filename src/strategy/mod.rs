//! Processing strategy module for directory conversion
//!
//! This module defines the Strategy pattern for converting a directory of
//! CNAB files. Every strategy runs the same per-file pipeline
//! ([`FileConverter`]); they differ only in how files are scheduled
//! (one after another, or on a bounded worker pool).
//!
//! Per-file failures never abort a run: they are recorded in the
//! [`RunSummary`] and the remaining files are still converted.

use crate::cli::StrategyType;
use crate::config::RunConfig;
use crate::core::FileConverter;
use crate::io::scan::{ensure_dir, list_input_files};
use crate::types::{CnabError, FileOutcome, RunSummary};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

pub mod parallel;
pub mod sync;

pub use parallel::{ParallelProcessingStrategy, WorkerConfig};
pub use sync::SyncProcessingStrategy;

/// Processing strategy trait for directory conversion
pub trait ProcessingStrategy: Send + Sync {
    /// Convert every file of `files` with `converter`
    ///
    /// # Returns
    ///
    /// * `Ok(RunSummary)` with one outcome per file, in the order of `files`
    /// * `Err(CnabError)` only if the strategy itself could not run (for
    ///   example, the worker runtime could not be created)
    fn run(
        &self,
        converter: Arc<FileConverter>,
        files: &[PathBuf],
    ) -> Result<RunSummary, CnabError>;
}

/// Create a processing strategy based on the specified strategy type
///
/// # Arguments
///
/// * `strategy_type` - The type of processing strategy to create
/// * `config` - Optional worker configuration (ignored for sync)
pub fn create_strategy(
    strategy_type: StrategyType,
    config: Option<WorkerConfig>,
) -> Box<dyn ProcessingStrategy> {
    match strategy_type {
        StrategyType::Sync => Box::new(SyncProcessingStrategy),
        StrategyType::Parallel => {
            let config = config.unwrap_or_default();
            Box::new(ParallelProcessingStrategy::new(config))
        }
    }
}

/// Convert the input directory of `config` into its output directory
///
/// Both directories are created when missing, so a first run on a fresh
/// base directory succeeds with an empty summary.
///
/// # Errors
///
/// Setup failures only: directories that cannot be created or listed,
/// patterns that do not compile, a runtime that cannot start.
pub fn run(config: &RunConfig, strategy: &dyn ProcessingStrategy) -> Result<RunSummary, CnabError> {
    ensure_dir(&config.input_dir)?;
    ensure_dir(&config.output_dir)?;

    let files = list_input_files(&config.input_dir)?;
    if files.is_empty() {
        info!(dir = %config.input_dir.display(), "no input files found");
        return Ok(RunSummary::default());
    }
    info!(count = files.len(), dir = %config.input_dir.display(), "converting files");

    let converter = Arc::new(FileConverter::new(config)?);
    strategy.run(converter, &files)
}

/// Log the outcome of one file
pub(crate) fn log_outcome(outcome: &FileOutcome) {
    if let Err(e) = &outcome.result {
        warn!(path = %outcome.path.display(), error = %e, "file skipped");
    }
}
