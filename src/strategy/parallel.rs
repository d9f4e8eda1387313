//! Parallel processing strategy
//!
//! Converts files concurrently on a tokio multi-threaded runtime. Parsing
//! and exporting are blocking work, so each file runs on the blocking pool
//! via `spawn_blocking`; a semaphore bounds how many files are in flight.
//!
//! # Architecture
//!
//! ```text
//! ParallelProcessingStrategy
//!     ├── WorkerConfig (workers)
//!     ├── Semaphore (one permit per in-flight file)
//!     └── Arc<FileConverter> (shared, stateless per file)
//! ```
//!
//! Files are independent: no state is shared between conversions apart
//! from the immutable converter, and each file writes its own output.
//! Outcomes are collected with `join_all`, which preserves input order.

use crate::core::FileConverter;
use crate::strategy::{log_outcome, ProcessingStrategy};
use crate::types::{CnabError, FileOutcome, RunSummary};
use futures::future::join_all;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{debug, warn};

/// Configuration of the worker pool
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkerConfig {
    /// Maximum number of files converted at the same time
    pub workers: usize,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            workers: num_cpus::get(),
        }
    }
}

impl WorkerConfig {
    /// Create a WorkerConfig; zero workers falls back to the default
    pub fn new(workers: usize) -> Self {
        if workers == 0 {
            let default = Self::default();
            warn!(
                workers,
                default = default.workers,
                "invalid worker count, using default"
            );
            return default;
        }
        Self { workers }
    }
}

/// Parallel processing strategy
#[derive(Debug, Clone)]
pub struct ParallelProcessingStrategy {
    config: WorkerConfig,
}

impl ParallelProcessingStrategy {
    pub fn new(config: WorkerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &WorkerConfig {
        &self.config
    }
}

impl ProcessingStrategy for ParallelProcessingStrategy {
    /// Convert files on a bounded worker pool
    ///
    /// # Errors
    ///
    /// Returns `CnabError::RuntimeError` if the runtime cannot be created.
    /// A worker that panics fails only its own file.
    fn run(
        &self,
        converter: Arc<FileConverter>,
        files: &[PathBuf],
    ) -> Result<RunSummary, CnabError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(self.config.workers)
            .build()
            .map_err(|e| CnabError::runtime(format!("Failed to create tokio runtime: {}", e)))?;

        debug!(workers = self.config.workers, files = files.len(), "starting worker pool");

        let outcomes = runtime.block_on(async {
            let semaphore = Arc::new(Semaphore::new(self.config.workers));

            let tasks = files.iter().cloned().map(|path| {
                let semaphore = Arc::clone(&semaphore);
                let converter = Arc::clone(&converter);
                async move {
                    let result = match semaphore.acquire_owned().await {
                        Ok(_permit) => {
                            let task_path = path.clone();
                            tokio::task::spawn_blocking(move || {
                                converter.convert_file(&task_path)
                            })
                            .await
                            .unwrap_or_else(|e| {
                                Err(CnabError::runtime(format!("Worker failed: {}", e)))
                            })
                        }
                        Err(e) => Err(CnabError::runtime(e)),
                    };

                    let outcome = FileOutcome { path, result };
                    log_outcome(&outcome);
                    outcome
                }
            });

            join_all(tasks).await
        });

        Ok(RunSummary { outcomes })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RunConfig;
    use rstest::rstest;
    use std::fs;
    use tempfile::TempDir;

    fn detail_line(title: &str, centavos: &str) -> String {
        let mut chars = vec![' '; 400];
        chars[0] = '1';
        for (offset, value) in [(108, title), (126, centavos), (139, "457")] {
            for (i, c) in value.chars().enumerate() {
                chars[offset + i] = c;
            }
        }
        chars.into_iter().collect()
    }

    #[rstest]
    #[case::default_workers(0, num_cpus::get())]
    #[case::one_worker(1, 1)]
    #[case::custom_workers(8, 8)]
    fn test_worker_config(#[case] requested: usize, #[case] expected: usize) {
        assert_eq!(WorkerConfig::new(requested).workers, expected);
    }

    #[rstest]
    #[case::single_worker(1)]
    #[case::more_workers_than_files(16)]
    fn test_parallel_strategy_keeps_input_order(#[case] workers: usize) {
        let dir = TempDir::new().unwrap();
        let config = RunConfig::from_base_dir(dir.path());
        fs::create_dir_all(&config.input_dir).unwrap();
        fs::create_dir_all(&config.output_dir).unwrap();

        let mut files = Vec::new();
        for i in 0..6 {
            let path = config.input_dir.join(format!("remessa_{}.rem", i));
            let title = format!("{:010}-001", i + 1);
            fs::write(&path, detail_line(&title, "0000000000100")).unwrap();
            files.push(path);
        }
        files.push(config.input_dir.join("missing.rem"));

        let converter = Arc::new(FileConverter::new(&config).unwrap());
        let strategy = ParallelProcessingStrategy::new(WorkerConfig::new(workers));
        let summary = strategy.run(converter, &files).unwrap();

        let paths: Vec<_> = summary.outcomes.iter().map(|o| o.path.clone()).collect();
        assert_eq!(paths, files);
        assert_eq!(summary.successes(), 6);
        assert!(matches!(
            summary.outcomes[6].result,
            Err(CnabError::FileNotFound { .. })
        ));
        for i in 0..6 {
            assert!(config.output_dir.join(format!("remessa_{}.csv", i)).exists());
        }
    }

    #[test]
    fn test_parallel_strategy_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ParallelProcessingStrategy>();
    }
}
