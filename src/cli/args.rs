use crate::config::RunConfig;
use crate::io::csv_format::DEFAULT_DELIMITER;
use crate::io::decoder::TextEncoding;
use crate::strategy::WorkerConfig;
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Convert CNAB-400 remittance files into spreadsheet-ready CSV
#[derive(Parser, Debug)]
#[command(name = "cnab-converter")]
#[command(about = "Convert CNAB-400 remittance files into spreadsheet-ready CSV", long_about = None)]
pub struct CliArgs {
    /// Base directory holding the CNABs and Convertidos folders
    #[arg(
        long = "base-dir",
        value_name = "DIR",
        help = "Base directory (default: directory of the executable)"
    )]
    pub base_dir: Option<PathBuf>,

    /// Override the input directory
    #[arg(long = "input-dir", value_name = "DIR", help = "Input directory (default: <base>/CNABs)")]
    pub input_dir: Option<PathBuf>,

    /// Override the output directory
    #[arg(
        long = "output-dir",
        value_name = "DIR",
        help = "Output directory (default: <base>/Convertidos)"
    )]
    pub output_dir: Option<PathBuf>,

    /// Field layout of the input files
    #[arg(long = "layout", value_name = "LAYOUT", default_value = "uy3-aggregated")]
    pub layout: LayoutVersion,

    /// Shape of the exported table
    #[arg(
        long = "mode",
        value_name = "MODE",
        default_value = "operations",
        help = "Output shape: 'operations' (one row per operation) or 'installments' (one row per line)"
    )]
    pub mode: OutputMode,

    /// Processing strategy
    #[arg(
        long = "strategy",
        value_name = "STRATEGY",
        default_value = "sync",
        help = "Processing strategy: 'sync' for sequential or 'parallel' for a worker pool"
    )]
    pub strategy: StrategyType,

    /// Number of files converted concurrently (parallel mode only)
    #[arg(
        long = "workers",
        value_name = "COUNT",
        help = "Number of files converted concurrently (default: CPU cores)"
    )]
    pub workers: Option<usize>,

    /// Decoding order for input files
    #[arg(
        long = "encodings",
        value_name = "LIST",
        value_delimiter = ',',
        default_values = ["latin1", "utf8", "windows1252"],
        help = "Comma-separated decoding order"
    )]
    pub encodings: Vec<TextEncoding>,

    /// CSV field separator
    #[arg(long = "delimiter", value_name = "CHAR", default_value_t = ';')]
    pub delimiter: char,
}

/// Supported input layouts
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LayoutVersion {
    /// UY3 files, grouped by core operation number
    Uy3Aggregated,
    /// UY3 files, keyed by full title identifier
    Uy3Installments,
}

/// Shape of the exported table
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
    /// One row per operation, with installment count and total
    Operations,
    /// One row per detail record
    Installments,
}

/// Available processing strategies
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrategyType {
    Sync,
    Parallel,
}

impl CliArgs {
    /// Build the run configuration rooted at `base`
    ///
    /// Explicit input and output directories win over the base directory.
    /// A delimiter that is not a single ASCII character falls back to `;`
    /// with a warning.
    pub fn to_run_config(&self, base: &Path) -> RunConfig {
        let mut config = RunConfig::from_base_dir(base);

        if let Some(dir) = &self.input_dir {
            config.input_dir = dir.clone();
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
        config.layout = self.layout;
        config.mode = self.mode;
        if !self.encodings.is_empty() {
            config.encodings = self.encodings.clone();
        }
        config.delimiter = if self.delimiter.is_ascii() {
            self.delimiter as u8
        } else {
            warn!(
                delimiter = %self.delimiter,
                "delimiter must be a single ASCII character, using ';'"
            );
            DEFAULT_DELIMITER
        };

        config
    }

    /// Create a WorkerConfig from CLI arguments
    pub fn to_worker_config(&self) -> WorkerConfig {
        match self.workers {
            Some(workers) => WorkerConfig::new(workers),
            None => WorkerConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::decoder::DEFAULT_ENCODINGS;
    use rstest::rstest;

    // Strategy parsing tests
    #[rstest]
    #[case::default_strategy(&["program"], StrategyType::Sync)]
    #[case::explicit_sync(&["program", "--strategy", "sync"], StrategyType::Sync)]
    #[case::explicit_parallel(&["program", "--strategy", "parallel"], StrategyType::Parallel)]
    fn test_strategy_parsing(#[case] args: &[&str], #[case] expected: StrategyType) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.strategy, expected);
    }

    #[rstest]
    #[case::defaults(&["program"], LayoutVersion::Uy3Aggregated, OutputMode::Operations)]
    #[case::installment_layout(
        &["program", "--layout", "uy3-installments", "--mode", "installments"],
        LayoutVersion::Uy3Installments,
        OutputMode::Installments
    )]
    fn test_layout_and_mode(
        #[case] args: &[&str],
        #[case] layout: LayoutVersion,
        #[case] mode: OutputMode,
    ) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.layout, layout);
        assert_eq!(parsed.mode, mode);
    }

    #[rstest]
    #[case::default_order(&["program"], DEFAULT_ENCODINGS.to_vec())]
    #[case::custom_order(
        &["program", "--encodings", "utf-8,latin1"],
        vec![TextEncoding::Utf8, TextEncoding::Latin1]
    )]
    #[case::single(&["program", "--encodings", "cp1252"], vec![TextEncoding::Windows1252])]
    fn test_encodings(#[case] args: &[&str], #[case] expected: Vec<TextEncoding>) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.encodings, expected);
    }

    #[test]
    fn test_run_config_defaults_to_base_dir() {
        let parsed = CliArgs::try_parse_from(["program"]).unwrap();
        let config = parsed.to_run_config(Path::new("/srv/cnab"));

        assert_eq!(config, RunConfig::from_base_dir(Path::new("/srv/cnab")));
    }

    #[test]
    fn test_run_config_overrides() {
        let parsed = CliArgs::try_parse_from([
            "program",
            "--input-dir",
            "/data/in",
            "--output-dir",
            "/data/out",
            "--delimiter",
            ",",
            "--mode",
            "installments",
        ])
        .unwrap();
        let config = parsed.to_run_config(Path::new("/srv/cnab"));

        assert_eq!(config.input_dir, PathBuf::from("/data/in"));
        assert_eq!(config.output_dir, PathBuf::from("/data/out"));
        assert_eq!(config.delimiter, b',');
        assert_eq!(config.mode, OutputMode::Installments);
    }

    #[test]
    fn test_non_ascii_delimiter_falls_back() {
        let parsed = CliArgs::try_parse_from(["program", "--delimiter", "§"]).unwrap();
        let config = parsed.to_run_config(Path::new("."));
        assert_eq!(config.delimiter, b';');
    }

    // WorkerConfig conversion tests
    #[rstest]
    #[case::default_workers(&["program"], num_cpus::get())]
    #[case::custom_workers(&["program", "--workers", "4"], 4)]
    #[case::zero_workers_fallback(&["program", "--workers", "0"], num_cpus::get())]
    fn test_worker_config_conversion(#[case] args: &[&str], #[case] expected: usize) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.to_worker_config().workers, expected);
    }

    // Error handling tests
    #[rstest]
    #[case::invalid_strategy(&["program", "--strategy", "async"])]
    #[case::invalid_layout(&["program", "--layout", "febraban"])]
    #[case::invalid_encoding(&["program", "--encodings", "ebcdic"])]
    #[case::unexpected_positional(&["program", "input.rem"])]
    fn test_parsing_errors(#[case] args: &[&str]) {
        let result = CliArgs::try_parse_from(args);
        assert!(result.is_err());
    }
}
