//! Per-file conversion pipeline
//!
//! `FileConverter` turns one CNAB file into one export file:
//! decode, parse detail lines, collect them into the configured table shape
//! and hand the table to the export sink. It holds no per-file state, so a
//! single converter is shared by every worker of a run.

use crate::cli::OutputMode;
use crate::config::RunConfig;
use crate::core::aggregator::{InstallmentCollector, OperationAggregator};
use crate::core::layout::Layout;
use crate::core::line_parser::LineParser;
use crate::core::traits::{ExportSink, RecordCollector};
use crate::io::cnab_reader::ingest_file;
use crate::io::csv_format::CsvExportSink;
use crate::io::decoder::TextEncoding;
use crate::types::{CnabError, DetailRecord, ExportTable, FileReport};
use std::path::{Path, PathBuf};
use tracing::info;

/// Converts CNAB files into export files
pub struct FileConverter {
    parser: LineParser,
    mode: OutputMode,
    encodings: Vec<TextEncoding>,
    output_dir: PathBuf,
    sink: Box<dyn ExportSink>,
}

impl std::fmt::Debug for FileConverter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileConverter")
            .field("layout", &self.parser.layout().name)
            .field("mode", &self.mode)
            .field("encodings", &self.encodings)
            .field("output_dir", &self.output_dir)
            .field("extension", &self.sink.extension())
            .finish()
    }
}

impl FileConverter {
    /// Build a converter writing CSV files as configured
    ///
    /// # Errors
    ///
    /// Returns `CnabError::InvalidPattern` if the layout's extraction
    /// patterns do not compile.
    pub fn new(config: &RunConfig) -> Result<Self, CnabError> {
        Ok(Self {
            parser: LineParser::new(Layout::for_version(config.layout))?,
            mode: config.mode,
            encodings: config.encodings.clone(),
            output_dir: config.output_dir.clone(),
            sink: Box::new(CsvExportSink::new(config.delimiter)),
        })
    }

    /// Replace the export sink
    pub fn with_sink(mut self, sink: Box<dyn ExportSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Output path for an input file: same stem, sink extension, output dir
    ///
    /// Dots inside the stem are kept, so `remessa.2024-01.rem` becomes
    /// `remessa.2024-01.csv`.
    pub fn output_path(&self, input: &Path) -> PathBuf {
        let mut name = input
            .file_stem()
            .map(|s| s.to_os_string())
            .unwrap_or_else(|| "export".into());
        name.push(".");
        name.push(self.sink.extension());
        self.output_dir.join(name)
    }

    /// Collect records into the table shape of the configured mode
    pub fn build_table(&self, records: Vec<DetailRecord>) -> ExportTable {
        match self.mode {
            OutputMode::Operations => {
                let mut collector = OperationAggregator::new();
                collector.extend(records);
                collector.finish()
            }
            OutputMode::Installments => {
                let mut collector = InstallmentCollector::new();
                collector.extend(records);
                collector.finish()
            }
        }
    }

    /// Convert one file
    ///
    /// # Errors
    ///
    /// * Read and decode errors from the reader
    /// * `CnabError::NoRecords` if the file has no detail records; nothing
    ///   is written in that case
    /// * `CnabError::ExportError` if the export cannot be written
    pub fn convert_file(&self, input: &Path) -> Result<FileReport, CnabError> {
        let ingested = ingest_file(input, &self.parser, &self.encodings)?;
        if ingested.records.is_empty() {
            return Err(CnabError::no_records(input));
        }

        let records = ingested.records.len();
        let table = self.build_table(ingested.records);
        let output = self.output_path(input);
        self.sink.export(&table, &output)?;

        info!(
            input = %input.display(),
            output = %output.display(),
            encoding = ingested.encoding.label(),
            records,
            rows = table.len(),
            "converted file"
        );

        Ok(FileReport {
            input: input.to_path_buf(),
            output,
            encoding: ingested.encoding.label(),
            records,
            rows: table.len(),
        })
    }
}
