//! Benchmark suite for line parsing, aggregation and processing strategies
//!
//! # Running Benchmarks
//!
//! ```bash
//! cargo bench
//! ```
//!
//! Inputs are synthetic detail lines generated in memory: every operation
//! has twelve installments, and operations are interleaved the way bank
//! systems emit them.

use cnab_converter::cli::{LayoutVersion, StrategyType};
use cnab_converter::config::RunConfig;
use cnab_converter::core::layout::{Layout, UY3_AGGREGATED};
use cnab_converter::core::{aggregate_operations, LineParser};
use cnab_converter::strategy::{self, create_strategy, WorkerConfig};
use cnab_converter::types::DetailRecord;
use divan::Bencher;
use std::fs;
use tempfile::TempDir;

const INSTALLMENTS: usize = 12;

fn main() {
    divan::main();
}

fn detail_line(operation: usize, installment: usize) -> String {
    let mut chars = vec![' '; 400];
    chars[0] = '1';
    let title = format!("{:010}-{:03}", 2_100_000_000 + operation, installment);
    let amount = format!("{:013}", 10_000 + operation * 7);
    for (offset, value) in [
        (108, title.as_str()),
        (126, amount.as_str()),
        (139, "457"),
        (220, "00012345678901"),
        (234, "MARIA DA SILVA"),
        (274, "RUA DAS FLORES 100"),
        (326, "01310100"),
        (334, "maria@exemplo.com"),
        (382, "11987654321"),
    ] {
        for (i, c) in value.chars().enumerate() {
            chars[offset + i] = c;
        }
    }
    chars.into_iter().collect()
}

fn synthetic_lines(operations: usize) -> Vec<String> {
    (1..=INSTALLMENTS)
        .flat_map(|installment| (0..operations).map(move |op| detail_line(op, installment)))
        .collect()
}

/// Parse detail lines with the aggregated layout
#[divan::bench(args = [100, 1_000, 10_000])]
fn parse_lines(bencher: Bencher, operations: usize) {
    let parser = LineParser::new(UY3_AGGREGATED).expect("Invalid layout");
    let lines = synthetic_lines(operations);

    bencher.bench_local(|| {
        lines
            .iter()
            .filter_map(|line| parser.parse(line))
            .count()
    });
}

/// Aggregate parsed records into per-operation summaries
#[divan::bench(args = [100, 1_000, 10_000])]
fn aggregate(bencher: Bencher, operations: usize) {
    let parser = LineParser::new(Layout::for_version(LayoutVersion::Uy3Aggregated))
        .expect("Invalid layout");
    let records: Vec<DetailRecord> = synthetic_lines(operations)
        .iter()
        .filter_map(|line| parser.parse(line))
        .collect();

    bencher
        .with_inputs(|| records.clone())
        .bench_local_values(aggregate_operations::<Vec<DetailRecord>>);
}

fn convert_directory(bencher: Bencher, strategy_type: StrategyType) {
    let base = TempDir::new().expect("Failed to create temp dir");
    let config = RunConfig::from_base_dir(base.path());
    fs::create_dir_all(&config.input_dir).expect("Failed to create input dir");
    for file in 0..8 {
        let content = synthetic_lines(500).join("\n");
        fs::write(config.input_dir.join(format!("remessa_{}.rem", file)), content)
            .expect("Failed to write input");
    }

    let strategy = create_strategy(strategy_type, Some(WorkerConfig::default()));

    bencher.bench_local(|| strategy::run(&config, strategy.as_ref()).expect("Run failed"));
}

/// Convert eight files sequentially
#[divan::bench(sample_count = 20)]
fn sync_strategy(bencher: Bencher) {
    convert_directory(bencher, StrategyType::Sync);
}

/// Convert eight files on the worker pool
#[divan::bench(sample_count = 20)]
fn parallel_strategy(bencher: Bencher) {
    convert_directory(bencher, StrategyType::Parallel);
}
