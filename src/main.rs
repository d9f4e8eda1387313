//! CNAB Converter CLI
//!
//! Converts every CNAB-400 file found in an input directory into a CSV file
//! in an output directory.
//!
//! # Usage
//!
//! ```bash
//! cnab-converter
//! cnab-converter --base-dir /srv/cobranca
//! cnab-converter --layout uy3-installments --mode installments
//! cnab-converter --strategy parallel --workers 4
//! RUST_LOG=debug cnab-converter --encodings utf8,latin1
//! ```
//!
//! Without flags, the converter reads `CNABs/` and writes `Convertidos/`
//! next to the executable, creating both folders when missing. Logs go to
//! stderr; the run summary goes to stdout.
//!
//! # Exit Codes
//!
//! - 0: Every file converted (or there were none)
//! - 1: At least one file failed, or the run could not start

use cnab_converter::cli;
use cnab_converter::strategy;
use cnab_converter::types::RunSummary;
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(
                    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
                ),
        )
        .init();

    let args = cli::parse_args();

    let base = match args.base_dir.clone().or_else(executable_dir) {
        Some(base) => base,
        None => {
            eprintln!("Error: could not determine the base directory, use --base-dir");
            process::exit(1);
        }
    };
    let config = args.to_run_config(&base);

    let strategy = {
        let workers = if matches!(args.strategy, cli::StrategyType::Parallel) {
            Some(args.to_worker_config())
        } else {
            None
        };
        strategy::create_strategy(args.strategy, workers)
    };

    match strategy::run(&config, strategy.as_ref()) {
        Ok(summary) => {
            print_summary(&summary, &config.input_dir, &config.output_dir);
            if summary.failures() > 0 {
                process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

/// Directory containing the running executable
fn executable_dir() -> Option<PathBuf> {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
}

fn print_summary(summary: &RunSummary, input_dir: &Path, output_dir: &Path) {
    if summary.total() == 0 {
        println!("Nenhum arquivo CNAB encontrado.");
        println!("Coloque os arquivos em '{}' e execute novamente.", input_dir.display());
        return;
    }

    println!("RESUMO DO PROCESSAMENTO");
    println!("  Total de arquivos: {}", summary.total());
    println!("  Sucessos: {}", summary.successes());
    if summary.failures() > 0 {
        println!("  Falhas: {}", summary.failures());
        for (path, error) in summary.failed() {
            println!("    {}: {}", path.display(), error);
        }
    }
    println!("  Arquivos salvos em: {}", output_dir.display());
}
