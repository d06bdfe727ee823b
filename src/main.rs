//! Baseline Harness - Main Entry Point
//!
//! With no arguments, evaluates `data/train.csv` (label column `label`) and
//! prints training and cross-validation accuracy.

use baseline_harness::cli::{cmd_evaluate, cmd_info, cmd_predict, Cli, Commands};
use clap::Parser;

fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries the report only
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "baseline_harness=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Evaluate(args)) => {
            cmd_evaluate(&args)?;
        }
        Some(Commands::Predict { data, target, input, output, delimiter }) => {
            cmd_predict(&data, &target, input.as_deref(), output.as_deref(), delimiter)?;
        }
        Some(Commands::Info { data, target, delimiter }) => {
            cmd_info(&data, target.as_deref(), delimiter)?;
        }
        None => {
            cmd_evaluate(&cli.evaluate)?;
        }
    }

    Ok(())
}
