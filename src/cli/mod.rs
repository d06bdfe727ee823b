//! Baseline Harness CLI Module
//!
//! Command-line interface for evaluation, prediction and data inspection.

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::*;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::training::{
    EvaluationConfig, EvaluationEngine, ExclusionPolicy, RemainderPolicy, DEFAULT_LABEL_COLUMN,
};
use crate::utils::{DataLoader, DataSaver, DEFAULT_DELIMITER};

// ─── Styling helpers ───────────────────────────────────────────────────────────

fn dim(s: &str) -> ColoredString   { s.truecolor(100, 100, 100) }
fn accent(s: &str) -> ColoredString { s.truecolor(120, 170, 255) }
fn muted(s: &str) -> ColoredString  { s.truecolor(140, 140, 140) }
fn ok(s: &str) -> ColoredString     { s.truecolor(100, 210, 120) }

fn step_run(msg: &str) {
    print!("  {} {}... ", accent("›"), msg);
}

fn step_done(detail: &str) {
    println!("{} {}", ok("done"), dim(detail));
}

fn section(title: &str) {
    println!();
    println!("  {}", title.white().bold());
    println!("  {}", dim(&"─".repeat(56)));
}

// ─── CLI definition ────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "baseline")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Majority-label baseline classifier evaluation")]
#[command(long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Evaluation options used when no subcommand is given
    #[command(flatten)]
    pub evaluate: EvaluateArgs,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Report training and cross-validation accuracy (default)
    Evaluate(EvaluateArgs),

    /// Fit on labeled data and write predictions
    Predict {
        /// Labeled training file
        #[arg(short, long)]
        data: PathBuf,

        /// Label column name
        #[arg(short, long, default_value = DEFAULT_LABEL_COLUMN)]
        target: String,

        /// Unlabeled rows to predict (defaults to the training rows)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output predictions file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Field delimiter for both input files
        #[arg(long, default_value_t = DEFAULT_DELIMITER)]
        delimiter: char,
    },

    /// Show data information
    Info {
        /// Input data file
        #[arg(short, long)]
        data: PathBuf,

        /// Label column to summarize
        #[arg(short, long)]
        target: Option<String>,

        /// Field delimiter
        #[arg(long, default_value_t = DEFAULT_DELIMITER)]
        delimiter: char,
    },
}

#[derive(Args, Debug, Default, Clone)]
pub struct EvaluateArgs {
    /// Labeled input file
    #[arg(short, long)]
    pub data: Option<PathBuf>,

    /// Label column name
    #[arg(short, long)]
    pub target: Option<String>,

    /// Field delimiter
    #[arg(long)]
    pub delimiter: Option<char>,

    /// Number of cross-validation folds
    #[arg(long)]
    pub cv_folds: Option<usize>,

    /// How fold training rows are separated from held-out rows
    #[arg(long, value_enum)]
    pub exclusion: Option<ExclusionArg>,

    /// What happens to rows left over after equal-size folds
    #[arg(long, value_enum)]
    pub remainder: Option<RemainderArg>,

    /// Shuffle rows before slicing folds
    #[arg(long)]
    pub shuffle: bool,

    /// Seed for the shuffle
    #[arg(long)]
    pub seed: Option<u64>,

    /// JSON configuration file; flags override its values
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Print the full report as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum ExclusionArg {
    Index,
    Value,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum RemainderArg {
    Drop,
    Distribute,
}

impl From<ExclusionArg> for ExclusionPolicy {
    fn from(arg: ExclusionArg) -> Self {
        match arg {
            ExclusionArg::Index => ExclusionPolicy::ByIndex,
            ExclusionArg::Value => ExclusionPolicy::ByValue,
        }
    }
}

impl From<RemainderArg> for RemainderPolicy {
    fn from(arg: RemainderArg) -> Self {
        match arg {
            RemainderArg::Drop => RemainderPolicy::Drop,
            RemainderArg::Distribute => RemainderPolicy::Distribute,
        }
    }
}

impl EvaluateArgs {
    /// Merge the optional config file with command-line overrides
    pub fn to_config(&self) -> anyhow::Result<EvaluationConfig> {
        let mut config = match &self.config {
            Some(path) => EvaluationConfig::from_json_file(path)?,
            None => EvaluationConfig::default(),
        };

        if let Some(data) = &self.data {
            config.data_path = data.clone();
        }
        if let Some(target) = &self.target {
            config.label_column = target.clone();
        }
        if let Some(delimiter) = self.delimiter {
            config.delimiter = delimiter;
        }
        if let Some(folds) = self.cv_folds {
            config.cv_folds = folds;
        }
        if let Some(exclusion) = self.exclusion {
            config.exclusion = exclusion.into();
        }
        if let Some(remainder) = self.remainder {
            config.remainder = remainder.into();
        }
        if self.shuffle {
            config.shuffle = true;
        }
        if let Some(seed) = self.seed {
            config.random_state = Some(seed);
        }

        config.validate()?;
        Ok(config)
    }
}

// ─── Commands ──────────────────────────────────────────────────────────────────

pub fn cmd_evaluate(args: &EvaluateArgs) -> anyhow::Result<()> {
    let config = args.to_config()?;
    let report = EvaluationEngine::new(config).run()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report);
    }

    Ok(())
}

pub fn cmd_predict(
    data_path: &Path,
    target: &str,
    input: Option<&Path>,
    output: Option<&Path>,
    delimiter: char,
) -> anyhow::Result<()> {
    section("Predict");

    let loader = DataLoader::new().with_delimiter(delimiter);
    step_run("Loading training data");
    let start = Instant::now();
    let train = loader.load_labeled(data_path, target)?;
    step_done(&format!(
        "{} rows × {} features in {:?}",
        train.len(),
        train.feature_names().len(),
        start.elapsed()
    ));

    let rows = match input {
        Some(path) => {
            step_run(&format!("Loading {}", path.display()));
            let rows = loader.load_unlabeled(path)?;
            step_done(&format!("{} rows", rows.len()));
            rows
        }
        None => train.unlabeled(),
    };

    let config = EvaluationConfig::new(data_path, target).with_delimiter(delimiter);
    let engine = EvaluationEngine::new(config);
    let predictions = engine.fit_predict(&train, &rows)?;

    match output {
        Some(path) => {
            step_run(&format!("Saving → {}", path.display()));
            DataSaver::save_predictions(&predictions, path)?;
            step_done(&format!("{} predictions", predictions.len()));
        }
        None => {
            println!();
            println!("  {:<8} {}", muted("index"), muted("prediction"));
            for (index, label) in &predictions {
                println!("  {:<8} {}", index, label.white());
            }
        }
    }

    println!();
    Ok(())
}

pub fn cmd_info(data_path: &Path, target: Option<&str>, delimiter: char) -> anyhow::Result<()> {
    section("Data Info");

    let loader = DataLoader::new().with_delimiter(delimiter);
    let info = loader.get_file_info(data_path)?;

    println!("  {:<12} {}", muted("File"), info.path);
    println!("  {:<12} {}", muted("Rows"), info.n_rows);
    println!("  {:<12} {}", muted("Columns"), info.n_cols);
    println!("  {:<12} {:.2} KB", muted("Size"), info.file_size as f64 / 1024.0);
    println!();

    println!("  {}", muted("Column"));
    println!("  {}", dim(&"─".repeat(30)));
    for column in &info.columns {
        let marker = if Some(column.as_str()) == target { ok(" (label)") } else { "".normal() };
        println!("  {}{}", column, marker);
    }

    if let Some(target) = target {
        let data = loader.load_labeled(data_path, target)?;
        println!();
        println!("  {:<20} {:>8} {:>8}", muted("Label"), muted("Count"), muted("Share"));
        println!("  {}", dim(&"─".repeat(38)));
        for (label, count) in data.label_distribution() {
            println!(
                "  {:<20} {:>8} {:>7.1}%",
                label,
                count,
                100.0 * count as f64 / data.len() as f64
            );
        }
    }

    println!();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments_means_defaults() {
        let cli = Cli::try_parse_from(["baseline"]).unwrap();
        assert!(cli.command.is_none());

        let config = cli.evaluate.to_config().unwrap();
        assert_eq!(config, EvaluationConfig::default());
    }

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "baseline", "-d", "iris.csv", "-t", "species", "--cv-folds", "10",
            "--exclusion", "value", "--remainder", "distribute", "--shuffle", "--seed", "7",
        ])
        .unwrap();

        let config = cli.evaluate.to_config().unwrap();
        assert_eq!(config.data_path, PathBuf::from("iris.csv"));
        assert_eq!(config.label_column, "species");
        assert_eq!(config.cv_folds, 10);
        assert_eq!(config.exclusion, ExclusionPolicy::ByValue);
        assert_eq!(config.remainder, RemainderPolicy::Distribute);
        assert!(config.shuffle);
        assert_eq!(config.random_state, Some(7));
    }

    #[test]
    fn test_evaluate_subcommand() {
        let cli = Cli::try_parse_from(["baseline", "evaluate", "--json"]).unwrap();
        match cli.command {
            Some(Commands::Evaluate(args)) => assert!(args.json),
            _ => panic!("expected evaluate subcommand"),
        }
    }

    #[test]
    fn test_delimiter_flag_reaches_every_command() {
        let cli = Cli::try_parse_from(["baseline", "--delimiter", ";"]).unwrap();
        assert_eq!(cli.evaluate.to_config().unwrap().delimiter, ';');

        let cli = Cli::try_parse_from(["baseline", "predict", "-d", "x.csv", "--delimiter", "\t"])
            .unwrap();
        assert!(matches!(cli.command, Some(Commands::Predict { delimiter: '\t', .. })));

        let cli = Cli::try_parse_from(["baseline", "info", "-d", "x.csv"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Info { delimiter: ',', .. })));
    }

    #[test]
    fn test_invalid_fold_count_rejected() {
        let cli = Cli::try_parse_from(["baseline", "--cv-folds", "1"]).unwrap();
        assert!(cli.evaluate.to_config().is_err());
    }
}
