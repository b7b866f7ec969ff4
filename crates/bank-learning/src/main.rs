//! CLI entry point for training the bank marketing classifier.

use anyhow::{Context, Result};
use bank_learning::{DEFAULT_MODEL_PATH, Pipeline, TrainingConfig};
use bank_processing::load_dataset;
use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Train the term-deposit subscription classifier",
    long_about = "Trains a logistic regression on the bank marketing dataset, prints \
                  held-out metrics and writes the fitted model to disk.\n\n\
                  EXAMPLES:\n  \
                  # Defaults: bank.csv -> bank_marketing_model.json\n  \
                  bank-train\n\n  \
                  # Custom paths\n  \
                  bank-train -i data/bank-full.csv -o models/bank.json"
)]
struct Args {
    /// Path to the semicolon-delimited dataset
    #[arg(short, long, default_value = "bank.csv")]
    input: PathBuf,

    /// Where to write the fitted model
    #[arg(short, long, default_value = DEFAULT_MODEL_PATH)]
    output: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

/// Initialize the tracing subscriber for logging.
///
/// Logs go to stderr so stdout carries only the report.
fn init_logging(level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level);

    info!("Loading dataset from: {}", args.input.display());
    let data = load_dataset(&args.input)
        .with_context(|| format!("failed to load '{}'", args.input.display()))?;

    let mut pipeline = Pipeline::builder()
        .config(TrainingConfig::default())
        .on_progress(|update| {
            debug!(
                "[{}] {:.0}% - {}",
                update.stage,
                update.progress * 100.0,
                update.message
            );
        })
        .build();

    let result = pipeline.train(&data).context("training failed")?;
    info!(
        "Trained on {} rows, evaluated on {} ({} features, {:.2}s)",
        result.train_rows, result.test_rows, result.feature_count, result.training_time_seconds
    );

    println!("Model Accuracy: {}", result.metrics.accuracy);
    println!("\nClassification Report:");
    println!("{}", result.metrics);

    let model = pipeline.create_trained_model()?;
    model
        .save(&args.output)
        .with_context(|| format!("failed to write '{}'", args.output.display()))?;

    println!("Model saved as '{}'", args.output.display());
    Ok(())
}
