//! Saliency evaluation CLI
//!
//! Scores a directory of predicted saliency maps against ground truth masks and
//! prints max F-measure, precision, recall, MAE and S-measure.
//!
//! ## Usage
//!
//! ```bash
//! # Evaluate predictions saved as <name>_sal.png against <name>.png labels
//! saliency-eval --pred-dir results/ECSSD --gt-dir datasets/ECSSD/gt --pred-suffix _sal
//!
//! # Use 8 workers and keep the full precision/recall curve
//! saliency-eval --pred-dir results --gt-dir gt --jobs 8 --json report.json
//!
//! # Custom metric parameters
//! saliency-eval --pred-dir results --gt-dir gt --config metric.json
//! ```

use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use burn::config::Config;
use clap::Parser;
use saliency_eval::{
    backend::{EvalDevice, NAME},
    run_evaluation, EvalConfig,
};
use saliency_metric::MetricConfig;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "saliency-eval")]
#[command(author, version, about = "Evaluate predicted saliency maps against ground truth masks")]
struct Args {
    /// Directory containing predicted saliency maps
    #[arg(short, long)]
    pred_dir: PathBuf,

    /// Directory containing ground truth masks (metrics are skipped without it)
    #[arg(short, long)]
    gt_dir: Option<PathBuf>,

    /// Suffix removed from prediction file stems before matching, e.g. "_sal"
    #[arg(long, default_value = "")]
    pred_suffix: String,

    /// Metric configuration file (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of worker threads (0 = one per core)
    #[arg(short, long, default_value = "0")]
    jobs: usize,

    /// Write the report, including the precision/recall curve, to this JSON file
    #[arg(long)]
    json: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if args.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let metric = match &args.config {
        Some(path) => MetricConfig::load(path).map_err(|err| {
            anyhow::anyhow!(
                "failed to load metric configuration {}: {err}",
                path.display()
            )
        })?,
        None => MetricConfig::new(),
    };

    let config = EvalConfig {
        pred_dir: args.pred_dir,
        gt_dir: args.gt_dir,
        pred_suffix: args.pred_suffix,
        jobs: args.jobs,
        metric,
    };

    tracing::info!(backend = NAME, "starting evaluation");
    let device = EvalDevice::default();
    let summary = run_evaluation(&config, &device).context("evaluation failed")?;

    let Some(report) = summary.report else {
        tracing::warn!(
            skipped = summary.skipped,
            "no labeled samples, nothing to report"
        );
        return Ok(());
    };

    println!("{report}");
    println!("Images:        {}", summary.processed);
    println!("--- {:.3} seconds ---", summary.elapsed.as_secs_f64());

    if let Some(path) = &args.json {
        let json = serde_json::to_string_pretty(&report)?;
        fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        tracing::info!(path = %path.display(), "report written");
    }

    Ok(())
}
