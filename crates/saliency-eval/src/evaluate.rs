//! Evaluation of a prediction directory against its ground truth.

use std::{
    path::PathBuf,
    time::{Duration, Instant},
};

use rayon::prelude::*;
use saliency_metric::{MetricConfig, MetricReport, SaliencyAccumulator, SaliencyInput};

use crate::{
    backend::{EvalBackend, EvalDevice},
    dataset::{collect_samples, Sample},
    error::{EvalError, EvalResult},
    image::load_intensity_map,
};

/// Evaluation run configuration.
#[derive(Debug, Clone)]
pub struct EvalConfig {
    /// Root directory of the predicted saliency maps.
    pub pred_dir: PathBuf,
    /// Root directory of the ground truth masks, if the run is labeled.
    pub gt_dir: Option<PathBuf>,
    /// Suffix stripped from prediction file stems before matching labels.
    pub pred_suffix: String,
    /// Number of worker threads. Zero lets rayon decide.
    pub jobs: usize,
    /// Metric parameters.
    pub metric: MetricConfig,
}

impl EvalConfig {
    /// Creates a configuration with default metric parameters and no suffix.
    pub fn new(pred_dir: impl Into<PathBuf>, gt_dir: Option<PathBuf>) -> Self {
        Self {
            pred_dir: pred_dir.into(),
            gt_dir,
            pred_suffix: String::new(),
            jobs: 0,
            metric: MetricConfig::new(),
        }
    }
}

/// Outcome of an evaluation run.
#[derive(Debug, Clone)]
pub struct EvalSummary {
    /// Number of samples that were scored.
    pub processed: usize,
    /// Number of samples without ground truth.
    pub skipped: usize,
    /// Wall-clock time spent scoring.
    pub elapsed: Duration,
    /// Averaged metrics, or `None` when no sample had ground truth.
    pub report: Option<MetricReport>,
}

/// Scores every labeled prediction under `config.pred_dir`.
///
/// Samples are spread over a pool of `config.jobs` workers. Each worker folds
/// its share into a private accumulator and the partial accumulators are merged
/// at the end.
///
/// # Errors
///
/// Returns an error if the metric configuration is invalid, the dataset cannot
/// be collected, an image fails to decode, or a prediction and its label differ
/// in shape.
pub fn run_evaluation(config: &EvalConfig, device: &EvalDevice) -> EvalResult<EvalSummary> {
    config.metric.validate()?;

    let samples = collect_samples(
        &config.pred_dir,
        config.gt_dir.as_deref(),
        &config.pred_suffix,
    )?;
    let labeled: Vec<&Sample> = samples
        .iter()
        .filter(|sample| sample.ground_truth.is_some())
        .collect();
    let skipped = samples.len() - labeled.len();

    if labeled.is_empty() {
        tracing::info!(skipped, "no ground truth available, metrics skipped");
        return Ok(EvalSummary {
            processed: 0,
            skipped,
            elapsed: Duration::ZERO,
            report: None,
        });
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.jobs)
        .build()?;
    tracing::info!(
        samples = labeled.len(),
        workers = pool.current_num_threads(),
        "evaluating",
    );

    let start = Instant::now();
    let empty = || SaliencyAccumulator::new(config.metric.clone());
    let accumulator = pool.install(|| {
        labeled
            .par_iter()
            .try_fold(empty, |mut accumulator, sample| {
                evaluate_sample(&mut accumulator, sample, device)?;
                Ok::<_, EvalError>(accumulator)
            })
            .try_reduce(empty, |left, right| Ok(left.merged(right)?))
    })?;
    let elapsed = start.elapsed();

    let report = accumulator.summarize()?;
    tracing::info!(
        processed = accumulator.count(),
        skipped,
        elapsed_ms = elapsed.as_millis() as u64,
        "evaluation completed",
    );

    Ok(EvalSummary {
        processed: accumulator.count(),
        skipped,
        elapsed,
        report: Some(report),
    })
}

fn evaluate_sample(
    accumulator: &mut SaliencyAccumulator,
    sample: &Sample,
    device: &EvalDevice,
) -> EvalResult<()> {
    let prediction = load_intensity_map::<EvalBackend>(&sample.prediction, device)?;
    let ground_truth = sample
        .ground_truth
        .as_deref()
        .map(|path| load_intensity_map::<EvalBackend>(path, device))
        .transpose()?;

    let input = SaliencyInput::new(sample.name.clone(), prediction, ground_truth);
    accumulator
        .update_sample(input)
        .map_err(|source| EvalError::Metric {
            name: sample.name.clone(),
            source,
        })?;
    Ok(())
}
