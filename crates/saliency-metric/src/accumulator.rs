//! Running accumulation of saliency metrics over a stream of image pairs.
//!
//! [`SaliencyAccumulator`] owns plain host-side totals, so independent
//! accumulators can be filled on separate workers and combined with
//! [`SaliencyAccumulator::merge`]. Merging sums every field and is associative
//! and commutative up to floating point rounding.

use burn::tensor::{backend::Backend, Tensor};

use crate::{
    config::MetricConfig,
    error::{MetricError, MetricResult},
    input::SaliencyInput,
    mae::mean_absolute_error,
    pr_curve::{precision_recall, PrecisionRecall},
    report::{CurvePoint, MetricReport},
    s_measure::s_measure,
};

/// Scores of a single image pair.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageScores {
    /// Mean absolute error of the normalized maps.
    pub mae: f64,
    /// S-measure, already clamped to `[0, 1]` by [`crate::s_measure::s_measure`].
    pub s_measure: f64,
    /// Precision and recall at every threshold.
    pub curve: PrecisionRecall,
}

/// Accumulates MAE, the precision/recall curve and S-measure over many images.
#[derive(Debug, Clone, PartialEq)]
pub struct SaliencyAccumulator {
    config: MetricConfig,
    mae_sum: f64,
    s_measure_sum: f64,
    precision_sum: Vec<f64>,
    recall_sum: Vec<f64>,
    count: usize,
}

impl Default for SaliencyAccumulator {
    fn default() -> Self {
        Self::new(MetricConfig::new())
    }
}

impl SaliencyAccumulator {
    /// Creates an empty accumulator.
    ///
    /// The configuration is not validated; use [`MetricConfig::init`] for that.
    pub fn new(config: MetricConfig) -> Self {
        let thresholds = config.thresholds;
        Self {
            config,
            mae_sum: 0.0,
            s_measure_sum: 0.0,
            precision_sum: vec![0.0; thresholds],
            recall_sum: vec![0.0; thresholds],
            count: 0,
        }
    }

    /// Scores one image pair without touching the running totals.
    ///
    /// # Arguments
    /// * `pred` - Prediction with shape `[height, width]`, values in `[0, 255]`.
    /// * `gt` - Ground truth with shape `[height, width]`, values in `[0, 255]`.
    ///
    /// # Errors
    ///
    /// Returns [`MetricError::ShapeMismatch`] if the shapes differ and
    /// [`MetricError::EmptyImage`] if the pair has no pixels.
    pub fn evaluate_pair<B: Backend>(
        &self,
        pred: Tensor<B, 2>,
        gt: Tensor<B, 2>,
    ) -> MetricResult<ImageScores> {
        let prediction = pred.dims();
        let ground_truth = gt.dims();
        if prediction != ground_truth {
            return Err(MetricError::ShapeMismatch {
                prediction,
                ground_truth,
            });
        }
        let [height, width] = prediction;
        if height * width == 0 {
            return Err(MetricError::EmptyImage { height, width });
        }

        let norm_pred = pred.clone().div_scalar(255.0);
        let norm_gt = gt.clone().div_scalar(255.0);

        let mae = mean_absolute_error(norm_pred.clone(), norm_gt.clone());
        let curve = precision_recall(pred, gt, self.config.thresholds, self.config.epsilon);
        let s_measure = s_measure(norm_pred, norm_gt, self.config.alpha);

        Ok(ImageScores {
            mae,
            s_measure,
            curve,
        })
    }

    /// Scores one image pair and adds it to the running totals.
    ///
    /// # Errors
    ///
    /// See [`Self::evaluate_pair`]. On error the totals are left unchanged.
    pub fn update<B: Backend>(&mut self, pred: Tensor<B, 2>, gt: Tensor<B, 2>) -> MetricResult<()> {
        let scores = self.evaluate_pair(pred, gt)?;
        self.absorb(scores)
    }

    /// Scores a sample if it carries a ground truth.
    ///
    /// Returns `false` without touching the totals when the sample is unlabeled.
    ///
    /// # Errors
    ///
    /// See [`Self::evaluate_pair`].
    pub fn update_sample<B: Backend>(&mut self, input: SaliencyInput<B>) -> MetricResult<bool> {
        let Some(gt) = input.ground_truth else {
            tracing::trace!(name = %input.name, "sample has no ground truth");
            return Ok(false);
        };
        let scores = self.evaluate_pair(input.prediction, gt)?;
        tracing::debug!(
            name = %input.name,
            mae = scores.mae,
            s_measure = scores.s_measure,
            "sample evaluated",
        );
        self.absorb(scores)?;
        Ok(true)
    }

    /// Adds one image's scores to the running totals.
    ///
    /// Negative and NaN values count as zero, so the totals never decrease.
    ///
    /// # Errors
    ///
    /// Returns [`MetricError::IncompatibleAccumulators`] if the scores were
    /// computed with a different number of thresholds.
    pub fn absorb(&mut self, scores: ImageScores) -> MetricResult<()> {
        let ImageScores {
            mae,
            s_measure,
            curve,
        } = scores;
        if curve.precision.len() != self.config.thresholds
            || curve.recall.len() != self.config.thresholds
        {
            return Err(MetricError::IncompatibleAccumulators {
                left: format!("{} thresholds", self.config.thresholds),
                right: format!("{} thresholds", curve.precision.len()),
            });
        }

        self.mae_sum += non_negative(mae);
        self.s_measure_sum += non_negative(s_measure);
        add_non_negative(&mut self.precision_sum, &curve.precision);
        add_non_negative(&mut self.recall_sum, &curve.recall);
        self.count += 1;
        Ok(())
    }

    /// Adds the totals of `other` into `self`.
    ///
    /// # Errors
    ///
    /// Returns [`MetricError::IncompatibleAccumulators`] if the two accumulators
    /// were built from different configurations.
    pub fn merge(&mut self, other: &Self) -> MetricResult<()> {
        if self.config != other.config {
            return Err(MetricError::IncompatibleAccumulators {
                left: self.config.to_string(),
                right: other.config.to_string(),
            });
        }

        self.mae_sum += other.mae_sum;
        self.s_measure_sum += other.s_measure_sum;
        add_assign(&mut self.precision_sum, &other.precision_sum);
        add_assign(&mut self.recall_sum, &other.recall_sum);
        self.count += other.count;
        Ok(())
    }

    /// Consuming form of [`Self::merge`], convenient for reductions.
    ///
    /// # Errors
    ///
    /// See [`Self::merge`].
    pub fn merged(mut self, other: Self) -> MetricResult<Self> {
        self.merge(&other)?;
        Ok(self)
    }

    /// Clears every total, keeping the configuration.
    pub fn reset(&mut self) {
        *self = Self::new(self.config.clone());
    }

    /// Configuration the totals were accumulated with.
    pub const fn config(&self) -> &MetricConfig {
        &self.config
    }

    /// Number of images accumulated so far.
    pub const fn count(&self) -> usize {
        self.count
    }

    /// Whether no image has been accumulated yet.
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Sum of per-image MAE.
    pub const fn mae_sum(&self) -> f64 {
        self.mae_sum
    }

    /// Sum of per-image S-measure.
    pub const fn s_measure_sum(&self) -> f64 {
        self.s_measure_sum
    }

    /// Per-threshold sum of precision.
    pub fn precision_sum(&self) -> &[f64] {
        &self.precision_sum
    }

    /// Per-threshold sum of recall.
    pub fn recall_sum(&self) -> &[f64] {
        &self.recall_sum
    }

    /// Mean F-measure at every threshold.
    ///
    /// # Errors
    ///
    /// Returns [`MetricError::EmptyAccumulator`] if no image has been accumulated.
    pub fn f_measure_curve(&self) -> MetricResult<Vec<f64>> {
        Ok(self.mean_curve()?.into_iter().map(|point| point.f_measure).collect())
    }

    /// Reduces the totals into averaged metrics.
    ///
    /// # Errors
    ///
    /// Returns [`MetricError::EmptyAccumulator`] if no image has been accumulated.
    pub fn summarize(&self) -> MetricResult<MetricReport> {
        let curve = self.mean_curve()?;
        let count = self.count as f64;
        Ok(MetricReport::from_curve(
            self.count,
            curve,
            self.mae_sum / count,
            self.s_measure_sum / count,
        ))
    }

    fn mean_curve(&self) -> MetricResult<Vec<CurvePoint>> {
        if self.count == 0 {
            return Err(MetricError::EmptyAccumulator);
        }
        let count = self.count as f64;
        let beta_sq = self.config.beta_sq;

        Ok(self
            .precision_sum
            .iter()
            .zip(&self.recall_sum)
            .enumerate()
            .map(|(threshold, (precision, recall))| {
                let precision = precision / count;
                let recall = recall / count;
                let f_measure =
                    (1.0 + beta_sq) * precision * recall / beta_sq.mul_add(precision, recall);
                CurvePoint {
                    threshold,
                    precision,
                    recall,
                    f_measure,
                }
            })
            .collect())
    }
}

fn add_assign(totals: &mut [f64], values: &[f64]) {
    for (total, value) in totals.iter_mut().zip(values) {
        *total += value;
    }
}

fn add_non_negative(totals: &mut [f64], values: &[f64]) {
    for (total, value) in totals.iter_mut().zip(values) {
        *total += non_negative(*value);
    }
}

/// `f64::max` discards NaN, so this maps NaN to zero as well.
fn non_negative(value: f64) -> f64 {
    value.max(0.0)
}
