//! Precision/recall sweep over a fixed set of integer decision thresholds.

use burn::tensor::{backend::Backend, cast::ToElement, Tensor};

/// Per-threshold precision and recall of a single image pair.
#[derive(Debug, Clone, PartialEq)]
pub struct PrecisionRecall {
    /// Precision at each threshold index.
    pub precision: Vec<f64>,
    /// Recall at each threshold index.
    pub recall: Vec<f64>,
}

/// Sweeps `thresholds` decision boundaries over one image pair.
///
/// Both maps are in the raw `[0, 255]` intensity range. At threshold `th` the
/// prediction is binarized at `> th` and the ground truth at `> th / thresholds`.
/// `epsilon` is added to numerator and denominator of both ratios so that an
/// empty mask yields a finite value instead of a division by zero.
///
/// # Arguments
/// * `pred` - Prediction with shape `[height, width]`.
/// * `gt` - Ground truth with shape `[height, width]`.
/// * `thresholds` - Number of thresholds, swept as `0..thresholds`.
/// * `epsilon` - Smoothing term.
pub fn precision_recall<B: Backend>(
    pred: Tensor<B, 2>,
    gt: Tensor<B, 2>,
    thresholds: usize,
    epsilon: f64,
) -> PrecisionRecall {
    let mut precision = Vec::with_capacity(thresholds);
    let mut recall = Vec::with_capacity(thresholds);

    for th in 0..thresholds {
        let pred_mask = pred.clone().greater_elem(th as f64);
        let gt_mask = gt.clone().greater_elem(th as f64 / thresholds as f64);

        let true_positives = pred_mask
            .clone()
            .bool_and(gt_mask.clone())
            .int()
            .sum()
            .into_scalar()
            .to_f64();
        let pred_positives = pred_mask.int().sum().into_scalar().to_f64();
        let gt_positives = gt_mask.int().sum().into_scalar().to_f64();

        precision.push((true_positives + epsilon) / (pred_positives + epsilon));
        recall.push((true_positives + epsilon) / (gt_positives + epsilon));
    }

    PrecisionRecall { precision, recall }
}
