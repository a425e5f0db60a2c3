//! Structure Measure (S-measure).
//!
//! S-measure scores how well a prediction reproduces the structure of a binary
//! ground truth. It blends an object-aware term, comparing foreground and
//! background intensity distributions, with a region-aware term that splits both
//! maps into four quadrants around the ground-truth centroid and compares each
//! quadrant pair with a simplified SSIM.

use core::ops::Range;

use burn::tensor::{backend::Backend, cast::ToElement, Int, Tensor};

/// Guard added to statistical moment denominators.
const MOMENT_EPSILON: f64 = 1e-20;

/// Calculates the S-measure of one normalized image pair.
///
/// An empty ground truth scores `1 - mean(pred)` and a fully salient one scores
/// `mean(pred)`. Otherwise the ground truth is binarized at `0.5` and the score is
/// `alpha * S_object + (1 - alpha) * S_region`, clamped to zero when negative or NaN.
///
/// # Arguments
/// * `pred` - Prediction with shape `[height, width]`, values in `[0, 1]`.
/// * `gt` - Ground truth with shape `[height, width]`, values in `[0, 1]`.
/// * `alpha` - Weight of the object term.
pub fn s_measure<B: Backend>(pred: Tensor<B, 2>, gt: Tensor<B, 2>, alpha: f64) -> f64 {
    let y = gt.clone().mean().into_scalar().to_f64();

    if y == 0.0 {
        return 1.0 - pred.mean().into_scalar().to_f64();
    }
    if y == 1.0 {
        return pred.mean().into_scalar().to_f64();
    }

    let gt = gt.greater_equal_elem(0.5).float();
    let object = s_object(pred.clone(), gt.clone());
    let region = s_region(pred, gt);
    let score = alpha.mul_add(object, (1.0 - alpha) * region);

    if score.is_nan() || score < 0.0 {
        0.0
    } else {
        score
    }
}

/// Object-aware similarity of a prediction against a binary ground truth.
///
/// The foreground term scores the prediction inside the object, the background
/// term scores its complement outside it. They are blended by the fraction of
/// foreground pixels.
pub fn s_object<B: Backend>(pred: Tensor<B, 2>, gt: Tensor<B, 2>) -> f64 {
    let background = gt.clone().neg().add_scalar(1.0);

    let fg = pred.clone() * gt.clone();
    let bg = pred.neg().add_scalar(1.0) * background.clone();

    let u = gt.clone().mean().into_scalar().to_f64();
    let fg_score = object_score(fg, gt);
    let bg_score = object_score(bg, background);

    u.mul_add(fg_score, (1.0 - u) * bg_score)
}

/// Scores the values of `map` inside the region where `mask == 1`.
///
/// Returns `2x / (x^2 + 1 + sigma)` for the region mean `x` and population
/// standard deviation `sigma`, or zero when the region is empty.
pub fn object_score<B: Backend>(map: Tensor<B, 2>, mask: Tensor<B, 2>) -> f64 {
    let inside = mask.equal_elem(1.0);
    let count = inside.clone().int().sum().into_scalar().to_f64();
    if count == 0.0 {
        return 0.0;
    }
    let outside = inside.bool_not();

    let mean = map
        .clone()
        .mask_fill(outside.clone(), 0.0)
        .sum()
        .into_scalar()
        .to_f64()
        / count;
    let variance = map
        .sub_scalar(mean)
        .powf_scalar(2.0)
        .mask_fill(outside, 0.0)
        .sum()
        .into_scalar()
        .to_f64()
        / count;
    let sigma = variance.sqrt();

    2.0 * mean / (mean.mul_add(mean, 1.0) + sigma + MOMENT_EPSILON)
}

/// Region-aware similarity of a prediction against a binary ground truth.
///
/// Both maps are split into four quadrants at the ground-truth centroid; each
/// quadrant pair is scored with [`ssim`] and weighted by its share of the image.
/// A quadrant with no rows or no columns has zero weight and is skipped.
pub fn s_region<B: Backend>(pred: Tensor<B, 2>, gt: Tensor<B, 2>) -> f64 {
    let [height, width] = gt.dims();
    let (x, y) = centroid(gt.clone());
    let weights = region_weights(x, y, height, width);

    quadrants(x, y, height, width)
        .into_iter()
        .zip(weights)
        .filter(|((rows, cols), _)| !rows.is_empty() && !cols.is_empty())
        .map(|((rows, cols), weight)| {
            let pred_part = pred.clone().slice([rows.clone(), cols.clone()]);
            let gt_part = gt.clone().slice([rows, cols]);
            weight * ssim(pred_part, gt_part)
        })
        .sum()
}

/// Row and column ranges of the top-left, top-right, bottom-left and
/// bottom-right quadrants split at column `x` and row `y`.
fn quadrants(
    x: usize,
    y: usize,
    height: usize,
    width: usize,
) -> [(Range<usize>, Range<usize>); 4] {
    [
        (0..y, 0..x),
        (0..y, x..width),
        (y..height, 0..x),
        (y..height, x..width),
    ]
}

/// Area weights of the four quadrants split at column `x` and row `y`.
///
/// The last weight is derived from the other three so the weights sum to exactly one.
pub fn region_weights(x: usize, y: usize, height: usize, width: usize) -> [f64; 4] {
    let area = (height * width) as f64;
    let (x, y) = (x as f64, y as f64);
    let (height, width) = (height as f64, width as f64);

    let w1 = x * y / area;
    let w2 = (width - x) * y / area;
    let w3 = x * (height - y) / area;
    let w4 = 1.0 - w1 - w2 - w3;

    [w1, w2, w3, w4]
}

/// Intensity-weighted centroid `(column, row)` of a mask.
///
/// An all-zero mask yields the geometric center. Coordinates are rounded half to
/// even and are used directly as slice boundaries.
pub fn centroid<B: Backend>(gt: Tensor<B, 2>) -> (usize, usize) {
    let [rows, cols] = gt.dims();
    let total = gt.clone().sum().into_scalar().to_f64();

    if total == 0.0 {
        return (
            (cols as f64 / 2.0).round_ties_even() as usize,
            (rows as f64 / 2.0).round_ties_even() as usize,
        );
    }

    let device = gt.device();
    let col_index: Tensor<B, 2> = Tensor::<B, 1, Int>::arange(0..cols as i64, &device)
        .float()
        .unsqueeze_dim(0);
    let row_index: Tensor<B, 2> = Tensor::<B, 1, Int>::arange(0..rows as i64, &device)
        .float()
        .unsqueeze_dim(1);

    let x = (gt.clone().sum_dim(0) * col_index)
        .sum()
        .into_scalar()
        .to_f64()
        / total;
    let y = (gt.sum_dim(1) * row_index).sum().into_scalar().to_f64() / total;

    (x.round_ties_even() as usize, y.round_ties_even() as usize)
}

/// Simplified structural similarity of two equally shaped, non-empty regions.
///
/// Two constant and equal regions score one. A zero numerator with a non-zero
/// denominator scores zero.
pub fn ssim<B: Backend>(pred: Tensor<B, 2>, gt: Tensor<B, 2>) -> f64 {
    let [h, w] = pred.dims();
    let n = (h * w) as f64;

    let x = pred.clone().mean().into_scalar().to_f64();
    let y = gt.clone().mean().into_scalar().to_f64();

    let pred_centered = pred.sub_scalar(x);
    let gt_centered = gt.sub_scalar(y);
    let dof = n - 1.0 + MOMENT_EPSILON;

    let sigma_x2 = pred_centered
        .clone()
        .powf_scalar(2.0)
        .sum()
        .into_scalar()
        .to_f64()
        / dof;
    let sigma_y2 = gt_centered
        .clone()
        .powf_scalar(2.0)
        .sum()
        .into_scalar()
        .to_f64()
        / dof;
    let sigma_xy = (pred_centered * gt_centered).sum().into_scalar().to_f64() / dof;

    let numerator = 4.0 * x * y * sigma_xy;
    let denominator = x.mul_add(x, y * y) * (sigma_x2 + sigma_y2);

    if numerator != 0.0 {
        numerator / (denominator + MOMENT_EPSILON)
    } else if denominator == 0.0 {
        1.0
    } else {
        0.0
    }
}
