use thiserror::Error;

/// The error type for saliency metric operations.
///
/// Every variant is a precondition violation reported before any numeric work
/// touches the running totals. Degenerate regions inside an image (empty
/// quadrants, empty masks, empty threshold buckets) are not errors; they are
/// smoothed or scored locally.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MetricError {
    /// Prediction and ground truth maps have different shapes.
    #[error("shape mismatch: prediction is {prediction:?}, ground truth is {ground_truth:?}")]
    ShapeMismatch {
        /// Shape of the prediction map as `[height, width]`.
        prediction: [usize; 2],
        /// Shape of the ground truth map as `[height, width]`.
        ground_truth: [usize; 2],
    },

    /// The image pair has no pixels.
    #[error("image has no pixels: {height}x{width}")]
    EmptyImage {
        /// Image height.
        height: usize,
        /// Image width.
        width: usize,
    },

    /// A report was requested before any image was processed.
    #[error("no images have been accumulated")]
    EmptyAccumulator,

    /// Two accumulators built from different configurations were merged.
    #[error("cannot merge accumulators: {left} vs {right}")]
    IncompatibleAccumulators {
        /// Description of the receiving accumulator's configuration.
        left: String,
        /// Description of the merged accumulator's configuration.
        right: String,
    },

    /// The metric configuration is invalid.
    #[error("invalid metric configuration: {reason}")]
    InvalidConfiguration {
        /// Why the configuration was rejected.
        reason: String,
    },
}

/// A specialized `Result` type for saliency metric operations.
pub type MetricResult<T> = Result<T, MetricError>;
