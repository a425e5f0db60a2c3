//! Input structure handed to the accumulator by an evaluation driver.

use burn::{prelude::*, tensor::backend::Backend};
use derive_new::new;

/// One evaluated sample.
#[derive(new, Debug, Clone)]
pub struct SaliencyInput<B: Backend> {
    /// Identifier of the sample, used for logging.
    pub name: String,
    /// Predicted saliency map with shape `[height, width]`, values in `[0, 255]`.
    pub prediction: Tensor<B, 2>,
    /// Ground truth mask with shape `[height, width]`, values in `[0, 255]`.
    /// Samples without a label are not scored.
    pub ground_truth: Option<Tensor<B, 2>>,
}
