//! Mean Absolute Error between a normalized prediction and its ground truth.

use burn::tensor::{backend::Backend, cast::ToElement, Tensor};

/// Calculates the mean absolute pixel error of one image pair.
///
/// # Arguments
/// * `pred` - Prediction with shape `[height, width]`, values in `[0, 1]`.
/// * `gt` - Ground truth with shape `[height, width]`, values in `[0, 1]`.
pub fn mean_absolute_error<B: Backend>(pred: Tensor<B, 2>, gt: Tensor<B, 2>) -> f64 {
    (pred - gt).abs().mean().into_scalar().to_f64()
}

#[cfg(test)]
mod tests {
    use burn::tensor::TensorData;

    use super::*;
    use crate::tests::TestBackend;

    #[test]
    fn identical_maps_have_zero_error() {
        let device = Default::default();
        let map = Tensor::<TestBackend, 2>::from_data(
            TensorData::new(vec![0.0_f32, 1.0, 1.0, 0.0], [2, 2]),
            &device,
        );
        assert_eq!(mean_absolute_error(map.clone(), map), 0.0);
    }

    #[test]
    fn error_is_mean_of_absolute_differences() {
        let device = Default::default();
        let pred = Tensor::<TestBackend, 2>::from_data(
            TensorData::new(vec![0.5_f32, 0.0, 1.0, 0.25], [2, 2]),
            &device,
        );
        let gt = Tensor::<TestBackend, 2>::from_data(
            TensorData::new(vec![1.0_f32, 0.0, 0.0, 0.0], [2, 2]),
            &device,
        );
        let mae = mean_absolute_error(pred, gt);
        assert!((mae - 0.4375).abs() < 1e-6);
    }
}
