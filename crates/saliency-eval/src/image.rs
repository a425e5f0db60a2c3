//! Decoding of saliency maps and masks into intensity tensors.

use std::path::Path;

use burn::tensor::{backend::Backend, Tensor, TensorData};
use image::DynamicImage;

use crate::error::{EvalError, EvalResult};

/// Loads an image as a single-channel intensity map.
///
/// # Returns
/// Tensor of shape `[height, width]` with values in range `[0, 255]`.
///
/// # Errors
///
/// Returns [`EvalError::ImageOpenFailed`] if the file cannot be opened or decoded.
pub fn load_intensity_map<B: Backend>(path: &Path, device: &B::Device) -> EvalResult<Tensor<B, 2>> {
    let img = image::open(path).map_err(|source| EvalError::ImageOpenFailed {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(intensity_map(&img, device))
}

/// Converts a decoded image to 8-bit luma and then to a `[height, width]` tensor.
pub fn intensity_map<B: Backend>(img: &DynamicImage, device: &B::Device) -> Tensor<B, 2> {
    let luma = img.to_luma8();
    let (width, height) = luma.dimensions();
    let values: Vec<f32> = luma.into_raw().into_iter().map(f32::from).collect();

    Tensor::from_data(
        TensorData::new(values, [height as usize, width as usize]),
        device,
    )
}

#[cfg(test)]
mod tests {
    use burn::backend::NdArray;
    use image::{GrayImage, Luma};

    use super::*;

    type TestBackend = NdArray;

    #[test]
    fn intensity_map_keeps_raw_range_and_layout() {
        // 3 wide, 2 high
        let img = GrayImage::from_fn(3, 2, |x, y| Luma([(x * 100 + y * 5) as u8]));
        let tensor = intensity_map::<TestBackend>(&DynamicImage::ImageLuma8(img), &Default::default());

        assert_eq!(tensor.dims(), [2, 3]);
        let values = tensor.into_data().to_vec::<f32>().unwrap();
        assert_eq!(values, vec![0.0, 100.0, 200.0, 5.0, 105.0, 205.0]);
    }

    #[test]
    fn round_trip_through_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mask.png");
        GrayImage::from_pixel(4, 4, Luma([255])).save(&path).unwrap();

        let tensor = load_intensity_map::<TestBackend>(&path, &Default::default()).unwrap();
        let values = tensor.into_data().to_vec::<f32>().unwrap();
        assert_eq!(values, vec![255.0; 16]);
    }

    #[test]
    fn undecodable_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"definitely not a png").unwrap();

        match load_intensity_map::<TestBackend>(&path, &Default::default()) {
            Err(EvalError::ImageOpenFailed { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("Expected ImageOpenFailed, got {:?}", other.map(|t| t.dims())),
        }
    }
}
