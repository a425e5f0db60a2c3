//! Backend used by the evaluation driver.
//!
//! Metric evaluation is CPU-bound host work; the `ndarray` backend is used
//! everywhere.

use burn::backend::ndarray::{NdArray, NdArrayDevice};

/// Backend type.
pub type EvalBackend = NdArray;
/// Device type.
pub type EvalDevice = NdArrayDevice;

/// Backend name for logging purposes.
pub const NAME: &str = "NdArray (CPU)";
