//! Error types specific to the saliency-eval crate.
//!
//! Dataset discovery and image decoding failures live here; numeric
//! precondition failures are wrapped from [`MetricError`].

use std::path::PathBuf;

use saliency_metric::MetricError;
use thiserror::Error;

/// Error type for evaluation runs.
#[derive(Error, Debug)]
pub enum EvalError {
    /// The prediction directory does not exist.
    #[error("Prediction directory not found: {path}")]
    PredictionDirectoryNotFound {
        /// The expected prediction directory.
        path: PathBuf,
    },

    /// The ground truth directory does not exist.
    #[error("Ground truth directory not found: {path}")]
    GroundTruthDirectoryNotFound {
        /// The expected ground truth directory.
        path: PathBuf,
    },

    /// Walking a directory failed.
    #[error("Failed to read directory: {path}")]
    DirectoryReadFailed {
        /// The directory being walked.
        path: PathBuf,
        /// The underlying walk error.
        #[source]
        source: walkdir::Error,
    },

    /// No decodable prediction was found.
    #[error("No prediction images found in: {path}")]
    NoPredictions {
        /// The directory that was searched.
        path: PathBuf,
    },

    /// A file name is not valid UTF-8.
    #[error("Path contains invalid UTF-8: {path}")]
    InvalidUtf8Path {
        /// The offending path.
        path: PathBuf,
    },

    /// Opening or decoding an image failed.
    #[error("Failed to open image: {path}")]
    ImageOpenFailed {
        /// The image file path.
        path: PathBuf,
        /// The underlying decoding error.
        #[source]
        source: image::ImageError,
    },

    /// A metric precondition was violated for a sample.
    #[error("Failed to evaluate sample '{name}'")]
    Metric {
        /// Name of the sample.
        name: String,
        /// The underlying metric error.
        #[source]
        source: MetricError,
    },

    /// The metric configuration was rejected or per-worker totals could not be combined.
    #[error(transparent)]
    Accumulator(#[from] MetricError),

    /// The worker pool could not be created.
    #[error("Failed to build worker pool")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// A specialized `Result` type for evaluation runs.
pub type EvalResult<T> = Result<T, EvalError>;
