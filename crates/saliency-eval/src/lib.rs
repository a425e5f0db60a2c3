//! Evaluation driver for saliency predictions.
//!
//! Pairs predicted saliency maps on disk with their ground truth masks, feeds
//! them through [`saliency_metric::SaliencyAccumulator`] on a pool of workers
//! and reduces the merged totals into a [`saliency_metric::MetricReport`].

pub mod backend;
pub mod dataset;
pub mod error;
pub mod evaluate;
pub mod image;

pub use dataset::{collect_samples, Sample};
pub use error::{EvalError, EvalResult};
pub use evaluate::{run_evaluation, EvalConfig, EvalSummary};
