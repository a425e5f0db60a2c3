//! # Saliency Metrics
//!
//! Evaluation of predicted saliency maps against binary ground-truth masks,
//! implemented in Rust using the Burn framework.
//!
//! A [`SaliencyAccumulator`] is fed one `(prediction, ground truth)` pair at a
//! time and keeps running totals of:
//!
//! - **MAE**: mean absolute error of the maps normalized to `[0, 1]`
//! - **Precision/recall curve**: swept over 256 integer thresholds, from which
//!   the maximum F-measure (`beta^2 = 0.3`) is derived
//! - **S-measure**: structural similarity combining an object-level score and a
//!   centroid-based four-quadrant region score
//!
//! ## Usage
//!
//! ```rust,ignore
//! use burn::prelude::*;
//! use saliency_metric::MetricConfig;
//!
//! # fn example<B: burn::tensor::backend::Backend>() -> saliency_metric::MetricResult<()> {
//! let mut accumulator = MetricConfig::new().init()?;
//!
//! // 2D maps with values in [0, 255]
//! let prediction = Tensor::<B, 2>::zeros([256, 256], &Default::default());
//! let ground_truth = Tensor::<B, 2>::zeros([256, 256], &Default::default());
//! accumulator.update(prediction, ground_truth)?;
//!
//! println!("{}", accumulator.summarize()?);
//! # Ok(())
//! # }
//! ```
//!
//! ## Parallel evaluation
//!
//! Accumulators hold host-side totals only. Give each worker its own
//! accumulator and combine them with [`SaliencyAccumulator::merge`].

pub mod accumulator;
pub mod config;
pub mod error;
pub mod input;
pub mod mae;
pub mod pr_curve;
pub mod report;
pub mod s_measure;

pub use accumulator::{ImageScores, SaliencyAccumulator};
pub use config::MetricConfig;
pub use error::{MetricError, MetricResult};
pub use input::SaliencyInput;
pub use mae::mean_absolute_error;
pub use pr_curve::{precision_recall, PrecisionRecall};
pub use report::{CurvePoint, MetricReport};
pub use s_measure::{centroid, s_measure};
