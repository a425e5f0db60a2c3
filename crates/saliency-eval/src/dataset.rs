//! Discovery of prediction/ground-truth pairs on disk.
//!
//! Predictions are matched with labels by relative directory and file stem.
//! A prediction saved as `<name><suffix>.png` pairs with any decodable
//! `<name>.<ext>` under the same relative directory of the label root.

use std::{
    ffi::OsStr,
    path::{Path, PathBuf},
};

use image::ImageFormat;
use walkdir::WalkDir;

use crate::error::{EvalError, EvalResult};

/// One prediction and, if available, its ground truth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {
    /// Relative name of the sample without extension and suffix.
    pub name: String,
    /// Path to the predicted saliency map.
    pub prediction: PathBuf,
    /// Path to the ground truth mask, if one was found.
    pub ground_truth: Option<PathBuf>,
}

/// Collects every decodable prediction under `pred_dir` and pairs it with a label.
///
/// # Arguments
/// * `pred_dir` - Root of the prediction maps, walked recursively.
/// * `gt_dir` - Root of the ground truth masks. `None` yields unlabeled samples.
/// * `pred_suffix` - Suffix stripped from prediction stems before matching, e.g. `_sal`.
///
/// # Errors
///
/// Returns an error if a directory is missing or unreadable, or if no
/// prediction image is found.
pub fn collect_samples(
    pred_dir: &Path,
    gt_dir: Option<&Path>,
    pred_suffix: &str,
) -> EvalResult<Vec<Sample>> {
    if !pred_dir.is_dir() {
        return Err(EvalError::PredictionDirectoryNotFound {
            path: pred_dir.to_path_buf(),
        });
    }
    if let Some(gt_dir) = gt_dir.filter(|dir| !dir.is_dir()) {
        return Err(EvalError::GroundTruthDirectoryNotFound {
            path: gt_dir.to_path_buf(),
        });
    }

    let extensions = supported_image_extensions();
    let mut samples = Vec::new();

    for entry in WalkDir::new(pred_dir).sort_by_file_name() {
        let entry = entry.map_err(|source| EvalError::DirectoryReadFailed {
            path: pred_dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if !entry.file_type().is_file() || !is_supported_image(path) {
            continue;
        }

        let stem = path
            .file_stem()
            .and_then(OsStr::to_str)
            .ok_or_else(|| EvalError::InvalidUtf8Path {
                path: path.to_path_buf(),
            })?;
        let stem = stem
            .strip_suffix(pred_suffix)
            .filter(|stripped| !stripped.is_empty())
            .unwrap_or(stem);
        let relative_dir = path
            .parent()
            .and_then(|parent| parent.strip_prefix(pred_dir).ok())
            .unwrap_or_else(|| Path::new(""));
        let name = relative_dir
            .join(stem)
            .to_str()
            .ok_or_else(|| EvalError::InvalidUtf8Path {
                path: path.to_path_buf(),
            })?
            .to_owned();

        let ground_truth =
            gt_dir.and_then(|root| find_ground_truth(&root.join(relative_dir), stem, &extensions));
        if gt_dir.is_some() && ground_truth.is_none() {
            tracing::warn!(prediction = %path.display(), "no ground truth found");
        }

        samples.push(Sample {
            name,
            prediction: path.to_path_buf(),
            ground_truth,
        });
    }

    if samples.is_empty() {
        return Err(EvalError::NoPredictions {
            path: pred_dir.to_path_buf(),
        });
    }

    tracing::info!(
        samples = samples.len(),
        labeled = samples.iter().filter(|s| s.ground_truth.is_some()).count(),
        dir = %pred_dir.display(),
        "collected samples",
    );
    Ok(samples)
}

fn find_ground_truth(dir: &Path, stem: &str, extensions: &[String]) -> Option<PathBuf> {
    extensions
        .iter()
        .map(|ext| dir.join(format!("{stem}.{ext}")))
        .find(|candidate| candidate.is_file())
}

fn is_supported_image(path: &Path) -> bool {
    ImageFormat::from_path(path).is_ok_and(|format| format.reading_enabled())
}

/// File extensions of every format the `image` crate can decode in this build.
fn supported_image_extensions() -> Vec<String> {
    let mut extensions: Vec<String> = ImageFormat::all()
        .filter(|format| format.reading_enabled())
        .flat_map(|format| format.extensions_str())
        .flat_map(|ext| [ext.to_string(), ext.to_uppercase()])
        .collect();

    extensions.sort();
    extensions.dedup();
    extensions
}
