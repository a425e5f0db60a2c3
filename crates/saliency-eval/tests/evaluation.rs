use std::path::Path;

use image::{GrayImage, Luma};
use saliency_eval::{backend::EvalDevice, run_evaluation, EvalConfig, EvalError};
use saliency_metric::MetricError;

/// 8x8 mask with a filled square in rows and columns `2..6`.
fn square() -> GrayImage {
    GrayImage::from_fn(8, 8, |x, y| {
        if (2..6).contains(&x) && (2..6).contains(&y) {
            Luma([255])
        } else {
            Luma([0])
        }
    })
}

/// Soft prediction that grows brighter towards the square.
fn blurred_square(shift: u32) -> GrayImage {
    GrayImage::from_fn(8, 8, |x, y| {
        let dx = (x as i32 - 3).unsigned_abs() + shift;
        let dy = (y as i32 - 3).unsigned_abs();
        Luma([255u8.saturating_sub(((dx + dy) * 40).min(255) as u8)])
    })
}

fn save(image: &GrayImage, path: &Path) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    image.save(path).unwrap();
}

#[test]
fn perfect_predictions_score_perfectly() {
    let root = tempfile::tempdir().unwrap();
    let pred_dir = root.path().join("pred");
    let gt_dir = root.path().join("gt");
    for name in ["a", "b"] {
        save(&square(), &pred_dir.join(format!("{name}_sal.png")));
        save(&square(), &gt_dir.join(format!("{name}.png")));
    }

    let mut config = EvalConfig::new(&pred_dir, Some(gt_dir));
    config.pred_suffix = "_sal".to_owned();
    let summary = run_evaluation(&config, &EvalDevice::default()).unwrap();

    assert_eq!(summary.processed, 2);
    assert_eq!(summary.skipped, 0);
    let report = summary.report.unwrap();
    assert_eq!(report.count, 2);
    assert_eq!(report.mae, 0.0);
    assert!((report.max_f_measure - 1.0).abs() < 1e-9);
    assert!((report.precision - 1.0).abs() < 1e-9);
    assert!((report.recall - 1.0).abs() < 1e-9);
    assert!((report.s_measure - 1.0).abs() < 1e-6);
}

#[test]
fn unlabeled_run_skips_metrics() {
    let root = tempfile::tempdir().unwrap();
    save(&square(), &root.path().join("a.png"));
    save(&square(), &root.path().join("b.png"));

    let config = EvalConfig::new(root.path(), None);
    let summary = run_evaluation(&config, &EvalDevice::default()).unwrap();

    assert_eq!(summary.processed, 0);
    assert_eq!(summary.skipped, 2);
    assert!(summary.report.is_none());
}

#[test]
fn samples_without_labels_are_not_scored() {
    let root = tempfile::tempdir().unwrap();
    let pred_dir = root.path().join("pred");
    let gt_dir = root.path().join("gt");
    save(&square(), &pred_dir.join("a.png"));
    save(&square(), &pred_dir.join("orphan.png"));
    save(&square(), &gt_dir.join("a.png"));

    let config = EvalConfig::new(&pred_dir, Some(gt_dir));
    let summary = run_evaluation(&config, &EvalDevice::default()).unwrap();

    assert_eq!(summary.processed, 1);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.report.unwrap().count, 1);
}

#[test]
fn worker_count_does_not_change_the_report() {
    let root = tempfile::tempdir().unwrap();
    let pred_dir = root.path().join("pred");
    let gt_dir = root.path().join("gt");
    for shift in 0..6 {
        save(&blurred_square(shift), &pred_dir.join(format!("{shift}.png")));
        save(&square(), &gt_dir.join(format!("{shift}.png")));
    }

    let mut config = EvalConfig::new(&pred_dir, Some(gt_dir));
    config.jobs = 1;
    let sequential = run_evaluation(&config, &EvalDevice::default())
        .unwrap()
        .report
        .unwrap();
    config.jobs = 3;
    let parallel = run_evaluation(&config, &EvalDevice::default())
        .unwrap()
        .report
        .unwrap();

    assert_eq!(sequential.count, 6);
    assert_eq!(parallel.count, 6);
    assert_eq!(sequential.threshold, parallel.threshold);
    assert!((sequential.max_f_measure - parallel.max_f_measure).abs() < 1e-9);
    assert!((sequential.mae - parallel.mae).abs() < 1e-9);
    assert!((sequential.s_measure - parallel.s_measure).abs() < 1e-9);
}

#[test]
fn mismatched_shapes_fail_the_run() {
    let root = tempfile::tempdir().unwrap();
    let pred_dir = root.path().join("pred");
    let gt_dir = root.path().join("gt");
    save(&GrayImage::new(4, 4), &pred_dir.join("a.png"));
    save(&GrayImage::new(5, 4), &gt_dir.join("a.png"));

    let config = EvalConfig::new(&pred_dir, Some(gt_dir));
    match run_evaluation(&config, &EvalDevice::default()) {
        Err(EvalError::Metric { name, source }) => {
            assert_eq!(name, "a");
            assert_eq!(
                source,
                MetricError::ShapeMismatch {
                    prediction: [4, 4],
                    ground_truth: [4, 5],
                }
            );
        }
        other => panic!("Expected a metric error, got {other:?}"),
    }
}

#[test]
fn invalid_metric_configuration_is_rejected() {
    let root = tempfile::tempdir().unwrap();
    save(&square(), &root.path().join("a.png"));

    let mut config = EvalConfig::new(root.path(), None);
    config.metric = config.metric.with_thresholds(0);

    assert!(matches!(
        run_evaluation(&config, &EvalDevice::default()),
        Err(EvalError::Accumulator(MetricError::InvalidConfiguration { .. }))
    ));
}
