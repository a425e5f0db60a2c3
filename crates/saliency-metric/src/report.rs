//! Final evaluation report.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Mean precision, recall and F-measure at one threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    /// Threshold index in `[0, thresholds)`.
    pub threshold: usize,
    /// Precision averaged over images.
    pub precision: f64,
    /// Recall averaged over images.
    pub recall: f64,
    /// F-measure of the averaged precision and recall.
    pub f_measure: f64,
}

/// Averaged metrics over every accumulated image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricReport {
    /// Number of images the report covers.
    pub count: usize,
    /// Threshold index at which the mean F-measure peaks.
    pub threshold: usize,
    /// Maximum mean F-measure over all thresholds.
    pub max_f_measure: f64,
    /// Mean precision at [`Self::threshold`].
    pub precision: f64,
    /// Mean recall at [`Self::threshold`].
    pub recall: f64,
    /// Mean absolute error.
    pub mae: f64,
    /// Mean S-measure.
    pub s_measure: f64,
    /// Full mean precision/recall curve.
    pub curve: Vec<CurvePoint>,
}

impl MetricReport {
    /// Builds a report from the mean per-threshold curve.
    ///
    /// The operating point is the first threshold with the largest finite F-measure.
    pub(crate) fn from_curve(count: usize, curve: Vec<CurvePoint>, mae: f64, s_measure: f64) -> Self {
        let best = curve
            .iter()
            .filter(|point| point.f_measure.is_finite())
            .fold(None::<&CurvePoint>, |best, point| match best {
                Some(current) if current.f_measure >= point.f_measure => Some(current),
                _ => Some(point),
            })
            .copied()
            // Smoothed precision and recall are strictly positive, so some F is finite.
            .unwrap_or(CurvePoint {
                threshold: 0,
                precision: 0.0,
                recall: 0.0,
                f_measure: 0.0,
            });

        Self {
            count,
            threshold: best.threshold,
            max_f_measure: best.f_measure,
            precision: best.precision,
            recall: best.recall,
            mae,
            s_measure,
            curve,
        }
    }
}

impl fmt::Display for MetricReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Max F-measure: {:.5}", self.max_f_measure)?;
        writeln!(f, "Precision:     {:.5}", self.precision)?;
        writeln!(f, "Recall:        {:.5}", self.recall)?;
        writeln!(f, "MAE:           {:.5}", self.mae)?;
        write!(f, "S-measure:     {:.5}", self.s_measure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(threshold: usize, f_measure: f64) -> CurvePoint {
        CurvePoint {
            threshold,
            precision: f_measure,
            recall: f_measure,
            f_measure,
        }
    }

    #[test]
    fn first_maximum_wins() {
        let curve = vec![point(0, 0.2), point(1, 0.9), point(2, 0.9), point(3, 0.1)];
        let report = MetricReport::from_curve(3, curve, 0.1, 0.8);
        assert_eq!(report.threshold, 1);
        assert_eq!(report.max_f_measure, 0.9);
        assert_eq!(report.count, 3);
    }

    #[test]
    fn non_finite_values_never_win() {
        let curve = vec![point(0, f64::NAN), point(1, 0.3), point(2, f64::INFINITY)];
        let report = MetricReport::from_curve(1, curve, 0.0, 1.0);
        assert_eq!(report.threshold, 1);
        assert_eq!(report.max_f_measure, 0.3);
    }

    #[test]
    fn display_lists_five_scalars() {
        let report = MetricReport::from_curve(1, vec![point(0, 1.0)], 0.0, 1.0);
        let text = report.to_string();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "Max F-measure: 1.00000");
        assert!(lines[3].starts_with("MAE:"));
        assert_eq!(lines[4], "S-measure:     1.00000");
    }
}
