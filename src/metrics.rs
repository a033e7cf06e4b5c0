//! # Calibration Metrics
//!
//! Reliability curve for probabilistic binary predictions together with the
//! expected (ECE) and maximum (MCE) calibration error.

use crate::error::{Result, ToolboxError};
use crate::math::safe_div;

/// Binned comparison of predicted confidence and observed frequency
#[derive(Clone, Debug, PartialEq)]
pub struct CalibrationCurve {
    /// Observed positive rate per bin (NaN for empty bins)
    pub prob_true: Vec<f64>,
    /// Mean predicted probability per bin (NaN for empty bins)
    pub prob_pred: Vec<f64>,
    /// `n_bins + 1` equally spaced bin edges over [0, 1]
    pub bins: Vec<f64>,
    /// Number of predictions per bin
    pub counts: Vec<usize>,
    /// Expected calibration error: count-weighted mean gap
    pub ece: f64,
    /// Maximum calibration error over non-empty bins
    pub mce: f64,
}

/// Compute the calibration curve of `y_pred` against binary labels `y_true`.
///
/// Predictions are assigned to `n_bins` equal-width bins over [0, 1]; the
/// last bin is closed on the right.
pub fn calibration_curve(y_true: &[f64], y_pred: &[f64], n_bins: usize) -> Result<CalibrationCurve> {
    if y_true.len() != y_pred.len() {
        return Err(ToolboxError::shape(y_pred.len(), y_true.len()));
    }
    if y_pred.is_empty() {
        return Err(ToolboxError::invalid_input("calibration needs at least one prediction"));
    }
    if n_bins == 0 {
        return Err(ToolboxError::invalid_input("n_bins must be positive"));
    }

    let bins: Vec<f64> = (0..=n_bins).map(|i| i as f64 / n_bins as f64).collect();
    let mut sum_true = vec![0.0; n_bins];
    let mut sum_pred = vec![0.0; n_bins];
    let mut counts = vec![0usize; n_bins];

    for (&t, &p) in y_true.iter().zip(y_pred) {
        let bin = bin_of(p, &bins);
        sum_true[bin] += t;
        sum_pred[bin] += p;
        counts[bin] += 1;
    }

    let counts_f: Vec<f64> = counts.iter().map(|&c| c as f64).collect();
    let prob_true = safe_div(&sum_true, &counts_f, f64::NAN)?;
    let prob_pred = safe_div(&sum_pred, &counts_f, f64::NAN)?;

    let n = y_pred.len() as f64;
    let mut ece = 0.0;
    let mut mce = f64::NAN;
    for ((&t, &p), &c) in prob_true.iter().zip(&prob_pred).zip(&counts_f) {
        let gap = (t - p).abs();
        if gap.is_nan() {
            continue;
        }
        ece += c / n * gap;
        mce = if mce.is_nan() { gap } else { mce.max(gap) };
    }

    Ok(CalibrationCurve {
        prob_true,
        prob_pred,
        bins,
        counts,
        ece,
        mce,
    })
}

/// Index of the bin holding `p`, using the interior edges only
fn bin_of(p: f64, bins: &[f64]) -> usize {
    let interior = &bins[1..bins.len() - 1];
    interior.partition_point(|&edge| edge <= p)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_bin_edges() {
        let bins = [0.0, 0.25, 0.5, 0.75, 1.0];
        assert_eq!(bin_of(0.0, &bins), 0);
        assert_eq!(bin_of(0.25, &bins), 1);
        assert_eq!(bin_of(0.99, &bins), 3);
        assert_eq!(bin_of(1.0, &bins), 3);
    }

    #[test]
    fn test_perfect_calibration() {
        let y_true = [0.0, 1.0, 1.0, 0.0];
        let y_pred = [0.0, 1.0, 1.0, 0.0];
        let curve = calibration_curve(&y_true, &y_pred, 2).unwrap();
        assert_eq!(curve.counts, vec![2, 2]);
        assert_relative_eq!(curve.ece, 0.0);
        assert_relative_eq!(curve.mce, 0.0);
    }

    #[test]
    fn test_overconfident_bins() {
        // everything predicted at 0.9, half are positive
        let y_true = [1.0, 0.0, 1.0, 0.0];
        let y_pred = [0.9; 4];
        let curve = calibration_curve(&y_true, &y_pred, 10).unwrap();

        assert_eq!(curve.counts[9], 4);
        assert!(curve.prob_true[0].is_nan());
        assert_relative_eq!(curve.prob_true[9], 0.5);
        assert_relative_eq!(curve.ece, 0.4, epsilon = 1e-12);
        assert_relative_eq!(curve.mce, 0.4, epsilon = 1e-12);
        assert_eq!(curve.bins.len(), 11);
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(calibration_curve(&[1.0], &[0.5, 0.5], 5).is_err());
        assert!(calibration_curve(&[], &[], 5).is_err());
        assert!(calibration_curve(&[1.0], &[0.5], 0).is_err());
    }
}
