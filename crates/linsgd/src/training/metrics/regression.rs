//! Regression metrics.

use ndarray::ArrayView1;

use super::MetricFn;

// =============================================================================
// RMSE (Root Mean Squared Error)
// =============================================================================

/// Root Mean Squared Error: sqrt(mean((pred - label)²))
///
/// Lower is better. Used for regression tasks.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rmse;

impl MetricFn for Rmse {
    fn compute(&self, predictions: ArrayView1<'_, f64>, labels: ArrayView1<'_, f64>) -> f64 {
        let n = predictions.len();
        if n == 0 {
            return 0.0;
        }

        let sum_sq = predictions
            .iter()
            .zip(labels.iter())
            .map(|(&p, &l)| (p - l) * (p - l))
            .sum::<f64>();
        (sum_sq / n as f64).sqrt()
    }

    fn higher_is_better(&self) -> bool {
        false
    }

    fn name(&self) -> &'static str {
        "rmse"
    }
}

// =============================================================================
// Mean Error
// =============================================================================

/// Signed mean error: mean(pred - label)
///
/// Positive and negative errors cancel, so this measures bias rather than
/// fit. Reported per epoch when training a logistic model.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MeanError;

impl MetricFn for MeanError {
    fn compute(&self, predictions: ArrayView1<'_, f64>, labels: ArrayView1<'_, f64>) -> f64 {
        let n = predictions.len();
        if n == 0 {
            return 0.0;
        }

        let sum = predictions
            .iter()
            .zip(labels.iter())
            .map(|(&p, &l)| p - l)
            .sum::<f64>();
        sum / n as f64
    }

    fn higher_is_better(&self) -> bool {
        false
    }

    fn name(&self) -> &'static str {
        "mean_error"
    }
}
