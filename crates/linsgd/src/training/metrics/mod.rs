//! Evaluation metrics for model quality.
//!
//! Metrics take transformed predictions (values for regression, probabilities
//! for classification) together with the labels, both of length `n_samples`.
//!
//! # Available Metrics
//!
//! ## Regression
//! - [`Rmse`]: Root Mean Squared Error
//! - [`MeanError`]: Signed mean of `prediction - label`
//!
//! ## Classification
//! - [`Accuracy`]: Thresholded binary accuracy

mod classification;
mod regression;

pub use classification::Accuracy;
pub use regression::{MeanError, Rmse};

use ndarray::ArrayView1;

/// A scalar summary of predictions against labels.
pub trait MetricFn {
    /// Compute the metric value.
    ///
    /// Returns `0.0` for empty input.
    fn compute(&self, predictions: ArrayView1<'_, f64>, labels: ArrayView1<'_, f64>) -> f64;

    /// Whether higher values indicate better performance.
    fn higher_is_better(&self) -> bool;

    /// Name of the metric (for logging).
    fn name(&self) -> &'static str;
}

/// Closed set of metrics, for places that pick one at runtime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Metric {
    Rmse(Rmse),
    MeanError(MeanError),
    Accuracy(Accuracy),
}

impl Metric {
    pub fn rmse() -> Self {
        Self::Rmse(Rmse)
    }

    pub fn mean_error() -> Self {
        Self::MeanError(MeanError)
    }

    pub fn accuracy() -> Self {
        Self::Accuracy(Accuracy::default())
    }
}

impl MetricFn for Metric {
    fn compute(&self, predictions: ArrayView1<'_, f64>, labels: ArrayView1<'_, f64>) -> f64 {
        match self {
            Self::Rmse(m) => m.compute(predictions, labels),
            Self::MeanError(m) => m.compute(predictions, labels),
            Self::Accuracy(m) => m.compute(predictions, labels),
        }
    }

    fn higher_is_better(&self) -> bool {
        match self {
            Self::Rmse(m) => m.higher_is_better(),
            Self::MeanError(m) => m.higher_is_better(),
            Self::Accuracy(m) => m.higher_is_better(),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Rmse(m) => m.name(),
            Self::MeanError(m) => m.name(),
            Self::Accuracy(m) => m.name(),
        }
    }
}
