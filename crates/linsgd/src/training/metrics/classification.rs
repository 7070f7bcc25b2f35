//! Binary classification metrics.

use ndarray::ArrayView1;

use super::MetricFn;

/// Classification accuracy: proportion of correct predictions.
///
/// A probability strictly above `threshold` is class `1`, anything else is
/// class `0`; the class must equal the label exactly. Higher is better.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Accuracy {
    pub threshold: f64,
}

impl Default for Accuracy {
    fn default() -> Self {
        Self { threshold: 0.5 }
    }
}

impl Accuracy {
    pub fn with_threshold(threshold: f64) -> Self {
        Self { threshold }
    }

    /// Predicted class for one probability.
    #[inline]
    pub fn classify(&self, probability: f64) -> f64 {
        if probability > self.threshold {
            1.0
        } else {
            0.0
        }
    }
}

impl MetricFn for Accuracy {
    fn compute(&self, predictions: ArrayView1<'_, f64>, labels: ArrayView1<'_, f64>) -> f64 {
        let n = predictions.len();
        if n == 0 {
            return 0.0;
        }

        let correct = predictions
            .iter()
            .zip(labels.iter())
            .filter(|(&p, &l)| self.classify(p) == l)
            .count();
        correct as f64 / n as f64
    }

    fn higher_is_better(&self) -> bool {
        true
    }

    fn name(&self) -> &'static str {
        "accuracy"
    }
}
