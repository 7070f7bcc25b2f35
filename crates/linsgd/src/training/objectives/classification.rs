//! Binary classification objectives.

use super::ObjectiveFn;
use crate::model::{OutputTransform, TaskKind};
use crate::training::metrics::Metric;

/// Sigmoid-output loss for labels in `{0, 1}`.
///
/// Steps along the squared error of the probability through the sigmoid:
/// gradient `(p - y) · p · (1 - p)` where `p = sigmoid(margin)`. The step
/// vanishes as `p` saturates. Epoch metric: signed mean error.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LogisticLoss;

impl ObjectiveFn for LogisticLoss {
    fn task_kind(&self) -> TaskKind {
        TaskKind::BinaryClassification
    }

    fn output_transform(&self) -> OutputTransform {
        OutputTransform::Sigmoid
    }

    #[inline]
    fn gradient(&self, prediction: f64, label: f64) -> f64 {
        (prediction - label) * prediction * (1.0 - prediction)
    }

    fn epoch_metric(&self) -> Metric {
        Metric::mean_error()
    }

    fn name(&self) -> &'static str {
        "logistic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn gradient_at_half() {
        // error 0.5, p(1-p) = 0.25
        assert_abs_diff_eq!(LogisticLoss.gradient(0.5, 0.0), 0.125, epsilon = 1e-15);
        assert_abs_diff_eq!(LogisticLoss.gradient(0.5, 1.0), -0.125, epsilon = 1e-15);
    }

    #[test]
    fn gradient_vanishes_when_saturated() {
        assert_eq!(LogisticLoss.gradient(1.0, 0.0), 0.0);
        assert_eq!(LogisticLoss.gradient(0.0, 1.0), 0.0);
    }

    #[test]
    fn gradient_sign_follows_error() {
        assert!(LogisticLoss.gradient(0.8, 0.0) > 0.0);
        assert!(LogisticLoss.gradient(0.2, 1.0) < 0.0);
    }
}
