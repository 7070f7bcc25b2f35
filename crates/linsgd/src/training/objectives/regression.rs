//! Regression objectives.

use super::ObjectiveFn;
use crate::model::{OutputTransform, TaskKind};
use crate::training::metrics::Metric;

/// Squared error loss: `L = ½ (p - y)²`, with `p` the raw margin.
///
/// Gradient: `p - y`. Epoch metric: RMSE.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SquaredLoss;

impl ObjectiveFn for SquaredLoss {
    fn task_kind(&self) -> TaskKind {
        TaskKind::Regression
    }

    fn output_transform(&self) -> OutputTransform {
        OutputTransform::Identity
    }

    #[inline]
    fn gradient(&self, prediction: f64, label: f64) -> f64 {
        prediction - label
    }

    fn epoch_metric(&self) -> Metric {
        Metric::rmse()
    }

    fn name(&self) -> &'static str {
        "squared"
    }
}
