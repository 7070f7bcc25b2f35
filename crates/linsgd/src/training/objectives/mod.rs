//! Objective (loss) functions for SGD training.
//!
//! An objective decides three things for the trainer:
//!
//! - how a margin becomes a prediction ([`ObjectiveFn::output_transform`]),
//! - how far to step for one sample ([`ObjectiveFn::gradient`]),
//! - which metric summarizes an epoch ([`ObjectiveFn::epoch_metric`]).
//!
//! # Available Objectives
//!
//! - [`SquaredLoss`]: Squared error for regression
//! - [`LogisticLoss`]: Sigmoid output for binary classification

mod classification;
mod regression;

pub use classification::LogisticLoss;
pub use regression::SquaredLoss;

use super::metrics::Metric;
use crate::model::{OutputTransform, TaskKind};

// =============================================================================
// Objective Trait
// =============================================================================

/// Update strategy for one SGD step.
///
/// For a sample with prediction `p` and label `y`, the trainer computes
/// `g = learning_rate * gradient(p, y)`, subtracts `g` from the bias and
/// subtracts `g * x_i` from every weight the sample touches.
pub trait ObjectiveFn {
    /// High-level task kind implied by this objective.
    fn task_kind(&self) -> TaskKind;

    /// Margin → prediction mapping used in training and stored in the model.
    fn output_transform(&self) -> OutputTransform;

    /// Per-sample gradient scale with respect to the margin.
    fn gradient(&self, prediction: f64, label: f64) -> f64;

    /// Metric reported after each epoch.
    fn epoch_metric(&self) -> Metric;

    /// Name of the objective (for logging).
    fn name(&self) -> &'static str;
}

// =============================================================================
// Objective Enum
// =============================================================================

/// Objective function enum for configuration-driven training.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Objective {
    /// Squared error loss for regression.
    SquaredLoss(SquaredLoss),
    /// Logistic loss for binary classification.
    LogisticLoss(LogisticLoss),
}

impl Objective {
    pub fn squared() -> Self {
        Self::SquaredLoss(SquaredLoss)
    }

    pub fn logistic() -> Self {
        Self::LogisticLoss(LogisticLoss)
    }

    /// Default objective for a task.
    pub fn for_task(task: TaskKind) -> Self {
        match task {
            TaskKind::Regression => Self::squared(),
            TaskKind::BinaryClassification => Self::logistic(),
        }
    }
}

impl Default for Objective {
    fn default() -> Self {
        Self::squared()
    }
}

impl ObjectiveFn for Objective {
    fn task_kind(&self) -> TaskKind {
        match self {
            Self::SquaredLoss(o) => o.task_kind(),
            Self::LogisticLoss(o) => o.task_kind(),
        }
    }

    fn output_transform(&self) -> OutputTransform {
        match self {
            Self::SquaredLoss(o) => o.output_transform(),
            Self::LogisticLoss(o) => o.output_transform(),
        }
    }

    #[inline]
    fn gradient(&self, prediction: f64, label: f64) -> f64 {
        match self {
            Self::SquaredLoss(o) => o.gradient(prediction, label),
            Self::LogisticLoss(o) => o.gradient(prediction, label),
        }
    }

    fn epoch_metric(&self) -> Metric {
        match self {
            Self::SquaredLoss(o) => o.epoch_metric(),
            Self::LogisticLoss(o) => o.epoch_metric(),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::SquaredLoss(o) => o.name(),
            Self::LogisticLoss(o) => o.name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn for_task_picks_matching_objective() {
        let reg = Objective::for_task(TaskKind::Regression);
        assert_eq!(reg, Objective::squared());
        assert_eq!(reg.output_transform(), OutputTransform::Identity);

        let clf = Objective::for_task(TaskKind::BinaryClassification);
        assert_eq!(clf.task_kind(), TaskKind::BinaryClassification);
        assert_eq!(clf.output_transform(), OutputTransform::Sigmoid);
        assert_eq!(clf.name(), "logistic");
    }

    #[test]
    fn default_is_squared() {
        assert_eq!(Objective::default().name(), "squared");
    }
}
