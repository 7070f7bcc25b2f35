//! Per-epoch training callbacks.
//!
//! After every epoch the trainer hands the epoch's metric to a
//! [`TrainingCallback`], which decides whether training continues. Any
//! `FnMut(usize, &MetricValue) -> EpochAction` closure is a callback.

use super::eval::MetricValue;

/// What the trainer should do after an epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EpochAction {
    /// Run the next epoch.
    #[default]
    Continue,
    /// End training after this epoch.
    Stop,
}

/// Observer invoked once per finished epoch.
pub trait TrainingCallback {
    /// Called with the 0-based epoch index and its metric.
    fn on_epoch_end(&mut self, epoch: usize, metric: &MetricValue) -> EpochAction;
}

impl<F> TrainingCallback for F
where
    F: FnMut(usize, &MetricValue) -> EpochAction,
{
    fn on_epoch_end(&mut self, epoch: usize, metric: &MetricValue) -> EpochAction {
        self(epoch, metric)
    }
}

/// Callback that never stops training.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCallback;

impl TrainingCallback for NoCallback {
    fn on_epoch_end(&mut self, _epoch: usize, _metric: &MetricValue) -> EpochAction {
        EpochAction::Continue
    }
}

/// Records every epoch metric value.
#[derive(Debug, Clone, Default)]
pub struct LossHistory {
    values: Vec<f64>,
}

impl LossHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn last(&self) -> Option<f64> {
        self.values.last().copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl TrainingCallback for LossHistory {
    fn on_epoch_end(&mut self, _epoch: usize, metric: &MetricValue) -> EpochAction {
        self.values.push(metric.value);
        EpochAction::Continue
    }
}
