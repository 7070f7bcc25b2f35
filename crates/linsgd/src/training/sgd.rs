//! Stochastic gradient descent trainer for linear models.
//!
//! One trainer serves both dense and hashed data. The [`ObjectiveFn`] decides
//! the output transform and step size; the [`TrainingData`] implementation
//! decides how a sample's margin is computed and how its step is scattered
//! into the weights.
//!
//! Samples are visited in dataset order, once per epoch, with no shuffling,
//! so training is fully deterministic.

use ndarray::{Array1, ArrayViewMut1};

use crate::data::{DenseDataset, HashedDataset};
use crate::model::{FeatureKind, TaskKind};
use crate::repr::LinearModel;
use crate::training::{
    EpochAction, MetricFn, MetricValue, ObjectiveFn, TrainingCallback, TrainingLogger, Verbosity,
};

// ============================================================================
// Errors
// ============================================================================

/// Errors raised by [`SgdTrainer`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TrainError {
    #[error("cannot train on an empty dataset")]
    EmptyDataset,

    #[error("model has {expected} weights but the data addresses {found}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("a {task} model cannot be trained on {features} features")]
    TaskMismatch {
        task: TaskKind,
        features: FeatureKind,
    },

    #[error(transparent)]
    Normalize(#[from] crate::data::NormalizeError),
}

// ============================================================================
// TrainingData
// ============================================================================

/// Sample access needed by [`SgdTrainer`].
pub trait TrainingData {
    /// Number of samples.
    fn n_samples(&self) -> usize;

    /// Number of weights a model for this data needs.
    fn n_weights(&self) -> usize;

    /// Label of one sample.
    fn label(&self, sample: usize) -> f64;

    /// Raw margin of one sample under `model`.
    fn margin(&self, model: &LinearModel, sample: usize) -> f64;

    /// `weights += step * x` for one sample.
    fn scatter_add(&self, weights: ArrayViewMut1<'_, f64>, sample: usize, step: f64);
}

impl TrainingData for DenseDataset {
    fn n_samples(&self) -> usize {
        DenseDataset::n_samples(self)
    }

    fn n_weights(&self) -> usize {
        self.n_features()
    }

    #[inline]
    fn label(&self, sample: usize) -> f64 {
        self.target(sample)
    }

    #[inline]
    fn margin(&self, model: &LinearModel, sample: usize) -> f64 {
        model.margin_dense(self.row(sample))
    }

    #[inline]
    fn scatter_add(&self, mut weights: ArrayViewMut1<'_, f64>, sample: usize, step: f64) {
        weights.scaled_add(step, &self.row(sample));
    }
}

impl TrainingData for HashedDataset {
    fn n_samples(&self) -> usize {
        HashedDataset::n_samples(self)
    }

    fn n_weights(&self) -> usize {
        self.featurizer().table_size().len()
    }

    #[inline]
    fn label(&self, sample: usize) -> f64 {
        self.example(sample).label
    }

    #[inline]
    fn margin(&self, model: &LinearModel, sample: usize) -> f64 {
        model.margin_indices(&self.example(sample).indices)
    }

    #[inline]
    fn scatter_add(&self, mut weights: ArrayViewMut1<'_, f64>, sample: usize, step: f64) {
        for &j in &self.example(sample).indices {
            weights[j as usize] += step;
        }
    }
}

// ============================================================================
// SgdParams
// ============================================================================

/// Parameters for SGD training.
#[derive(Clone, Debug, PartialEq)]
pub struct SgdParams {
    /// Step size.
    pub learning_rate: f64,

    /// Number of full passes over the data.
    pub n_epochs: u32,

    /// Verbosity level for training output.
    pub verbosity: Verbosity,
}

impl Default for SgdParams {
    fn default() -> Self {
        Self {
            learning_rate: 0.001,
            n_epochs: 100,
            verbosity: Verbosity::default(),
        }
    }
}

// ============================================================================
// SgdTrainer
// ============================================================================

/// Result of a training run.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainOutput {
    /// Trained weights.
    pub model: LinearModel,
    /// Epoch metric per completed epoch.
    pub history: Vec<f64>,
}

/// Plain SGD trainer, parameterized by its objective.
#[derive(Clone, Debug)]
pub struct SgdTrainer<O: ObjectiveFn> {
    objective: O,
    params: SgdParams,
}

impl<O: ObjectiveFn> SgdTrainer<O> {
    pub fn new(objective: O, params: SgdParams) -> Self {
        Self { objective, params }
    }

    pub fn objective(&self) -> &O {
        &self.objective
    }

    pub fn params(&self) -> &SgdParams {
        &self.params
    }

    /// Train a model from zero weights.
    pub fn train<D, C>(&self, data: &D, callback: &mut C) -> Result<TrainOutput, TrainError>
    where
        D: TrainingData + ?Sized,
        C: TrainingCallback + ?Sized,
    {
        self.train_from(LinearModel::zeros(data.n_weights()), data, callback)
    }

    /// Continue training an existing model.
    ///
    /// # Errors
    ///
    /// - [`TrainError::EmptyDataset`] if `data` has no samples
    /// - [`TrainError::DimensionMismatch`] if `model` does not have exactly
    ///   `data.n_weights()` weights
    pub fn train_from<D, C>(
        &self,
        mut model: LinearModel,
        data: &D,
        callback: &mut C,
    ) -> Result<TrainOutput, TrainError>
    where
        D: TrainingData + ?Sized,
        C: TrainingCallback + ?Sized,
    {
        let n_samples = data.n_samples();
        if n_samples == 0 {
            return Err(TrainError::EmptyDataset);
        }
        if model.n_weights() != data.n_weights() {
            return Err(TrainError::DimensionMismatch {
                expected: model.n_weights(),
                found: data.n_weights(),
            });
        }

        let transform = self.objective.output_transform();
        let metric = self.objective.epoch_metric();
        let metric_name = format!("train-{}", metric.name());
        let lr = self.params.learning_rate;

        let labels: Array1<f64> = (0..n_samples).map(|i| data.label(i)).collect();
        let mut predictions = Array1::<f64>::zeros(n_samples);
        let mut history = Vec::new();

        let mut logger = TrainingLogger::new(self.params.verbosity);
        logger.start_training(self.params.n_epochs as usize);

        for epoch in 0..self.params.n_epochs as usize {
            logger.start_epoch();

            for sample in 0..n_samples {
                let prediction = transform.apply(data.margin(&model, sample));
                predictions[sample] = prediction;

                let step = lr * self.objective.gradient(prediction, labels[sample]);
                model.set_bias(model.bias() - step);
                data.scatter_add(model.weights_mut(), sample, -step);
            }

            let value = MetricValue::new(
                metric_name.as_str(),
                metric.compute(predictions.view(), labels.view()),
                metric.higher_is_better(),
            );
            history.push(value.value);
            if value.value.is_finite() {
                logger.log_epoch(epoch, &value);
            } else {
                logger.log_diverged(epoch, &value);
            }

            if callback.on_epoch_end(epoch, &value) == EpochAction::Stop {
                logger.log_stopped(epoch);
                break;
            }
        }

        logger.finish_training();
        Ok(TrainOutput { model, history })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hashing::{TableSize, TextFeaturizer};
    use crate::training::{LogisticLoss, NoCallback, SquaredLoss};
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    fn silent(learning_rate: f64, n_epochs: u32) -> SgdParams {
        SgdParams {
            learning_rate,
            n_epochs,
            verbosity: Verbosity::Silent,
        }
    }

    #[test]
    fn params_default() {
        let params = SgdParams::default();
        assert_eq!(params.n_epochs, 100);
        assert_eq!(params.learning_rate, 0.001);
    }

    #[test]
    fn single_dense_step_matches_update_rule() {
        let data = DenseDataset::new(array![[0.5, 1.0]], array![2.0]).unwrap();
        let trainer = SgdTrainer::new(SquaredLoss, silent(0.1, 1));
        let out = trainer.train(&data, &mut NoCallback).unwrap();

        // prediction 0, error -2, step -0.2
        assert_abs_diff_eq!(out.model.bias(), 0.2, epsilon = 1e-15);
        assert_abs_diff_eq!(out.model.weight(0), 0.1, epsilon = 1e-15);
        assert_abs_diff_eq!(out.model.weight(1), 0.2, epsilon = 1e-15);
        assert_eq!(out.history, vec![2.0]);
    }

    #[test]
    fn single_hashed_step_matches_update_rule() {
        let featurizer = TextFeaturizer::new(TableSize::from_bits(4).unwrap(), 0, false);
        let data = HashedDataset::from_sentences(featurizer, [("spam spam", 1.0)]);
        let j = data.example(0).indices[0] as usize;

        let trainer = SgdTrainer::new(LogisticLoss, silent(1.0, 1));
        let out = trainer.train(&data, &mut NoCallback).unwrap();

        // p = 0.5, error -0.5, g = -0.125; the duplicate token steps twice
        assert_abs_diff_eq!(out.model.bias(), 0.125, epsilon = 1e-15);
        assert_abs_diff_eq!(out.model.weight(j), 0.25, epsilon = 1e-15);
        assert_eq!(out.model.n_nonzero(), 1);
        assert_eq!(out.history, vec![-0.5]);
    }

    #[test]
    fn dense_identity_converges() {
        // label = x0, x1 is noise-free filler
        let data = DenseDataset::new(
            array![[0.0, 1.0], [0.25, 0.0], [0.5, 0.5], [0.75, 0.25], [1.0, 0.75]],
            array![0.0, 0.25, 0.5, 0.75, 1.0],
        )
        .unwrap();
        let trainer = SgdTrainer::new(SquaredLoss, silent(0.1, 3000));
        let out = trainer.train(&data, &mut NoCallback).unwrap();

        assert_abs_diff_eq!(out.model.bias(), 0.0, epsilon = 1e-3);
        assert_abs_diff_eq!(out.model.weight(0), 1.0, epsilon = 1e-3);
        assert_abs_diff_eq!(out.model.weight(1), 0.0, epsilon = 1e-3);
        assert!(out.history.last().unwrap() < &1e-3);
    }

    #[test]
    fn rmse_history_decreases() {
        let data = DenseDataset::new(array![[0.0], [0.5], [1.0]], array![1.0, 2.0, 3.0]).unwrap();
        let trainer = SgdTrainer::new(SquaredLoss, silent(0.05, 20));
        let out = trainer.train(&data, &mut NoCallback).unwrap();
        assert_eq!(out.history.len(), 20);
        assert!(out.history[19] < out.history[0]);
    }

    #[test]
    fn callback_stop_ends_training() {
        let data = DenseDataset::new(array![[1.0]], array![1.0]).unwrap();
        let trainer = SgdTrainer::new(SquaredLoss, silent(0.1, 100));

        let mut calls = 0;
        let mut stop_after_three = |epoch: usize, _: &MetricValue| {
            calls += 1;
            if epoch == 2 {
                EpochAction::Stop
            } else {
                EpochAction::Continue
            }
        };
        let out = trainer.train(&data, &mut stop_after_three).unwrap();
        assert_eq!(out.history.len(), 3);
        assert_eq!(calls, 3);
    }

    #[test]
    fn huge_epoch_budget_stops_on_first_epoch() {
        let data = DenseDataset::new(array![[1.0]], array![1.0]).unwrap();
        let trainer = SgdTrainer::new(SquaredLoss, silent(0.1, u32::MAX));
        let mut stop_now = |_: usize, _: &MetricValue| EpochAction::Stop;
        let out = trainer.train(&data, &mut stop_now).unwrap();
        assert_eq!(out.history.len(), 1);
    }

    #[test]
    fn empty_dataset_is_rejected() {
        let data = DenseDataset::from_rows(Vec::new(), Vec::new()).unwrap();
        let trainer = SgdTrainer::new(SquaredLoss, silent(0.1, 1));
        assert_eq!(
            trainer.train(&data, &mut NoCallback).unwrap_err(),
            TrainError::EmptyDataset
        );
    }

    #[test]
    fn warm_start_checks_dimension() {
        let data = DenseDataset::new(array![[1.0, 2.0]], array![1.0]).unwrap();
        let trainer = SgdTrainer::new(SquaredLoss, silent(0.1, 1));
        let err = trainer
            .train_from(LinearModel::zeros(3), &data, &mut NoCallback)
            .unwrap_err();
        assert_eq!(
            err,
            TrainError::DimensionMismatch {
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn warm_start_continues_from_model() {
        let data = DenseDataset::new(array![[1.0]], array![1.0]).unwrap();
        let trainer = SgdTrainer::new(SquaredLoss, silent(0.5, 1));
        let start = LinearModel::new(1.0, array![0.0]);
        let out = trainer.train_from(start, &data, &mut NoCallback).unwrap();
        // already exact: zero error, no change
        assert_eq!(out.model.bias(), 1.0);
        assert_eq!(out.model.weight(0), 0.0);
    }

    #[test]
    fn training_is_deterministic() {
        let featurizer = TextFeaturizer::new(TableSize::from_bits(8).unwrap(), 2, false);
        let data = HashedDataset::from_sentences(
            featurizer,
            [("very good film", 1.0), ("very bad film", 0.0), ("good", 1.0)],
        );
        let trainer = SgdTrainer::new(LogisticLoss, silent(0.1, 10));
        let a = trainer.train(&data, &mut NoCallback).unwrap();
        let b = trainer.train(&data, &mut NoCallback).unwrap();
        assert_eq!(a, b);
    }
}
