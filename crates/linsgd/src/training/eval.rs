//! Model evaluation.
//!
//! Provides [`MetricValue`] for wrapping computed metrics with metadata, and
//! the [`Evaluator`] that scores a trained [`SgdModel`] on a held-out
//! dataset.

use ndarray::Array1;

use super::metrics::{Accuracy, MetricFn, Rmse};
use crate::data::{DenseDataset, DenseExample, HashedDataset, HashedExample, NormalizeError};
use crate::model::{FeatureKind, PredictError, SgdModel, TaskKind};

// =============================================================================
// MetricValue
// =============================================================================

/// A computed metric value with metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricValue {
    /// Name of the metric (e.g., "train-rmse").
    pub name: String,
    /// The computed value.
    pub value: f64,
    /// Whether higher values are better (true for accuracy, false for RMSE).
    pub higher_is_better: bool,
}

impl MetricValue {
    pub fn new(name: impl Into<String>, value: f64, higher_is_better: bool) -> Self {
        Self {
            name: name.into(),
            value,
            higher_is_better,
        }
    }

    /// Returns true if this value is better than another.
    pub fn is_better_than(&self, other: &Self) -> bool {
        if self.higher_is_better {
            self.value > other.value
        } else {
            self.value < other.value
        }
    }
}

impl std::fmt::Display for MetricValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {:.6}", self.name, self.value)
    }
}

// =============================================================================
// Evaluator
// =============================================================================

/// Errors raised by [`Evaluator`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EvalError {
    #[error("cannot evaluate on an empty dataset")]
    EmptyDataset,

    #[error("model consumes {model} features but the dataset is {data}")]
    ModelKindMismatch { model: FeatureKind, data: FeatureKind },

    #[error("dataset was hashed with different featurizer settings than the model")]
    FeaturizerMismatch,

    #[error(transparent)]
    Normalize(#[from] NormalizeError),

    #[error(transparent)]
    Predict(PredictError),
}

impl From<PredictError> for EvalError {
    fn from(err: PredictError) -> Self {
        match err {
            PredictError::ModelKindMismatch { expected, found } => Self::ModelKindMismatch {
                model: expected,
                data: found,
            },
            PredictError::Normalize(err) => Self::Normalize(err),
            other => Self::Predict(other),
        }
    }
}

/// Scores a model on labelled data.
///
/// Classification models report accuracy (probability `> 0.5` counts as
/// class `1`), regression models report RMSE.
#[derive(Debug, Clone, Copy)]
pub struct Evaluator<'a> {
    model: &'a SgdModel,
}

impl<'a> Evaluator<'a> {
    pub fn new(model: &'a SgdModel) -> Self {
        Self { model }
    }

    /// Name of the metric this evaluator reports.
    pub fn metric_name(&self) -> &'static str {
        match self.model.task() {
            TaskKind::Regression => Rmse.name(),
            TaskKind::BinaryClassification => Accuracy::default().name(),
        }
    }

    fn score(&self, predictions: &Array1<f64>, labels: &Array1<f64>) -> MetricValue {
        let (value, higher_is_better) = match self.model.task() {
            TaskKind::Regression => (Rmse.compute(predictions.view(), labels.view()), false),
            TaskKind::BinaryClassification => (
                Accuracy::default().compute(predictions.view(), labels.view()),
                true,
            ),
        };
        MetricValue::new(self.metric_name(), value, higher_is_better)
    }

    /// Evaluate a dense dataset.
    ///
    /// A copy of the features is scaled with the model's stored bounds before
    /// predicting. `observer` sees every raw example with its prediction, in
    /// dataset order.
    pub fn evaluate_dense<F>(&self, data: &DenseDataset, mut observer: F) -> Result<MetricValue, EvalError>
    where
        F: FnMut(DenseExample<'_>, f64),
    {
        if data.is_empty() {
            return Err(EvalError::EmptyDataset);
        }
        let bounds = self.model.bounds().ok_or(EvalError::ModelKindMismatch {
            model: self.model.feature_kind(),
            data: FeatureKind::Dense,
        })?;

        let scaled = bounds.transform(data.features())?;
        let predictions = self.model.predict_normalized(scaled.view());
        for (example, &prediction) in data.iter().zip(predictions.iter()) {
            observer(example, prediction);
        }

        Ok(self.score(&predictions, &data.targets().to_owned()))
    }

    /// Evaluate a hashed text dataset.
    ///
    /// Indices stored in `data` are used as is, so `data` must have been
    /// hashed with the model's featurizer.
    pub fn evaluate_hashed<F>(&self, data: &HashedDataset, mut observer: F) -> Result<MetricValue, EvalError>
    where
        F: FnMut(&HashedExample, f64),
    {
        if data.is_empty() {
            return Err(EvalError::EmptyDataset);
        }
        match self.model.featurizer() {
            None => {
                return Err(EvalError::ModelKindMismatch {
                    model: self.model.feature_kind(),
                    data: FeatureKind::Hashed,
                })
            }
            Some(featurizer) if featurizer != data.featurizer() => {
                return Err(EvalError::FeaturizerMismatch)
            }
            Some(_) => {}
        }

        let mut predictions = Array1::zeros(data.n_samples());
        for (sample, example) in data.examples().iter().enumerate() {
            let prediction = self.model.predict_indices(&example.indices)?;
            observer(example, prediction);
            predictions[sample] = prediction;
        }

        let labels: Array1<f64> = data.examples().iter().map(|ex| ex.label).collect();
        Ok(self.score(&predictions, &labels))
    }
}
