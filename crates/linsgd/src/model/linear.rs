//! High-level SGD linear model.
//!
//! [`SgdModel`] bundles the trained weights with everything inference needs
//! to reproduce training-time preprocessing:
//!
//! - dense models carry the [`FeatureBounds`] fitted on the training set;
//! - hashed models carry the [`TextFeaturizer`] used to hash the sentences.
//!
//! # Example
//!
//! ```
//! use linsgd::data::HashedDataset;
//! use linsgd::model::{SgdModel, TaskKind, TrainConfig};
//! use linsgd::training::Verbosity;
//!
//! let config = TrainConfig::builder()
//!     .task(TaskKind::BinaryClassification)
//!     .learning_rate(0.1)
//!     .n_epochs(50)
//!     .verbosity(Verbosity::Silent)
//!     .build()
//!     .unwrap();
//! let data = HashedDataset::from_sentences(config.featurizer(), [("good", 1.0), ("bad", 0.0)]);
//!
//! let model = SgdModel::train_text(&data, &config).unwrap();
//! assert!(model.predict_text("good").unwrap() > 0.5);
//! assert!(model.predict_text("bad").unwrap() < 0.5);
//! ```

use ndarray::{Array1, ArrayView1, ArrayView2};

use super::config::TrainConfig;
use super::meta::{ModelMeta, TaskKind};
use super::transform::OutputTransform;
use crate::data::{DenseDataset, FeatureBounds, HashedDataset, NormalizeError};
use crate::hashing::TextFeaturizer;
use crate::repr::LinearModel;
use crate::training::{NoCallback, Objective, SgdTrainer, TrainError, TrainingCallback};

// =============================================================================
// FeatureSpace
// =============================================================================

/// Which kind of input a model consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureKind {
    Dense,
    Hashed,
}

impl FeatureKind {
    /// The only task a model over this kind of input can learn.
    pub fn task(self) -> TaskKind {
        match self {
            Self::Dense => TaskKind::Regression,
            Self::Hashed => TaskKind::BinaryClassification,
        }
    }
}

impl std::fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dense => f.write_str("dense"),
            Self::Hashed => f.write_str("hashed"),
        }
    }
}

/// Input preprocessing captured at training time.
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureSpace {
    /// Numeric features, min-max scaled with the stored bounds.
    Dense { bounds: FeatureBounds },
    /// Sentences hashed with the stored featurizer.
    Hashed { featurizer: TextFeaturizer },
}

impl FeatureSpace {
    pub fn kind(&self) -> FeatureKind {
        match self {
            Self::Dense { .. } => FeatureKind::Dense,
            Self::Hashed { .. } => FeatureKind::Hashed,
        }
    }

    /// Number of weights a model over this space has.
    pub fn n_weights(&self) -> usize {
        match self {
            Self::Dense { bounds } => bounds.n_features(),
            Self::Hashed { featurizer } => featurizer.table_size().len(),
        }
    }
}

// =============================================================================
// PredictError
// =============================================================================

/// Errors raised when predicting with an [`SgdModel`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PredictError {
    #[error("model consumes {expected} features, got {found} input")]
    ModelKindMismatch {
        expected: FeatureKind,
        found: FeatureKind,
    },

    #[error(transparent)]
    Normalize(#[from] NormalizeError),

    #[error("feature index {index} is outside a table of {n_weights} weights")]
    IndexOutOfRange { index: u32, n_weights: usize },
}

// =============================================================================
// SgdModel
// =============================================================================

/// Trained linear model with its preprocessing and output transform.
#[derive(Debug, Clone, PartialEq)]
pub struct SgdModel {
    linear: LinearModel,
    meta: ModelMeta,
    features: FeatureSpace,
}

impl SgdModel {
    /// Assemble a model from parts whose dimensions already agree.
    pub(crate) fn from_parts(linear: LinearModel, meta: ModelMeta, features: FeatureSpace) -> Self {
        debug_assert_eq!(linear.n_weights(), features.n_weights());
        Self {
            linear,
            meta,
            features,
        }
    }

    // -------------------------------------------------------------------------
    // Training
    // -------------------------------------------------------------------------

    /// Fit min-max bounds on `data`, normalize a copy and train on it.
    pub fn train_dense(data: &DenseDataset, config: &TrainConfig) -> Result<Self, TrainError> {
        Self::train_dense_with_callback(data, config, &mut NoCallback)
    }

    /// [`train_dense`](Self::train_dense) with a per-epoch callback.
    pub fn train_dense_with_callback<C>(
        data: &DenseDataset,
        config: &TrainConfig,
        callback: &mut C,
    ) -> Result<Self, TrainError>
    where
        C: TrainingCallback + ?Sized,
    {
        check_task(config.task, FeatureKind::Dense)?;
        if data.is_empty() {
            return Err(TrainError::EmptyDataset);
        }
        let bounds = FeatureBounds::fit(data.features())?;
        let normalized = data.with_features(bounds.transform(data.features())?);

        let trainer = SgdTrainer::new(Objective::for_task(config.task), config.sgd_params());
        let output = trainer.train(&normalized, callback)?;

        Ok(Self::from_parts(
            output.model,
            meta_for(config.task, data.n_features()),
            FeatureSpace::Dense { bounds },
        ))
    }

    /// Train on hashed sentences. The dataset's featurizer is stored with the
    /// model.
    pub fn train_text(data: &HashedDataset, config: &TrainConfig) -> Result<Self, TrainError> {
        Self::train_text_with_callback(data, config, &mut NoCallback)
    }

    /// [`train_text`](Self::train_text) with a per-epoch callback.
    pub fn train_text_with_callback<C>(
        data: &HashedDataset,
        config: &TrainConfig,
        callback: &mut C,
    ) -> Result<Self, TrainError>
    where
        C: TrainingCallback + ?Sized,
    {
        check_task(config.task, FeatureKind::Hashed)?;
        let featurizer = *data.featurizer();
        let trainer = SgdTrainer::new(Objective::for_task(config.task), config.sgd_params());
        let output = trainer.train(data, callback)?;

        Ok(Self::from_parts(
            output.model,
            meta_for(config.task, featurizer.table_size().len()),
            FeatureSpace::Hashed { featurizer },
        ))
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    #[inline]
    pub fn linear(&self) -> &LinearModel {
        &self.linear
    }

    #[inline]
    pub fn meta(&self) -> &ModelMeta {
        &self.meta
    }

    #[inline]
    pub fn features(&self) -> &FeatureSpace {
        &self.features
    }

    #[inline]
    pub fn task(&self) -> TaskKind {
        self.meta.task
    }

    #[inline]
    pub fn transform(&self) -> OutputTransform {
        self.meta.transform
    }

    #[inline]
    pub fn feature_kind(&self) -> FeatureKind {
        self.features.kind()
    }

    /// Training bounds of a dense model.
    pub fn bounds(&self) -> Option<&FeatureBounds> {
        match &self.features {
            FeatureSpace::Dense { bounds } => Some(bounds),
            FeatureSpace::Hashed { .. } => None,
        }
    }

    /// Featurizer of a hashed model.
    pub fn featurizer(&self) -> Option<&TextFeaturizer> {
        match &self.features {
            FeatureSpace::Hashed { featurizer } => Some(featurizer),
            FeatureSpace::Dense { .. } => None,
        }
    }

    // -------------------------------------------------------------------------
    // Prediction
    // -------------------------------------------------------------------------

    fn dense_bounds(&self) -> Result<&FeatureBounds, PredictError> {
        self.bounds().ok_or(PredictError::ModelKindMismatch {
            expected: FeatureKind::Hashed,
            found: FeatureKind::Dense,
        })
    }

    fn text_featurizer(&self) -> Result<&TextFeaturizer, PredictError> {
        self.featurizer().ok_or(PredictError::ModelKindMismatch {
            expected: FeatureKind::Dense,
            found: FeatureKind::Hashed,
        })
    }

    /// Predict one raw (unscaled) dense row.
    pub fn predict_dense_row(&self, row: ArrayView1<'_, f64>) -> Result<f64, PredictError> {
        let bounds = self.dense_bounds()?;
        if row.len() != bounds.n_features() {
            return Err(NormalizeError::DimensionMismatch {
                expected: bounds.n_features(),
                found: row.len(),
            }
            .into());
        }

        let scaled: Array1<f64> = row
            .iter()
            .enumerate()
            .map(|(feature, &x)| bounds.scale(feature, x))
            .collect();
        Ok(self.transform().apply(self.linear.margin_dense(scaled.view())))
    }

    /// Predict every row of a raw dense matrix (`[n_samples, n_features]`).
    pub fn predict_dense(&self, features: ArrayView2<'_, f64>) -> Result<Array1<f64>, PredictError> {
        let scaled = self.dense_bounds()?.transform(features)?;
        Ok(self.predict_normalized(scaled.view()))
    }

    /// Predict rows that were already scaled with this model's bounds.
    pub(crate) fn predict_normalized(&self, scaled: ArrayView2<'_, f64>) -> Array1<f64> {
        let transform = self.transform();
        scaled
            .rows()
            .into_iter()
            .map(|row| transform.apply(self.linear.margin_dense(row)))
            .collect()
    }

    /// Featurize and predict one sentence.
    pub fn predict_text(&self, sentence: &str) -> Result<f64, PredictError> {
        let indices = self.text_featurizer()?.featurize(sentence);
        Ok(self.predict_hashed(&indices))
    }

    /// Predict from already hashed indices.
    pub fn predict_indices(&self, indices: &[u32]) -> Result<f64, PredictError> {
        self.text_featurizer()?;
        let n_weights = self.linear.n_weights();
        if let Some(&index) = indices.iter().find(|&&j| j as usize >= n_weights) {
            return Err(PredictError::IndexOutOfRange { index, n_weights });
        }
        Ok(self.predict_hashed(indices))
    }

    #[inline]
    fn predict_hashed(&self, indices: &[u32]) -> f64 {
        self.transform().apply(self.linear.margin_indices(indices))
    }
}

fn check_task(task: TaskKind, features: FeatureKind) -> Result<(), TrainError> {
    if task != features.task() {
        return Err(TrainError::TaskMismatch { task, features });
    }
    Ok(())
}

fn meta_for(task: TaskKind, n_features: usize) -> ModelMeta {
    match task {
        TaskKind::Regression => ModelMeta::for_regression(n_features),
        TaskKind::BinaryClassification => ModelMeta::for_binary_classification(n_features),
    }
}
