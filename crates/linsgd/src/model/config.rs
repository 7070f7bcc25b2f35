//! Training configuration with builder pattern.
//!
//! [`TrainConfig`] collects everything needed to train an [`SgdModel`]: the
//! task, SGD hyperparameters and, for text models, the featurization
//! settings. It uses the `bon` crate for the builder and validates at
//! `build()`.
//!
//! # Example
//!
//! ```
//! use linsgd::model::{TaskKind, TrainConfig};
//! use linsgd::hashing::TableSize;
//!
//! // All defaults: regression, lr 0.001, 100 epochs
//! let config = TrainConfig::builder().build().unwrap();
//! assert_eq!(config.n_epochs, 100);
//!
//! // Bigram sentiment classifier on a 2^18 table
//! let config = TrainConfig::builder()
//!     .task(TaskKind::BinaryClassification)
//!     .learning_rate(0.1)
//!     .n_epochs(1000)
//!     .ngram_order(2)
//!     .table_size(TableSize::from_bits(18).unwrap())
//!     .build()
//!     .unwrap();
//! ```
//!
//! [`SgdModel`]: super::SgdModel

use bon::Builder;

use super::meta::TaskKind;
use crate::hashing::{TableSize, TextFeaturizer};
use crate::training::{SgdParams, Verbosity};

// =============================================================================
// ConfigError
// =============================================================================

/// Errors that can occur during configuration validation.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Learning rate must be finite and positive.
    InvalidLearningRate(f64),
    /// Number of epochs must be at least 1.
    InvalidNEpochs,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLearningRate(v) => {
                write!(f, "learning_rate must be finite and positive, got {}", v)
            }
            Self::InvalidNEpochs => write!(f, "n_epochs must be at least 1"),
        }
    }
}

impl std::error::Error for ConfigError {}

// =============================================================================
// TrainConfig
// =============================================================================

/// High-level configuration for SGD training.
#[derive(Debug, Clone, Builder)]
#[builder(
    derive(Clone, Debug),
    finish_fn(vis = "", name = __build_internal)
)]
pub struct TrainConfig {
    /// Learning task. Selects the loss and output transform. Default: regression.
    #[builder(default)]
    pub task: TaskKind,

    /// Step size. Default: 0.001.
    #[builder(default = 0.001)]
    pub learning_rate: f64,

    /// Number of full passes over the data. Default: 100.
    #[builder(default = 100)]
    pub n_epochs: u32,

    // === Text featurization (ignored for dense data) ===
    /// Word n-gram order. `0` and `1` both mean unigrams. Default: 0.
    #[builder(default = 0)]
    pub ngram_order: usize,

    /// Hashed weight table size. Default: `2^21`.
    #[builder(default)]
    pub table_size: TableSize,

    /// Fold accented characters before hashing. Default: false.
    #[builder(default = false)]
    pub strip_diacritics: bool,

    // === Logging ===
    /// Verbosity level. Default: `Info`.
    #[builder(default = Verbosity::Info)]
    pub verbosity: Verbosity,
}

/// Custom finishing function that validates the config.
impl<S: train_config_builder::IsComplete> TrainConfigBuilder<S> {
    /// Build and validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `learning_rate` is not finite and positive,
    /// or if `n_epochs == 0`.
    pub fn build(self) -> Result<TrainConfig, ConfigError> {
        let config = self.__build_internal();
        config.validate()?;
        Ok(config)
    }
}

impl TrainConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(ConfigError::InvalidLearningRate(self.learning_rate));
        }
        if self.n_epochs == 0 {
            return Err(ConfigError::InvalidNEpochs);
        }
        Ok(())
    }

    /// Featurizer for text training data.
    pub fn featurizer(&self) -> TextFeaturizer {
        TextFeaturizer::new(self.table_size, self.ngram_order, self.strip_diacritics)
    }

    /// Low-level trainer parameters.
    pub fn sgd_params(&self) -> SgdParams {
        SgdParams {
            learning_rate: self.learning_rate,
            n_epochs: self.n_epochs,
            verbosity: self.verbosity,
        }
    }
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self::builder().build().expect("default config is valid")
    }
}
