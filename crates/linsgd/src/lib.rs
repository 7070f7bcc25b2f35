//! linsgd: linear models trained with stochastic gradient descent.
//!
//! Two problem shapes share one trainer:
//!
//! - **Dense regression**: numeric features are min-max scaled with bounds
//!   fitted on the training set, then fitted with squared loss.
//! - **Hashed text classification**: sentences are tokenized, optionally
//!   expanded into word n-grams and hashed (FNV-1a) into a fixed-size weight
//!   table, then fitted with a sigmoid output.
//!
//! # Key Types
//!
//! - [`SgdModel`] - Trained model with its preprocessing; train, predict, save, load
//! - [`TrainConfig`] - Configuration builder
//! - [`SgdTrainer`] - Low-level epoch loop over any [`training::TrainingData`]
//! - [`Evaluator`] - Accuracy / RMSE on held-out data
//!
//! # Example
//!
//! ```
//! use linsgd::data::DenseDataset;
//! use linsgd::model::{SgdModel, TrainConfig};
//! use linsgd::training::Verbosity;
//! use ndarray::array;
//!
//! let data = DenseDataset::new(
//!     array![[1.0, 10.0], [2.0, 30.0], [3.0, 20.0]],
//!     array![1.0, 2.0, 3.0],
//! )
//! .unwrap();
//! let config = TrainConfig::builder()
//!     .learning_rate(0.1)
//!     .n_epochs(2000)
//!     .verbosity(Verbosity::Silent)
//!     .build()
//!     .unwrap();
//!
//! let model = SgdModel::train_dense(&data, &config).unwrap();
//! let prediction = model.predict_dense_row(array![2.0, 30.0].view()).unwrap();
//! assert!((prediction - 2.0).abs() < 0.1);
//! ```

pub mod data;
pub mod hashing;
pub mod model;
pub mod persist;
pub mod repr;
pub mod testing;
pub mod training;

// =============================================================================
// Convenience Re-exports
// =============================================================================

pub use model::{SgdModel, TaskKind, TrainConfig};
pub use persist::PersistError;
pub use training::{Evaluator, Objective, ObjectiveFn, SgdTrainer};
