//! Datasets, feature scaling and file loading.
//!
//! - [`DenseDataset`]: numeric features + regression targets
//! - [`HashedDataset`]: hashed sentences + binary labels
//! - [`FeatureBounds`]: min-max scaling fitted on training data
//! - [`io`]: CSV loaders

mod dataset;
pub mod io;
mod normalize;

pub use dataset::{DatasetError, DenseDataset, DenseExample, HashedDataset, HashedExample};
pub use normalize::{FeatureBounds, NormalizeError};
