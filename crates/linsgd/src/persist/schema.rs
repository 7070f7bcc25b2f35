//! Schema types for model serialization.
//!
//! These types define the on-disk JSON format independently of the runtime
//! types, so the file layout can be versioned and validated on load.
//!
//! ```json
//! {
//!   "version": 1,
//!   "meta": { "task": "regression", "transform": "identity", "n_features": 2 },
//!   "bias": 0.12,
//!   "weights": { "type": "dense", "values": [0.5, -1.0] },
//!   "features": { "type": "dense", "min": [0.0, 3.0], "max": [1.0, 9.0] }
//! }
//! ```

use serde::{Deserialize, Serialize};

/// Current schema version.
pub const SCHEMA_VERSION: u32 = 1;

/// Task type for model output interpretation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKindSchema {
    Regression,
    BinaryClassification,
}

/// Output transform applied to the margin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputTransformSchema {
    Identity,
    Sigmoid,
}

/// Model metadata schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMetaSchema {
    pub task: TaskKindSchema,
    pub transform: OutputTransformSchema,
    /// Number of weights (input features or hash table slots).
    pub n_features: usize,
}

/// Coefficient vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WeightsSchema {
    /// Every coefficient, in feature order.
    Dense { values: Vec<f64> },
    /// `[index, value]` pairs for coefficients whose bit pattern is not
    /// `+0.0`, in ascending index order. All other slots are `+0.0`.
    Sparse { len: usize, entries: Vec<(u32, f64)> },
}

/// Preprocessing needed to reproduce training-time features.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FeaturesSchema {
    /// Min-max bounds of a dense model.
    Dense { min: Vec<f64>, max: Vec<f64> },
    /// Featurizer settings of a hashed text model.
    Hashed {
        ngram_order: usize,
        table_bits: u32,
        #[serde(default)]
        strip_diacritics: bool,
    },
}

/// Full model schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SgdModelSchema {
    pub version: u32,
    pub meta: ModelMetaSchema,
    pub bias: f64,
    pub weights: WeightsSchema,
    pub features: FeaturesSchema,
}
