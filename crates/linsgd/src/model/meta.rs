//! Model metadata.

use serde::{Deserialize, Serialize};

use super::transform::OutputTransform;

/// Type of learning task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    /// Regression (continuous target).
    #[default]
    Regression,
    /// Binary classification (labels 0 / 1).
    BinaryClassification,
}

impl TaskKind {
    /// Returns true if this is a classification task.
    pub fn is_classification(&self) -> bool {
        matches!(self, Self::BinaryClassification)
    }

    /// Returns true if this is a regression task.
    pub fn is_regression(&self) -> bool {
        matches!(self, Self::Regression)
    }

    /// Output transform paired with this task.
    pub fn output_transform(&self) -> OutputTransform {
        match self {
            Self::Regression => OutputTransform::Identity,
            Self::BinaryClassification => OutputTransform::Sigmoid,
        }
    }
}

impl std::fmt::Display for TaskKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Regression => f.write_str("regression"),
            Self::BinaryClassification => f.write_str("classification"),
        }
    }
}

/// Metadata stored alongside the model weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ModelMeta {
    /// Task type.
    pub task: TaskKind,
    /// Margin to prediction mapping.
    pub transform: OutputTransform,
    /// Number of input features (dense) or hash table slots (hashed).
    pub n_features: usize,
}

impl ModelMeta {
    /// Create metadata for a regression task.
    pub fn for_regression(n_features: usize) -> Self {
        Self {
            task: TaskKind::Regression,
            transform: OutputTransform::Identity,
            n_features,
        }
    }

    /// Create metadata for binary classification.
    pub fn for_binary_classification(n_features: usize) -> Self {
        Self {
            task: TaskKind::BinaryClassification,
            transform: OutputTransform::Sigmoid,
            n_features,
        }
    }
}
