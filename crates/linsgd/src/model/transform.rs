//! Output transformation for inference.
//!
//! The [`OutputTransform`] enum defines how raw model outputs (margins)
//! are converted to final predictions. It is persisted with the model
//! so that inference doesn't require the training objective.
//!
//! # Variants
//!
//! - [`Identity`](OutputTransform::Identity): No transformation (regression)
//! - [`Sigmoid`](OutputTransform::Sigmoid): Logistic sigmoid for binary classification

use serde::{Deserialize, Serialize};

/// Inference-time output transformation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputTransform {
    /// No transformation; output = margin.
    #[default]
    Identity,

    /// Logistic sigmoid: output = 1 / (1 + exp(-margin)).
    Sigmoid,
}

impl OutputTransform {
    /// Apply the transformation to a single margin.
    #[inline]
    pub fn apply(self, margin: f64) -> f64 {
        match self {
            OutputTransform::Identity => margin,
            OutputTransform::Sigmoid => sigmoid(margin),
        }
    }

    /// Apply the transformation in place.
    #[inline]
    pub fn transform_inplace(self, predictions: &mut [f64]) {
        if self == OutputTransform::Identity {
            return;
        }
        for x in predictions.iter_mut() {
            *x = self.apply(*x);
        }
    }
}

/// Logistic sigmoid, evaluated on the branch that cannot overflow.
#[inline]
pub fn sigmoid(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}
