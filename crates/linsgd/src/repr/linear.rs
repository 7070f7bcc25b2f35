//! Linear model data structure.

use ndarray::{Array1, ArrayView1, ArrayViewMut1};

/// Linear model parameters: a bias and one coefficient per feature slot.
///
/// For dense models the coefficient vector has one entry per input feature.
/// For hashed models it has one entry per hash table slot.
///
/// ```text
/// margin(dense x)    = bias + Σ_i weights[i] * x[i]
/// margin(indices j)  = bias + Σ_j weights[j]      (once per occurrence)
/// ```
///
/// # Example
///
/// ```
/// use linsgd::repr::LinearModel;
/// use ndarray::array;
///
/// let model = LinearModel::new(0.5, array![1.0, -2.0]);
/// assert_eq!(model.margin_dense(array![3.0, 1.0].view()), 1.5);
/// assert_eq!(model.margin_indices(&[1, 1, 0]), -2.5);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LinearModel {
    bias: f64,
    weights: Array1<f64>,
}

impl LinearModel {
    pub fn new(bias: f64, weights: Array1<f64>) -> Self {
        Self { bias, weights }
    }

    /// Zero-initialized model with `n_weights` coefficients.
    pub fn zeros(n_weights: usize) -> Self {
        Self {
            bias: 0.0,
            weights: Array1::zeros(n_weights),
        }
    }

    #[inline]
    pub fn n_weights(&self) -> usize {
        self.weights.len()
    }

    #[inline]
    pub fn bias(&self) -> f64 {
        self.bias
    }

    #[inline]
    pub fn set_bias(&mut self, value: f64) {
        self.bias = value;
    }

    #[inline]
    pub fn weight(&self, index: usize) -> f64 {
        self.weights[index]
    }

    #[inline]
    pub fn weights(&self) -> ArrayView1<'_, f64> {
        self.weights.view()
    }

    #[inline]
    pub fn weights_mut(&mut self) -> ArrayViewMut1<'_, f64> {
        self.weights.view_mut()
    }

    /// Raw margin for a dense feature row.
    ///
    /// # Panics
    ///
    /// Panics if `row.len() != n_weights()`.
    #[inline]
    pub fn margin_dense(&self, row: ArrayView1<'_, f64>) -> f64 {
        self.bias + self.weights.dot(&row)
    }

    /// Raw margin for a sequence of hashed indices.
    ///
    /// # Panics
    ///
    /// Panics if any index is `>= n_weights()`.
    #[inline]
    pub fn margin_indices(&self, indices: &[u32]) -> f64 {
        indices
            .iter()
            .fold(self.bias, |acc, &j| acc + self.weights[j as usize])
    }

    /// Number of coefficients that are not exactly `+0.0`.
    pub fn n_nonzero(&self) -> usize {
        self.weights.iter().filter(|w| w.to_bits() != 0).count()
    }
}
