//! Min-max feature scaling for dense datasets.
//!
//! Bounds are fitted once on the training set and stored with the model, so
//! evaluation rescales its inputs exactly as training did.
//!
//! Constant columns (`max == min`) are mapped to `0.0` instead of dividing by
//! zero.

use ndarray::{Array1, Array2, ArrayView1, ArrayView2, ArrayViewMut2, Axis, Zip};

/// Errors raised while fitting or applying feature bounds.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NormalizeError {
    #[error("cannot fit feature bounds on an empty dataset")]
    EmptyDataset,

    #[error("bounds cover {expected} features but data has {found}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("min has {min_len} entries but max has {max_len}")]
    LengthMismatch { min_len: usize, max_len: usize },

    #[error("feature {feature}: max {max} is below min {min}")]
    InvertedBounds { feature: usize, min: f64, max: f64 },
}

/// Per-feature minimum and maximum captured on a training set.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureBounds {
    min: Array1<f64>,
    max: Array1<f64>,
}

impl FeatureBounds {
    /// Create bounds from explicit vectors.
    pub fn new(min: Array1<f64>, max: Array1<f64>) -> Result<Self, NormalizeError> {
        if min.len() != max.len() {
            return Err(NormalizeError::LengthMismatch {
                min_len: min.len(),
                max_len: max.len(),
            });
        }
        if let Some((feature, (&lo, &hi))) = min
            .iter()
            .zip(max.iter())
            .enumerate()
            .find(|(_, (lo, hi))| !(hi >= lo))
        {
            return Err(NormalizeError::InvertedBounds {
                feature,
                min: lo,
                max: hi,
            });
        }
        Ok(Self { min, max })
    }

    /// Scan `features` (`[n_samples, n_features]`) once and record the
    /// element-wise min and max of every column.
    pub fn fit(features: ArrayView2<'_, f64>) -> Result<Self, NormalizeError> {
        let mut rows = features.axis_iter(Axis(0));
        let first = rows.next().ok_or(NormalizeError::EmptyDataset)?;

        let mut min = first.to_owned();
        let mut max = first.to_owned();
        for row in rows {
            Zip::from(&mut min)
                .and(&mut max)
                .and(&row)
                .for_each(|lo, hi, &value| {
                    *lo = lo.min(value);
                    *hi = hi.max(value);
                });
        }

        Ok(Self { min, max })
    }

    #[inline]
    pub fn n_features(&self) -> usize {
        self.min.len()
    }

    #[inline]
    pub fn min(&self) -> ArrayView1<'_, f64> {
        self.min.view()
    }

    #[inline]
    pub fn max(&self) -> ArrayView1<'_, f64> {
        self.max.view()
    }

    /// Rescale one value of `feature` to `(value - min) / (max - min)`.
    #[inline]
    pub fn scale(&self, feature: usize, value: f64) -> f64 {
        let range = self.max[feature] - self.min[feature];
        if range == 0.0 {
            0.0
        } else {
            (value - self.min[feature]) / range
        }
    }

    /// Rescale every value of `features` in place.
    pub fn transform_inplace(&self, mut features: ArrayViewMut2<'_, f64>) -> Result<(), NormalizeError> {
        self.check_dimension(features.ncols())?;
        for mut row in features.axis_iter_mut(Axis(0)) {
            for (feature, value) in row.iter_mut().enumerate() {
                *value = self.scale(feature, *value);
            }
        }
        Ok(())
    }

    /// Rescaled copy of `features`.
    pub fn transform(&self, features: ArrayView2<'_, f64>) -> Result<Array2<f64>, NormalizeError> {
        let mut scaled = features.to_owned();
        self.transform_inplace(scaled.view_mut())?;
        Ok(scaled)
    }

    fn check_dimension(&self, found: usize) -> Result<(), NormalizeError> {
        if found != self.n_features() {
            return Err(NormalizeError::DimensionMismatch {
                expected: self.n_features(),
                found,
            });
        }
        Ok(())
    }
}
