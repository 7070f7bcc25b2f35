//! In-memory training and evaluation datasets.
//!
//! Two shapes are supported:
//!
//! - [`DenseDataset`]: a `[n_samples, n_features]` matrix of numeric features
//!   plus one target per sample (regression).
//! - [`HashedDataset`]: raw sentences with their hashed feature indices plus a
//!   binary label (text classification).

use std::path::PathBuf;

use ndarray::{Array1, Array2, ArrayView1, ArrayView2, ArrayViewMut2};

use crate::hashing::TextFeaturizer;

// =============================================================================
// Errors
// =============================================================================

/// Errors raised while building or loading a dataset.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("failed to open dataset {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to read CSV record: {0}")]
    Csv(#[from] csv::Error),

    #[error("line {line}: expected {expected} columns, found {found}")]
    ColumnCount {
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: expected at least 2 columns, found {found}")]
    TooFewColumns { line: u64, found: usize },

    #[error("line {line}, column {column}: cannot parse {value:?} as a number")]
    ParseFloat {
        line: u64,
        column: usize,
        value: String,
    },

    #[error("row {row} has {found} features, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("{n_samples} samples but {n_targets} targets")]
    TargetLength { n_samples: usize, n_targets: usize },
}

// =============================================================================
// DenseDataset
// =============================================================================

/// Borrowed view of one dense sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DenseExample<'a> {
    pub features: ArrayView1<'a, f64>,
    pub label: f64,
}

/// Dense numeric features with one regression target per sample.
///
/// Features are stored sample-major: `features[[sample, feature]]`.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseDataset {
    features: Array2<f64>,
    targets: Array1<f64>,
}

impl DenseDataset {
    /// Create a dataset from a feature matrix and targets.
    pub fn new(features: Array2<f64>, targets: Array1<f64>) -> Result<Self, DatasetError> {
        if features.nrows() != targets.len() {
            return Err(DatasetError::TargetLength {
                n_samples: features.nrows(),
                n_targets: targets.len(),
            });
        }
        Ok(Self { features, targets })
    }

    /// Create a dataset from per-sample rows.
    ///
    /// The first row fixes the dimensionality; every other row must match it.
    pub fn from_rows(rows: Vec<Vec<f64>>, targets: Vec<f64>) -> Result<Self, DatasetError> {
        let n_features = rows.first().map_or(0, Vec::len);
        let n_samples = rows.len();

        let mut flat = Vec::with_capacity(n_samples * n_features);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != n_features {
                return Err(DatasetError::RaggedRow {
                    row,
                    expected: n_features,
                    found: values.len(),
                });
            }
            flat.extend(values);
        }

        let features = Array2::from_shape_vec((n_samples, n_features), flat)
            .expect("row lengths were checked above");
        Self::new(features, Array1::from(targets))
    }

    #[inline]
    pub fn n_samples(&self) -> usize {
        self.features.nrows()
    }

    #[inline]
    pub fn n_features(&self) -> usize {
        self.features.ncols()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n_samples() == 0
    }

    #[inline]
    pub fn features(&self) -> ArrayView2<'_, f64> {
        self.features.view()
    }

    #[inline]
    pub fn features_mut(&mut self) -> ArrayViewMut2<'_, f64> {
        self.features.view_mut()
    }

    #[inline]
    pub fn targets(&self) -> ArrayView1<'_, f64> {
        self.targets.view()
    }

    /// Features of one sample.
    #[inline]
    pub fn row(&self, sample: usize) -> ArrayView1<'_, f64> {
        self.features.row(sample)
    }

    #[inline]
    pub fn target(&self, sample: usize) -> f64 {
        self.targets[sample]
    }

    /// Features and target of one sample.
    #[inline]
    pub fn example(&self, sample: usize) -> DenseExample<'_> {
        DenseExample {
            features: self.features.row(sample),
            label: self.targets[sample],
        }
    }

    /// Iterate over all samples in order.
    pub fn iter(&self) -> impl Iterator<Item = DenseExample<'_>> + '_ {
        (0..self.n_samples()).map(move |sample| self.example(sample))
    }

    /// Copy of this dataset with the feature matrix replaced.
    pub(crate) fn with_features(&self, features: Array2<f64>) -> Self {
        debug_assert_eq!(features.nrows(), self.n_samples());
        Self {
            features,
            targets: self.targets.clone(),
        }
    }
}

// =============================================================================
// HashedDataset
// =============================================================================

/// One text example: the sentence, its hashed indices and its label.
#[derive(Debug, Clone, PartialEq)]
pub struct HashedExample {
    pub text: String,
    /// Hashed feature indices in token order. Duplicates are kept.
    pub indices: Vec<u32>,
    pub label: f64,
}

/// Sentences hashed with a fixed [`TextFeaturizer`].
#[derive(Debug, Clone, PartialEq)]
pub struct HashedDataset {
    featurizer: TextFeaturizer,
    examples: Vec<HashedExample>,
}

impl HashedDataset {
    /// Create an empty dataset that hashes with `featurizer`.
    pub fn new(featurizer: TextFeaturizer) -> Self {
        Self {
            featurizer,
            examples: Vec::new(),
        }
    }

    /// Hash `(sentence, label)` pairs into a dataset.
    ///
    /// ```
    /// use linsgd::data::HashedDataset;
    /// use linsgd::hashing::TextFeaturizer;
    ///
    /// let data = HashedDataset::from_sentences(
    ///     TextFeaturizer::default(),
    ///     [("good", 1.0), ("bad", 0.0)],
    /// );
    /// assert_eq!(data.n_samples(), 2);
    /// ```
    pub fn from_sentences<I, S>(featurizer: TextFeaturizer, sentences: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut dataset = Self::new(featurizer);
        for (text, label) in sentences {
            dataset.push(text, label);
        }
        dataset
    }

    /// Hash and append one sentence.
    pub fn push(&mut self, text: impl Into<String>, label: f64) {
        let text = text.into();
        let indices = self.featurizer.featurize(&text);
        self.examples.push(HashedExample {
            text,
            indices,
            label,
        });
    }

    #[inline]
    pub fn featurizer(&self) -> &TextFeaturizer {
        &self.featurizer
    }

    #[inline]
    pub fn n_samples(&self) -> usize {
        self.examples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }

    #[inline]
    pub fn examples(&self) -> &[HashedExample] {
        &self.examples
    }

    #[inline]
    pub fn example(&self, sample: usize) -> &HashedExample {
        &self.examples[sample]
    }
}
