//! Seeded synthetic data for tests and benchmarks.

use ndarray::{Array1, Array2};
use rand::prelude::*;

use crate::data::{DenseDataset, HashedDataset};
use crate::hashing::TextFeaturizer;

/// Random dense features, uniform in `[min, max]`.
pub fn random_dense(rows: usize, cols: usize, seed: u64, min: f64, max: f64) -> Array2<f64> {
    assert!(max >= min);
    let mut rng = StdRng::seed_from_u64(seed);
    let width = max - min;
    Array2::from_shape_simple_fn((rows, cols), || min + rng.r#gen::<f64>() * width)
}

/// Dense regression data whose targets are a random linear function of the
/// features plus uniform noise.
///
/// Returns `(dataset, weights, bias)`.
pub fn synthetic_linear_regression(
    rows: usize,
    cols: usize,
    seed: u64,
    noise_amplitude: f64,
) -> (DenseDataset, Array1<f64>, f64) {
    let features = random_dense(rows, cols, seed, 0.0, 1.0);
    let mut rng = StdRng::seed_from_u64(seed.wrapping_add(1));

    let weights: Array1<f64> = (0..cols).map(|_| rng.r#gen::<f64>() * 2.0 - 1.0).collect();
    let bias = rng.r#gen::<f64>() * 0.5 - 0.25;

    let targets: Array1<f64> = features
        .rows()
        .into_iter()
        .map(|row| {
            let noise = if noise_amplitude > 0.0 {
                (rng.r#gen::<f64>() * 2.0 - 1.0) * noise_amplitude
            } else {
                0.0
            };
            bias + row.dot(&weights) + noise
        })
        .collect();

    let dataset = DenseDataset::new(features, targets).expect("one target per row");
    (dataset, weights, bias)
}

/// Deterministic train/valid split indices.
///
/// Returns `(train_idx, valid_idx)`.
pub fn split_indices(rows: usize, valid_fraction: f64, seed: u64) -> (Vec<usize>, Vec<usize>) {
    assert!((0.0..1.0).contains(&valid_fraction));
    let mut idx: Vec<usize> = (0..rows).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    idx.shuffle(&mut rng);

    let valid_len = ((rows as f64) * valid_fraction).round() as usize;
    let (valid, train) = idx.split_at(valid_len.min(rows));
    (train.to_vec(), valid.to_vec())
}

const POSITIVE_WORDS: &[&str] = &["good", "great", "excellent", "lovely", "superb", "enjoyable"];
const NEGATIVE_WORDS: &[&str] = &["bad", "awful", "terrible", "boring", "dreadful", "poor"];
const NEUTRAL_WORDS: &[&str] = &["the", "movie", "plot", "was", "acting", "really", "film", "a"];

/// Short labelled sentences: each mixes neutral filler with two or three
/// words from the sentiment vocabulary of its label.
pub fn synthetic_sentences(n_samples: usize, seed: u64) -> Vec<(String, f64)> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n_samples)
        .map(|_| {
            let positive = rng.gen_bool(0.5);
            let vocab = if positive { POSITIVE_WORDS } else { NEGATIVE_WORDS };

            let mut words: Vec<&str> = Vec::new();
            for _ in 0..rng.gen_range(1..=4) {
                words.push(NEUTRAL_WORDS.choose(&mut rng).copied().unwrap_or("the"));
            }
            for _ in 0..rng.gen_range(2..=3) {
                words.push(vocab.choose(&mut rng).copied().unwrap_or("good"));
            }
            words.shuffle(&mut rng);

            (words.join(" "), if positive { 1.0 } else { 0.0 })
        })
        .collect()
}

/// [`synthetic_sentences`] hashed with `featurizer`.
pub fn synthetic_sentiment(n_samples: usize, seed: u64, featurizer: TextFeaturizer) -> HashedDataset {
    HashedDataset::from_sentences(featurizer, synthetic_sentences(n_samples, seed))
}
