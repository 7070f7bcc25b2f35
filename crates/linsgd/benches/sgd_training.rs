//! SGD training and prediction benchmarks.
//!
//! ```bash
//! cargo bench --bench sgd_training
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use linsgd::hashing::{TableSize, TextFeaturizer};
use linsgd::model::{SgdModel, TaskKind, TrainConfig};
use linsgd::testing::{synthetic_linear_regression, synthetic_sentences, synthetic_sentiment};
use linsgd::training::{NoCallback, SgdParams, SgdTrainer, SquaredLoss, Verbosity};

fn bench_params() -> SgdParams {
    SgdParams {
        learning_rate: 0.01,
        n_epochs: 5,
        verbosity: Verbosity::Silent,
    }
}

// =============================================================================
// Dense
// =============================================================================

fn bench_dense_training(c: &mut Criterion) {
    let mut group = c.benchmark_group("dense_training");
    let trainer = SgdTrainer::new(SquaredLoss, bench_params());

    for n_features in [10, 100, 500] {
        let (data, _, _) = synthetic_linear_regression(5_000, n_features, 42, 0.05);
        group.throughput(Throughput::Elements((data.n_samples() * n_features) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n_features), &data, |b, data| {
            b.iter(|| black_box(trainer.train(black_box(data), &mut NoCallback).unwrap()))
        });
    }

    group.finish();
}

// =============================================================================
// Hashed text
// =============================================================================

fn bench_text_training(c: &mut Criterion) {
    let mut group = c.benchmark_group("text_training");
    group.sample_size(20);

    for ngram_order in [1, 2, 3] {
        let config = TrainConfig::builder()
            .task(TaskKind::BinaryClassification)
            .learning_rate(0.1)
            .n_epochs(5)
            .ngram_order(ngram_order)
            .table_size(TableSize::from_bits(18).unwrap())
            .verbosity(Verbosity::Silent)
            .build()
            .unwrap();
        let data = synthetic_sentiment(5_000, 7, config.featurizer());

        group.throughput(Throughput::Elements(data.n_samples() as u64));
        group.bench_with_input(BenchmarkId::new("ngram", ngram_order), &data, |b, data| {
            b.iter(|| black_box(SgdModel::train_text(black_box(data), &config).unwrap()))
        });
    }

    group.finish();
}

fn bench_featurize(c: &mut Criterion) {
    let sentences = synthetic_sentences(1_000, 3);
    let featurizer = TextFeaturizer::new(TableSize::default(), 2, true);

    let mut group = c.benchmark_group("featurize");
    group.throughput(Throughput::Elements(sentences.len() as u64));
    group.bench_function("bigrams_folded", |b| {
        b.iter(|| {
            for (text, _) in &sentences {
                black_box(featurizer.featurize(black_box(text)));
            }
        })
    });
    group.finish();
}

// =============================================================================
// Prediction
// =============================================================================

fn bench_dense_prediction(c: &mut Criterion) {
    let (data, _, _) = synthetic_linear_regression(10_000, 50, 1, 0.0);
    let config = TrainConfig::builder()
        .learning_rate(0.01)
        .n_epochs(1)
        .verbosity(Verbosity::Silent)
        .build()
        .unwrap();
    let model = SgdModel::train_dense(&data, &config).unwrap();

    let mut group = c.benchmark_group("dense_prediction");
    group.throughput(Throughput::Elements(data.n_samples() as u64));
    group.bench_function("batch", |b| {
        b.iter(|| black_box(model.predict_dense(black_box(data.features())).unwrap()))
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_dense_training,
    bench_text_training,
    bench_featurize,
    bench_dense_prediction
);
criterion_main!(benches);
