//! linsgd CLI: train and evaluate SGD linear models on CSV data.

use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use linsgd::data::io::{load_dense_csv, load_text_csv};
use linsgd::hashing::TableSize;
use linsgd::model::{FeatureSpace, SgdModel, TaskKind, TrainConfig};
use linsgd::training::{Evaluator, Verbosity};

#[derive(Parser)]
#[command(name = "linsgd")]
#[command(about = "Train and evaluate linear models with stochastic gradient descent")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Task {
    /// Dense numeric features, squared loss
    Regression,
    /// Hashed sentences, sigmoid output
    Classification,
}

impl From<Task> for TaskKind {
    fn from(task: Task) -> Self {
        match task {
            Task::Regression => TaskKind::Regression,
            Task::Classification => TaskKind::BinaryClassification,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Train a model from a CSV dataset and save it as JSON
    Train {
        /// Training data (CSV with a header line)
        dataset: PathBuf,

        /// Output model file
        output: PathBuf,

        /// Learning task; also selects the dataset layout
        #[arg(long, value_enum, default_value_t = Task::Regression)]
        task: Task,

        /// SGD step size
        #[arg(long, default_value_t = 0.001)]
        learning_rate: f64,

        /// Number of passes over the data
        #[arg(long, default_value_t = 100)]
        epochs: u32,

        /// Word n-gram order for text data (0 or 1 = unigrams)
        #[arg(long, default_value_t = 0)]
        ngrams: usize,

        /// Hash table size as a power of two
        #[arg(long, default_value_t = TableSize::DEFAULT_BITS)]
        table_bits: u32,

        /// Fold accented characters before hashing
        #[arg(long)]
        strip_diacritics: bool,

        /// Only log warnings
        #[arg(short, long)]
        quiet: bool,
    },

    /// Print per-example predictions and the summary metric
    Evaluate {
        /// Trained model file
        model: PathBuf,

        /// Test data (same layout as the training data)
        dataset: PathBuf,
    },

    /// Display model information
    Info {
        /// Model file
        model: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "linsgd=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Train {
            dataset,
            output,
            task,
            learning_rate,
            epochs,
            ngrams,
            table_bits,
            strip_diacritics,
            quiet,
        } => {
            let config = TrainConfig::builder()
                .task(task.into())
                .learning_rate(learning_rate)
                .n_epochs(epochs)
                .ngram_order(ngrams)
                .table_size(TableSize::from_bits(table_bits)?)
                .strip_diacritics(strip_diacritics)
                .verbosity(if quiet { Verbosity::Warning } else { Verbosity::Info })
                .build()?;
            cmd_train(&dataset, &output, &config)
        }
        Commands::Evaluate { model, dataset } => cmd_evaluate(&model, &dataset),
        Commands::Info { model } => cmd_info(&model),
    }
}

fn cmd_train(dataset: &Path, output: &Path, config: &TrainConfig) -> Result<()> {
    let model = match config.task {
        TaskKind::Regression => {
            let data = load_dense_csv(dataset)
                .with_context(|| format!("loading {}", dataset.display()))?;
            info!(
                n_samples = data.n_samples(),
                n_features = data.n_features(),
                "training dense regression model"
            );
            SgdModel::train_dense(&data, config)?
        }
        TaskKind::BinaryClassification => {
            let data = load_text_csv(dataset, config.featurizer())
                .with_context(|| format!("loading {}", dataset.display()))?;
            info!(
                n_samples = data.n_samples(),
                table_size = %config.table_size,
                ngram_order = config.ngram_order,
                "training hashed text classifier"
            );
            SgdModel::train_text(&data, config)?
        }
    };

    model
        .save_json(output)
        .with_context(|| format!("saving model to {}", output.display()))?;
    info!(path = %output.display(), "model saved");
    Ok(())
}

fn cmd_evaluate(model_path: &Path, dataset: &Path) -> Result<()> {
    let model = SgdModel::load_json(model_path)
        .with_context(|| format!("loading model {}", model_path.display()))?;
    let evaluator = Evaluator::new(&model);

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut write_error: Option<io::Error> = None;

    let metric = match model.features() {
        FeatureSpace::Dense { .. } => {
            let data = load_dense_csv(dataset)
                .with_context(|| format!("loading {}", dataset.display()))?;
            evaluator.evaluate_dense(&data, |example, prediction| {
                if write_error.is_none() {
                    write_error = writeln!(out, "{},{}", example.label, prediction).err();
                }
            })?
        }
        FeatureSpace::Hashed { featurizer } => {
            let data = load_text_csv(dataset, *featurizer)
                .with_context(|| format!("loading {}", dataset.display()))?;
            evaluator.evaluate_hashed(&data, |example, prediction| {
                if write_error.is_none() {
                    write_error =
                        writeln!(out, "{}, {}, {}", example.text, example.label, prediction).err();
                }
            })?
        }
    };
    if let Some(err) = write_error {
        return Err(err).context("writing predictions");
    }

    match model.task() {
        TaskKind::Regression => writeln!(out, "RMSE: {}", metric.value)?,
        TaskKind::BinaryClassification => writeln!(out, "Accuracy: {}", metric.value)?,
    }
    out.flush()?;
    Ok(())
}

fn cmd_info(model_path: &Path) -> Result<()> {
    let model = SgdModel::load_json(model_path)
        .with_context(|| format!("loading model {}", model_path.display()))?;
    let linear = model.linear();

    println!("task:        {}", model.task());
    println!("transform:   {:?}", model.transform());
    println!("bias:        {}", linear.bias());
    println!("weights:     {} ({} non-zero)", linear.n_weights(), linear.n_nonzero());
    match model.features() {
        FeatureSpace::Dense { bounds } => {
            println!("features:    dense, {} columns", bounds.n_features());
        }
        FeatureSpace::Hashed { featurizer } => {
            println!(
                "features:    hashed, table {}, ngram order {}, strip diacritics {}",
                featurizer.table_size(),
                featurizer.ngram_order(),
                featurizer.strips_diacritics()
            );
        }
    }
    Ok(())
}
