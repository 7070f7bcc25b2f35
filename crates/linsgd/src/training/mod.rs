//! Training infrastructure for SGD linear models.
//!
//! - [`SgdTrainer`], [`SgdParams`]: the epoch loop
//! - [`TrainingData`]: sample access, implemented by both dataset kinds
//! - [`ObjectiveFn`], [`Objective`]: per-sample update strategy
//! - [`MetricFn`], [`Metric`]: epoch and evaluation metrics
//! - [`TrainingCallback`], [`EpochAction`]: per-epoch observer with stop
//! - [`TrainingLogger`], [`Verbosity`]: structured logging
//! - [`Evaluator`]: scoring a trained model on held-out data
//!
//! ## Objectives
//!
//! - [`SquaredLoss`]: regression, identity output, RMSE per epoch
//! - [`LogisticLoss`]: binary classification, sigmoid output, signed mean
//!   error per epoch

mod callback;
mod eval;
mod logger;
mod metrics;
mod objectives;
mod sgd;

pub use callback::{EpochAction, LossHistory, NoCallback, TrainingCallback};
pub use eval::{EvalError, Evaluator, MetricValue};
pub use logger::{TrainingLogger, Verbosity};
pub use metrics::{Accuracy, MeanError, Metric, MetricFn, Rmse};
pub use objectives::{LogisticLoss, Objective, ObjectiveFn, SquaredLoss};
pub use sgd::{SgdParams, SgdTrainer, TrainError, TrainOutput, TrainingData};
