//! Training progress logging.
//!
//! [`TrainingLogger`] emits `tracing` events for training milestones, gated
//! by a [`Verbosity`] level. Where the events go is up to the installed
//! subscriber.

use std::time::Instant;

use tracing::{debug, info, warn};

use super::eval::MetricValue;

/// How much the trainer reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Verbosity {
    /// Nothing.
    #[default]
    Silent,
    /// Only problems.
    Warning,
    /// Start, per-epoch metric and finish.
    Info,
    /// Everything, including per-epoch timing.
    Debug,
}

/// Emits training progress as `tracing` events.
#[derive(Debug)]
pub struct TrainingLogger {
    verbosity: Verbosity,
    n_epochs: usize,
    started: Option<Instant>,
    epoch_started: Option<Instant>,
}

impl TrainingLogger {
    pub fn new(verbosity: Verbosity) -> Self {
        Self {
            verbosity,
            n_epochs: 0,
            started: None,
            epoch_started: None,
        }
    }

    #[inline]
    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    pub fn start_training(&mut self, n_epochs: usize) {
        self.n_epochs = n_epochs;
        self.started = Some(Instant::now());
        if self.verbosity >= Verbosity::Info {
            info!(n_epochs, "training started");
        }
    }

    pub fn start_epoch(&mut self) {
        if self.verbosity >= Verbosity::Debug {
            self.epoch_started = Some(Instant::now());
        }
    }

    /// Report the metric of a finished epoch (0-based).
    pub fn log_epoch(&mut self, epoch: usize, metric: &MetricValue) {
        if self.verbosity >= Verbosity::Debug {
            let elapsed_ms = self
                .epoch_started
                .take()
                .map_or(0.0, |t| t.elapsed().as_secs_f64() * 1e3);
            debug!(epoch, of = self.n_epochs, elapsed_ms, "{metric}");
        } else if self.verbosity >= Verbosity::Info {
            info!(epoch, of = self.n_epochs, "{metric}");
        }
    }

    /// Report a non-finite epoch metric.
    pub fn log_diverged(&self, epoch: usize, metric: &MetricValue) {
        if self.verbosity >= Verbosity::Warning {
            warn!(epoch, "{} is not finite; training has diverged", metric.name);
        }
    }

    /// Report a stop requested by a callback after `epoch`.
    pub fn log_stopped(&self, epoch: usize) {
        if self.verbosity >= Verbosity::Info {
            info!(epoch, "training stopped by callback");
        }
    }

    pub fn finish_training(&mut self) {
        if self.verbosity >= Verbosity::Info {
            let elapsed_s = self.started.take().map_or(0.0, |t| t.elapsed().as_secs_f64());
            info!(elapsed_s, "training finished");
        }
    }
}
