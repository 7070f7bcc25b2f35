//! High-level model API.
//!
//! - [`SgdModel`]: trained weights plus feature preprocessing
//! - [`TrainConfig`]: validated training configuration
//! - [`ModelMeta`], [`TaskKind`]: model metadata
//! - [`OutputTransform`]: margin → prediction mapping

mod config;
mod linear;
mod meta;
mod transform;

pub use config::{ConfigError, TrainConfig, TrainConfigBuilder};
pub use linear::{FeatureKind, FeatureSpace, PredictError, SgdModel};
pub use meta::{ModelMeta, TaskKind};
pub use transform::{sigmoid, OutputTransform};
