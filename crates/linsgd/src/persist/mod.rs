//! Model persistence.
//!
//! Models are stored as pretty-printed JSON following the versioned schema in
//! [`schema`]. Floats are written with round-trip precision, so a loaded
//! model has bit-identical bias, weights and bounds.
//!
//! ```no_run
//! use linsgd::model::SgdModel;
//!
//! # fn demo(model: &SgdModel) -> Result<(), linsgd::persist::PersistError> {
//! model.save_json("model.json")?;
//! let restored = SgdModel::load_json("model.json")?;
//! assert_eq!(&restored, model);
//! # Ok(())
//! # }
//! ```

mod convert;
pub mod schema;

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use tracing::debug;

use crate::model::SgdModel;
use schema::SgdModelSchema;

/// Errors raised while saving or loading a model.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid model: {0}")]
    Invalid(String),

    #[error("{field} has a non-finite value at index {index}")]
    NonFinite { field: &'static str, index: usize },
}

impl SgdModel {
    /// Serialize to a pretty-printed JSON string.
    pub fn to_json_string(&self) -> Result<String, PersistError> {
        let schema = SgdModelSchema::try_from(self)?;
        Ok(serde_json::to_string_pretty(&schema)?)
    }

    /// Parse and validate a model from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, PersistError> {
        let schema: SgdModelSchema = serde_json::from_str(json)?;
        Self::try_from(schema)
    }

    /// Write pretty-printed JSON to `writer`.
    pub fn write_json<W: Write>(&self, writer: W) -> Result<(), PersistError> {
        let schema = SgdModelSchema::try_from(self)?;
        let mut writer = writer;
        serde_json::to_writer_pretty(&mut writer, &schema)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }

    /// Read and validate a model from `reader`.
    pub fn read_json<R: Read>(reader: R) -> Result<Self, PersistError> {
        let schema: SgdModelSchema = serde_json::from_reader(reader)?;
        Self::try_from(schema)
    }

    /// Save to a file, replacing it if it exists.
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<(), PersistError> {
        let path = path.as_ref();
        self.write_json(BufWriter::new(File::create(path)?))?;
        debug!(path = %path.display(), kind = %self.feature_kind(), "saved model");
        Ok(())
    }

    /// Load from a file.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, PersistError> {
        let path = path.as_ref();
        let model = Self::read_json(BufReader::new(File::open(path)?))?;
        debug!(path = %path.display(), kind = %model.feature_kind(), "loaded model");
        Ok(model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DenseDataset;
    use crate::model::TrainConfig;
    use crate::training::Verbosity;
    use ndarray::array;

    fn small_model() -> SgdModel {
        let config = TrainConfig::builder()
            .learning_rate(0.1)
            .n_epochs(5)
            .verbosity(Verbosity::Silent)
            .build()
            .unwrap();
        let data = DenseDataset::new(array![[1.0, 7.0], [3.0, 7.0]], array![0.3, 0.9]).unwrap();
        SgdModel::train_dense(&data, &config).unwrap()
    }

    #[test]
    fn string_roundtrip() {
        let model = small_model();
        let json = model.to_json_string().unwrap();
        assert!(json.contains("\"version\": 1"));
        assert!(json.contains("\"type\": \"dense\""));
        assert_eq!(SgdModel::from_json_str(&json).unwrap(), model);
    }

    #[test]
    fn writer_roundtrip() {
        let model = small_model();
        let mut buf = Vec::new();
        model.write_json(&mut buf).unwrap();
        assert_eq!(SgdModel::read_json(buf.as_slice()).unwrap(), model);
    }

    #[test]
    fn malformed_json_is_json_error() {
        assert!(matches!(
            SgdModel::from_json_str("{ not json"),
            Err(PersistError::Json(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        assert!(matches!(
            SgdModel::load_json("/nonexistent/dir/model.json"),
            Err(PersistError::Io(_))
        ));
    }
}
