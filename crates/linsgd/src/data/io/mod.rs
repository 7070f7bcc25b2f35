//! Dataset file loaders.

pub mod csv;

pub use self::csv::{load_dense_csv, load_text_csv, read_dense_csv, read_text_csv};
