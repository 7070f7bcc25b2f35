//! CSV dataset readers.
//!
//! Both readers skip the header line, and the header fixes the width every
//! record must have. A record of any other width aborts the read.
//!
//! - Dense: `f_0, ..., f_{n-1}, label`. An unparsable number aborts the read.
//! - Text: exactly `sentence, label`. Sentences containing commas must be
//!   quoted. Records with an unparsable label are skipped with a warning.

use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, warn};

use crate::data::{DatasetError, DenseDataset, HashedDataset};
use crate::hashing::TextFeaturizer;

fn reader_builder() -> ReaderBuilder {
    let mut builder = ReaderBuilder::new();
    builder.has_headers(true).flexible(true).trim(csv::Trim::Fields);
    builder
}

/// Number of header columns. The header is always the first line.
fn header_width<R: Read>(reader: &mut csv::Reader<R>) -> Result<usize, DatasetError> {
    Ok(reader.headers()?.len())
}

fn check_width(record: &StringRecord, expected: usize) -> Result<(), DatasetError> {
    if record.len() != expected {
        return Err(DatasetError::ColumnCount {
            line: line_of(record),
            expected,
            found: record.len(),
        });
    }
    Ok(())
}

fn line_of(record: &StringRecord) -> u64 {
    record.position().map_or(0, |p| p.line())
}

fn parse_field(record: &StringRecord, column: usize) -> Result<f64, DatasetError> {
    let raw = &record[column];
    raw.parse::<f64>().map_err(|_| DatasetError::ParseFloat {
        line: line_of(record),
        column,
        value: raw.to_owned(),
    })
}

// =============================================================================
// Dense
// =============================================================================

/// Load a dense regression dataset from a CSV file.
pub fn load_dense_csv(path: impl AsRef<Path>) -> Result<DenseDataset, DatasetError> {
    let path = path.as_ref();
    let reader = reader_builder()
        .from_path(path)
        .map_err(|source| DatasetError::Open {
            path: path.to_path_buf(),
            source,
        })?;
    let dataset = read_dense(reader)?;
    debug!(
        path = %path.display(),
        n_samples = dataset.n_samples(),
        n_features = dataset.n_features(),
        "loaded dense dataset"
    );
    Ok(dataset)
}

/// Read a dense regression dataset from any CSV source.
pub fn read_dense_csv<R: Read>(source: R) -> Result<DenseDataset, DatasetError> {
    read_dense(reader_builder().from_reader(source))
}

fn read_dense<R: Read>(mut reader: csv::Reader<R>) -> Result<DenseDataset, DatasetError> {
    let width = header_width(&mut reader)?;
    if width == 0 {
        return DenseDataset::from_rows(Vec::new(), Vec::new());
    }
    if width < 2 {
        return Err(DatasetError::TooFewColumns { line: 1, found: width });
    }

    let n_features = width - 1;
    let mut rows = Vec::new();
    let mut targets = Vec::new();

    for record in reader.records() {
        let record = record?;
        check_width(&record, width)?;

        let row = (0..n_features)
            .map(|column| parse_field(&record, column))
            .collect::<Result<Vec<_>, _>>()?;
        targets.push(parse_field(&record, n_features)?);
        rows.push(row);
    }

    DenseDataset::from_rows(rows, targets)
}

// =============================================================================
// Text
// =============================================================================

/// Text files hold `sentence, label`.
const TEXT_COLUMNS: usize = 2;

/// Load a text classification dataset from a CSV file, hashing each sentence
/// with `featurizer`.
pub fn load_text_csv(
    path: impl AsRef<Path>,
    featurizer: TextFeaturizer,
) -> Result<HashedDataset, DatasetError> {
    let path = path.as_ref();
    let reader = reader_builder()
        .from_path(path)
        .map_err(|source| DatasetError::Open {
            path: path.to_path_buf(),
            source,
        })?;
    let dataset = read_text(reader, featurizer)?;
    debug!(
        path = %path.display(),
        n_samples = dataset.n_samples(),
        table_size = %featurizer.table_size(),
        ngram_order = featurizer.ngram_order(),
        "loaded text dataset"
    );
    Ok(dataset)
}

/// Read a text classification dataset from any CSV source.
pub fn read_text_csv<R: Read>(
    source: R,
    featurizer: TextFeaturizer,
) -> Result<HashedDataset, DatasetError> {
    read_text(reader_builder().from_reader(source), featurizer)
}

fn read_text<R: Read>(
    mut reader: csv::Reader<R>,
    featurizer: TextFeaturizer,
) -> Result<HashedDataset, DatasetError> {
    let mut dataset = HashedDataset::new(featurizer);
    let width = header_width(&mut reader)?;
    if width == 0 {
        return Ok(dataset);
    }
    if width != TEXT_COLUMNS {
        return Err(DatasetError::ColumnCount {
            line: 1,
            expected: TEXT_COLUMNS,
            found: width,
        });
    }

    let mut skipped = 0usize;
    for record in reader.records() {
        let record = record?;
        check_width(&record, TEXT_COLUMNS)?;

        match parse_field(&record, 1) {
            Ok(label) => dataset.push(&record[0], label),
            Err(err) => {
                skipped += 1;
                warn!("{err}; skipping record");
            }
        }
    }

    if skipped > 0 {
        warn!(skipped, "skipped records with unparsable labels");
    }
    Ok(dataset)
}
