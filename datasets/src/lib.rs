//! `mlkit-datasets` provides the data sources of the `mlkit` toolkit.
//!
//! ## Current State
//!
//! * [`from_csv`]: load numeric samples and their integer labels from a CSV file
//! * [`generate`]: synthetic clusters around given centroids, for tests and examples
//!
//! ## Loading a dataset
//!
//! ```no_run
//! use mlkit_datasets::from_csv;
//!
//! // the file has a header line and the label is stored in the last column
//! let dataset = from_csv("iris.csv", true, None).unwrap();
//! let (train, test) = dataset.train_test_split(0.2, 41).unwrap();
//! ```
use std::fs::File;
use std::io;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use mlkit::Dataset;
use thiserror::Error;
use tracing::debug;

pub mod generate;

pub type Result<T> = std::result::Result<T, DatasetError>;

/// Error returned when a dataset can't be loaded
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("{0} is not a .csv file")]
    NotCsv(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error("cell in line {line}, column {column} is not a finite number")]
    Parse { line: u64, column: usize },
    #[error("the file contains no labelled samples")]
    NoData,
    #[error(transparent)]
    Table(#[from] mlkit::Error),
}

/// Load a dataset from a CSV file
///
/// Every cell of the file has to be a finite number, surrounding whitespace is ignored. One column
/// holds the label of the sample, all other columns its features. The label column is either
/// given as `label_column` or defaults to the last column of the first data row. Labels are
/// truncated to integers and have to fit into an `i32`. Rows that are too short to contain a
/// label are skipped.
///
/// # Errors
///
/// * [`DatasetError::NotCsv`] if the path has no `.csv` extension
/// * [`DatasetError::Io`] if the file can't be opened
/// * [`DatasetError::Parse`] if a cell is not a finite number or a label is out of range
/// * [`DatasetError::NoData`] if no labelled row was found
/// * [`DatasetError::Table`] if the rows differ in their number of features
pub fn from_csv<P: AsRef<Path>>(
    path: P,
    has_header: bool,
    label_column: Option<usize>,
) -> Result<Dataset<f64, i32>> {
    let path = path.as_ref();
    if path.extension().map_or(true, |ext| ext != "csv") {
        return Err(DatasetError::NotCsv(path.display().to_string()));
    }

    let file = File::open(path)?;
    let mut reader = ReaderBuilder::new()
        .has_headers(has_header)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(file);

    let mut rows = Vec::new();
    let mut labels = Vec::new();
    let mut label_column = label_column;

    for (idx, record) in reader.records().enumerate() {
        let record = record?;
        let line = record.position().map_or(idx as u64 + 1, |pos| pos.line());
        let label_idx =
            *label_column.get_or_insert_with(|| record.len().saturating_sub(1));

        let mut row = Vec::with_capacity(record.len());
        let mut label = None;
        for (column, cell) in record.iter().enumerate() {
            let value = cell
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite())
                .ok_or(DatasetError::Parse { line, column })?;

            if column == label_idx {
                let truncated = value.trunc();
                if truncated < f64::from(i32::MIN) || truncated > f64::from(i32::MAX) {
                    return Err(DatasetError::Parse { line, column });
                }
                label = Some(truncated as i32);
            } else {
                row.push(value);
            }
        }

        if let Some(label) = label {
            rows.push(row);
            labels.push(label);
        }
    }

    if rows.is_empty() {
        return Err(DatasetError::NoData);
    }

    debug!(path = %path.display(), nsamples = rows.len(), "loaded csv file");

    Ok(Dataset::from_rows(rows, labels)?)
}
