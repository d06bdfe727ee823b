//! Data loading utilities
//!
//! Reads delimited text into labeled or unlabeled datasets. The first record
//! names the columns and every other record is one row. Fields follow CSV
//! quoting rules, so anything [`DataSaver`] writes reads back unchanged.

use crate::dataset::{Features, LabeledDataset, LabeledRecord, Record, UnlabeledDataset};
use crate::error::{HarnessError, Result};
use polars::prelude::*;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// Default field delimiter
pub const DEFAULT_DELIMITER: char = ',';

/// Loader for delimited text files
#[derive(Debug, Clone)]
pub struct DataLoader {
    delimiter: char,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Parsed table before it is split into a typed dataset
struct RawTable {
    feature_names: Vec<String>,
    rows: Vec<(Features, Option<String>)>,
}

impl DataLoader {
    /// Create a new comma-delimited loader
    pub fn new() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
        }
    }

    /// Set the field delimiter
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    /// Load a labeled dataset from a file
    pub fn load_labeled(
        &self,
        path: impl AsRef<Path>,
        label_column: &str,
    ) -> Result<LabeledDataset> {
        let path = path.as_ref();
        let start = Instant::now();
        let file = File::open(path)?;
        let dataset = self.read_labeled(BufReader::new(file), label_column)?;

        info!(
            path = %path.display(),
            rows = dataset.len(),
            features = dataset.feature_names().len(),
            elapsed = ?start.elapsed(),
            "Loaded labeled dataset"
        );
        Ok(dataset)
    }

    /// Load an unlabeled dataset from a file; every column is a feature
    pub fn load_unlabeled(&self, path: impl AsRef<Path>) -> Result<UnlabeledDataset> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let dataset = self.read_unlabeled(BufReader::new(file))?;

        info!(path = %path.display(), rows = dataset.len(), "Loaded unlabeled dataset");
        Ok(dataset)
    }

    /// Read a labeled dataset from any source
    pub fn read_labeled<R: Read>(&self, source: R, label_column: &str) -> Result<LabeledDataset> {
        let table = self.parse(source, Some(label_column))?;
        let records = table
            .rows
            .into_iter()
            .map(|(features, label)| LabeledRecord::new(features, label.unwrap_or_default()))
            .collect();

        Ok(LabeledDataset::new(table.feature_names, label_column, records))
    }

    /// Read an unlabeled dataset from any source
    pub fn read_unlabeled<R: Read>(&self, source: R) -> Result<UnlabeledDataset> {
        let table = self.parse(source, None)?;
        let records = table
            .rows
            .into_iter()
            .map(|(features, _)| Record::new(features))
            .collect();

        Ok(UnlabeledDataset::new(table.feature_names, records))
    }

    fn csv_reader<R: Read>(&self, source: R) -> Result<csv::Reader<R>> {
        if !self.delimiter.is_ascii() {
            return Err(HarnessError::InvalidParameter {
                name: "delimiter".to_string(),
                value: self.delimiter.to_string(),
                reason: "must be a single ASCII character".to_string(),
            });
        }

        Ok(csv::ReaderBuilder::new()
            .delimiter(self.delimiter as u8)
            .has_headers(true)
            .flexible(false)
            .from_reader(source))
    }

    fn parse<R: Read>(&self, source: R, label_column: Option<&str>) -> Result<RawTable> {
        let mut reader = self.csv_reader(source)?;

        let columns: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();
        if columns.is_empty() {
            return Err(HarnessError::EmptyInput("missing header row".to_string()));
        }

        // Schema check happens before any row is read
        let label_idx = match label_column {
            Some(name) => Some(
                columns
                    .iter()
                    .position(|c| c == name)
                    .ok_or_else(|| HarnessError::ColumnNotFound(name.to_string()))?,
            ),
            None => None,
        };

        let feature_names: Vec<String> = columns
            .iter()
            .enumerate()
            .filter(|(i, _)| Some(*i) != label_idx)
            .map(|(_, c)| c.clone())
            .collect();

        let mut rows = Vec::new();
        for result in reader.records() {
            // Field-count mismatches surface here as MalformedRow
            let record = result?;
            let line_no = record.position().map_or(0, |p| p.line() as usize);

            let mut features = Features::new();
            let mut label = None;
            for (i, (column, token)) in columns.iter().zip(record.iter()).enumerate() {
                if Some(i) == label_idx {
                    // Labels are kept verbatim, surrounding whitespace included
                    label = Some(token.to_string());
                    continue;
                }
                let value = token.trim().parse::<f64>().map_err(|_| HarnessError::Parse {
                    token: token.to_string(),
                    column: column.clone(),
                    line: line_no,
                })?;
                features.insert(column.clone(), value);
            }
            rows.push((features, label));
        }

        debug!(columns = columns.len(), rows = rows.len(), "Parsed delimited table");
        Ok(RawTable { feature_names, rows })
    }

    /// Get file info without parsing values
    pub fn get_file_info(&self, path: impl AsRef<Path>) -> Result<FileInfo> {
        let path = path.as_ref();
        let file_size = std::fs::metadata(path)?.len();

        let mut reader = self.csv_reader(BufReader::new(File::open(path)?))?;
        let columns: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut n_rows = 0;
        for record in reader.byte_records() {
            record?;
            n_rows += 1;
        }

        Ok(FileInfo {
            path: path.display().to_string(),
            file_size,
            n_rows,
            n_cols: columns.len(),
            columns,
        })
    }
}

/// File information
#[derive(Debug, Clone)]
pub struct FileInfo {
    pub path: String,
    pub file_size: u64,
    pub n_rows: usize,
    pub n_cols: usize,
    pub columns: Vec<String>,
}

/// Writes datasets and predictions back out as CSV
pub struct DataSaver;

impl DataSaver {
    /// Build a frame with the feature columns in load order followed by the label
    pub fn labeled_frame(dataset: &LabeledDataset) -> Result<DataFrame> {
        let mut columns: Vec<Column> = dataset
            .feature_names()
            .iter()
            .map(|name| {
                let values: Vec<f64> = dataset
                    .records()
                    .iter()
                    .map(|r| r.get(name).unwrap_or(f64::NAN))
                    .collect();
                Column::new(name.as_str().into(), values)
            })
            .collect();

        let labels: Vec<&str> = dataset.labels().collect();
        columns.push(Column::new(dataset.label_column().into(), labels));

        Ok(DataFrame::new(columns)?)
    }

    /// Save a labeled dataset in the same format the loader reads
    pub fn save_labeled(dataset: &LabeledDataset, path: impl AsRef<Path>) -> Result<()> {
        let mut df = Self::labeled_frame(dataset)?;
        Self::save_csv(&mut df, path)
    }

    /// Save `(row index, predicted label)` pairs
    pub fn save_predictions(predictions: &[(usize, String)], path: impl AsRef<Path>) -> Result<()> {
        let indices: Vec<u64> = predictions.iter().map(|(i, _)| *i as u64).collect();
        let labels: Vec<&str> = predictions.iter().map(|(_, p)| p.as_str()).collect();

        let mut df = DataFrame::new(vec![
            Column::new("index".into(), indices),
            Column::new("prediction".into(), labels),
        ])?;
        Self::save_csv(&mut df, path)
    }

    /// Save a frame to CSV
    pub fn save_csv(df: &mut DataFrame, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path.as_ref())?;

        CsvWriter::new(&mut file)
            .include_header(true)
            .finish(df)
            .map_err(|e| HarnessError::DataError(e.to_string()))
    }
}
