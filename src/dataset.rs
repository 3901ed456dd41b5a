//! Labeled tabular data
//!
//! A [`Dataset`] is an ordered collection of samples, each with numeric
//! feature values and a binary class label. Samples are identified by
//! their 0-based row ordinal. The class totals are computed once, from the
//! whole dataset, and are the fixed denominators of every ROC point.

use crate::error::{Error, Result};
use std::collections::BTreeSet;
use std::path::Path;

/// Stable identifier of a sample (its row ordinal)
pub type SampleId = usize;

/// A set of sample identifiers, in ascending order
pub type SampleSet = BTreeSet<SampleId>;

/// Default name of the class label column
pub const DEFAULT_CLASS_LABEL: &str = "class";

/// One row of the dataset
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub id: SampleId,
    /// Feature values, in [`Dataset::features`] order. Missing values are NaN.
    pub values: Vec<f64>,
    /// `true` for class 1
    pub label: bool,
}

/// Labeled samples plus the fixed class totals
#[derive(Debug, Clone)]
pub struct Dataset {
    features: Vec<String>,
    samples: Vec<Sample>,
    positives: usize,
    negatives: usize,
}

impl Dataset {
    /// Build a dataset from feature names and `(values, label)` rows.
    ///
    /// Fails with [`Error::InvalidRow`] (0-based row index) if a row's width
    /// differs from `features`, and with [`Error::DegenerateDataset`] if
    /// either class is absent, since FPR or TPR would then be undefined.
    pub fn new(features: Vec<String>, rows: Vec<(Vec<f64>, bool)>) -> Result<Self> {
        let mut samples = Vec::with_capacity(rows.len());
        for (id, (values, label)) in rows.into_iter().enumerate() {
            if values.len() != features.len() {
                return Err(Error::InvalidRow {
                    row: id,
                    message: format!(
                        "expected {} feature values, got {}",
                        features.len(),
                        values.len()
                    ),
                });
            }
            samples.push(Sample { id, values, label });
        }

        let positives = samples.iter().filter(|s| s.label).count();
        let negatives = samples.len() - positives;
        if positives == 0 || negatives == 0 {
            return Err(Error::DegenerateDataset {
                positives,
                negatives,
            });
        }

        Ok(Self {
            features,
            samples,
            positives,
            negatives,
        })
    }

    /// Parse CSV text with a header row.
    ///
    /// `class_label` names the 0/1 label column; every other column is a
    /// numeric feature. Empty cells are missing values.
    pub fn from_csv_str(text: &str, class_label: &str) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(text.as_bytes());

        let columns: Vec<String> = reader
            .headers()
            .map_err(|e| csv_error(e, 1))?
            .iter()
            .map(str::to_string)
            .collect();
        if columns.iter().all(String::is_empty) {
            return Err(Error::DatasetParse {
                line: 1,
                message: "missing header row".into(),
            });
        }
        let label_col = columns
            .iter()
            .position(|c| c == class_label)
            .ok_or_else(|| Error::DatasetParse {
                line: 1,
                message: format!("class label column '{}' not found", class_label),
            })?;
        let features: Vec<String> = columns
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != label_col)
            .map(|(_, c)| c.clone())
            .collect();

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result.map_err(|e| csv_error(e, 0))?;
            let line = record.position().map_or(0, |p| p.line() as usize);

            let label_cell = record.get(label_col).unwrap_or_default();
            let label = parse_label(label_cell).ok_or_else(|| Error::DatasetParse {
                line,
                message: format!("class label must be 0 or 1, got '{}'", label_cell),
            })?;

            let mut values = Vec::with_capacity(features.len());
            for (i, cell) in record.iter().enumerate() {
                if i == label_col {
                    continue;
                }
                values.push(parse_value(cell).ok_or_else(|| Error::DatasetParse {
                    line,
                    message: format!("column '{}': '{}' is not numeric", columns[i], cell),
                })?);
            }
            rows.push((values, label));
        }

        Self::new(features, rows)
    }

    /// Load a CSV file
    pub fn from_csv_path(path: &Path, class_label: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(Error::Io)?;
        Self::from_csv_str(&content, class_label)
    }

    pub fn features(&self) -> &[String] {
        &self.features
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Number of class-1 samples in the whole dataset
    pub fn pos_total(&self) -> usize {
        self.positives
    }

    /// Number of class-0 samples in the whole dataset
    pub fn neg_total(&self) -> usize {
        self.negatives
    }

    /// Column index of a feature
    pub fn feature_index(&self, name: &str) -> Result<usize> {
        self.features
            .iter()
            .position(|f| f == name)
            .ok_or_else(|| Error::UnknownFeature(name.to_string()))
    }

    /// Every sample identifier
    pub fn all_ids(&self) -> SampleSet {
        (0..self.samples.len()).collect()
    }

    pub fn sample(&self, id: SampleId) -> Option<&Sample> {
        self.samples.get(id)
    }

    /// Label of a sample; unknown identifiers count as neither class
    pub fn is_positive(&self, id: SampleId) -> Option<bool> {
        self.samples.get(id).map(|s| s.label)
    }
}

/// Locate a reader error by the line of the record it hit, or `fallback`
fn csv_error(err: csv::Error, fallback: usize) -> Error {
    let line = err.position().map_or(fallback, |p| p.line() as usize);
    Error::DatasetParse {
        line,
        message: err.to_string(),
    }
}

fn parse_label(cell: &str) -> Option<bool> {
    let value: f64 = cell.parse().ok()?;
    if value == 1.0 {
        Some(true)
    } else if value == 0.0 {
        Some(false)
    } else {
        None
    }
}

fn parse_value(cell: &str) -> Option<f64> {
    if cell.is_empty() {
        return Some(f64::NAN);
    }
    cell.parse().ok()
}
