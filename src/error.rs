//! Error types for ROCCER

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// ROCCER errors
#[derive(Error, Debug)]
pub enum Error {
    #[error(
        "Malformed condition in candidate {candidate}, rule {rule}: feature '{feature}' has condition '{condition}'"
    )]
    MalformedCondition {
        candidate: usize,
        rule: usize,
        feature: String,
        condition: String,
    },

    #[error("Unknown feature: '{0}' is not a column of the dataset")]
    UnknownFeature(String),

    #[error(
        "Degenerate dataset: {positives} positive and {negatives} negative samples (both classes are required)"
    )]
    DegenerateDataset { positives: usize, negatives: usize },

    #[error("Dataset parse error at line {line}: {message}")]
    DatasetParse { line: usize, message: String },

    #[error("Invalid dataset row {row}: {message}")]
    InvalidRow { row: usize, message: String },

    #[error("Rule file error: {0}")]
    RuleFile(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_norway::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Other(s.to_string())
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Other(s)
    }
}
