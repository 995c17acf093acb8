use std::path::PathBuf;
use thiserror::Error;

/// Why a single raw record was dropped during normalization.
///
/// These never escape a batch: the `Normalizer` collects them into a
/// `NormalizeReport` and moves on to the next record.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecordRejected {
    #[error("Required field '{0}' is missing or empty")]
    MissingField(&'static str),

    #[error("Price '{0}' could not be parsed as a decimal amount")]
    InvalidPrice(String),

    #[error("Price {0} is negative")]
    NegativePrice(f64),

    #[error("Rating token '{0}' is not one of One, Two, Three, Four, Five")]
    UnknownRating(String),

    #[error("Popularity '{0}' is not a number")]
    InvalidPopularity(String),

    #[error("Duplicate of an earlier record: '{title}' by '{author}'")]
    Duplicate { title: String, author: String },
}

/// Errors surfaced to callers of the `QueryEngine`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QueryError {
    #[error("Invalid filter input for '{field}': value '{value}' {reason}")]
    InvalidFilterInput {
        field: &'static str,
        value: String,
        reason: &'static str,
    },

    #[error("No record set has been loaded")]
    NoData,

    #[error("No records available to pick from for genre '{genre}'")]
    EmptySelection { genre: String },
}

/// Errors that can occur while reading raw records from a data file.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Could not read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse JSON in '{path}': {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to parse CSV in '{path}': {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Unsupported data file format for '{path}' (expected .json or .csv)")]
    UnsupportedFormat { path: PathBuf },

    #[error("Expected a JSON array of records in '{path}'")]
    NotAnArray { path: PathBuf },
}
