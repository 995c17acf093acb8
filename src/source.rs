//! Loading raw records from data files written by a scraper.
//!
//! Two formats are understood:
//!
//! - `.json`: an array of objects, one per listing. Entries that are not
//!   objects are skipped with a warning.
//! - `.csv`: a header row followed by one row per listing. Empty cells are
//!   treated as missing values.

use crate::error::SourceError;
use crate::record::RawRecord;
use serde_json::Value;
use std::fs;
use std::io::Read;
use std::path::Path;

/// Loads raw records, choosing the format from the file extension.
pub fn load(path: impl AsRef<Path>) -> Result<Vec<RawRecord>, SourceError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("json") => load_json(path),
        Some("csv") => load_csv(path),
        _ => Err(SourceError::UnsupportedFormat {
            path: path.to_path_buf(),
        }),
    }
}

pub fn load_json(path: impl AsRef<Path>) -> Result<Vec<RawRecord>, SourceError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let records = parse_json(&content).map_err(|e| match e {
        JsonFailure::Syntax(source) => SourceError::Json {
            path: path.to_path_buf(),
            source,
        },
        JsonFailure::NotAnArray => SourceError::NotAnArray {
            path: path.to_path_buf(),
        },
    })?;
    tracing::debug!(path = %path.display(), records = records.len(), "Loaded JSON records");
    Ok(records)
}

pub fn load_csv(path: impl AsRef<Path>) -> Result<Vec<RawRecord>, SourceError> {
    let path = path.as_ref();
    let file = fs::File::open(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let records = read_csv(file).map_err(|source| SourceError::Csv {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), records = records.len(), "Loaded CSV records");
    Ok(records)
}

enum JsonFailure {
    Syntax(serde_json::Error),
    NotAnArray,
}

fn parse_json(content: &str) -> Result<Vec<RawRecord>, JsonFailure> {
    let value: Value = serde_json::from_str(content).map_err(JsonFailure::Syntax)?;
    let Value::Array(items) = value else {
        return Err(JsonFailure::NotAnArray);
    };

    let records = items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match RawRecord::try_from(item) {
            Ok(record) => Some(record),
            Err(other) => {
                tracing::warn!(index, value = %other, "Skipping JSON entry that is not an object");
                None
            }
        })
        .collect();
    Ok(records)
}

/// Reads CSV with a header row from any reader.
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<RawRecord>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = reader.headers()?.clone();

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let record: RawRecord = headers
            .iter()
            .zip(row.iter())
            .map(|(header, cell)| {
                let value = if cell.is_empty() {
                    Value::Null
                } else {
                    Value::String(cell.to_string())
                };
                (header, value)
            })
            .collect();
        records.push(record);
    }
    Ok(records)
}
