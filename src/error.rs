//! Error types for the card loader.
//!
//! - [`PopulationError`] - the population heuristic could not read a description
//! - [`RecordError`] - one input line could not be turned into a card
//! - [`LoadError`] - top-level failure while loading a dataset
//! - [`ConvertError`] - failure turning an XML card dump into JSONL
//!
//! Nothing is recovered locally: the first error aborts the run.

use std::path::PathBuf;
use thiserror::Error;

/// Failures of the population heuristic.
///
/// The heuristic expects descriptions shaped like `"<number> <unit> ..."` or
/// `"<number><unit> Population ..."`. Anything else lands here instead of
/// being defaulted.
#[derive(Debug, Error, PartialEq)]
pub enum PopulationError {
    /// Description has fewer than two parts once the unit tag is expanded.
    #[error("no population unit in {description:?}")]
    MissingUnit { description: String },

    /// Leading token is not a finite decimal number.
    #[error("invalid population magnitude `{magnitude}` in {description:?}")]
    InvalidMagnitude {
        magnitude: String,
        description: String,
    },

    /// Unit token is not one of `million`, `billion`, `m`, `b`.
    #[error("unknown population unit `{unit}` in {description:?}")]
    UnknownUnit { unit: String, description: String },

    /// Scaled value does not fit in a 64-bit integer.
    #[error("population out of range in {description:?}")]
    OutOfRange { description: String },
}

/// Failures decoding a single input line.
#[derive(Debug, Error)]
pub enum RecordError {
    /// Not valid JSON, or a field holds a value of the wrong type.
    #[error("malformed record: {0}")]
    Malformed(#[from] serde_json::Error),

    /// A required key is absent from the record.
    #[error("missing field `{0}`")]
    MissingField(&'static str),

    #[error(transparent)]
    Population(#[from] PopulationError),
}

/// Top-level loader errors.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("input file not found: {}", path.display())]
    MissingFile { path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A record failed to decode or transform. `line` is 1-based.
    #[error("dataset {dataset}, line {line}: {source}")]
    Record {
        dataset: String,
        line: usize,
        #[source]
        source: RecordError,
    },

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("invalid dataset configuration: {0}")]
    InvalidConfig(String),
}

/// XML dump conversion errors.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("input file not found: {}", path.display())]
    MissingFile { path: PathBuf },

    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid XML: {0}")]
    Xml(#[from] roxmltree::Error),

    /// `card` is the 1-based position of the CARD element in the dump.
    #[error("card {card}: missing <{element}>")]
    MissingElement { card: usize, element: &'static str },

    #[error("card {card}: invalid ID `{value}`")]
    InvalidId { card: usize, value: String },

    #[error("failed to encode card: {0}")]
    Json(#[from] serde_json::Error),
}

pub type PopulationResult<T> = Result<T, PopulationError>;

pub type RecordResult<T> = Result<T, RecordError>;

pub type LoadResult<T> = Result<T, LoadError>;

pub type ConvertResult<T> = Result<T, ConvertError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_error_wraps_population_error() {
        let err: RecordError = PopulationError::UnknownUnit {
            unit: "k".into(),
            description: "5 k people".into(),
        }
        .into();
        assert!(matches!(
            err,
            RecordError::Population(PopulationError::UnknownUnit { .. })
        ));
        assert!(err.to_string().contains("unknown population unit `k`"));
    }

    #[test]
    fn test_load_error_names_dataset_and_line() {
        let err = LoadError::Record {
            dataset: "S2".into(),
            line: 17,
            source: RecordError::MissingField("MOTTO"),
        };
        let msg = err.to_string();
        assert!(msg.contains("S2"));
        assert!(msg.contains("line 17"));
        assert!(msg.contains("MOTTO"));
    }
}
