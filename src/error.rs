use std::path::PathBuf;
use thiserror::Error;

/// Data-shape violations raised while deduplicating. `index` is always the
/// position of the offending record in the dataset handed to the pass.
#[derive(Debug, Error)]
pub enum DedupError {
    #[error("record {index} is missing key field '{field}'")]
    MissingKeyField { index: usize, field: String },

    #[error("record {index} is missing timestamp field '{field}'")]
    MissingTimestamp { index: usize, field: String },

    #[error("record superseded by record {index} is missing field '{field}'")]
    MissingFieldOnSuperseded { index: usize, field: String },

    #[error("record {index} has a '{field}' value that cannot be compared with the current winner")]
    IncomparableTimestamps { index: usize, field: String },

    #[error("record {index} has a '{field}' value that cannot be used as a key (null, array or object)")]
    UnsupportedKeyValue { index: usize, field: String },

    #[error("no key fields given to deduplicate by")]
    NoKeys,
}

/// Failures while reading the input document.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON in {}: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{} has no '{field}' array of records", .path.display())]
    MissingRecords { path: PathBuf, field: String },

    #[error("element {index} of the records array in {} is not an object", .path.display())]
    InvalidRecord { path: PathBuf, index: usize },
}

pub type Result<T, E = DedupError> = std::result::Result<T, E>;
