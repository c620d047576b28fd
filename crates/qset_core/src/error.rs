use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum QSetError {
    /// No object exists at the metadata or card key.
    #[error("no object at '{key}'")]
    NotFound { key: String },

    /// The stored record is not valid JSON or lacks a required field.
    #[error("malformed record at '{key}': {source}")]
    MalformedRecord {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Transport or permission failure reported by the store.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),

    /// An unpaged listing returned no keys under a prefix that must be populated.
    #[error("no entries under '{prefix}'")]
    EmptyListing { prefix: String },

    /// A key segment was empty or contained a path separator.
    #[error("invalid {field}: '{value}'")]
    InvalidIdentifier { field: &'static str, value: String },
}

impl From<StoreError> for QSetError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::NotFound { key } => Self::NotFound { key },
            StoreError::Unavailable(message) => Self::StorageUnavailable(message),
        }
    }
}

pub type Result<T> = std::result::Result<T, QSetError>;
