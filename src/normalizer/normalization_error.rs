use thiserror::Error;

use crate::{
    schema::{SchemaLookupError, TableDescriptor},
    serialized::{EncodeError, SerializedError},
};

/// Failure of a single field transform.
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("payload does not deserialize: {0}")]
    Serialized(#[from] SerializedError),
    #[error("payload has no JSON form: {0}")]
    Encode(#[from] EncodeError),
    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("expected a serialized payload, found {found}")]
    UnexpectedValue { found: String },
}

#[derive(Debug, Error)]
pub enum NormalizationError {
    #[error(transparent)]
    SchemaLookup(#[from] SchemaLookupError),
    #[error("record {record} belongs to {found}, batch is for {expected}")]
    TableMismatch {
        record: usize,
        expected: TableDescriptor,
        found: TableDescriptor,
    },
    #[error("record {record}, field '{field}': {transform} failed: {source}")]
    Field {
        record: usize,
        field: String,
        transform: &'static str,
        #[source]
        source: TransformError,
    },
}
