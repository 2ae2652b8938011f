use thiserror::Error;

use crate::{records::IdentityError, schema::SchemaLookupError};

#[derive(Debug, Error)]
pub enum ResourceError {
    #[error(transparent)]
    SchemaLookup(#[from] SchemaLookupError),
    #[error(transparent)]
    Identity(#[from] IdentityError),
    #[error("field '{field}' still holds a serialized blob; normalize the batch first")]
    UnnormalizedBlob { field: String },
    #[error("field '{field}' does not hold a Unix timestamp: {value}")]
    InvalidTimestamp { field: String, value: String },
}
