use thiserror::Error;

use crate::schema::SchemaLookupError;

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error(transparent)]
    SchemaLookup(#[from] SchemaLookupError),
    #[error("record has no value for identity field '{field}'")]
    MissingValue { field: String },
    #[error("identity field '{field}' holds a value that cannot be used as an identity")]
    UnsupportedValue { field: String },
}
