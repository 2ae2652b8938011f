use serde_json::Value;

use crate::{
    normalizer::TransformError,
    records::FieldValue,
    schema::SchemaField,
    serialized::serialized_to_json,
};

/// A load-time rewrite applied to every field whose schema column it
/// applies to.
pub trait FieldTransform: Send + Sync {
    fn name(&self) -> &'static str;

    fn applies_to(&self, field: &SchemaField) -> bool;

    /// Return the replacement value, or `None` to leave the value as is.
    fn apply(&self, value: &FieldValue) -> Result<Option<FieldValue>, TransformError>;
}

/// Rewrites legacy serialized blob columns into their JSON text.
#[derive(Debug, Default, Clone, Copy)]
pub struct BlobToJson;

impl FieldTransform for BlobToJson {
    fn name(&self) -> &'static str {
        "blob_to_json"
    }

    fn applies_to(&self, field: &SchemaField) -> bool {
        field.storage_type.is_blob()
    }

    fn apply(&self, value: &FieldValue) -> Result<Option<FieldValue>, TransformError> {
        let payload = match value {
            FieldValue::Blob(bytes) => bytes.as_slice(),
            FieldValue::Value(Value::String(text)) => text.as_bytes(),
            // NULL column: nothing was ever serialized
            FieldValue::Value(Value::Null) => return Ok(None),
            FieldValue::Value(other) => {
                return Err(TransformError::UnexpectedValue { found: describe(other).to_string() });
            }
        };

        let json = serialized_to_json(payload)?;
        Ok(Some(FieldValue::Value(Value::String(json))))
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
