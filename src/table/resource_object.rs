use chrono::DateTime;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::{
    fields::{FieldSet, SemanticType},
    records::{FieldValue, Record},
    table::ResourceError,
};

/// A record as handed to the API layer: type, identity and the attributes
/// of every defined field, in field-set order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceObject {
    #[serde(rename = "type")]
    pub type_name: String,
    pub id: String,
    pub attributes: Map<String, Value>,
}

impl ResourceObject {
    pub fn build(type_name: String, id: String, record: &Record, fields: &FieldSet) -> Result<Self, ResourceError> {
        let mut attributes = Map::new();
        for (name, definition) in fields {
            let value = match record.get(name) {
                None => Value::Null,
                Some(FieldValue::Blob(_)) => return Err(ResourceError::UnnormalizedBlob { field: name.clone() }),
                Some(FieldValue::Value(value)) => match definition.semantic_type {
                    SemanticType::Timestamp => render_timestamp(name, value)?,
                    _ => value.clone(),
                },
            };
            attributes.insert(name.clone(), value);
        }

        Ok(Self { type_name, id, attributes })
    }
}

/// Unix seconds -> RFC 3339.
fn render_timestamp(field: &str, value: &Value) -> Result<Value, ResourceError> {
    let seconds = match value {
        Value::Null => return Ok(Value::Null),
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };

    seconds
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .map(|dt| Value::String(dt.to_rfc3339()))
        .ok_or_else(|| ResourceError::InvalidTimestamp { field: field.to_string(), value: value.to_string() })
}
