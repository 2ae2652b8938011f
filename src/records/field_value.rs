use serde_json::Value;

/// A stored cell value as handed over by the loader.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Raw legacy serialized payload. Never survives normalization.
    Blob(Vec<u8>),
    Value(Value),
}

impl FieldValue {
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            FieldValue::Value(value) => Some(value),
            FieldValue::Blob(_) => None,
        }
    }

    pub fn is_blob(&self) -> bool {
        matches!(self, FieldValue::Blob(_))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Value(Value::Null))
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        FieldValue::Value(value)
    }
}

impl From<Vec<u8>> for FieldValue {
    fn from(bytes: Vec<u8>) -> Self {
        FieldValue::Blob(bytes)
    }
}

impl From<&[u8]> for FieldValue {
    fn from(bytes: &[u8]) -> Self {
        FieldValue::Blob(bytes.to_vec())
    }
}
