use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::{records::FieldValue, schema::TableDescriptor};

/// A loaded row: field name -> stored value, tagged with its table.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub table: TableDescriptor,
    pub values: IndexMap<String, FieldValue>,
}

impl Record {
    pub fn new(table: TableDescriptor) -> Self {
        Self { table, values: IndexMap::new() }
    }

    /// Build a record from a JSON object; every entry becomes a plain value.
    /// Non-object input yields an empty record.
    pub fn from_json(table: TableDescriptor, row: Value) -> Self {
        let values = match row {
            Value::Object(map) => map.into_iter().map(|(k, v)| (k, FieldValue::Value(v))).collect(),
            _ => IndexMap::new(),
        };
        Self { table, values }
    }

    pub fn with(mut self, field: &str, value: impl Into<FieldValue>) -> Self {
        self.set(field, value);
        self
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.values.get(field)
    }

    pub fn set(&mut self, field: &str, value: impl Into<FieldValue>) {
        self.values.insert(field.to_string(), value.into());
    }

    pub fn field_names(&self) -> Vec<String> {
        self.values.keys().cloned().collect()
    }

    /// JSON view of the record; blobs are rendered as `null`.
    pub fn to_json(&self) -> Value {
        let map: Map<String, Value> = self.values
            .iter()
            .map(|(k, v)| (k.clone(), v.as_value().cloned().unwrap_or(Value::Null)))
            .collect();
        Value::Object(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_json_keeps_field_order() {
        let record = Record::from_json(
            TableDescriptor::new("test", "bar"),
            json!({ "id": 42, "label": "answer", "extra": null }),
        );
        assert_eq!(record.field_names(), vec!["id", "label", "extra"]);
        assert_eq!(record.get("id"), Some(&FieldValue::Value(json!(42))));
        assert!(record.get("extra").unwrap().is_null());
    }

    #[test]
    fn blobs_render_as_null_in_json_view() {
        let record = Record::new(TableDescriptor::new("test", "foo"))
            .with("id", json!(1))
            .with("payload", b"N;".as_slice());
        assert!(record.get("payload").unwrap().is_blob());
        assert_eq!(record.to_json(), json!({ "id": 1, "payload": null }));
    }
}
