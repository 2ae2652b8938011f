use std::sync::Arc;

use serde_json::Value;

use crate::{
    records::{FieldValue, IdentityError, Record},
    schema::{SchemaRegistry, TableDescriptor},
    table::TableConfig,
};

/// Resolves the canonical identity of a record.
///
/// Tables declaring the configured identity column (`uuid` by default) use
/// its stored value verbatim. Tables without one fall back to the row id.
pub struct IdentityResolver {
    registry: Arc<SchemaRegistry>,
    config: TableConfig,
}

impl IdentityResolver {
    pub fn new(registry: Arc<SchemaRegistry>, config: TableConfig) -> Self {
        Self { registry, config }
    }

    pub fn identity_of(&self, record: &Record, table: &TableDescriptor) -> Result<String, IdentityError> {
        let field = self.identity_field(table)?;
        Self::render(record.get(field), field)
    }

    /// Name of the field that carries the identity for `table`.
    pub fn identity_field(&self, table: &TableDescriptor) -> Result<&str, IdentityError> {
        let schema = self.registry.schema_fields(table)?;
        let has_identity_column = schema.iter().any(|f| f.name == self.config.identity_key);

        Ok(if has_identity_column { self.config.identity_key.as_str() } else { self.config.row_id_key.as_str() })
    }

    fn render(value: Option<&FieldValue>, field: &str) -> Result<String, IdentityError> {
        match value {
            None | Some(FieldValue::Value(Value::Null)) => Err(IdentityError::MissingValue { field: field.to_string() }),
            Some(FieldValue::Value(Value::String(s))) => Ok(s.clone()),
            Some(FieldValue::Value(Value::Number(n))) => Ok(n.to_string()),
            Some(_) => Err(IdentityError::UnsupportedValue { field: field.to_string() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use crate::schema::schema_registry::fixtures::module_schemas;

    fn resolver(config: TableConfig) -> IdentityResolver {
        IdentityResolver::new(SchemaRegistry::new(Arc::new(module_schemas())).into_shared(), config)
    }

    #[test]
    fn falls_back_to_row_id_without_uuid_column() {
        let bar = TableDescriptor::new("test", "bar");
        let record = Record::from_json(bar.clone(), json!({ "id": 42, "label": "x", "uuid": "ignored" }));
        assert_eq!(resolver(TableConfig::new()).identity_of(&record, &bar).unwrap(), "42");
    }

    #[test]
    fn uses_uuid_verbatim_when_declared() {
        let node = TableDescriptor::new("test", "node");
        let record = Record::from_json(
            node.clone(),
            json!({ "uuid": "6f1c1b5e-1d1a-4c4e-9f0f-5a0c8f0b2e11", "id": 7 }),
        );
        assert_eq!(
            resolver(TableConfig::new()).identity_of(&record, &node).unwrap(),
            "6f1c1b5e-1d1a-4c4e-9f0f-5a0c8f0b2e11"
        );
    }

    #[test]
    fn custom_identity_key_is_honored() {
        let bar = TableDescriptor::new("test", "bar");
        let record = Record::from_json(bar.clone(), json!({ "id": 1, "label": "first" }));
        let resolver = resolver(TableConfig::new().with_identity_key("label"));
        assert_eq!(resolver.identity_field(&bar).unwrap(), "label");
        assert_eq!(resolver.identity_of(&record, &bar).unwrap(), "first");
    }

    #[test]
    fn missing_or_unusable_values_are_errors() {
        let bar = TableDescriptor::new("test", "bar");
        let resolver = resolver(TableConfig::new());

        let record = Record::from_json(bar.clone(), json!({ "id": null }));
        assert!(matches!(resolver.identity_of(&record, &bar), Err(IdentityError::MissingValue { .. })));

        let record = Record::from_json(bar.clone(), json!({ "id": [1] }));
        assert!(matches!(resolver.identity_of(&record, &bar), Err(IdentityError::UnsupportedValue { .. })));

        let record = Record::from_json(bar.clone(), json!({ "id": 1 }));
        let missing = TableDescriptor::new("test", "missing");
        assert!(matches!(resolver.identity_of(&record, &missing), Err(IdentityError::SchemaLookup(_))));
    }
}
