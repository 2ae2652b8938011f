use std::{collections::HashMap, sync::{Arc, RwLock}};

use once_cell::sync::OnceCell;
use tracing::{info, trace};

use crate::{
    fields::{FieldDefinition, FieldSet, SemanticType, TypeMapping},
    schema::{SchemaLookupError, SchemaRegistry, TableDescriptor},
};

type FieldSetCell = Arc<OnceCell<Arc<FieldSet>>>;

/// Completes a base field set with read-only definitions for every schema
/// column it does not already model.
pub struct RecordMaterializer {
    registry: Arc<SchemaRegistry>,
    cache: RwLock<HashMap<TableDescriptor, FieldSetCell>>,
}

impl RecordMaterializer {
    pub fn new(registry: Arc<SchemaRegistry>) -> Self {
        Self {
            registry,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Build the completed field set for `table`.
    ///
    /// Base fields keep their position and are never overwritten. Columns
    /// are appended in schema order; columns whose storage type has no
    /// semantic mapping are left out.
    pub fn materialize(&self, table: &TableDescriptor, base: &FieldSet) -> Result<FieldSet, SchemaLookupError> {
        let schema = self.registry.schema_fields(table)?;
        let mut fields = base.clone();

        for column in schema.iter() {
            if fields.contains_key(&column.name) {
                continue;
            }

            match SemanticType::map_type(&column.storage_type) {
                TypeMapping::Mapped(semantic_type) => {
                    fields.insert(
                        column.name.clone(),
                        FieldDefinition::read_only(&column.name, semantic_type, &column.description),
                    );
                }
                TypeMapping::Unsupported => {
                    trace!(table = %table, column = %column.name, storage_type = %column.storage_type, "skipping unsupported column");
                }
            }
        }

        info!(table = %table, base = base.len(), total = fields.len(), "materialized field definitions");
        Ok(fields)
    }

    /// Memoized `materialize`: computed once per table and shared afterwards.
    /// The base set of the first call for a table is the one retained.
    pub fn field_definitions(&self, table: &TableDescriptor, base: &FieldSet) -> Result<Arc<FieldSet>, SchemaLookupError> {
        let cell = self.cell_for(table);
        match cell.get_or_try_init(|| self.materialize(table, base).map(Arc::new)) {
            Ok(fields) => Ok(Arc::clone(fields)),
            Err(err) => {
                self.forget_uninitialized(table);
                Err(err)
            }
        }
    }

    fn cell_for(&self, table: &TableDescriptor) -> FieldSetCell {
        {
            let cache = self.cache.read().unwrap_or_else(|poisoned| poisoned.into_inner());
            if let Some(cell) = cache.get(table) {
                return Arc::clone(cell);
            }
        }

        let mut cache = self.cache.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        Arc::clone(cache.entry(table.clone()).or_default())
    }

    fn forget_uninitialized(&self, table: &TableDescriptor) {
        let mut cache = self.cache.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        if cache.get(table).is_some_and(|cell| cell.get().is_none()) {
            cache.remove(table);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::schema_registry::fixtures::{CountingProvider, module_schemas};

    fn materializer() -> RecordMaterializer {
        RecordMaterializer::new(SchemaRegistry::new(Arc::new(module_schemas())).into_shared())
    }

    fn base_with_id() -> FieldSet {
        let mut base = FieldSet::new();
        base.insert(
            "id".into(),
            FieldDefinition::new("id", SemanticType::Integer, "ID").with_description("Hand-written id field."),
        );
        base
    }

    #[test]
    fn foo_gets_payload_and_skips_vector_column() {
        let foo = TableDescriptor::new("test", "foo");
        let fields = materializer().materialize(&foo, &base_with_id()).unwrap();

        let names: Vec<_> = fields.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["id", "payload"]);

        // base entry untouched
        assert_eq!(fields["id"].label, "ID");
        assert_eq!(fields["id"].description, "Hand-written id field.");

        let payload = &fields["payload"];
        assert_eq!(payload.semantic_type, SemanticType::String);
        assert_eq!(payload.label, "payload");
        assert_eq!(payload.description, "Serialized payload.");
        assert!(payload.read_only);
    }

    #[test]
    fn base_fields_keep_position_and_schema_order_follows() {
        let node = TableDescriptor::new("test", "node");
        let mut base = FieldSet::new();
        base.insert("title".into(), FieldDefinition::new("title", SemanticType::String, "Title").with_read_only(false));

        let fields = materializer().materialize(&node, &base).unwrap();
        let names: Vec<_> = fields.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["title", "uuid", "id", "created"]);
        assert!(!fields["title"].read_only);
        assert_eq!(fields["created"].semantic_type, SemanticType::Timestamp);
        assert_eq!(fields["id"].semantic_type, SemanticType::Integer);
    }

    #[test]
    fn materialize_is_idempotent() {
        let m = materializer();
        let foo = TableDescriptor::new("test", "foo");
        let first = m.materialize(&foo, &base_with_id()).unwrap();
        let second = m.materialize(&foo, &base_with_id()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn field_definitions_are_memoized_per_table() {
        let provider = Arc::new(CountingProvider::new(module_schemas()));
        let m = RecordMaterializer::new(SchemaRegistry::new(provider.clone()).into_shared());
        let foo = TableDescriptor::new("test", "foo");

        let a = m.field_definitions(&foo, &base_with_id()).unwrap();
        let b = m.field_definitions(&foo, &FieldSet::new()).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(provider.calls(), 1);
    }

    #[test]
    fn unknown_table_fails_instead_of_yielding_empty_set() {
        let err = materializer()
            .materialize(&TableDescriptor::new("test", "nope"), &FieldSet::new())
            .unwrap_err();
        assert!(matches!(err, SchemaLookupError::UnknownTable { .. }));
    }

    #[test]
    fn failed_definitions_are_not_kept_in_cache() {
        let m = materializer();
        for i in 0..20 {
            let missing = TableDescriptor::new("test", &format!("nope_{i}"));
            assert!(m.field_definitions(&missing, &FieldSet::new()).is_err());
        }
        assert!(m.cache.read().unwrap().is_empty());

        m.field_definitions(&TableDescriptor::new("test", "foo"), &base_with_id()).unwrap();
        assert_eq!(m.cache.read().unwrap().len(), 1);
    }
}
