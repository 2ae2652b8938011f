use std::{collections::HashMap, sync::{Arc, RwLock}};

use once_cell::sync::OnceCell;
use tracing::debug;

use crate::schema::{SchemaField, SchemaLookupError, SchemaProvider, TableDescriptor};

pub type SchemaFields = Arc<[SchemaField]>;

type SchemaCell = Arc<OnceCell<SchemaFields>>;

/// Looks up column metadata through a `SchemaProvider` and caches it per
/// table for the lifetime of the registry.
///
/// Population is compute-once per table: concurrent callers for the same
/// table share one provider query. Failed lookups are not cached. There is
/// no invalidation, so schema changes require a new registry.
pub struct SchemaRegistry {
    provider: Arc<dyn SchemaProvider>,
    cache: RwLock<HashMap<TableDescriptor, SchemaCell>>,
}

impl SchemaRegistry {
    pub fn new(provider: Arc<dyn SchemaProvider>) -> Self {
        Self {
            provider,
            cache: RwLock::new(HashMap::new()),
        }
    }

    pub fn into_shared(self) -> Arc<SchemaRegistry> {
        Arc::new(self)
    }

    pub fn schema_fields(&self, table: &TableDescriptor) -> Result<SchemaFields, SchemaLookupError> {
        let cell = self.cell_for(table);
        let fields = cell.get_or_try_init(|| {
            debug!(table = %table, "fetching table schema");
            let columns = self.provider.fetch_table_schema(&table.provider, &table.table_name)?;
            Ok::<_, SchemaLookupError>(columns.into_iter().map(SchemaField::from).collect::<Vec<_>>().into())
        });

        match fields {
            Ok(fields) => Ok(Arc::clone(fields)),
            Err(err) => {
                self.forget_uninitialized(table);
                Err(err)
            }
        }
    }

    pub fn is_cached(&self, table: &TableDescriptor) -> bool {
        let cache = self.cache.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        cache.get(table).is_some_and(|cell| cell.get().is_some())
    }

    fn cell_for(&self, table: &TableDescriptor) -> SchemaCell {
        {
            let cache = self.cache.read().unwrap_or_else(|poisoned| poisoned.into_inner());
            if let Some(cell) = cache.get(table) {
                return Arc::clone(cell);
            }
        }

        let mut cache = self.cache.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        Arc::clone(cache.entry(table.clone()).or_default())
    }

    /// Drop the cell of a failed lookup so unknown tables leave no entry behind.
    fn forget_uninitialized(&self, table: &TableDescriptor) {
        let mut cache = self.cache.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        if cache.get(table).is_some_and(|cell| cell.get().is_none()) {
            cache.remove(table);
        }
    }

    #[cfg(test)]
    fn cached_entries(&self) -> usize {
        self.cache.read().unwrap_or_else(|poisoned| poisoned.into_inner()).len()
    }
}


#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;
    use super::fixtures::{CountingProvider, module_schemas};
    use crate::schema::StorageType;

    #[test]
    fn fields_are_parsed_in_schema_order() {
        let registry = SchemaRegistry::new(Arc::new(module_schemas()));
        let fields = registry.schema_fields(&TableDescriptor::new("test", "foo")).unwrap();

        assert_eq!(fields.len(), 3);
        assert_eq!(fields[0].name, "id");
        assert_eq!(fields[0].storage_type, StorageType::Int);
        assert_eq!(fields[1].storage_type, StorageType::Blob);
        assert_eq!(fields[2].storage_type, StorageType::Other("vector".into()));
    }

    #[test]
    fn provider_is_queried_once_per_table() {
        let provider = Arc::new(CountingProvider::new(module_schemas()));
        let registry = SchemaRegistry::new(provider.clone());
        let foo = TableDescriptor::new("test", "foo");

        assert!(!registry.is_cached(&foo));
        for _ in 0..5 {
            registry.schema_fields(&foo).unwrap();
        }
        assert!(registry.is_cached(&foo));
        assert_eq!(provider.calls(), 1);

        registry.schema_fields(&TableDescriptor::new("test", "bar")).unwrap();
        assert_eq!(provider.calls(), 2);
    }

    #[test]
    fn concurrent_readers_share_one_lookup() {
        let provider = Arc::new(CountingProvider::new(module_schemas()));
        let registry = Arc::new(SchemaRegistry::new(provider.clone()));
        let node = TableDescriptor::new("test", "node");

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = Arc::clone(&registry);
                let node = node.clone();
                thread::spawn(move || registry.schema_fields(&node).unwrap().len())
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), 4);
        }
        assert_eq!(provider.calls(), 1);
    }

    #[test]
    fn failed_lookup_is_reported_and_not_cached() {
        let provider = Arc::new(CountingProvider::new(module_schemas()));
        let registry = SchemaRegistry::new(provider.clone());
        let missing = TableDescriptor::new("test", "missing");

        assert!(matches!(registry.schema_fields(&missing), Err(SchemaLookupError::UnknownTable { .. })));
        assert!(registry.schema_fields(&missing).is_err());
        assert!(!registry.is_cached(&missing));
        assert_eq!(provider.calls(), 2);
    }

    #[test]
    fn failed_lookups_leave_no_cache_entries() {
        let registry = SchemaRegistry::new(Arc::new(module_schemas()));
        for i in 0..50 {
            let missing = TableDescriptor::new("test", &format!("missing_{i}"));
            assert!(registry.schema_fields(&missing).is_err());
        }
        assert_eq!(registry.cached_entries(), 0);

        registry.schema_fields(&TableDescriptor::new("test", "foo")).unwrap();
        assert!(registry.schema_fields(&TableDescriptor::new("nowhere", "foo")).is_err());
        assert_eq!(registry.cached_entries(), 1);
    }
}
