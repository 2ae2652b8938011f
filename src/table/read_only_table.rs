use std::sync::Arc;

use crate::{
    fields::{FieldSet, RecordMaterializer},
    normalizer::{NormalizationError, NormalizationReport, PostLoadNormalizer},
    records::{IdentityError, IdentityResolver, Record},
    schema::{SchemaLookupError, SchemaRegistry, TableDescriptor},
    table::{ResourceError, ResourceObject, TableConfig},
};

/// Read-only exposure of one externally-owned table.
///
/// The host wires three hooks into its entity layer:
/// `on_define_fields` at type setup, `on_records_loaded` after every load
/// and `identity_of` in place of its default identity accessor.
pub struct ReadOnlyTable {
    descriptor: TableDescriptor,
    base_fields: FieldSet,
    config: TableConfig,
    materializer: RecordMaterializer,
    normalizer: PostLoadNormalizer,
    identity: IdentityResolver,
}

impl ReadOnlyTable {
    pub fn new(descriptor: TableDescriptor, base_fields: FieldSet, registry: Arc<SchemaRegistry>) -> Self {
        Self::with_config(descriptor, base_fields, registry, TableConfig::default())
    }

    pub fn with_config(
        descriptor: TableDescriptor,
        base_fields: FieldSet,
        registry: Arc<SchemaRegistry>,
        config: TableConfig,
    ) -> Self {
        Self {
            materializer: RecordMaterializer::new(Arc::clone(&registry)),
            normalizer: PostLoadNormalizer::new(Arc::clone(&registry)).with_policy(config.failure_policy),
            identity: IdentityResolver::new(registry, config.clone()),
            descriptor,
            base_fields,
            config,
        }
    }

    pub fn descriptor(&self) -> &TableDescriptor {
        &self.descriptor
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Field materialization hook.
    pub fn on_define_fields(&self) -> Result<Arc<FieldSet>, SchemaLookupError> {
        self.materializer.field_definitions(&self.descriptor, &self.base_fields)
    }

    /// Load hook: must run after the loader builds the records and before
    /// they reach any consumer.
    pub fn on_records_loaded(&self, records: &mut [Record]) -> Result<NormalizationReport, NormalizationError> {
        self.normalizer.normalize(records, &self.descriptor)
    }

    /// Identity hook.
    pub fn identity_of(&self, record: &Record) -> Result<String, IdentityError> {
        self.identity.identity_of(record, &self.descriptor)
    }

    pub fn to_resource(&self, record: &Record) -> Result<ResourceObject, ResourceError> {
        let fields = self.on_define_fields()?;
        let id = self.identity_of(record)?;
        ResourceObject::build(self.descriptor.resource_type(), id, record, &fields)
    }
}
