pub mod schema;
pub use schema::{ModuleSchemas, SchemaField, SchemaLookupError, SchemaProvider, SchemaRegistry, StorageType, TableDescriptor};

pub mod fields;
pub use fields::{FieldDefinition, FieldSet, RecordMaterializer, SemanticType, TypeMapping};

pub mod records;
pub use records::{FieldValue, IdentityError, IdentityResolver, Record};

pub mod serialized;

pub mod normalizer;
pub use normalizer::{BlobToJson, FieldTransform, NormalizationError, NormalizationReport, PostLoadNormalizer};

pub mod table;
pub use table::{FailurePolicy, ReadOnlyTable, ResourceObject, TableConfig};
