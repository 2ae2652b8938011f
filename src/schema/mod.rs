pub mod table_descriptor;
pub use table_descriptor::*;

pub mod storage_type;
pub use storage_type::*;

pub mod schema_field;
pub use schema_field::*;

pub mod schema_lookup_error;
pub use schema_lookup_error::*;

pub mod module_schemas;
pub use module_schemas::*;

pub mod schema_registry;
pub use schema_registry::*;

pub trait SchemaProvider: Send + Sync {
    /// Return the ordered column metadata of `table_name` as declared by
    /// `provider`. May block.
    fn fetch_table_schema(&self, provider: &str, table_name: &str) -> Result<Vec<ColumnSpec>, SchemaLookupError>;
}
