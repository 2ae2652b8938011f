use serde::{Deserialize, Serialize};

use crate::schema::StorageType;

/// Raw column metadata as handed over by a `SchemaProvider`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub storage_type: String,
    #[serde(default)]
    pub description: String,
}

impl ColumnSpec {
    pub fn new(name: &str, storage_type: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            storage_type: storage_type.to_string(),
            description: description.to_string(),
        }
    }
}

/// One column of a table, with its storage type parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaField {
    pub name: String,
    pub storage_type: StorageType,
    pub description: String,
}

impl SchemaField {
    pub fn new(name: &str, storage_type: StorageType, description: &str) -> Self {
        Self {
            name: name.to_string(),
            storage_type,
            description: description.to_string(),
        }
    }
}

impl From<ColumnSpec> for SchemaField {
    fn from(column: ColumnSpec) -> Self {
        Self {
            storage_type: StorageType::from(column.storage_type),
            name: column.name,
            description: column.description,
        }
    }
}
