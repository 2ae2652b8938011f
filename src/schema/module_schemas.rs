use std::{fs, path::Path};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::schema::{ColumnSpec, SchemaLookupError, SchemaProvider};

/// Declaration of a single column inside a table declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDeclaration {
    #[serde(rename = "type")]
    pub storage_type: String,
    #[serde(default)]
    pub description: String,
}

/// Declaration of a table: its description and its columns in order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDeclaration {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub fields: IndexMap<String, ColumnDeclaration>,
}

/// In-process `SchemaProvider` holding the table declarations of every
/// known provider.
///
/// The JSON layout mirrors a module schema declaration:
///
/// ```json
/// { "dblog": { "watchdog": { "description": "...", "fields": {
///     "wid": { "type": "int", "description": "Primary key" } } } } }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModuleSchemas {
    providers: IndexMap<String, IndexMap<String, TableDeclaration>>,
}

impl ModuleSchemas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(json: &str) -> Result<Self, SchemaLookupError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SchemaLookupError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Add (or replace) a table declaration built from `(name, type, description)` triples.
    pub fn with_table(mut self, provider: &str, table: &str, columns: &[(&str, &str, &str)]) -> Self {
        let fields = columns
            .iter()
            .map(|(name, ty, description)| {
                (
                    name.to_string(),
                    ColumnDeclaration { storage_type: ty.to_string(), description: description.to_string() },
                )
            })
            .collect();

        self.providers
            .entry(provider.to_string())
            .or_default()
            .insert(table.to_string(), TableDeclaration { description: String::new(), fields });
        self
    }

    pub fn providers(&self) -> Vec<String> {
        self.providers.keys().cloned().collect()
    }

    pub fn table(&self, provider: &str, table: &str) -> Option<&TableDeclaration> {
        self.providers.get(provider)?.get(table)
    }
}

impl SchemaProvider for ModuleSchemas {
    fn fetch_table_schema(&self, provider: &str, table_name: &str) -> Result<Vec<ColumnSpec>, SchemaLookupError> {
        let tables = self.providers
            .get(provider)
            .ok_or_else(|| SchemaLookupError::UnknownProvider { provider: provider.to_string() })?;

        let declaration = tables
            .get(table_name)
            .ok_or_else(|| SchemaLookupError::unknown_table(provider, table_name))?;

        Ok(declaration.fields
            .iter()
            .map(|(name, column)| ColumnSpec::new(name, &column.storage_type, &column.description))
            .collect())
    }
}
