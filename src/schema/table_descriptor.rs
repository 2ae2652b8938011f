use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Identifies the external source of a table's schema: the provider that
/// declares it and the table name inside that provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableDescriptor {
    pub provider: String,
    pub table_name: String,
}

impl TableDescriptor {
    pub fn new(provider: &str, table_name: &str) -> Self {
        Self {
            provider: provider.to_string(),
            table_name: table_name.to_string(),
        }
    }

    /// Resource type name used when records are exposed, e.g. `dblog--watchdog`.
    pub fn resource_type(&self) -> String {
        format!("{}--{}", self.provider, self.table_name)
    }
}

impl Display for TableDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.provider, self.table_name)
    }
}
