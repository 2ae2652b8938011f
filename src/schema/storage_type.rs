use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

/// Storage type of a column as reported by a schema provider.
///
/// Parsing is total: any type string outside the known set is kept verbatim
/// in `Other` so it can be reported, but it has no semantic mapping.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StorageType {
    Int,
    String,
    Text,
    Timestamp,
    VarcharAscii,
    /// Legacy serialized byte payload.
    Blob,
    Other(String),
}

impl StorageType {
    pub fn as_str(&self) -> &str {
        match self {
            StorageType::Int => "int",
            StorageType::String => "string",
            StorageType::Text => "text",
            StorageType::Timestamp => "timestamp",
            StorageType::VarcharAscii => "varchar_ascii",
            StorageType::Blob => "blob",
            StorageType::Other(other) => other,
        }
    }

    pub fn is_blob(&self) -> bool {
        matches!(self, StorageType::Blob)
    }
}

impl From<&str> for StorageType {
    fn from(value: &str) -> Self {
        match value {
            "int" => StorageType::Int,
            "string" => StorageType::String,
            "text" => StorageType::Text,
            "timestamp" => StorageType::Timestamp,
            "varchar_ascii" => StorageType::VarcharAscii,
            "blob" => StorageType::Blob,
            other => StorageType::Other(other.to_string()),
        }
    }
}

impl From<String> for StorageType {
    fn from(value: String) -> Self {
        StorageType::from(value.as_str())
    }
}

impl From<StorageType> for String {
    fn from(value: StorageType) -> Self {
        value.as_str().to_string()
    }
}

impl FromStr for StorageType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(StorageType::from(s))
    }
}

impl Display for StorageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
