use serde::{Deserialize, Serialize};

use crate::schema::StorageType;

/// Semantic kind of an exposed field.
///
/// Synthesized fields are only ever `Integer`, `String` or `Timestamp`;
/// the remaining variants describe explicitly authored base fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum SemanticType {
    Integer,
    String,
    /// Unix seconds.
    Timestamp,
    Uuid,
    EntityReference { target: String },
}

/// Result of mapping a storage type to a semantic type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeMapping {
    Mapped(SemanticType),
    /// The column cannot be represented and is left out of the exposed shape.
    Unsupported,
}

impl TypeMapping {
    pub fn semantic_type(self) -> Option<SemanticType> {
        match self {
            TypeMapping::Mapped(ty) => Some(ty),
            TypeMapping::Unsupported => None,
        }
    }
}

impl SemanticType {
    pub fn map_type(storage_type: &StorageType) -> TypeMapping {
        match storage_type {
            StorageType::Int => TypeMapping::Mapped(SemanticType::Integer),
            StorageType::String
            | StorageType::Text
            | StorageType::VarcharAscii
            | StorageType::Blob => TypeMapping::Mapped(SemanticType::String),
            StorageType::Timestamp => TypeMapping::Mapped(SemanticType::Timestamp),
            StorageType::Other(_) => TypeMapping::Unsupported,
        }
    }
}
