use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::fields::SemanticType;

/// Ordered map of field name -> definition.
pub type FieldSet = IndexMap<String, FieldDefinition>;

/// Typed field shape exposed to consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub name: String,
    pub semantic_type: SemanticType,
    pub label: String,
    pub description: String,
    pub read_only: bool,
}

impl FieldDefinition {
    pub fn new(name: &str, semantic_type: SemanticType, label: &str) -> Self {
        Self {
            name: name.to_string(),
            semantic_type,
            label: label.to_string(),
            description: String::new(),
            read_only: true,
        }
    }

    /// Definition synthesized from a schema column: labelled with its own name.
    pub fn read_only(name: &str, semantic_type: SemanticType, description: &str) -> Self {
        Self::new(name, semantic_type, name).with_description(description)
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }
}
