use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaLookupError {
    #[error("unknown schema provider '{provider}'")]
    UnknownProvider { provider: String },
    #[error("provider '{provider}' declares no table '{table}'")]
    UnknownTable { provider: String, table: String },
    #[error("invalid schema declaration: {0}")]
    InvalidSchema(#[from] serde_json::Error),
    #[error("failed to read schema declaration: {0}")]
    Io(#[from] std::io::Error),
}

impl SchemaLookupError {
    pub fn unknown_table(provider: &str, table: &str) -> Self {
        SchemaLookupError::UnknownTable {
            provider: provider.to_string(),
            table: table.to_string(),
        }
    }
}
