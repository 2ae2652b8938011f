use serde::{Deserialize, Serialize};

/// What the normalizer does when a field transform fails.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Abort the batch and leave every record untouched.
    #[default]
    FailBatch,
    /// Null the failing field, record the failure and keep going.
    SkipAndFlag,
}

/// Per-table configuration.
///
/// - `identity_key` is the column holding a dedicated identity, when present.
/// - `row_id_key` is the primary row identifier used as fallback identity.
/// - `failure_policy` controls how blob decode failures are handled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    pub identity_key: String,
    pub row_id_key: String,
    pub failure_policy: FailurePolicy,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            identity_key: "uuid".to_string(),
            row_id_key: "id".to_string(),
            failure_policy: FailurePolicy::default(),
        }
    }
}

impl TableConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience: default identity key with a custom row id column.
    pub fn row_id(row_id_key: &str) -> Self {
        Self {
            row_id_key: row_id_key.to_string(),
            ..Self::default()
        }
    }

    pub fn with_identity_key(mut self, identity_key: &str) -> Self {
        self.identity_key = identity_key.to_string();
        self
    }

    pub fn with_failure_policy(mut self, failure_policy: FailurePolicy) -> Self {
        self.failure_policy = failure_policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_falls_back_to_defaults() {
        let config: TableConfig = serde_json::from_str(r#"{ "row_id_key": "wid", "failure_policy": "skip_and_flag" }"#).unwrap();
        assert_eq!(config.identity_key, "uuid");
        assert_eq!(config.row_id_key, "wid");
        assert_eq!(config.failure_policy, FailurePolicy::SkipAndFlag);
        assert_eq!(config, TableConfig::row_id("wid").with_failure_policy(FailurePolicy::SkipAndFlag));
    }
}
