use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;
use tracing::{debug, warn};

use crate::{
    normalizer::{BlobToJson, FieldFailure, FieldTransform, NormalizationError, NormalizationReport},
    records::{FieldValue, Record},
    schema::{SchemaRegistry, TableDescriptor},
    table::FailurePolicy,
};

/// Runs the declared field transforms over every record of a loaded batch.
pub struct PostLoadNormalizer {
    registry: Arc<SchemaRegistry>,
    transforms: Vec<Arc<dyn FieldTransform>>,
    policy: FailurePolicy,
}

impl PostLoadNormalizer {
    /// Normalizer with the default pipeline: blob -> JSON.
    pub fn new(registry: Arc<SchemaRegistry>) -> Self {
        let transforms: Vec<Arc<dyn FieldTransform>> = vec![Arc::new(BlobToJson)];
        Self::with_transforms(registry, transforms)
    }

    pub fn with_transforms(registry: Arc<SchemaRegistry>, transforms: Vec<Arc<dyn FieldTransform>>) -> Self {
        Self {
            registry,
            transforms,
            policy: FailurePolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn normalize(&self, records: &mut [Record], table: &TableDescriptor) -> Result<NormalizationReport, NormalizationError> {
        let mut report = NormalizationReport { records: records.len(), ..Default::default() };
        if records.is_empty() {
            return Ok(report);
        }

        if let Some((index, record)) = records.iter().enumerate().find(|(_, r)| r.table != *table) {
            return Err(NormalizationError::TableMismatch {
                record: index,
                expected: table.clone(),
                found: record.table.clone(),
            });
        }

        // one schema lookup per batch
        let schema = self.registry.schema_fields(table)?;
        let plan: Vec<(&str, &Arc<dyn FieldTransform>)> = schema
            .iter()
            .flat_map(|field| {
                self.transforms
                    .iter()
                    .filter(move |transform| transform.applies_to(field))
                    .map(move |transform| (field.name.as_str(), transform))
            })
            .collect();

        if plan.is_empty() {
            return Ok(report);
        }

        // Compute every replacement first so a failing batch stays untouched.
        let mut replacements: Vec<(usize, IndexMap<&str, FieldValue>)> = Vec::new();
        for (index, record) in records.iter().enumerate() {
            // later transforms see the output of earlier ones
            let mut pending: IndexMap<&str, FieldValue> = IndexMap::new();
            let mut flagged: Vec<&str> = Vec::new();

            for (field, transform) in &plan {
                let Some(current) = pending.get(*field).or_else(|| record.get(field)) else { continue };

                match transform.apply(current) {
                    Ok(Some(replacement)) => {
                        pending.insert(*field, replacement);
                    }
                    Ok(None) => {}
                    Err(source) => match self.policy {
                        FailurePolicy::FailBatch => {
                            return Err(NormalizationError::Field {
                                record: index,
                                field: field.to_string(),
                                transform: transform.name(),
                                source,
                            });
                        }
                        FailurePolicy::SkipAndFlag => {
                            warn!(table = %table, record = index, field = %field, error = %source, "field transform failed, value nulled");
                            report.failures.push(FieldFailure {
                                record: index,
                                field: field.to_string(),
                                transform: transform.name(),
                                message: source.to_string(),
                            });
                            flagged.push(*field);
                            pending.insert(*field, FieldValue::Value(Value::Null));
                        }
                    },
                }
            }

            report.rewritten += pending.keys().filter(|field| !flagged.contains(*field)).count();
            if !pending.is_empty() {
                replacements.push((index, pending));
            }
        }

        for (index, pending) in replacements {
            for (field, value) in pending {
                records[index].set(field, value);
            }
        }

        debug!(table = %table, records = report.records, rewritten = report.rewritten, failures = report.failures.len(), "normalized batch");
        Ok(report)
    }
}
