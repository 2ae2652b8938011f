/// A field that could not be transformed and was nulled instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldFailure {
    /// Index of the record inside the batch.
    pub record: usize,
    pub field: String,
    pub transform: &'static str,
    pub message: String,
}

/// Outcome of one normalization pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizationReport {
    pub records: usize,
    /// Number of field values replaced by a successful transform.
    /// Fields nulled after a failure are listed in `failures` only.
    pub rewritten: usize,
    pub failures: Vec<FieldFailure>,
}

impl NormalizationReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}
