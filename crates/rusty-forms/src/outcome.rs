//! Form-level results

use rusty_forms_validation::{FieldDescriptor, ValidationOutcome};

/// One field's descriptor together with its outcome
#[derive(Debug, Clone, PartialEq)]
pub struct FieldReport<N> {
    pub field: FieldDescriptor<N>,
    pub outcome: ValidationOutcome,
}

/// Result of validating every field in a scope
///
/// `valid` is the conjunction of every field outcome; an empty scope is valid.
#[derive(Debug, Clone, PartialEq)]
pub struct FormOutcome<N> {
    pub valid: bool,
    pub fields: Vec<FieldReport<N>>,
}

impl<N> FormOutcome<N> {
    pub fn from_reports(fields: Vec<FieldReport<N>>) -> Self {
        let valid = fields.iter().all(|report| report.outcome.valid);
        Self { valid, fields }
    }

    pub fn invalid_fields(&self) -> impl Iterator<Item = &FieldReport<N>> {
        self.fields.iter().filter(|report| !report.outcome.valid)
    }

    /// Host handle of the first invalid field in document order
    pub fn first_invalid(&self) -> Option<&N> {
        self.invalid_fields().next().map(|report| &report.field.identifier)
    }

    pub fn error_count(&self) -> usize {
        self.fields.iter().map(|report| report.outcome.errors.len()).sum()
    }
}

impl<N: PartialEq> FormOutcome<N> {
    pub fn outcome_for(&self, node: &N) -> Option<&ValidationOutcome> {
        self.fields
            .iter()
            .find(|report| &report.field.identifier == node)
            .map(|report| &report.outcome)
    }
}
