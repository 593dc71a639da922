// File: src/orchestrator.rs
// Purpose: Validate every field in a scope, apply feedback, aggregate

use rusty_forms_validation::{
    ConfigurationError, FieldDescriptor, FieldLookup, FieldState, FieldValidator, ReferencedField,
    ValidationOutcome,
};

use crate::adapter::{HostError, UiAdapter};
use crate::config::ValidationConfig;
use crate::error::EngineResult;
use crate::outcome::{FieldReport, FormOutcome};

/// Validation engine bound to one host UI adapter
///
/// Discovers fields carrying a rule attribute, validates each one, updates
/// its presentation state right after its outcome is known, and aggregates
/// the results. Presentation updates are idempotent.
pub struct FormOrchestrator<A: UiAdapter> {
    adapter: A,
    config: ValidationConfig,
    validator: FieldValidator,
}

/// Resolves `matches` references through the adapter
struct ScopeLookup<'a, A: UiAdapter> {
    adapter: &'a A,
    scope: &'a A::Node,
    name_attribute: &'a str,
}

impl<A: UiAdapter> FieldLookup for ScopeLookup<'_, A> {
    fn resolve(&self, reference: &str) -> Option<ReferencedField> {
        let node = self.adapter.lookup(self.scope, reference)?;
        Some(ReferencedField {
            declared_name: self.adapter.attribute(&node, self.name_attribute),
            value: self.adapter.value(&node),
        })
    }
}

impl<A: UiAdapter> FormOrchestrator<A> {
    pub fn new(adapter: A, config: ValidationConfig) -> Self {
        let validator =
            FieldValidator::new().with_fallback_name(config.messages.fallback_name.clone());

        Self {
            adapter,
            config,
            validator,
        }
    }

    pub fn with_defaults(adapter: A) -> Self {
        Self::new(adapter, ValidationConfig::default())
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    pub fn adapter_mut(&mut self) -> &mut A {
        &mut self.adapter
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Read a field's descriptor from the host tree
    ///
    /// Returns `None` when the node carries no rule attribute. Parse
    /// diagnostics are returned with the descriptor.
    pub fn describe(
        &self,
        node: &A::Node,
    ) -> Option<(FieldDescriptor<A::Node>, Vec<ConfigurationError>)> {
        let spec = self.adapter.attribute(node, &self.config.attributes.rules)?;
        let declared_name = self.adapter.attribute(node, &self.config.attributes.name);
        let kind = self.adapter.field_kind(node);

        Some(FieldDescriptor::parse(node.clone(), declared_name, kind, &spec))
    }

    /// Validate one field and apply its feedback
    ///
    /// `scope` is where `matches` references resolve. Returns `None` for
    /// nodes without a rule attribute.
    pub fn validate_field(
        &mut self,
        scope: &A::Node,
        node: &A::Node,
    ) -> EngineResult<Option<FieldReport<A::Node>>> {
        self.adapter.ensure_available()?;

        let Some(report) = self.check(scope, node) else {
            tracing::debug!(?node, "node has no rules; skipping");
            return Ok(None);
        };

        self.apply_feedback(&report)?;
        Ok(Some(report))
    }

    /// Validate every field inside `scope`
    pub fn validate_form(&mut self, scope: &A::Node) -> EngineResult<FormOutcome<A::Node>> {
        self.adapter.ensure_available()?;

        let nodes = self.adapter.fields_in(scope, &self.config.attributes.rules);
        tracing::debug!(fields = nodes.len(), "validating form");

        let mut reports = Vec::with_capacity(nodes.len());
        for node in &nodes {
            if let Some(report) = self.check(scope, node) {
                self.apply_feedback(&report)?;
                reports.push(report);
            }
        }

        let outcome = FormOutcome::from_reports(reports);
        tracing::debug!(
            valid = outcome.valid,
            errors = outcome.error_count(),
            "form validated"
        );

        Ok(outcome)
    }

    /// Enable or disable the form's submit controls
    pub fn gate_submit(&mut self, form: &A::Node, valid: bool) -> Result<(), HostError> {
        for control in self.adapter.submit_controls(form) {
            self.adapter.set_disabled(&control, !valid)?;
        }
        Ok(())
    }

    fn check(&self, scope: &A::Node, node: &A::Node) -> Option<FieldReport<A::Node>> {
        let (field, mut diagnostics) = self.describe(node)?;

        let state = FieldState {
            value: self.adapter.value(node),
            checked: self.adapter.is_checked(node),
        };
        let lookup = ScopeLookup {
            adapter: &self.adapter,
            scope,
            name_attribute: &self.config.attributes.name,
        };

        let mut outcome: ValidationOutcome = self.validator.validate(&field, &state, &lookup);
        diagnostics.append(&mut outcome.diagnostics);
        outcome.diagnostics = diagnostics;

        Some(FieldReport { field, outcome })
    }

    fn apply_feedback(&mut self, report: &FieldReport<A::Node>) -> Result<(), HostError> {
        let node = &report.field.identifier;
        let classes = &self.config.classes;

        if let Some(value) = &report.outcome.rewritten_value {
            self.adapter.set_value(node, value)?;
        }

        let existing = self.adapter.find_feedback(node, &classes.feedback);

        if report.outcome.valid {
            if let Some(feedback) = existing {
                self.adapter.remove(&feedback)?;
            }
            self.adapter.set_class(node, &classes.invalid, false)?;
        } else {
            let feedback = match existing {
                Some(feedback) => feedback,
                None => self
                    .adapter
                    .create_feedback(node, &classes.feedback_classes())?,
            };
            self.adapter
                .set_feedback_lines(&feedback, &report.outcome.errors)?;
            self.adapter.set_class(node, &classes.invalid, true)?;
        }

        Ok(())
    }
}
