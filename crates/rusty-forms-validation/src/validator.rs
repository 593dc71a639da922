//! Applies a field's rules in order and collects the outcome

use serde::Serialize;

use crate::catalog::{RuleCatalog, RuleContext, Verdict};
use crate::error::ConfigurationError;
use crate::field::{FieldDescriptor, FieldState, DEFAULT_FALLBACK_NAME};
use crate::reference::FieldLookup;

/// Result of validating one field during one pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationOutcome {
    pub valid: bool,
    /// One message per failing rule, in rule order
    pub errors: Vec<String>,
    /// Set only when a rule changed the value
    pub rewritten_value: Option<String>,
    /// Rules that were skipped, and why
    #[serde(skip)]
    pub diagnostics: Vec<ConfigurationError>,
}

/// Runs a field's rule list against its live value
#[derive(Debug, Clone)]
pub struct FieldValidator {
    catalog: RuleCatalog,
    fallback_name: String,
}

impl Default for FieldValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldValidator {
    pub fn new() -> Self {
        Self {
            catalog: RuleCatalog::new(),
            fallback_name: DEFAULT_FALLBACK_NAME.to_string(),
        }
    }

    /// Use a different display name for unnamed fields
    pub fn with_fallback_name(mut self, fallback_name: impl Into<String>) -> Self {
        self.fallback_name = fallback_name.into();
        self
    }

    pub fn fallback_name(&self) -> &str {
        &self.fallback_name
    }

    /// Validate `field` given its live `state`
    ///
    /// Every rule runs; a failing rule never suppresses later ones. `trim`
    /// updates the current value seen by all rules after it. Misconfigured
    /// rules are skipped and recorded as diagnostics.
    pub fn validate<Id>(
        &self,
        field: &FieldDescriptor<Id>,
        state: &FieldState,
        lookup: &dyn FieldLookup,
    ) -> ValidationOutcome {
        let display_name = field.display_name(&self.fallback_name);
        let mut current = state.value.clone();
        let mut errors = Vec::new();
        let mut diagnostics = Vec::new();

        for rule in &field.rules {
            let ctx = RuleContext {
                value: &current,
                kind: field.kind,
                checked: state.checked,
                display_name: &display_name,
                lookup,
                fallback_name: &self.fallback_name,
            };

            match self.catalog.evaluate(rule, &ctx) {
                Ok(Verdict::Pass) => {}
                Ok(Verdict::Fail(message)) => errors.push(message),
                Ok(Verdict::Rewrite(value)) => current = value,
                Err(diagnostic) => {
                    tracing::warn!(field = %display_name, %rule, %diagnostic, "skipping rule");
                    diagnostics.push(diagnostic);
                }
            }
        }

        let rewritten_value = (current != state.value).then_some(current);
        let valid = errors.is_empty();

        tracing::debug!(field = %display_name, valid, errors = errors.len(), "field validated");

        ValidationOutcome {
            valid,
            errors,
            rewritten_value,
            diagnostics,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldKind;
    use crate::reference::{NoLookup, ReferencedField};
    use pretty_assertions::assert_eq;

    fn text_field(name: Option<&str>, rules: &str) -> FieldDescriptor<()> {
        FieldDescriptor::parse((), name.map(str::to_string), FieldKind::Text, rules).0
    }

    #[test]
    fn test_required_email_on_empty_yields_two_errors() {
        let outcome = FieldValidator::new().validate(
            &text_field(Some("email"), "required|email"),
            &FieldState::text(""),
            &NoLookup,
        );

        assert!(!outcome.valid);
        assert_eq!(
            outcome.errors,
            vec![
                "Email is required".to_string(),
                "Email must be a valid email address.".to_string(),
            ]
        );
        assert_eq!(outcome.rewritten_value, None);
    }

    #[test]
    fn test_trim_feeds_later_rules() {
        let outcome = FieldValidator::new().validate(
            &text_field(Some("email"), "trim|required|email"),
            &FieldState::text("  a@b.com  "),
            &NoLookup,
        );

        assert!(outcome.valid);
        assert_eq!(outcome.rewritten_value.as_deref(), Some("a@b.com"));
    }

    #[test]
    fn test_whitespace_only_fails_required_after_trim() {
        let outcome = FieldValidator::new().validate(
            &text_field(Some("nickname"), "trim|required"),
            &FieldState::text("   "),
            &NoLookup,
        );

        assert_eq!(outcome.errors, vec!["Nickname is required".to_string()]);
        assert_eq!(outcome.rewritten_value.as_deref(), Some(""));
    }

    #[test]
    fn test_trim_without_change_is_not_a_rewrite() {
        let outcome = FieldValidator::new().validate(
            &text_field(None, "trim"),
            &FieldState::text("clean"),
            &NoLookup,
        );

        assert!(outcome.valid);
        assert_eq!(outcome.rewritten_value, None);
    }

    #[test]
    fn test_fallback_name() {
        let outcome = FieldValidator::new()
            .with_fallback_name("Value")
            .validate(&text_field(None, "number"), &FieldState::text("x"), &NoLookup);

        assert_eq!(outcome.errors, vec!["Value must be a number.".to_string()]);
    }

    #[test]
    fn test_length_boundaries_are_inclusive() {
        let validator = FieldValidator::new();
        let field = text_field(Some("password"), "min_length[5]|max_length[12]");

        for value in ["abcde", "abcdefghijkl"] {
            let outcome = validator.validate(&field, &FieldState::text(value), &NoLookup);
            assert!(outcome.valid, "{value} should pass");
        }
        for value in ["abcd", "abcdefghijklm"] {
            let outcome = validator.validate(&field, &FieldState::text(value), &NoLookup);
            assert!(!outcome.valid, "{value} should fail");
        }
    }

    #[test]
    fn test_misconfigured_rules_fail_open() {
        let outcome = FieldValidator::new().validate(
            &text_field(Some("code"), "min_length[abc]|matches[#other]|required[1]"),
            &FieldState::text(""),
            &NoLookup,
        );

        assert!(outcome.valid);
        assert!(outcome.errors.is_empty());
        assert_eq!(outcome.diagnostics.len(), 3);
    }

    #[test]
    fn test_matches_uses_lookup() {
        let lookup = |reference: &str| {
            (reference == "#b").then(|| ReferencedField::new(Some("password"), "secret"))
        };
        let field = text_field(Some("password_confirmation"), "matches[#b]");
        let validator = FieldValidator::new();

        let ok = validator.validate(&field, &FieldState::text("secret"), &lookup);
        assert!(ok.valid);

        let bad = validator.validate(&field, &FieldState::text("secrets"), &lookup);
        assert_eq!(
            bad.errors,
            vec!["Password confirmation must match Password.".to_string()]
        );
    }

    #[test]
    fn test_checkbox_required() {
        let field = FieldDescriptor::parse(
            (),
            Some("terms".to_string()),
            FieldKind::Checkbox,
            "required",
        )
        .0;
        let validator = FieldValidator::new();

        assert!(validator.validate(&field, &FieldState::checkbox(true), &NoLookup).valid);
        assert!(!validator.validate(&field, &FieldState::checkbox(false), &NoLookup).valid);

        let with_value = FieldState {
            value: "yes".to_string(),
            checked: false,
        };
        assert!(!validator.validate(&field, &with_value, &NoLookup).valid);
    }

    #[test]
    fn test_outcome_serializes_camel_case() {
        let outcome = ValidationOutcome {
            valid: false,
            errors: vec!["Email is required".to_string()],
            rewritten_value: Some("x".to_string()),
            diagnostics: vec![],
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["rewrittenValue"], "x");
        assert_eq!(json["errors"][0], "Email is required");
    }
}
