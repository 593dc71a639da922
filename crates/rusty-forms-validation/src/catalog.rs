//! Built-in rule evaluators
//!
//! Each rule is a pure function of the current value, the field kind, the
//! rule parameter and (for `matches`) one other field looked up by
//! reference. A rule that cannot run because it is misconfigured returns a
//! [`ConfigurationError`]; the caller skips it.

use crate::email::is_valid_email;
use crate::error::ConfigurationError;
use crate::field::{display_name, FieldKind, DEFAULT_FALLBACK_NAME};
use crate::numeric::is_numeric;
use crate::reference::{resolve_named, FieldLookup};
use crate::rule::{RuleName, RuleSpec};
use crate::string::{has_max_length, has_min_length, parse_length, trim};

/// Result of applying one rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// The value satisfies the rule
    Pass,
    /// The value fails the rule; carries the user-facing message
    Fail(String),
    /// The rule rewrote the value; later rules see the new value
    Rewrite(String),
}

/// Everything a rule may read
pub struct RuleContext<'a> {
    pub value: &'a str,
    pub kind: FieldKind,
    pub checked: bool,
    pub display_name: &'a str,
    pub lookup: &'a dyn FieldLookup,
    /// Fallback used when naming a referenced field
    pub fallback_name: &'a str,
}

/// The fixed set of built-in rules
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleCatalog;

impl RuleCatalog {
    pub fn new() -> Self {
        Self
    }

    /// Apply `rule` to the value in `ctx`
    pub fn evaluate(
        &self,
        rule: &RuleSpec,
        ctx: &RuleContext<'_>,
    ) -> Result<Verdict, ConfigurationError> {
        let parameter = rule.parameter.as_deref();

        if !rule.name.takes_parameter() {
            if let Some(parameter) = parameter {
                return Err(ConfigurationError::UnexpectedParameter {
                    rule: rule.name,
                    parameter: parameter.to_string(),
                });
            }
        }

        let name = ctx.display_name;

        let verdict = match rule.name {
            RuleName::Trim => Verdict::Rewrite(trim(ctx.value).to_string()),

            RuleName::Required => {
                let present = match ctx.kind {
                    FieldKind::Checkbox => ctx.checked,
                    FieldKind::Text | FieldKind::Other => !ctx.value.is_empty(),
                };
                check(present, || format!("{name} is required"))
            }

            RuleName::Email => check(is_valid_email(ctx.value), || {
                format!("{name} must be a valid email address.")
            }),

            RuleName::Number => check(is_numeric(ctx.value), || {
                format!("{name} must be a number.")
            }),

            RuleName::MinLength => {
                let min = length_parameter(rule.name, parameter)?;
                check(has_min_length(ctx.value, min), || {
                    format!("{name} must be at least {min} characters.")
                })
            }

            RuleName::MaxLength => {
                let max = length_parameter(rule.name, parameter)?;
                check(has_max_length(ctx.value, max), || {
                    format!("{name} must be equal to or less than {max} characters.")
                })
            }

            RuleName::Matches => {
                let reference = parameter
                    .map(str::trim)
                    .filter(|r| !r.is_empty())
                    .ok_or(ConfigurationError::MalformedParameter {
                        rule: rule.name,
                        parameter: rule.parameter.clone(),
                        expected: "a reference to another field",
                    })?;
                let (other_name, other_value) = resolve_named(ctx.lookup, reference)?;
                check(ctx.value == other_value, || {
                    let other = display_name(Some(&other_name), ctx.fallback_name);
                    format!("{name} must match {other}.")
                })
            }
        };

        Ok(verdict)
    }
}

fn check(ok: bool, message: impl FnOnce() -> String) -> Verdict {
    if ok {
        Verdict::Pass
    } else {
        Verdict::Fail(message())
    }
}

fn length_parameter(rule: RuleName, parameter: Option<&str>) -> Result<usize, ConfigurationError> {
    parse_length(parameter).ok_or_else(|| ConfigurationError::MalformedParameter {
        rule,
        parameter: parameter.map(str::to_string),
        expected: "a non-negative integer",
    })
}

impl Default for RuleContext<'_> {
    fn default() -> Self {
        Self {
            value: "",
            kind: FieldKind::Text,
            checked: false,
            display_name: DEFAULT_FALLBACK_NAME,
            lookup: &crate::reference::NoLookup,
            fallback_name: DEFAULT_FALLBACK_NAME,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::ReferencedField;
    use pretty_assertions::assert_eq;

    fn eval(rule: RuleSpec, value: &str) -> Result<Verdict, ConfigurationError> {
        let ctx = RuleContext {
            value,
            display_name: "Password",
            ..RuleContext::default()
        };
        RuleCatalog::new().evaluate(&rule, &ctx)
    }

    #[test]
    fn test_trim_rewrites() {
        assert_eq!(
            eval(RuleSpec::bare(RuleName::Trim), "  abc "),
            Ok(Verdict::Rewrite("abc".to_string()))
        );
    }

    #[test]
    fn test_required_text() {
        assert_eq!(eval(RuleSpec::bare(RuleName::Required), "x"), Ok(Verdict::Pass));
        assert_eq!(
            eval(RuleSpec::bare(RuleName::Required), ""),
            Ok(Verdict::Fail("Password is required".to_string()))
        );
        // whitespace counts unless trimmed first
        assert_eq!(eval(RuleSpec::bare(RuleName::Required), " "), Ok(Verdict::Pass));
    }

    #[test]
    fn test_required_checkbox_ignores_value() {
        let catalog = RuleCatalog::new();
        let rule = RuleSpec::bare(RuleName::Required);

        let unchecked = RuleContext {
            value: "remember-me",
            kind: FieldKind::Checkbox,
            checked: false,
            display_name: "Terms",
            ..RuleContext::default()
        };
        assert_eq!(
            catalog.evaluate(&rule, &unchecked),
            Ok(Verdict::Fail("Terms is required".to_string()))
        );

        let checked = RuleContext {
            value: "",
            checked: true,
            ..unchecked
        };
        assert_eq!(catalog.evaluate(&rule, &checked), Ok(Verdict::Pass));
    }

    #[test]
    fn test_length_messages() {
        assert_eq!(
            eval(RuleSpec::with_parameter(RuleName::MinLength, "5"), "abcd"),
            Ok(Verdict::Fail("Password must be at least 5 characters.".to_string()))
        );
        assert_eq!(
            eval(RuleSpec::with_parameter(RuleName::MaxLength, "3"), "abcd"),
            Ok(Verdict::Fail(
                "Password must be equal to or less than 3 characters.".to_string()
            ))
        );
    }

    #[test]
    fn test_malformed_length_parameter() {
        assert!(matches!(
            eval(RuleSpec::with_parameter(RuleName::MinLength, "many"), "abc"),
            Err(ConfigurationError::MalformedParameter { rule: RuleName::MinLength, .. })
        ));
        assert!(matches!(
            eval(RuleSpec::bare(RuleName::MaxLength), "abc"),
            Err(ConfigurationError::MalformedParameter { rule: RuleName::MaxLength, .. })
        ));
    }

    #[test]
    fn test_unexpected_parameter() {
        assert_eq!(
            eval(RuleSpec::with_parameter(RuleName::Required, "yes"), ""),
            Err(ConfigurationError::UnexpectedParameter {
                rule: RuleName::Required,
                parameter: "yes".to_string(),
            })
        );
    }

    #[test]
    fn test_number_and_email_messages() {
        assert_eq!(
            eval(RuleSpec::bare(RuleName::Number), ""),
            Ok(Verdict::Fail("Password must be a number.".to_string()))
        );
        assert_eq!(
            eval(RuleSpec::bare(RuleName::Email), "nope"),
            Ok(Verdict::Fail(
                "Password must be a valid email address.".to_string()
            ))
        );
    }

    struct Accounts;

    impl FieldLookup for Accounts {
        fn resolve(&self, reference: &str) -> Option<ReferencedField> {
            match reference {
                "#password" => Some(ReferencedField::new(Some("new_password"), "hunter22")),
                "#nameless" => Some(ReferencedField::new(None::<String>, "hunter22")),
                _ => None,
            }
        }
    }

    fn confirmation(value: &str) -> RuleContext<'_> {
        RuleContext {
            value,
            display_name: "Confirmation",
            lookup: &Accounts,
            ..RuleContext::default()
        }
    }

    #[test]
    fn test_matches() {
        let catalog = RuleCatalog::new();

        let rule = RuleSpec::with_parameter(RuleName::Matches, "#password");
        assert_eq!(catalog.evaluate(&rule, &confirmation("hunter22")), Ok(Verdict::Pass));
        assert_eq!(
            catalog.evaluate(&rule, &confirmation("hunter2")),
            Ok(Verdict::Fail(
                "Confirmation must match New password.".to_string()
            ))
        );
    }

    #[test]
    fn test_matches_misconfigured() {
        let catalog = RuleCatalog::new();

        let nameless = RuleSpec::with_parameter(RuleName::Matches, "#nameless");
        assert_eq!(
            catalog.evaluate(&nameless, &confirmation("other")),
            Err(ConfigurationError::UnnamedReference("#nameless".to_string()))
        );

        let missing = RuleSpec::with_parameter(RuleName::Matches, "#nowhere");
        assert_eq!(
            catalog.evaluate(&missing, &confirmation("other")),
            Err(ConfigurationError::UnresolvedReference("#nowhere".to_string()))
        );

        let empty = RuleSpec::with_parameter(RuleName::Matches, "");
        assert!(matches!(
            catalog.evaluate(&empty, &confirmation("x")),
            Err(ConfigurationError::MalformedParameter { .. })
        ));
    }
}
