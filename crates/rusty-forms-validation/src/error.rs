//! Developer-facing configuration diagnostics
//!
//! These never reach the end user. A rule that produces one is skipped and
//! the field is judged on its remaining rules.

use crate::rule::RuleName;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("malformed rule token `{token}`: {reason}")]
    MalformedToken { token: String, reason: &'static str },

    #[error("unknown rule `{0}`")]
    UnknownRule(String),

    #[error("rule `{rule}` has a malformed parameter {parameter:?}: expected {expected}")]
    MalformedParameter {
        rule: RuleName,
        parameter: Option<String>,
        expected: &'static str,
    },

    #[error("rule `{rule}` does not take a parameter (got {parameter:?})")]
    UnexpectedParameter { rule: RuleName, parameter: String },

    #[error("`matches` reference `{0}` does not resolve to a field")]
    UnresolvedReference(String),

    #[error("`matches` reference `{0}` resolves to a field without a declared name")]
    UnnamedReference(String),
}

impl ConfigurationError {
    /// The rule the diagnostic concerns, when it got far enough to have one
    pub fn rule(&self) -> Option<RuleName> {
        match self {
            ConfigurationError::MalformedParameter { rule, .. }
            | ConfigurationError::UnexpectedParameter { rule, .. } => Some(*rule),
            ConfigurationError::UnresolvedReference(_)
            | ConfigurationError::UnnamedReference(_) => Some(RuleName::Matches),
            ConfigurationError::MalformedToken { .. } | ConfigurationError::UnknownRule(_) => None,
        }
    }
}
