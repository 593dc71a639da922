//! Rule names and parsed rule invocations

use serde::{Deserialize, Serialize};
use std::fmt;

/// Built-in rule keywords understood by the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleName {
    Trim,
    Required,
    Email,
    Number,
    MinLength,
    MaxLength,
    Matches,
}

impl RuleName {
    /// Every built-in rule, in catalog order
    pub const ALL: [RuleName; 7] = [
        RuleName::Trim,
        RuleName::Required,
        RuleName::Email,
        RuleName::Number,
        RuleName::MinLength,
        RuleName::MaxLength,
        RuleName::Matches,
    ];

    /// Look up a rule by its keyword. Matching is exact.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|rule| rule.keyword() == keyword)
    }

    /// The keyword used in rule specifications
    pub fn keyword(self) -> &'static str {
        match self {
            RuleName::Trim => "trim",
            RuleName::Required => "required",
            RuleName::Email => "email",
            RuleName::Number => "number",
            RuleName::MinLength => "min_length",
            RuleName::MaxLength => "max_length",
            RuleName::Matches => "matches",
        }
    }

    /// Whether the rule expects a bracketed parameter
    pub fn takes_parameter(self) -> bool {
        matches!(
            self,
            RuleName::MinLength | RuleName::MaxLength | RuleName::Matches
        )
    }
}

impl fmt::Display for RuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// One rule invocation: a name plus its optional raw parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSpec {
    pub name: RuleName,
    pub parameter: Option<String>,
}

impl RuleSpec {
    /// A rule without a parameter
    pub fn bare(name: RuleName) -> Self {
        Self {
            name,
            parameter: None,
        }
    }

    /// A rule with a parameter
    pub fn with_parameter(name: RuleName, parameter: impl Into<String>) -> Self {
        Self {
            name,
            parameter: Some(parameter.into()),
        }
    }
}

impl fmt::Display for RuleSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.parameter {
            Some(parameter) => write!(f, "{}[{}]", self.name, parameter),
            None => write!(f, "{}", self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_lookup_is_exact() {
        assert_eq!(RuleName::from_keyword("min_length"), Some(RuleName::MinLength));
        assert_eq!(RuleName::from_keyword("Required"), None);
        assert_eq!(RuleName::from_keyword("minlength"), None);
    }

    #[test]
    fn test_keywords_round_trip() {
        for rule in RuleName::ALL {
            assert_eq!(RuleName::from_keyword(rule.keyword()), Some(rule));
        }
    }

    #[test]
    fn test_display_spec() {
        assert_eq!(RuleSpec::bare(RuleName::Trim).to_string(), "trim");
        assert_eq!(
            RuleSpec::with_parameter(RuleName::Matches, "#password").to_string(),
            "matches[#password]"
        );
    }
}
