//! Tokenizer for pipe-delimited rule specifications
//!
//! Grammar: `rule ("|" rule)*` where `rule = name | name "[" parameter "]"`.
//! A bracket-free `name:parameter` token is accepted as an alternative spelling.
//! Tokens that do not fit the grammar, or that name no built-in rule, are
//! dropped and reported as diagnostics; the remaining rules keep their order.

use crate::error::ConfigurationError;
use crate::rule::{RuleName, RuleSpec};

/// Output of parsing one rule specification
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedRules {
    /// Recognised rules in left-to-right order
    pub rules: Vec<RuleSpec>,
    /// Diagnostics for every token that was dropped
    pub diagnostics: Vec<ConfigurationError>,
}

impl ParsedRules {
    fn with_rule(mut self, rule: RuleSpec) -> Self {
        self.rules.push(rule);
        self
    }

    fn with_diagnostic(mut self, diagnostic: ConfigurationError) -> Self {
        tracing::warn!(%diagnostic, "dropping rule token");
        self.diagnostics.push(diagnostic);
        self
    }

    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Parses raw rule specifications into ordered rule invocations
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleParser;

impl RuleParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse a raw specification such as `trim|required|min_length[5]`
    pub fn parse(&self, input: &str) -> ParsedRules {
        input
            .split('|')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .fold(ParsedRules::default(), |parsed, token| {
                match parse_token(token) {
                    Ok(rule) => parsed.with_rule(rule),
                    Err(diagnostic) => parsed.with_diagnostic(diagnostic),
                }
            })
    }
}

/// Convenience wrapper around [`RuleParser::parse`]
pub fn parse_rules(input: &str) -> ParsedRules {
    RuleParser::new().parse(input)
}

fn malformed(token: &str, reason: &'static str) -> ConfigurationError {
    ConfigurationError::MalformedToken {
        token: token.to_string(),
        reason,
    }
}

/// Split a single token into its name and optional parameter
fn split_token(token: &str) -> Result<(&str, Option<&str>), ConfigurationError> {
    if let Some(open) = token.find('[') {
        let close = matching_bracket(token, open)
            .ok_or_else(|| malformed(token, "unterminated `[`"))?;

        if close != token.len() - 1 {
            return Err(malformed(token, "unexpected text after `]`"));
        }

        return Ok((&token[..open], Some(&token[open + 1..close])));
    }

    if token.contains(']') {
        return Err(malformed(token, "`]` without a matching `[`"));
    }

    match token.split_once(':') {
        Some((name, parameter)) => Ok((name, Some(parameter))),
        None => Ok((token, None)),
    }
}

/// Byte index of the `]` that closes the `[` at `open`, counting nesting
fn matching_bracket(token: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;

    for (offset, c) in token[open..].char_indices() {
        match c {
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + offset);
                }
            }
            _ => {}
        }
    }

    None
}

fn parse_token(token: &str) -> Result<RuleSpec, ConfigurationError> {
    let (name, parameter) = split_token(token)?;
    let name = name.trim();

    if name.is_empty() {
        return Err(malformed(token, "missing rule name"));
    }

    let rule = RuleName::from_keyword(name)
        .ok_or_else(|| ConfigurationError::UnknownRule(name.to_string()))?;

    Ok(RuleSpec {
        name: rule,
        parameter: parameter.map(str::to_string),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn names(parsed: &ParsedRules) -> Vec<RuleName> {
        parsed.rules.iter().map(|r| r.name).collect()
    }

    #[test]
    fn test_parse_preserves_order() {
        let parsed = parse_rules("trim|required|email");
        assert_eq!(
            names(&parsed),
            vec![RuleName::Trim, RuleName::Required, RuleName::Email]
        );
        assert!(parsed.is_clean());
    }

    #[test]
    fn test_parse_parameters() {
        let parsed = parse_rules("required|min_length[5]|max_length[12]");
        assert_eq!(
            parsed.rules,
            vec![
                RuleSpec::bare(RuleName::Required),
                RuleSpec::with_parameter(RuleName::MinLength, "5"),
                RuleSpec::with_parameter(RuleName::MaxLength, "12"),
            ]
        );
    }

    #[test]
    fn test_colon_parameter_syntax() {
        let parsed = parse_rules("min_length:5|max_length:12");
        assert_eq!(
            parsed.rules,
            vec![
                RuleSpec::with_parameter(RuleName::MinLength, "5"),
                RuleSpec::with_parameter(RuleName::MaxLength, "12"),
            ]
        );
    }

    #[test]
    fn test_nested_brackets_stay_in_parameter() {
        let parsed = parse_rules("matches[input[name=password]]");
        assert_eq!(
            parsed.rules,
            vec![RuleSpec::with_parameter(
                RuleName::Matches,
                "input[name=password]"
            )]
        );
    }

    #[test]
    fn test_empty_parameter_is_kept_for_catalog() {
        let parsed = parse_rules("min_length[]");
        assert_eq!(
            parsed.rules,
            vec![RuleSpec::with_parameter(RuleName::MinLength, "")]
        );
    }

    #[test]
    fn test_malformed_tokens_are_dropped_in_place() {
        let parsed = parse_rules("required|min_length[5|email|max_length[3]x|]|[4]");
        assert_eq!(names(&parsed), vec![RuleName::Required, RuleName::Email]);
        assert_eq!(parsed.diagnostics.len(), 4);
        assert!(parsed
            .diagnostics
            .iter()
            .all(|d| matches!(d, ConfigurationError::MalformedToken { .. })));
    }

    #[test]
    fn test_unknown_rules_are_dropped() {
        let parsed = parse_rules("required|uppercase|email");
        assert_eq!(names(&parsed), vec![RuleName::Required, RuleName::Email]);
        assert_eq!(
            parsed.diagnostics,
            vec![ConfigurationError::UnknownRule("uppercase".to_string())]
        );
    }

    #[test]
    fn test_empty_tokens_and_whitespace() {
        let parsed = parse_rules(" required || email | ");
        assert_eq!(names(&parsed), vec![RuleName::Required, RuleName::Email]);
        assert!(parsed.is_clean());

        assert_eq!(parse_rules(""), ParsedRules::default());
    }

    #[test]
    fn test_duplicate_rules_are_kept() {
        let parsed = parse_rules("trim|required|trim");
        assert_eq!(
            names(&parsed),
            vec![RuleName::Trim, RuleName::Required, RuleName::Trim]
        );
    }
}
