// File: src/field.rs
// Purpose: Field descriptors, live field state and display names

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;
use crate::parser::RuleParser;
use crate::rule::RuleSpec;

/// Fallback display name for fields without a declared name
pub const DEFAULT_FALLBACK_NAME: &str = "This field";

/// Input kinds that change how rules read a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    #[default]
    Text,
    Checkbox,
    Other,
}

impl FieldKind {
    /// Classify a field from its element tag and `type` attribute
    pub fn from_markup(tag: &str, input_type: Option<&str>) -> Self {
        if tag.eq_ignore_ascii_case("textarea") {
            return FieldKind::Text;
        }

        if !tag.eq_ignore_ascii_case("input") {
            return FieldKind::Other;
        }

        match input_type.map(|t| t.trim().to_ascii_lowercase()).as_deref() {
            None | Some("") | Some("text") | Some("email") | Some("password")
            | Some("search") | Some("tel") | Some("url") => FieldKind::Text,
            Some("checkbox") => FieldKind::Checkbox,
            Some(_) => FieldKind::Other,
        }
    }
}

/// A validated field as seen during one pass
///
/// `identifier` refers into the host UI tree; the descriptor never owns the
/// element it describes.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor<Id> {
    pub identifier: Id,
    pub declared_name: Option<String>,
    pub kind: FieldKind,
    pub rules: Vec<RuleSpec>,
}

impl<Id> FieldDescriptor<Id> {
    pub fn new(
        identifier: Id,
        declared_name: Option<String>,
        kind: FieldKind,
        rules: Vec<RuleSpec>,
    ) -> Self {
        Self {
            identifier,
            declared_name,
            kind,
            rules,
        }
    }

    /// Build a descriptor by parsing a raw rule specification
    ///
    /// Parse diagnostics are returned alongside so callers can surface them.
    pub fn parse(
        identifier: Id,
        declared_name: Option<String>,
        kind: FieldKind,
        rule_spec: &str,
    ) -> (Self, Vec<ConfigurationError>) {
        let parsed = RuleParser::new().parse(rule_spec);
        (
            Self::new(identifier, declared_name, kind, parsed.rules),
            parsed.diagnostics,
        )
    }

    /// Human-readable name used in messages
    pub fn display_name(&self, fallback: &str) -> String {
        display_name(self.declared_name.as_deref(), fallback)
    }
}

/// Live state of a field read from the host at the start of its evaluation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldState {
    pub value: String,
    pub checked: bool,
}

impl FieldState {
    pub fn text(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            checked: false,
        }
    }

    pub fn checkbox(checked: bool) -> Self {
        Self {
            value: String::new(),
            checked,
        }
    }
}

/// Derive a display name: first character upper-cased, underscores to spaces
///
/// Missing or empty names fall back to `fallback`.
pub fn display_name(declared: Option<&str>, fallback: &str) -> String {
    let Some(name) = declared.filter(|n| !n.is_empty()) else {
        return fallback.to_string();
    };

    let mut chars = name.chars();
    let mut label = String::with_capacity(name.len());
    if let Some(first) = chars.next() {
        label.extend(first.to_uppercase());
    }
    label.push_str(chars.as_str());

    label.replace('_', " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::RuleName;
    use rstest::rstest;

    #[rstest]
    #[case(Some("email"), "Email")]
    #[case(Some("first_name"), "First name")]
    #[case(Some("_private"), " private")]
    #[case(Some("ñame"), "Ñame")]
    #[case(Some(""), "This field")]
    #[case(None, "This field")]
    fn test_display_name(#[case] declared: Option<&str>, #[case] expected: &str) {
        assert_eq!(display_name(declared, DEFAULT_FALLBACK_NAME), expected);
    }

    #[rstest]
    #[case("input", None, FieldKind::Text)]
    #[case("INPUT", Some("password"), FieldKind::Text)]
    #[case("input", Some("Checkbox"), FieldKind::Checkbox)]
    #[case("input", Some("number"), FieldKind::Other)]
    #[case("textarea", None, FieldKind::Text)]
    #[case("select", None, FieldKind::Other)]
    fn test_kind_from_markup(
        #[case] tag: &str,
        #[case] input_type: Option<&str>,
        #[case] expected: FieldKind,
    ) {
        assert_eq!(FieldKind::from_markup(tag, input_type), expected);
    }

    #[test]
    fn test_parse_descriptor() {
        let (field, diagnostics) = FieldDescriptor::parse(
            7usize,
            Some("user_email".to_string()),
            FieldKind::Text,
            "required|email|shout",
        );

        assert_eq!(field.identifier, 7);
        assert_eq!(
            field.rules,
            vec![
                RuleSpec::bare(RuleName::Required),
                RuleSpec::bare(RuleName::Email)
            ]
        );
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(field.display_name("Field"), "User email");
    }
}
