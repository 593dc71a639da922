//! Cross-field references for the `matches` rule

use crate::error::ConfigurationError;

/// Snapshot of the field a reference resolved to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferencedField {
    pub declared_name: Option<String>,
    pub value: String,
}

impl ReferencedField {
    pub fn new(declared_name: Option<impl Into<String>>, value: impl Into<String>) -> Self {
        Self {
            declared_name: declared_name.map(Into::into),
            value: value.into(),
        }
    }
}

/// Resolves a reference string to another field within the same scope
pub trait FieldLookup {
    fn resolve(&self, reference: &str) -> Option<ReferencedField>;
}

impl<F> FieldLookup for F
where
    F: Fn(&str) -> Option<ReferencedField>,
{
    fn resolve(&self, reference: &str) -> Option<ReferencedField> {
        self(reference)
    }
}

/// Lookup for values validated outside any scope; nothing resolves
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLookup;

impl FieldLookup for NoLookup {
    fn resolve(&self, _reference: &str) -> Option<ReferencedField> {
        None
    }
}

/// Resolve a `matches` reference to a named field
///
/// Returns the referenced field's declared name and value. A reference that
/// resolves to nothing, or to a field without a name, is a configuration
/// problem rather than a validation failure.
pub fn resolve_named(
    lookup: &dyn FieldLookup,
    reference: &str,
) -> Result<(String, String), ConfigurationError> {
    let field = lookup
        .resolve(reference)
        .ok_or_else(|| ConfigurationError::UnresolvedReference(reference.to_string()))?;

    match field.declared_name {
        Some(name) if !name.is_empty() => Ok((name, field.value)),
        _ => Err(ConfigurationError::UnnamedReference(reference.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(reference: &str) -> Option<ReferencedField> {
        match reference {
            "#password" => Some(ReferencedField::new(Some("password"), "hunter22")),
            "#anonymous" => Some(ReferencedField::new(None::<String>, "hunter22")),
            "#blank" => Some(ReferencedField::new(Some(""), "hunter22")),
            _ => None,
        }
    }

    #[test]
    fn test_resolves_named_field() {
        assert_eq!(
            resolve_named(&lookup, "#password"),
            Ok(("password".to_string(), "hunter22".to_string()))
        );
    }

    #[test]
    fn test_unresolved_and_unnamed() {
        assert_eq!(
            resolve_named(&lookup, "#missing"),
            Err(ConfigurationError::UnresolvedReference("#missing".to_string()))
        );
        assert_eq!(
            resolve_named(&lookup, "#anonymous"),
            Err(ConfigurationError::UnnamedReference("#anonymous".to_string()))
        );
        assert_eq!(
            resolve_named(&lookup, "#blank"),
            Err(ConfigurationError::UnnamedReference("#blank".to_string()))
        );
        assert!(resolve_named(&NoLookup, "#password").is_err());
    }
}
