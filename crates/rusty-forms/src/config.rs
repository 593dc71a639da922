// File: src/config.rs
// Purpose: Validation configuration parsing from rusty-forms.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Validation configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ValidationConfig {
    #[serde(default)]
    pub attributes: AttributeConfig,

    #[serde(default)]
    pub classes: ClassConfig,

    #[serde(default)]
    pub messages: MessageConfig,
}

/// Attribute names read from the host markup
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AttributeConfig {
    /// Rule specification on a field (default: "data-validate-validation")
    #[serde(default = "default_rules_attr")]
    pub rules: String,

    /// Form opt-in for submit-time validation
    #[serde(default = "default_on_submit_attr")]
    pub on_submit: String,

    /// Form opt-in for focus-loss validation
    #[serde(default = "default_on_blur_attr")]
    pub on_blur: String,

    /// Form opt-in for scrolling to the first invalid field
    #[serde(default = "default_scroll_attr")]
    pub scroll_to_error: String,

    /// Field attribute holding its declared name
    #[serde(default = "default_name_attr")]
    pub name: String,
}

/// Presentation classes
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClassConfig {
    /// Marker class on invalid fields
    #[serde(default = "default_invalid_class")]
    pub invalid: String,

    /// Class identifying the feedback element
    #[serde(default = "default_feedback_class")]
    pub feedback: String,

    /// Extra classes put on newly created feedback elements
    #[serde(default = "default_feedback_extra")]
    pub feedback_extra: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MessageConfig {
    /// Display name for fields without a declared name
    #[serde(default = "default_fallback_name")]
    pub fallback_name: String,
}

// Default values
fn default_rules_attr() -> String {
    "data-validate-validation".to_string()
}

fn default_on_submit_attr() -> String {
    "data-validate-on-submit".to_string()
}

fn default_on_blur_attr() -> String {
    "data-validate-on-blur".to_string()
}

fn default_scroll_attr() -> String {
    "data-validate-scroll-to-error".to_string()
}

fn default_name_attr() -> String {
    "name".to_string()
}

fn default_invalid_class() -> String {
    "is-invalid".to_string()
}

fn default_feedback_class() -> String {
    "invalid-feedback".to_string()
}

fn default_feedback_extra() -> Vec<String> {
    vec!["text-left".to_string()]
}

fn default_fallback_name() -> String {
    rusty_forms_validation::DEFAULT_FALLBACK_NAME.to_string()
}

impl Default for AttributeConfig {
    fn default() -> Self {
        Self {
            rules: default_rules_attr(),
            on_submit: default_on_submit_attr(),
            on_blur: default_on_blur_attr(),
            scroll_to_error: default_scroll_attr(),
            name: default_name_attr(),
        }
    }
}

impl Default for ClassConfig {
    fn default() -> Self {
        Self {
            invalid: default_invalid_class(),
            feedback: default_feedback_class(),
            feedback_extra: default_feedback_extra(),
        }
    }
}

impl Default for MessageConfig {
    fn default() -> Self {
        Self {
            fallback_name: default_fallback_name(),
        }
    }
}

impl ClassConfig {
    /// Every class a new feedback element receives
    pub fn feedback_classes(&self) -> Vec<String> {
        std::iter::once(self.feedback.clone())
            .chain(self.feedback_extra.iter().cloned())
            .collect()
    }
}

impl ValidationConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // Missing file means defaults
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read validation config: {:?}", path))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse validation config: {:?}", path))
    }

    /// Load configuration from default path (./rusty-forms.toml)
    pub fn load_default() -> Result<Self> {
        Self::load("rusty-forms.toml")
    }

    /// Parse configuration from TOML text; blank text yields defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        Ok(toml::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ValidationConfig::default();
        assert_eq!(config.attributes.rules, "data-validate-validation");
        assert_eq!(config.attributes.on_blur, "data-validate-on-blur");
        assert_eq!(config.classes.invalid, "is-invalid");
        assert_eq!(config.classes.feedback, "invalid-feedback");
        assert_eq!(config.messages.fallback_name, "This field");
    }

    #[test]
    fn test_empty_config() {
        let config = ValidationConfig::from_toml_str("  \n").unwrap();
        assert_eq!(config, ValidationConfig::default());
    }

    #[test]
    fn test_partial_sections() {
        let toml = r#"
            [classes]
            invalid = "error"
            feedback_extra = []

            [messages]
            fallback_name = "Value"
        "#;
        let config = ValidationConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.classes.invalid, "error");
        assert_eq!(config.classes.feedback, "invalid-feedback");
        assert_eq!(config.classes.feedback_classes(), vec!["invalid-feedback"]);
        assert_eq!(config.messages.fallback_name, "Value");
        assert_eq!(config.attributes, AttributeConfig::default());
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        assert!(ValidationConfig::from_toml_str("[classes\ninvalid = 1").is_err());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = ValidationConfig::load("does/not/exist/rusty-forms.toml").unwrap();
        assert_eq!(config, ValidationConfig::default());
    }
}
