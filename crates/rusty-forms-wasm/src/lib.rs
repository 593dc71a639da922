//! rusty-forms WASM
//!
//! Browser bindings for rusty-forms. Forms opt in through attributes
//! (`data-validate-on-submit`, `data-validate-on-blur`); `attachAll` wires
//! every opted-in form in the page to one shared controller.
//!
//! ```javascript
//! import init, { attachAll, validateValue } from './rusty_forms_wasm.js';
//!
//! await init();
//! attachAll();
//!
//! const outcome = validateValue('required|email', 'user@example.com', 'email');
//! ```

pub mod dom;
pub mod listeners;

use std::cell::RefCell;
use std::rc::Rc;

use rusty_forms::{FormOrchestrator, TriggerController, ValidationConfig, ValidationOutcome};
use rusty_forms_validation::{FieldDescriptor, FieldKind, FieldState, FieldValidator, NoLookup};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use web_sys::{console, Element};

pub use dom::DomAdapter;
pub use listeners::SharedController;

/// Set panic hook for better error messages in the browser
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Field outcome returned to JavaScript
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct FieldSummary {
    pub name: Option<String>,
    #[serde(flatten)]
    pub outcome: ValidationOutcome,
}

/// Form outcome returned to JavaScript
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct FormSummary {
    pub valid: bool,
    pub fields: Vec<FieldSummary>,
}

fn config_from(value: JsValue) -> Result<ValidationConfig, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(ValidationConfig::default());
    }
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsValue::from_str(&format!("Failed to parse config: {}", e)))
}

fn controller(config: ValidationConfig) -> SharedController {
    let orchestrator = FormOrchestrator::new(DomAdapter::new(), config);
    Rc::new(RefCell::new(TriggerController::new(orchestrator)))
}

/// Wire one form's submit and focus-loss listeners
///
/// Returns `false` when the form has not opted into validation.
#[wasm_bindgen(js_name = attachForm)]
pub fn attach_form(form: &Element, config: JsValue) -> Result<bool, JsValue> {
    listeners::attach(&controller(config_from(config)?), form)
}

/// Wire every opted-in form in the document
///
/// Returns the number of forms attached.
#[wasm_bindgen(js_name = attachAll)]
pub fn attach_all(config: JsValue) -> Result<u32, JsValue> {
    let config = config_from(config)?;
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| JsValue::from_str("rusty-forms: no document available"))?;

    let selector = format!(
        "form[{}], form[{}]",
        config.attributes.on_submit, config.attributes.on_blur
    );
    let forms = document.query_selector_all(&selector)?;
    let shared = controller(config);

    let mut attached = 0;
    for i in 0..forms.length() {
        let Some(form) = forms.get(i).and_then(|node| node.dyn_into::<Element>().ok()) else {
            continue;
        };
        if listeners::attach(&shared, &form)? {
            attached += 1;
        }
    }

    Ok(attached)
}

/// Validate a form once and apply its feedback
///
/// Does not submit and does not touch the submit controls.
#[wasm_bindgen(js_name = validateForm)]
pub fn validate_form(form: &Element, config: JsValue) -> Result<JsValue, JsValue> {
    let mut orchestrator = FormOrchestrator::new(DomAdapter::new(), config_from(config)?);
    let outcome = orchestrator
        .validate_form(form)
        .map_err(|e| JsValue::from_str(&format!("rusty-forms: {e}")))?;
    listeners::warn_diagnostics(&outcome);

    let summary = FormSummary {
        valid: outcome.valid,
        fields: outcome
            .fields
            .into_iter()
            .map(|report| FieldSummary {
                name: report.field.declared_name,
                outcome: report.outcome,
            })
            .collect(),
    };
    Ok(serde_wasm_bindgen::to_value(&summary)?)
}

/// Validate a bare value against a rule specification
///
/// No host tree is involved, so `matches` cannot resolve its reference and
/// is reported as a configuration problem.
///
/// # Example (JavaScript)
/// ```javascript
/// const outcome = validateValue('trim|required|min_length[3]', '  ab ', 'user_name');
/// // { valid: false, errors: ['User name must be at least 3 characters.'], rewrittenValue: 'ab' }
/// ```
#[wasm_bindgen(js_name = validateValue)]
pub fn validate_value(rules: &str, value: &str, name: Option<String>) -> Result<JsValue, JsValue> {
    let outcome = check_value(rules, value, name);
    for diagnostic in &outcome.diagnostics {
        console::warn_1(&format!("rusty-forms: {diagnostic}").into());
    }
    Ok(serde_wasm_bindgen::to_value(&outcome)?)
}

fn check_value(rules: &str, value: &str, name: Option<String>) -> ValidationOutcome {
    let (field, mut diagnostics) = FieldDescriptor::parse((), name, FieldKind::Text, rules);
    let mut outcome = FieldValidator::new().validate(&field, &FieldState::text(value), &NoLookup);
    diagnostics.append(&mut outcome.diagnostics);
    outcome.diagnostics = diagnostics;
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn test_check_value() {
        let outcome = check_value("trim|required|min_length[3]", "  ab ", Some("user_name".into()));
        assert!(!outcome.valid);
        assert_eq!(outcome.errors, vec!["User name must be at least 3 characters.".to_string()]);
        assert_eq!(outcome.rewritten_value.as_deref(), Some("ab"));
    }

    #[wasm_bindgen_test]
    fn test_check_value_fails_open() {
        let outcome = check_value("bogus|matches[#other]", "x", None);
        assert!(outcome.valid);
        assert_eq!(outcome.diagnostics.len(), 2);
    }

    #[wasm_bindgen_test]
    fn test_config_defaults() {
        assert_eq!(config_from(JsValue::UNDEFINED).unwrap(), ValidationConfig::default());
        assert_eq!(config_from(JsValue::NULL).unwrap(), ValidationConfig::default());
    }
}
