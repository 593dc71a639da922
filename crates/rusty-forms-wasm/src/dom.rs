//! Browser DOM adapter

use rusty_forms::{FieldKind, HostError, UiAdapter};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, HtmlFormElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement,
    NodeList,
};

const SUBMIT_CONTROLS: &str = "button[type=\"submit\"], input[type=\"submit\"]";

/// [`UiAdapter`] over the page's live DOM
#[derive(Debug, Clone, Default)]
pub struct DomAdapter {
    document: Option<Document>,
}

impl DomAdapter {
    /// Bind to the current window's document, if there is one
    pub fn new() -> Self {
        Self {
            document: web_sys::window().and_then(|window| window.document()),
        }
    }

    fn document(&self) -> Result<&Document, HostError> {
        self.document
            .as_ref()
            .ok_or_else(|| HostError::Unavailable("no document in this context".to_string()))
    }
}

fn js_error(operation: &'static str) -> impl Fn(JsValue) -> HostError {
    move |value| HostError::Operation {
        operation,
        message: value
            .as_string()
            .unwrap_or_else(|| format!("{value:?}")),
    }
}

fn elements(list: NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

impl UiAdapter for DomAdapter {
    type Node = Element;

    fn ensure_available(&self) -> Result<(), HostError> {
        self.document().map(|_| ())
    }

    fn fields_in(&self, scope: &Element, attribute: &str) -> Vec<Element> {
        scope
            .query_selector_all(&format!("[{attribute}]"))
            .map(elements)
            .unwrap_or_default()
    }

    fn lookup(&self, scope: &Element, reference: &str) -> Option<Element> {
        // an invalid selector resolves to nothing
        scope.query_selector(reference.trim()).ok().flatten()
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn value(&self, node: &Element) -> String {
        if let Some(input) = node.dyn_ref::<HtmlInputElement>() {
            input.value()
        } else if let Some(area) = node.dyn_ref::<HtmlTextAreaElement>() {
            area.value()
        } else if let Some(select) = node.dyn_ref::<HtmlSelectElement>() {
            select.value()
        } else {
            node.get_attribute("value").unwrap_or_default()
        }
    }

    fn set_value(&mut self, node: &Element, value: &str) -> Result<(), HostError> {
        if let Some(input) = node.dyn_ref::<HtmlInputElement>() {
            input.set_value(value);
        } else if let Some(area) = node.dyn_ref::<HtmlTextAreaElement>() {
            area.set_value(value);
        } else if let Some(select) = node.dyn_ref::<HtmlSelectElement>() {
            select.set_value(value);
        } else {
            node.set_attribute("value", value)
                .map_err(js_error("setAttribute"))?;
        }
        Ok(())
    }

    fn is_checked(&self, node: &Element) -> bool {
        node.dyn_ref::<HtmlInputElement>()
            .is_some_and(HtmlInputElement::checked)
    }

    fn field_kind(&self, node: &Element) -> FieldKind {
        FieldKind::from_markup(
            &node.tag_name().to_ascii_lowercase(),
            node.get_attribute("type").as_deref(),
        )
    }

    fn set_class(&mut self, node: &Element, class: &str, present: bool) -> Result<(), HostError> {
        let classes = node.class_list();
        if present {
            classes.add_1(class).map_err(js_error("classList.add"))
        } else {
            classes.remove_1(class).map_err(js_error("classList.remove"))
        }
    }

    fn find_feedback(&self, field: &Element, class: &str) -> Option<Element> {
        field
            .next_element_sibling()
            .filter(|sibling| sibling.class_list().contains(class))
    }

    fn create_feedback(&mut self, field: &Element, classes: &[String]) -> Result<Element, HostError> {
        let container = field
            .parent_node()
            .ok_or_else(|| HostError::MissingNode("field container".to_string()))?;

        let feedback = self
            .document()?
            .create_element("div")
            .map_err(js_error("createElement"))?;
        feedback.set_class_name(&classes.join(" "));
        container
            .insert_before(&feedback, field.next_sibling().as_ref())
            .map_err(js_error("insertBefore"))?;

        Ok(feedback)
    }

    fn set_feedback_lines(&mut self, feedback: &Element, lines: &[String]) -> Result<(), HostError> {
        let document = self.document()?;
        feedback.set_text_content(None);

        for (i, line) in lines.iter().enumerate() {
            if i > 0 {
                let br = document
                    .create_element("br")
                    .map_err(js_error("createElement"))?;
                feedback.append_child(&br).map_err(js_error("appendChild"))?;
            }
            let text = document.create_text_node(line);
            feedback.append_child(&text).map_err(js_error("appendChild"))?;
        }

        Ok(())
    }

    fn remove(&mut self, node: &Element) -> Result<(), HostError> {
        node.remove();
        Ok(())
    }

    fn enclosing_form(&self, node: &Element) -> Option<Element> {
        node.closest("form").ok().flatten()
    }

    fn submit_controls(&self, form: &Element) -> Vec<Element> {
        form.query_selector_all(SUBMIT_CONTROLS)
            .map(elements)
            .unwrap_or_default()
    }

    fn set_disabled(&mut self, node: &Element, disabled: bool) -> Result<(), HostError> {
        if disabled {
            node.set_attribute("disabled", "")
                .map_err(js_error("setAttribute"))
        } else {
            node.remove_attribute("disabled")
                .map_err(js_error("removeAttribute"))
        }
    }

    fn submit(&mut self, form: &Element) -> Result<(), HostError> {
        form.dyn_ref::<HtmlFormElement>()
            .ok_or_else(|| HostError::Operation {
                operation: "submit",
                message: format!("<{}> is not a form", form.tag_name()),
            })?
            .submit()
            .map_err(js_error("submit"))
    }

    fn scroll_into_view(&mut self, node: &Element) -> Result<(), HostError> {
        node.scroll_into_view();
        Ok(())
    }
}
