//! In-memory host UI tree
//!
//! A small element tree implementing [`UiAdapter`]. Useful for validating
//! forms outside a browser and for exercising the engine in tests. Native
//! submissions and scroll requests are recorded rather than performed.

use std::cell::Cell;
use std::collections::BTreeMap;
use std::fmt;

use rusty_forms_validation::FieldKind;

use crate::adapter::{HostError, HostEvent, UiAdapter};

/// Handle to an element in a [`MemoryDocument`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Element data: tag, attributes, classes and form state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub attributes: BTreeMap<String, String>,
    pub classes: Vec<String>,
    pub value: String,
    pub checked: bool,
    /// Text content, one entry per line
    pub lines: Vec<String>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    pub fn form() -> Self {
        Self::new("form")
    }

    pub fn div() -> Self {
        Self::new("div")
    }

    pub fn input(input_type: &str) -> Self {
        Self::new("input").attr("type", input_type)
    }

    pub fn submit_button() -> Self {
        Self::new("button").attr("type", "submit")
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    fn is_submit_control(&self) -> bool {
        let kind = self.attributes.get("type").map(String::as_str);
        match self.tag.as_str() {
            "button" => matches!(kind, None | Some("submit")),
            "input" => kind == Some("submit"),
            _ => false,
        }
    }
}

#[derive(Debug, Clone)]
struct Slot {
    element: Element,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// In-memory element tree
#[derive(Debug, Clone)]
pub struct MemoryDocument {
    slots: Vec<Slot>,
    submissions: Vec<NodeId>,
    scrolls: Vec<NodeId>,
    available: bool,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDocument {
    /// Create a document containing only a `body` root
    pub fn new() -> Self {
        Self {
            slots: vec![Slot {
                element: Element::new("body"),
                parent: None,
                children: Vec::new(),
            }],
            submissions: Vec::new(),
            scrolls: Vec::new(),
            available: true,
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Append `element` as the last child of `parent`
    ///
    /// # Panics
    ///
    /// Panics if `parent` does not belong to this document.
    pub fn append(&mut self, parent: NodeId, element: Element) -> NodeId {
        assert!(parent.0 < self.slots.len(), "unknown parent {parent}");

        let id = NodeId(self.slots.len());
        self.slots.push(Slot {
            element,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.slots[parent.0].children.push(id);
        id
    }

    pub fn element(&self, id: NodeId) -> Option<&Element> {
        self.slots.get(id.0).map(|slot| &slot.element)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.slots.get(id.0).and_then(|slot| slot.parent)
    }

    /// Simulate the user typing into a field
    pub fn fill(&mut self, id: NodeId, value: impl Into<String>) {
        if let Some(slot) = self.slots.get_mut(id.0) {
            slot.element.value = value.into();
        }
    }

    /// Simulate the user toggling a checkbox
    pub fn toggle(&mut self, id: NodeId, checked: bool) {
        if let Some(slot) = self.slots.get_mut(id.0) {
            slot.element.checked = checked;
        }
    }

    /// Change an attribute after construction
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) {
        if let Some(slot) = self.slots.get_mut(id.0) {
            slot.element
                .attributes
                .insert(name.to_string(), value.to_string());
        }
    }

    /// Simulate the host UI dependency going missing
    pub fn set_available(&mut self, available: bool) {
        self.available = available;
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.element(id).is_some_and(|e| e.has_class(class))
    }

    pub fn is_disabled(&self, id: NodeId) -> bool {
        self.element(id)
            .is_some_and(|e| e.attributes.contains_key("disabled"))
    }

    /// Whether `id` is still reachable from the root
    pub fn is_attached(&self, id: NodeId) -> bool {
        let mut current = id;
        loop {
            if current == self.root() {
                return true;
            }
            let Some(parent) = self.parent(current) else {
                return false;
            };
            if !self.slots[parent.0].children.contains(&current) {
                return false;
            }
            current = parent;
        }
    }

    /// Attached descendants of `scope` in document order
    pub fn descendants(&self, scope: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let Some(slot) = self.slots.get(scope.0) else {
            return out;
        };

        let mut stack: Vec<NodeId> = slot.children.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.slots[id.0].children.iter().rev().copied());
        }
        out
    }

    /// Attached elements under `scope` carrying `class`
    pub fn with_class(&self, scope: NodeId, class: &str) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|&id| self.slots[id.0].element.has_class(class))
            .collect()
    }

    /// Lines of the feedback element next to `field`, if any
    pub fn feedback_lines(&self, field: NodeId, class: &str) -> Option<Vec<String>> {
        self.find_feedback(&field, class)
            .and_then(|id| self.element(id))
            .map(|e| e.lines.clone())
    }

    /// Forms submitted natively, in order
    pub fn submissions(&self) -> &[NodeId] {
        &self.submissions
    }

    /// Elements scrolled into view, in order
    pub fn scrolled(&self) -> &[NodeId] {
        &self.scrolls
    }

    /// Attached element directly after `id` under the same parent
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let siblings = &self.slots[parent.0].children;
        let index = siblings.iter().position(|&child| child == id)?;
        siblings.get(index + 1).copied()
    }

    fn insert_after(&mut self, sibling: NodeId, element: Element) -> Result<NodeId, HostError> {
        let parent = self
            .parent(sibling)
            .ok_or_else(|| HostError::MissingNode(format!("container of {sibling}")))?;
        let index = self.slots[parent.0]
            .children
            .iter()
            .position(|&child| child == sibling)
            .ok_or_else(|| HostError::MissingNode(sibling.to_string()))?;

        let id = NodeId(self.slots.len());
        self.slots.push(Slot {
            element,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.slots[parent.0].children.insert(index + 1, id);
        Ok(id)
    }

    fn slot_mut(&mut self, id: NodeId) -> Result<&mut Slot, HostError> {
        self.slots
            .get_mut(id.0)
            .ok_or_else(|| HostError::MissingNode(id.to_string()))
    }

    fn matches_selector(element: &Element, reference: &str) -> bool {
        if let Some(id) = reference.strip_prefix('#') {
            return !id.is_empty() && element.attributes.get("id").map(String::as_str) == Some(id);
        }

        let Some(inner) = reference
            .strip_prefix('[')
            .and_then(|r| r.strip_suffix(']'))
        else {
            return false;
        };
        let Some((name, value)) = inner.split_once('=') else {
            return false;
        };
        let value = value.trim_matches(|c| c == '"' || c == '\'');

        element.attributes.get(name.trim()).map(String::as_str) == Some(value)
    }
}

impl UiAdapter for MemoryDocument {
    type Node = NodeId;

    fn ensure_available(&self) -> Result<(), HostError> {
        if self.available {
            Ok(())
        } else {
            Err(HostError::Unavailable("memory document is offline".to_string()))
        }
    }

    fn fields_in(&self, scope: &NodeId, attribute: &str) -> Vec<NodeId> {
        self.descendants(*scope)
            .into_iter()
            .filter(|&id| self.slots[id.0].element.attributes.contains_key(attribute))
            .collect()
    }

    fn lookup(&self, scope: &NodeId, reference: &str) -> Option<NodeId> {
        let reference = reference.trim();
        self.descendants(*scope)
            .into_iter()
            .find(|&id| Self::matches_selector(&self.slots[id.0].element, reference))
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        self.element(*node)?.attributes.get(name).cloned()
    }

    fn value(&self, node: &NodeId) -> String {
        self.element(*node)
            .map(|e| e.value.clone())
            .unwrap_or_default()
    }

    fn set_value(&mut self, node: &NodeId, value: &str) -> Result<(), HostError> {
        self.slot_mut(*node)?.element.value = value.to_string();
        Ok(())
    }

    fn is_checked(&self, node: &NodeId) -> bool {
        self.element(*node).is_some_and(|e| e.checked)
    }

    fn field_kind(&self, node: &NodeId) -> FieldKind {
        self.element(*node)
            .map(|e| FieldKind::from_markup(&e.tag, e.attributes.get("type").map(String::as_str)))
            .unwrap_or_default()
    }

    fn set_class(&mut self, node: &NodeId, class: &str, present: bool) -> Result<(), HostError> {
        let element = &mut self.slot_mut(*node)?.element;
        if present {
            if !element.has_class(class) {
                element.classes.push(class.to_string());
            }
        } else {
            element.classes.retain(|c| c != class);
        }
        Ok(())
    }

    fn find_feedback(&self, field: &NodeId, class: &str) -> Option<NodeId> {
        self.next_sibling(*field)
            .filter(|&id| self.slots[id.0].element.has_class(class))
    }

    fn create_feedback(&mut self, field: &NodeId, classes: &[String]) -> Result<NodeId, HostError> {
        let mut element = Element::div();
        element.classes = classes.to_vec();
        self.insert_after(*field, element)
    }

    fn set_feedback_lines(&mut self, feedback: &NodeId, lines: &[String]) -> Result<(), HostError> {
        self.slot_mut(*feedback)?.element.lines = lines.to_vec();
        Ok(())
    }

    fn remove(&mut self, node: &NodeId) -> Result<(), HostError> {
        let parent = self
            .slot_mut(*node)?
            .parent
            .take()
            .ok_or_else(|| HostError::Operation {
                operation: "remove",
                message: format!("{node} has no parent"),
            })?;
        self.slots[parent.0].children.retain(|child| child != node);
        Ok(())
    }

    fn enclosing_form(&self, node: &NodeId) -> Option<NodeId> {
        let mut current = self.parent(*node);
        while let Some(id) = current {
            if self.slots[id.0].element.tag == "form" {
                return Some(id);
            }
            current = self.parent(id);
        }
        None
    }

    fn submit_controls(&self, form: &NodeId) -> Vec<NodeId> {
        self.descendants(*form)
            .into_iter()
            .filter(|&id| self.slots[id.0].element.is_submit_control())
            .collect()
    }

    fn set_disabled(&mut self, node: &NodeId, disabled: bool) -> Result<(), HostError> {
        let attributes = &mut self.slot_mut(*node)?.element.attributes;
        if disabled {
            attributes.insert("disabled".to_string(), String::new());
        } else {
            attributes.remove("disabled");
        }
        Ok(())
    }

    fn submit(&mut self, form: &NodeId) -> Result<(), HostError> {
        self.slot_mut(*form)?;
        self.submissions.push(*form);
        Ok(())
    }

    fn scroll_into_view(&mut self, node: &NodeId) -> Result<(), HostError> {
        self.slot_mut(*node)?;
        self.scrolls.push(*node);
        Ok(())
    }
}

/// A host event that records whether it was cancelled
#[derive(Debug, Default)]
pub struct SyntheticEvent {
    prevented: Cell<bool>,
}

impl SyntheticEvent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn default_prevented(&self) -> bool {
        self.prevented.get()
    }
}

impl HostEvent for SyntheticEvent {
    fn prevent_default(&self) {
        self.prevented.set(true);
    }
}
