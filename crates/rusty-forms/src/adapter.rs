//! Host UI adapter
//!
//! The engine never touches a UI tree directly. Everything it reads or
//! writes goes through a [`UiAdapter`] injected at construction, so the
//! rule logic runs the same against a browser DOM, a server-side tree or the
//! in-memory [`MemoryDocument`](crate::memory::MemoryDocument).

use std::fmt;
use thiserror::Error;

use rusty_forms_validation::FieldKind;

/// Failures reported by the host UI
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    /// The host UI dependency is not present at all
    #[error("host UI is unavailable: {0}")]
    Unavailable(String),

    /// A node handle no longer refers to anything
    #[error("node {0} does not exist")]
    MissingNode(String),

    /// A host primitive failed
    #[error("host operation `{operation}` failed: {message}")]
    Operation {
        operation: &'static str,
        message: String,
    },
}

/// The native event behind a trigger; only cancellation is needed
pub trait HostEvent {
    fn prevent_default(&self);
}

/// Element lookup, attribute and value access, and presentation writes
///
/// Node handles are weak references into the host tree. Reads are
/// infallible and treat a vanished node as empty; writes report failures.
pub trait UiAdapter {
    type Node: Clone + PartialEq + fmt::Debug;

    /// Fails when the host UI dependency is missing; checked at pass start
    fn ensure_available(&self) -> Result<(), HostError> {
        Ok(())
    }

    /// Elements inside `scope` carrying `attribute`, in document order
    fn fields_in(&self, scope: &Self::Node, attribute: &str) -> Vec<Self::Node>;

    /// Resolve a reference string (e.g. `#password`) relative to `scope`
    fn lookup(&self, scope: &Self::Node, reference: &str) -> Option<Self::Node>;

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;

    fn value(&self, node: &Self::Node) -> String;

    fn set_value(&mut self, node: &Self::Node, value: &str) -> Result<(), HostError>;

    fn is_checked(&self, node: &Self::Node) -> bool;

    /// How rules should read the field
    fn field_kind(&self, node: &Self::Node) -> FieldKind;

    fn set_class(&mut self, node: &Self::Node, class: &str, present: bool)
        -> Result<(), HostError>;

    /// Feedback element owned by `field`: its next sibling, if that carries `class`
    fn find_feedback(&self, field: &Self::Node, class: &str) -> Option<Self::Node>;

    /// Insert an empty feedback element with `classes` directly after `field`
    fn create_feedback(
        &mut self,
        field: &Self::Node,
        classes: &[String],
    ) -> Result<Self::Node, HostError>;

    /// Replace the feedback content with `lines`, separated by line breaks
    fn set_feedback_lines(
        &mut self,
        feedback: &Self::Node,
        lines: &[String],
    ) -> Result<(), HostError>;

    fn remove(&mut self, node: &Self::Node) -> Result<(), HostError>;

    /// The form boundary enclosing `node`
    fn enclosing_form(&self, node: &Self::Node) -> Option<Self::Node>;

    /// Submit controls belonging to `form`
    fn submit_controls(&self, form: &Self::Node) -> Vec<Self::Node>;

    fn set_disabled(&mut self, node: &Self::Node, disabled: bool) -> Result<(), HostError>;

    /// Submit `form` natively, bypassing interception
    fn submit(&mut self, form: &Self::Node) -> Result<(), HostError>;

    fn scroll_into_view(&mut self, node: &Self::Node) -> Result<(), HostError>;
}
