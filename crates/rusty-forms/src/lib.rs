//! # rusty-forms
//!
//! Declarative form validation driven by rule attributes on form fields.
//!
//! Fields declare pipe-delimited rules (`required|email`, `min_length[8]`,
//! `matches[#password]`) in an attribute. The engine discovers them inside a
//! form, validates each field, attaches or clears error feedback, and gates
//! native submission on the conjunction of every field outcome.
//!
//! ## Quick Start
//!
//! ```rust
//! use rusty_forms::{Element, FormOrchestrator, MemoryDocument, SyntheticEvent, TriggerController};
//!
//! let mut doc = MemoryDocument::new();
//! let form = doc.append(
//!     doc.root(),
//!     Element::form().attr("data-validate-on-submit", "true"),
//! );
//! let group = doc.append(form, Element::div());
//! let email = doc.append(
//!     group,
//!     Element::input("text")
//!         .attr("name", "email")
//!         .attr("data-validate-validation", "required|email"),
//! );
//!
//! let mut controller = TriggerController::new(FormOrchestrator::with_defaults(doc));
//! let event = SyntheticEvent::new();
//! let report = controller.handle_submit(&form, &event).unwrap().unwrap();
//!
//! assert!(event.default_prevented());
//! assert!(!report.outcome.valid);
//! assert_eq!(report.outcome.error_count(), 2);
//! assert!(controller.orchestrator().adapter().has_class(email, "is-invalid"));
//! ```
//!
//! ## Architecture
//!
//! - **`rusty-forms-validation`** - rule grammar, rule catalog and per-field validation
//! - **`rusty-forms`** (this crate) - host adapter seam, orchestration and triggers
//! - **`rusty-forms-wasm`** - browser DOM adapter and event wiring
//!
//! The host UI is reached only through [`UiAdapter`]. [`MemoryDocument`]
//! implements it in memory for headless use and tests.

pub mod adapter;
pub mod config;
pub mod error;
pub mod memory;
pub mod orchestrator;
pub mod outcome;
pub mod trigger;

pub use rusty_forms_validation as validation;
pub use rusty_forms_validation::{
    ConfigurationError, FieldDescriptor, FieldKind, FieldState, FieldValidator, RuleName,
    RuleSpec, ValidationOutcome,
};

pub use adapter::{HostError, HostEvent, UiAdapter};
pub use config::{AttributeConfig, ClassConfig, MessageConfig, ValidationConfig};
pub use error::{EngineError, EngineResult};
pub use memory::{Element, MemoryDocument, NodeId, SyntheticEvent};
pub use orchestrator::FormOrchestrator;
pub use outcome::{FieldReport, FormOutcome};
pub use trigger::{SubmitDecision, SubmitReport, TriggerController, TriggerOptions, TriggerState};
