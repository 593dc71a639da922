//! rusty-forms Validation Core
//!
//! Rule grammar and rule evaluation for declarative field validation. A rule
//! specification is a pipe-delimited string attached to a field, such as
//! `trim|required|min_length[5]`. This crate parses it into ordered rule
//! invocations and applies them to a field's value. It knows nothing about
//! the UI tree the fields live in; the `rusty-forms` crate supplies that.
//!
//! ```rust
//! use rusty_forms_validation::{FieldDescriptor, FieldKind, FieldState, FieldValidator, NoLookup};
//!
//! let (field, _) = FieldDescriptor::parse((), Some("email".into()), FieldKind::Text, "required|email");
//! let outcome = FieldValidator::new().validate(&field, &FieldState::text(""), &NoLookup);
//!
//! assert_eq!(outcome.errors, vec![
//!     "Email is required".to_string(),
//!     "Email must be a valid email address.".to_string(),
//! ]);
//! ```

pub mod catalog;
pub mod email;
pub mod error;
pub mod field;
pub mod numeric;
pub mod parser;
pub mod reference;
pub mod rule;
pub mod string;
pub mod validator;

pub use catalog::{RuleCatalog, RuleContext, Verdict};
pub use email::is_valid_email;
pub use error::ConfigurationError;
pub use field::{display_name, FieldDescriptor, FieldKind, FieldState, DEFAULT_FALLBACK_NAME};
pub use numeric::is_numeric;
pub use parser::{parse_rules, ParsedRules, RuleParser};
pub use reference::{FieldLookup, NoLookup, ReferencedField};
pub use rule::{RuleName, RuleSpec};
pub use validator::{FieldValidator, ValidationOutcome};
