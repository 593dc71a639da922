//! Numeric literal validation

use once_cell::sync::Lazy;
use regex::Regex;

static NUMBER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?$")
        .expect("number pattern is valid")
});

/// Whether the value is an integer or floating point literal
///
/// The empty string is not numeric; `required` is a separate concern.
pub fn is_numeric(value: &str) -> bool {
    NUMBER_REGEX.is_match(value)
}
