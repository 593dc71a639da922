//! Email address validation

use once_cell::sync::Lazy;
use regex::Regex;

// Local part: dot-separated unquoted atoms, or a quoted string.
// Domain: bracketed IPv4 literal, or labels ending in a 2+ letter top label.
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"^(?:[^<>()\[\]\\.,;:\s@"]+(?:\.[^<>()\[\]\\.,;:\s@"]+)*|".+")@(?:\[[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\]|(?:[a-zA-Z0-9-]+\.)+[a-zA-Z]{2,})$"#,
    )
    .expect("email pattern is valid")
});

/// Validates an address against the RFC-822-lite pattern
///
/// The empty string is not an address.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("a@b.com")]
    #[case("user@example.com")]
    #[case("test.user@example.co.uk")]
    #[case("user+tag@example.com")]
    #[case("user_name@example-domain.com")]
    #[case("\"john doe\"@example.com")]
    #[case("root@[192.168.0.1]")]
    fn test_valid_emails(#[case] email: &str) {
        assert!(is_valid_email(email), "{email} should be valid");
    }

    #[rstest]
    #[case("")]
    #[case("@")]
    #[case("user@")]
    #[case("@example.com")]
    #[case("user@@example.com")]
    #[case("user@example")]
    #[case("user@.com")]
    #[case("user@example..com")]
    #[case("user@example.c")]
    #[case("user.@example.com")]
    #[case("us er@example.com")]
    #[case("user@[192.168.0]")]
    fn test_invalid_emails(#[case] email: &str) {
        assert!(!is_valid_email(email), "{email} should be invalid");
    }
}
