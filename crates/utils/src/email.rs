//! Email address shape check

use once_cell::sync::Lazy;
use regex::Regex;

/// Something, an `@`, something, a dot, something. No whitespace, one `@`.
static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// Check that `address` looks like an email address
///
/// This only checks the overall shape; it does not follow RFC 5322.
pub fn is_valid_email(address: &str) -> bool {
    EMAIL_PATTERN.is_match(address)
}
