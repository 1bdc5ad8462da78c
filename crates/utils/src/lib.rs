//! Small string helpers
//!
//! - Thousands grouping for numbers
//! - Email shape check

pub mod email;
pub mod number;

// Re-exports
pub use email::is_valid_email;
pub use number::{format_number, format_number_str};
