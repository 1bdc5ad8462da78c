//! CLI command implementations

pub mod check_email;
pub mod config;
pub mod debounce;
pub mod format_number;
pub mod throttle;
