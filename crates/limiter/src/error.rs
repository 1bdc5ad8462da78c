//! Error types for limiter construction

use thiserror::Error;

/// Errors raised while building a wrapper
///
/// The wrappers themselves never fail once built.
#[derive(Debug, Error)]
pub enum Error {
    /// Debounce timers need a tokio runtime to live on
    #[error("no tokio runtime available to host debounce timers")]
    NoRuntime(#[from] tokio::runtime::TryCurrentError),
}

/// Result type for limiter operations
pub type Result<T> = std::result::Result<T, Error>;
