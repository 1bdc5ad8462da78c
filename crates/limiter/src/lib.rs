//! Call-rate limiting wrappers
//!
//! This crate provides two policies for taming noisy call sites such as
//! scroll or input-change handlers:
//! - [`throttle`]: run the leading call of each window, drop the rest
//! - [`debounce`]: run once the calls have gone quiet for a delay
//!
//! Each wrapper owns its own state. Clones of a wrapper share that state.

pub mod debounce;
pub mod error;
pub mod throttle;

// Re-exports
pub use debounce::{debounce, try_debounce, Debounced};
pub use error::{Error, Result};
pub use throttle::{throttle, Throttled};

/// Common entry point for both policies
///
/// Lets a driver push invocations through either wrapper without caring
/// which policy sits behind it.
pub trait RateLimit<A> {
    /// Submit one invocation with its arguments
    fn invoke(&self, args: A);

    /// Name of the policy, for logs and reports
    fn policy(&self) -> &'static str;
}

impl<A> RateLimit<A> for Throttled<A> {
    fn invoke(&self, args: A) {
        self.call(args);
    }

    fn policy(&self) -> &'static str {
        "throttle"
    }
}

impl<A: Send + 'static> RateLimit<A> for Debounced<A> {
    fn invoke(&self, args: A) {
        self.call(args);
    }

    fn policy(&self) -> &'static str {
        "debounce"
    }
}
