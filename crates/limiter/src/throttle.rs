//! Leading-edge throttling
//!
//! The first call in a window runs right away on the caller's thread.
//! Every other call until the window closes is dropped, never queued.

use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, trace};

/// Wrap `func` so it runs at most once per `interval`
///
/// A zero interval suppresses nothing.
pub fn throttle<A, F>(func: F, interval: Duration) -> Throttled<A>
where
    F: Fn(A) + Send + Sync + 'static,
{
    Throttled::new(func, interval)
}

/// A throttled callable
///
/// Clones share the same cooldown, so handing a clone to several call
/// sites still yields one call per window overall.
pub struct Throttled<A> {
    inner: Arc<Inner<A>>,
}

struct Inner<A> {
    /// Wrapped callable
    func: Box<dyn Fn(A) + Send + Sync>,
    /// Cooldown length
    interval: Duration,
    /// Current cooldown
    cooldown: Mutex<Cooldown>,
}

#[derive(Debug, Clone, Copy)]
enum Cooldown {
    Idle,
    Until(Instant),
    /// The interval does not fit on the clock; never ends
    Forever,
}

impl Cooldown {
    fn starting_at(now: Instant, interval: Duration) -> Self {
        match now.checked_add(interval) {
            Some(until) => Cooldown::Until(until),
            None => Cooldown::Forever,
        }
    }

    fn is_active(&self, now: Instant) -> bool {
        match *self {
            Cooldown::Idle => false,
            Cooldown::Until(until) => now < until,
            Cooldown::Forever => true,
        }
    }
}

impl<A> Throttled<A> {
    /// Create a new throttled wrapper
    pub fn new<F>(func: F, interval: Duration) -> Self
    where
        F: Fn(A) + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(Inner {
                func: Box::new(func),
                interval,
                cooldown: Mutex::new(Cooldown::Idle),
            }),
        }
    }

    /// Invoke the wrapper
    ///
    /// Returns `true` if the wrapped function ran, `false` if the call
    /// fell inside a cooldown and was discarded.
    pub fn call(&self, args: A) -> bool {
        let now = Instant::now();

        {
            let mut cooldown = self.inner.cooldown.lock();
            if cooldown.is_active(now) {
                debug!(cooldown = ?*cooldown, "throttle: call dropped during cooldown");
                return false;
            }
            // Cooldown starts before `func` so reentrant calls land inside it
            *cooldown = Cooldown::starting_at(now, self.inner.interval);
        }

        trace!(interval_ms = self.inner.interval.as_millis() as u64, "throttle: running call");
        (self.inner.func)(args);
        true
    }

    /// Whether calls are currently being dropped
    pub fn is_cooling_down(&self) -> bool {
        self.inner.cooldown.lock().is_active(Instant::now())
    }

    /// Cooldown length
    pub fn interval(&self) -> Duration {
        self.inner.interval
    }
}

impl<A> Clone for Throttled<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A> fmt::Debug for Throttled<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Throttled")
            .field("interval", &self.inner.interval)
            .field("cooling_down", &self.is_cooling_down())
            .finish()
    }
}
