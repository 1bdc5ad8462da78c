//! Trailing-edge debouncing
//!
//! Every call restarts the wait. The wrapped function runs once, with the
//! arguments of the last call, after the calls go quiet for the full delay.

use crate::error::Result;
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, trace};

/// Wrap `func` so it runs only after `delay` of silence
///
/// Timers are spawned on the current tokio runtime.
///
/// # Panics
///
/// Panics when called outside a tokio runtime. Use [`try_debounce`] or
/// [`Debounced::with_handle`] to avoid that.
pub fn debounce<A, F>(func: F, delay: Duration) -> Debounced<A>
where
    A: Send + 'static,
    F: Fn(A) + Send + Sync + 'static,
{
    Debounced::with_handle(func, delay, Handle::current())
}

/// Like [`debounce`], but reports a missing runtime instead of panicking
pub fn try_debounce<A, F>(func: F, delay: Duration) -> Result<Debounced<A>>
where
    A: Send + 'static,
    F: Fn(A) + Send + Sync + 'static,
{
    let handle = Handle::try_current()?;
    Ok(Debounced::with_handle(func, delay, handle))
}

/// A debounced callable
///
/// At most one execution is pending per wrapper. Clones share it.
/// Dropping the wrapper does not cancel an execution that is already
/// scheduled.
pub struct Debounced<A> {
    inner: Arc<Inner<A>>,
}

struct Inner<A> {
    func: Arc<dyn Fn(A) + Send + Sync>,
    delay: Duration,
    /// Runtime hosting the timers
    runtime: Handle,
    /// Timer task for the pending execution
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl<A: Send + 'static> Debounced<A> {
    /// Create a debounced wrapper whose timers live on `runtime`
    pub fn with_handle<F>(func: F, delay: Duration, runtime: Handle) -> Self
    where
        F: Fn(A) + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(Inner {
                func: Arc::new(func),
                delay,
                runtime,
                pending: Mutex::new(None),
            }),
        }
    }

    /// Invoke the wrapper
    ///
    /// Cancels the pending execution, if any, and schedules `args` to be
    /// delivered `delay` from now.
    pub fn call(&self, args: A) {
        // None: the delay does not fit on the clock, so the call never fires
        let deadline = Instant::now().checked_add(self.inner.delay);
        let func = Arc::clone(&self.inner.func);

        let mut pending = self.inner.pending.lock();
        if let Some(previous) = pending.take() {
            if !previous.is_finished() {
                debug!("debounce: superseding pending call");
            }
            previous.abort();
        }

        *pending = Some(self.inner.runtime.spawn(async move {
            match deadline {
                Some(deadline) => sleep_until(deadline).await,
                None => std::future::pending::<()>().await,
            }
            trace!("debounce: running call");
            func(args);
        }));
    }
}

impl<A> Debounced<A> {
    /// Whether an execution is scheduled and has not run yet
    pub fn is_pending(&self) -> bool {
        self.inner
            .pending
            .lock()
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }

    /// Quiet period required before the wrapped function runs
    pub fn delay(&self) -> Duration {
        self.inner.delay
    }
}

impl<A> Clone for Debounced<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A> fmt::Debug for Debounced<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Debounced")
            .field("delay", &self.inner.delay)
            .field("pending", &self.is_pending())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use tokio::time::sleep;

    type Log<T> = Arc<Mutex<Vec<(u64, T)>>>;

    fn recorder<T: Send + 'static>(start: Instant) -> (Log<T>, impl Fn(T) + Send + Sync) {
        let log: Log<T> = Arc::new(Mutex::new(Vec::new()));
        let sink = log.clone();
        let func = move |v: T| {
            let at = (Instant::now() - start).as_millis() as u64;
            sink.lock().push((at, v));
        };
        (log, func)
    }

    #[tokio::test(start_paused = true)]
    async fn test_fires_once_after_last_call() {
        let start = Instant::now();
        let (log, func) = recorder(start);
        let debounced = debounce(func, Duration::from_millis(50));

        // Invoke at t = 0, 20, 40 then stop
        debounced.call("t0");
        sleep(Duration::from_millis(20)).await;
        debounced.call("t20");
        sleep(Duration::from_millis(20)).await;
        debounced.call("t40");

        sleep(Duration::from_millis(49)).await;
        assert!(log.lock().is_empty());
        assert!(debounced.is_pending());

        sleep(Duration::from_millis(200)).await;
        assert_eq!(*log.lock(), vec![(90, "t40")]);
        assert!(!debounced.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_steady_stream_never_fires() {
        let start = Instant::now();
        let (log, func) = recorder(start);
        let debounced = debounce(func, Duration::from_millis(50));

        for i in 0..20u32 {
            debounced.call(i);
            sleep(Duration::from_millis(30)).await;
        }
        assert!(log.lock().is_empty());

        // Stream stopped at t = 570 (last call), fires at 620
        sleep(Duration::from_millis(100)).await;
        assert_eq!(*log.lock(), vec![(620, 19)]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_separate_bursts_fire_separately() {
        let start = Instant::now();
        let (log, func) = recorder(start);
        let debounced = debounce(func, Duration::from_millis(50));

        debounced.call(1);
        debounced.call(2);
        sleep(Duration::from_millis(100)).await;

        debounced.call(3);
        sleep(Duration::from_millis(100)).await;

        assert_eq!(*log.lock(), vec![(50, 2), (150, 3)]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pending_call_survives_drop() {
        let start = Instant::now();
        let (log, func) = recorder(start);

        {
            let debounced = debounce(func, Duration::from_millis(10));
            debounced.call(7u8);
        }

        sleep(Duration::from_millis(20)).await;
        assert_eq!(*log.lock(), vec![(10, 7)]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_clones_share_pending_timer() {
        let start = Instant::now();
        let (log, func) = recorder(start);
        let a = debounce(func, Duration::from_millis(30));
        let b = a.clone();

        a.call('a');
        sleep(Duration::from_millis(10)).await;
        b.call('b');
        assert!(a.is_pending());

        sleep(Duration::from_millis(100)).await;
        assert_eq!(*log.lock(), vec![(40, 'b')]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_delay_collapses_same_tick_calls() {
        let start = Instant::now();
        let (log, func) = recorder(start);
        let debounced = debounce(func, Duration::ZERO);

        debounced.call(1u32);
        debounced.call(2u32);
        sleep(Duration::from_millis(1)).await;

        assert_eq!(*log.lock(), vec![(0, 2)]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reentrant_call_reschedules() {
        let start = Instant::now();
        let log: Log<u32> = Arc::new(Mutex::new(Vec::new()));
        let slot: Arc<Mutex<Option<Debounced<u32>>>> = Arc::new(Mutex::new(None));

        let sink = log.clone();
        let inner_slot = slot.clone();
        let debounced = debounce(
            move |v: u32| {
                sink.lock().push(((Instant::now() - start).as_millis() as u64, v));
                if v == 1 {
                    let again = inner_slot.lock().clone();
                    if let Some(again) = again {
                        again.call(2);
                    }
                }
            },
            Duration::from_millis(50),
        );
        *slot.lock() = Some(debounced.clone());

        debounced.call(1);
        sleep(Duration::from_millis(200)).await;

        assert_eq!(*log.lock(), vec![(50, 1), (100, 2)]);
        assert!(!debounced.is_pending());

        // Break the wrapper <-> closure cycle
        slot.lock().take();
    }

    #[tokio::test(start_paused = true)]
    async fn test_unbounded_delay_stays_pending() {
        let start = Instant::now();
        let (log, func) = recorder(start);
        let debounced = debounce(func, Duration::MAX);

        debounced.call(1u32);
        debounced.call(2u32);
        sleep(Duration::from_secs(365 * 24 * 60 * 60)).await;

        assert!(debounced.is_pending());
        assert!(log.lock().is_empty());
    }

    #[test]
    fn test_try_debounce_without_runtime() {
        let result = try_debounce(|_: ()| {}, Duration::from_millis(10));
        assert!(matches!(result, Err(Error::NoRuntime(_))));
    }

    #[test]
    fn test_explicit_runtime_handle() {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .unwrap();

        let hits = Arc::new(Mutex::new(Vec::new()));
        let sink = hits.clone();
        let debounced = Debounced::with_handle(
            move |v: u32| sink.lock().push(v),
            Duration::from_millis(5),
            runtime.handle().clone(),
        );

        debounced.call(1);
        debounced.call(2);
        assert_eq!(debounced.delay(), Duration::from_millis(5));

        runtime.block_on(async {
            tokio::time::sleep(Duration::from_millis(50)).await;
        });

        assert_eq!(*hits.lock(), vec![2]);
    }
}
