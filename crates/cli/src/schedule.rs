//! Invocation schedules and their replay through a limiter
//!
//! A schedule is a list of millisecond offsets from the start of a run.
//! Replaying it invokes the limiter at each offset and records when the
//! wrapped function actually ran.

use anyhow::{Context, Result};
use limiter::{debounce, throttle, RateLimit};
use parking_lot::Mutex;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{sleep, sleep_until, Instant};
use tracing::{debug, info};

/// Invocation offsets in milliseconds, non-decreasing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    offsets_ms: Vec<u64>,
}

impl Schedule {
    pub fn new(offsets_ms: Vec<u64>) -> Result<Self> {
        if offsets_ms.is_empty() {
            anyhow::bail!("Schedule needs at least one invocation");
        }
        if let Some(pair) = offsets_ms.windows(2).find(|w| w[1] < w[0]) {
            anyhow::bail!(
                "Schedule must not go back in time ({}ms after {}ms)",
                pair[1],
                pair[0]
            );
        }
        Ok(Self { offsets_ms })
    }

    pub fn offsets_ms(&self) -> &[u64] {
        &self.offsets_ms
    }

    pub fn len(&self) -> usize {
        self.offsets_ms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets_ms.is_empty()
    }

    fn last_ms(&self) -> u64 {
        self.offsets_ms.last().copied().unwrap_or(0)
    }
}

impl FromStr for Schedule {
    type Err = anyhow::Error;

    /// Parse "0,30,60" (whitespace around entries is ignored)
    fn from_str(s: &str) -> Result<Self> {
        let offsets = s
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| {
                part.parse::<u64>()
                    .with_context(|| format!("Invalid offset '{}': expected milliseconds", part))
            })
            .collect::<Result<Vec<_>>>()?;
        Self::new(offsets)
    }
}

/// One execution of the wrapped function
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Firing {
    /// Index of the invocation whose arguments were delivered
    pub invocation: usize,
    /// Offset from the start of the run
    pub at_ms: u64,
}

/// Outcome of a replay
#[derive(Debug, Clone)]
pub struct Report {
    pub policy: &'static str,
    pub window: Duration,
    pub schedule: Schedule,
    pub firings: Vec<Firing>,
}

impl Report {
    /// The firing that carried a given invocation's arguments, if any
    pub fn firing_for(&self, invocation: usize) -> Option<&Firing> {
        self.firings.iter().find(|f| f.invocation == invocation)
    }
}

type Recorder = Arc<Mutex<Vec<Firing>>>;

fn recording_fn(start: Instant, log: Recorder) -> impl Fn(usize) + Send + Sync + 'static {
    move |invocation| {
        let at_ms = start.elapsed().as_millis() as u64;
        debug!(invocation, at_ms, "wrapped function ran");
        log.lock().push(Firing { invocation, at_ms });
    }
}

async fn drive<L: RateLimit<usize>>(limiter: &L, schedule: &Schedule, start: Instant) {
    for (invocation, &offset) in schedule.offsets_ms().iter().enumerate() {
        sleep_until(start + Duration::from_millis(offset)).await;
        debug!(policy = limiter.policy(), invocation, offset, "invoking");
        limiter.invoke(invocation);
    }
}

/// Replay `schedule` through a throttle with the given cooldown
pub async fn replay_throttle(schedule: &Schedule, interval: Duration) -> Report {
    let start = Instant::now();
    let log: Recorder = Arc::default();
    let throttled = throttle(recording_fn(start, log.clone()), interval);

    drive(&throttled, schedule, start).await;

    let firings = log.lock().clone();
    info!(ran = firings.len(), total = schedule.len(), "throttle replay finished");
    Report {
        policy: "throttle",
        window: interval,
        schedule: schedule.clone(),
        firings,
    }
}

/// Replay `schedule` through a debounce and wait for the trailing call
pub async fn replay_debounce(schedule: &Schedule, delay: Duration) -> Report {
    let start = Instant::now();
    let log: Recorder = Arc::default();
    let debounced = debounce(recording_fn(start, log.clone()), delay);

    drive(&debounced, schedule, start).await;

    sleep_until(start + Duration::from_millis(schedule.last_ms()) + delay).await;
    while debounced.is_pending() {
        sleep(Duration::from_millis(1)).await;
    }

    let firings = log.lock().clone();
    info!(ran = firings.len(), total = schedule.len(), "debounce replay finished");
    Report {
        policy: "debounce",
        window: delay,
        schedule: schedule.clone(),
        firings,
    }
}
