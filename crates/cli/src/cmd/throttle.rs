//! Replay a schedule through a throttle

use anyhow::Result;
use cli_lib::schedule::{self, Schedule};
use cli_lib::{settings, util};
use std::time::Duration;

pub async fn run(interval_ms: Option<u64>, at: &str) -> Result<()> {
    let schedule: Schedule = at.parse()?;
    let interval_ms = match interval_ms {
        Some(ms) => ms,
        None => settings::load()?.limiter.throttle_interval_ms,
    };

    let report = schedule::replay_throttle(&schedule, Duration::from_millis(interval_ms)).await;
    util::print_report(&report);
    Ok(())
}
