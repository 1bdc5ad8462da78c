//! Replay a schedule through a debounce

use anyhow::Result;
use cli_lib::schedule::{self, Schedule};
use cli_lib::{settings, util};
use std::time::Duration;

pub async fn run(delay_ms: Option<u64>, at: &str) -> Result<()> {
    let schedule: Schedule = at.parse()?;
    let delay_ms = match delay_ms {
        Some(ms) => ms,
        None => settings::load()?.limiter.debounce_delay_ms,
    };

    let report = schedule::replay_debounce(&schedule, Duration::from_millis(delay_ms)).await;
    util::print_report(&report);
    Ok(())
}
