//! Shared utilities for CLI commands

use crate::schedule::Report;
use owo_colors::OwoColorize;
use std::time::Duration;

/// Format a duration in whole milliseconds ("150ms")
pub fn format_ms(duration: Duration) -> String {
    format!("{}ms", duration.as_millis())
}

/// Plain summary line listing the invocations that ran ("ran: #0 #4")
pub fn summary_line(report: &Report) -> String {
    let ran: Vec<String> = report
        .firings
        .iter()
        .map(|f| format!("#{}", f.invocation))
        .collect();

    if ran.is_empty() {
        "ran: none".to_string()
    } else {
        format!("ran: {}", ran.join(" "))
    }
}

/// Print a replay report, one line per invocation
pub fn print_report(report: &Report) {
    let skipped = match report.policy {
        "debounce" => "superseded",
        _ => "dropped",
    };

    println!(
        "{} {} {}",
        report.policy.bold(),
        format!("window={}", format_ms(report.window)).dimmed(),
        format!("({} invocations)", report.schedule.len()).dimmed()
    );

    for (i, &offset) in report.schedule.offsets_ms().iter().enumerate() {
        let label = format!("#{:<3} at {:>6}ms", i, offset);
        match report.firing_for(i) {
            Some(firing) => println!("  {}  {} {}ms", label, "ran at".green(), firing.at_ms),
            None => println!("  {}  {}", label, skipped.dimmed()),
        }
    }

    println!(
        "\n{} of {} invocations ran",
        report.firings.len(),
        report.schedule.len()
    );
    println!("{}", summary_line(report));
}
