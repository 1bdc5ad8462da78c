//! Configuration management command
//!
//! Provides CLI interface to view and edit the settings file.

use anyhow::{Context, Result};
use cli_lib::settings::{self, DURATION_RANGE_MS};
use owo_colors::OwoColorize;

/// List all configuration values
pub async fn run_list() -> Result<()> {
    let config = settings::load()?;
    let config_path = settings::config_file_path()
        .context("Could not determine config file path")?;

    println!("{}", "Settings".bold());
    println!("{}: {}\n", "Location".dimmed(), config_path.display().dimmed());

    println!("{}", "[limiter]".yellow());
    println!(
        "  {} = {} {}",
        "throttle_interval_ms".cyan(),
        config.limiter.throttle_interval_ms,
        format!("({}ms)", config.limiter.throttle_interval_ms).dimmed()
    );
    println!(
        "  {} = {} {}",
        "debounce_delay_ms".cyan(),
        config.limiter.debounce_delay_ms,
        format!("({}ms)", config.limiter.debounce_delay_ms).dimmed()
    );

    println!("\n{}", "[logging]".yellow());
    println!("  {} = {}", "level".cyan(), config.logging.level);

    println!("\n{}", "Valid Ranges:".bold());
    println!(
        "  throttle_interval_ms: {}-{}",
        DURATION_RANGE_MS.start(),
        DURATION_RANGE_MS.end()
    );
    println!(
        "  debounce_delay_ms: {}-{}",
        DURATION_RANGE_MS.start(),
        DURATION_RANGE_MS.end()
    );
    println!("  level: trace, debug, info, warn, error");

    Ok(())
}

/// Get a single configuration value
pub async fn run_get(key: &str) -> Result<()> {
    let config = settings::load()?;
    println!("{}", config.get(key)?);
    Ok(())
}

/// Set a configuration value
pub async fn run_set(key: &str, value: &str) -> Result<()> {
    let mut config = settings::load()?;

    // Validates before anything is written
    config.set(key, value)?;
    settings::save(&config)?;

    println!("{} {} = {}", "✓".green(), key.cyan(), config.get(key)?);
    Ok(())
}

/// Show the config file path and optionally create it
pub async fn run_path(create: bool) -> Result<()> {
    let config_path = settings::config_file_path()
        .context("Could not determine config file path")?;

    if create && settings::init_if_missing()? {
        println!("{} Created config file at: {}", "✓".green(), config_path.display());
    } else if config_path.exists() {
        println!("{}", config_path.display());
    } else {
        println!("{}", config_path.display());
        println!("{}", "File does not exist. Use --create to create it.".yellow());
    }

    Ok(())
}

/// Show example configuration
pub async fn run_example() -> Result<()> {
    print!("{}", settings::example_config());
    Ok(())
}
