//! User settings stored as TOML
//!
//! Lives at `<config dir>/pacer/config.toml` unless `PACER_CONFIG` points
//! somewhere else. A missing file means defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Environment variable overriding the settings file location
pub const CONFIG_ENV: &str = "PACER_CONFIG";

/// Accepted range for both limiter durations, in milliseconds
pub const DURATION_RANGE_MS: std::ops::RangeInclusive<u64> = 1..=60_000;

/// Every key accepted by `pacer config get` and `pacer config set`
pub const KEYS: &[&str] = &[
    "limiter.throttle_interval_ms",
    "limiter.debounce_delay_ms",
    "logging.level",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub limiter: LimiterSettings,
    pub logging: LoggingSettings,
}

/// Default durations used when the command line leaves them out
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LimiterSettings {
    /// Throttle cooldown (default: 100ms)
    pub throttle_interval_ms: u64,
    /// Debounce quiet period (default: 50ms)
    pub debounce_delay_ms: u64,
}

impl Default for LimiterSettings {
    fn default() -> Self {
        Self {
            throttle_interval_ms: 100,
            debounce_delay_ms: 50,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// trace, debug, info, warn or error
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl Settings {
    /// Check every value against its accepted range
    pub fn validate(&self) -> Result<()> {
        if !DURATION_RANGE_MS.contains(&self.limiter.throttle_interval_ms) {
            anyhow::bail!(
                "limiter.throttle_interval_ms must be between {} and {} (got {})",
                DURATION_RANGE_MS.start(),
                DURATION_RANGE_MS.end(),
                self.limiter.throttle_interval_ms
            );
        }
        if !DURATION_RANGE_MS.contains(&self.limiter.debounce_delay_ms) {
            anyhow::bail!(
                "limiter.debounce_delay_ms must be between {} and {} (got {})",
                DURATION_RANGE_MS.start(),
                DURATION_RANGE_MS.end(),
                self.limiter.debounce_delay_ms
            );
        }
        self.log_level()?;
        Ok(())
    }

    /// Parsed logging level
    pub fn log_level(&self) -> Result<tracing::Level> {
        tracing::Level::from_str(&self.logging.level).map_err(|_| {
            anyhow::anyhow!(
                "logging.level must be one of trace, debug, info, warn, error (got '{}')",
                self.logging.level
            )
        })
    }

    /// Read a value by its dotted key
    pub fn get(&self, key: &str) -> Result<String> {
        let value = match key {
            "limiter.throttle_interval_ms" => self.limiter.throttle_interval_ms.to_string(),
            "limiter.debounce_delay_ms" => self.limiter.debounce_delay_ms.to_string(),
            "logging.level" => self.logging.level.clone(),
            _ => anyhow::bail!(
                "Unknown config key: {}. Use 'pacer config list' to see available keys.",
                key
            ),
        };
        Ok(value)
    }

    /// Set a value by its dotted key, then validate the result
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "limiter.throttle_interval_ms" => {
                self.limiter.throttle_interval_ms = value
                    .parse()
                    .context("Invalid value: must be a positive integer")?;
            }
            "limiter.debounce_delay_ms" => {
                self.limiter.debounce_delay_ms = value
                    .parse()
                    .context("Invalid value: must be a positive integer")?;
            }
            "logging.level" => {
                self.logging.level = value.to_lowercase();
            }
            _ => anyhow::bail!(
                "Unknown config key: {}. Use 'pacer config list' to see available keys.",
                key
            ),
        }

        self.validate().context("Invalid configuration value")
    }

    /// Parse and validate settings from TOML text
    pub fn from_toml(text: &str) -> Result<Self> {
        let settings: Settings = toml::from_str(text).context("Failed to parse settings")?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("Invalid settings in {}", path.display()))
    }

    /// Write settings to a specific file, creating parent directories
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let text = toml::to_string_pretty(self).context("Failed to serialize settings")?;
        std::fs::write(path, text).with_context(|| format!("Failed to write {}", path.display()))
    }
}

/// Location of the settings file
pub fn config_file_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|dir| dir.join("pacer").join("config.toml"))
}

/// Load settings, falling back to defaults when no file exists
pub fn load() -> Result<Settings> {
    match config_file_path() {
        Some(path) if path.exists() => Settings::load_from_file(&path),
        _ => Ok(Settings::default()),
    }
}

/// Save settings to the standard location
pub fn save(settings: &Settings) -> Result<()> {
    let path = config_file_path().context("Could not determine config file path")?;
    settings.save_to_file(&path)
}

/// Write a default settings file if none exists yet
///
/// Returns true if a file was created.
pub fn init_if_missing() -> Result<bool> {
    let path = config_file_path().context("Could not determine config file path")?;
    if path.exists() {
        return Ok(false);
    }
    Settings::default().save_to_file(&path)?;
    Ok(true)
}

/// Annotated example settings file
pub fn example_config() -> &'static str {
    r#"# pacer settings

[limiter]
# Throttle cooldown in milliseconds (1-60000)
throttle_interval_ms = 100
# Debounce quiet period in milliseconds (1-60000)
debounce_delay_ms = 50

[logging]
# trace, debug, info, warn or error
level = "warn"
"#
}
