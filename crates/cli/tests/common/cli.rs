//! CLI command execution helpers
//!
//! Wraps the `pacer` binary with an isolated settings file and
//! convenient assertion methods.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::{Duration, Instant};
use tempfile::TempDir;

/// Scratch directory holding the settings file for one test
pub struct TestEnv {
    dir: TempDir,
}

impl TestEnv {
    pub fn new() -> Result<Self> {
        Ok(Self {
            dir: TempDir::new().context("Failed to create temp dir")?,
        })
    }

    /// Settings file the binary is pointed at (may not exist yet)
    pub fn config_path(&self) -> PathBuf {
        self.dir.path().join("config.toml")
    }

    /// Write raw TOML to the settings file
    pub fn write_config(&self, text: &str) -> Result<()> {
        std::fs::write(self.config_path(), text).context("Failed to write settings")
    }

    /// Command bound to this environment's settings file
    pub fn command(&self) -> PacerCommand {
        let mut cmd = PacerCommand::new(self.dir.path());
        cmd.env("PACER_CONFIG", &self.config_path().to_string_lossy());
        cmd
    }
}

/// CLI command builder with timing
pub struct PacerCommand {
    working_dir: PathBuf,
    args: Vec<String>,
    env: HashMap<String, String>,
}

impl PacerCommand {
    pub fn new(working_dir: impl AsRef<Path>) -> Self {
        Self {
            working_dir: working_dir.as_ref().to_path_buf(),
            args: Vec::new(),
            env: HashMap::new(),
        }
    }

    /// Add command arguments
    pub fn args(&mut self, args: &[&str]) -> &mut Self {
        self.args.extend(args.iter().map(|s| s.to_string()));
        self
    }

    /// Set environment variable
    pub fn env(&mut self, key: &str, value: &str) -> &mut Self {
        self.env.insert(key.to_string(), value.to_string());
        self
    }

    /// Execute command and return result with timing
    pub fn execute(&self) -> Result<CommandResult> {
        let start = Instant::now();

        let output = Command::new(env!("CARGO_BIN_EXE_pacer"))
            .args(&self.args)
            .current_dir(&self.working_dir)
            .envs(&self.env)
            .output()
            .context("Failed to execute command")?;

        Ok(CommandResult {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            exit_code: output.status.code().unwrap_or(-1),
            duration: start.elapsed(),
        })
    }

    /// Execute and assert success
    pub fn assert_success(&self) -> Result<CommandResult> {
        let result = self.execute()?;

        if !result.success() {
            anyhow::bail!(
                "Command failed (exit code: {}):\nArgs: {:?}\nStdout: {}\nStderr: {}",
                result.exit_code,
                self.args,
                result.stdout,
                result.stderr
            );
        }

        Ok(result)
    }

    /// Execute and expect failure
    pub fn assert_failure(&self) -> Result<CommandResult> {
        let result = self.execute()?;

        if result.success() {
            anyhow::bail!(
                "Command should have failed but succeeded:\nArgs: {:?}\nStdout: {}",
                self.args,
                result.stdout
            );
        }

        Ok(result)
    }
}

/// Command execution result with timing
#[derive(Debug, Clone)]
pub struct CommandResult {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
    pub duration: Duration,
}

impl CommandResult {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    pub fn contains_stdout(&self, text: &str) -> bool {
        self.stdout.contains(text)
    }

    pub fn contains_stderr(&self, text: &str) -> bool {
        self.stderr.contains(text)
    }

    /// The plain "ran: ..." summary printed after a replay
    pub fn ran_line(&self) -> Option<&str> {
        self.stdout.lines().find(|line| line.starts_with("ran: "))
    }
}

/// Macro for convenient command construction
///
/// Usage:
/// ```ignore
/// pacer!(env, "throttle", "--at", "0,30").assert_success()?;
/// ```
#[macro_export]
macro_rules! pacer {
    ($env:expr, $($arg:expr),*) => {{
        let mut cmd = $env.command();
        cmd.args(&[$($arg),*]);
        cmd
    }};
}
