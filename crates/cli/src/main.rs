//! Pacer CLI - pacer command

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use tracing::Level;

mod cmd;

/// Pacer - Throttle and debounce playground
#[derive(Parser)]
#[command(name = "pacer")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay invocations through a throttle
    Throttle {
        /// Cooldown in milliseconds (default: from settings)
        #[arg(short, long)]
        interval: Option<u64>,
        /// Invocation offsets in milliseconds, comma separated (e.g. 0,30,60)
        #[arg(long)]
        at: String,
    },
    /// Replay invocations through a debounce
    Debounce {
        /// Quiet period in milliseconds (default: from settings)
        #[arg(short, long)]
        delay: Option<u64>,
        /// Invocation offsets in milliseconds, comma separated (e.g. 0,20,40)
        #[arg(long)]
        at: String,
    },
    /// Print numbers with thousands separators
    FormatNumber {
        /// Numbers to format
        #[arg(required = true, allow_negative_numbers = true)]
        values: Vec<String>,
    },
    /// Check that addresses look like email addresses
    CheckEmail {
        /// Addresses to check
        #[arg(required = true)]
        addresses: Vec<String>,
    },
    /// View and edit settings
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// List all settings
    List,

    /// Print one setting
    Get {
        /// Dotted key (e.g. limiter.throttle_interval_ms)
        key: String,
    },

    /// Change one setting
    Set {
        /// Dotted key
        key: String,
        /// New value
        value: String,
    },

    /// Show the settings file location
    Path {
        /// Write a default file if none exists
        #[arg(long)]
        create: bool,
    },

    /// Print an annotated example settings file
    Example,
}

/// Pick the log level: -v flags win, then settings, then warn
fn log_level(verbose: u8) -> (Level, Option<anyhow::Error>) {
    match verbose {
        0 => match cli_lib::settings::load().and_then(|s| s.log_level()) {
            Ok(level) => (level, None),
            Err(e) => (Level::WARN, Some(e)),
        },
        1 => (Level::INFO, None),
        2 => (Level::DEBUG, None),
        _ => (Level::TRACE, None),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let (level, settings_error) = log_level(cli.verbose);
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
    if let Some(e) = settings_error {
        tracing::warn!("Ignoring settings for log level: {:#}", e);
    }

    match cli.command {
        Commands::Throttle { interval, at } => cmd::throttle::run(interval, &at).await,
        Commands::Debounce { delay, at } => cmd::debounce::run(delay, &at).await,
        Commands::FormatNumber { values } => cmd::format_number::run(&values).await,
        Commands::CheckEmail { addresses } => cmd::check_email::run(&addresses).await,
        Commands::Config(config_cmd) => match config_cmd {
            ConfigCommands::List => cmd::config::run_list().await,
            ConfigCommands::Get { key } => cmd::config::run_get(&key).await,
            ConfigCommands::Set { key, value } => cmd::config::run_set(&key, &value).await,
            ConfigCommands::Path { create } => cmd::config::run_path(create).await,
            ConfigCommands::Example => cmd::config::run_example().await,
        },
    }
}
