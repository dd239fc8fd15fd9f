// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! emodl CLI - BTTV, FFZ, and 7TV emote catalogs from the command line.
//!
//! # Examples
//!
//! ```bash
//! # Load global emotes from every provider
//! emodl
//!
//! # Add a Twitch channel's emotes
//! emodl load --user twitch:22484632
//!
//! # Only 7TV, with memory footprint
//! emodl load --providers 7tv --sizes
//!
//! # Full catalog as JSON
//! emodl load --catalog --format json --pretty
//!
//! # Names claimed by more than one provider
//! emodl conflicts
//! ```

mod commands;
mod output;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use emodl_store::{Config, LoadStatus};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use commands::{config, conflicts, load, providers};

// ============================================================================
// CLI Definition
// ============================================================================

/// emodl CLI - emote catalog downloader.
#[derive(Parser)]
#[command(name = "emodl")]
#[command(about = "Concurrent BTTV / FFZ / 7TV emote catalog downloader")]
#[command(long_about = r#"
emodl loads emote metadata from third-party chat emote providers and merges
it into one name-indexed catalog.

Supported providers:
  • BetterTTV (bttv)
  • FrankerFaceZ (ffz)
  • 7TV (7tv)

Examples:
  emodl                                 # Global emotes from every provider
  emodl load --user twitch:22484632     # Add a channel's emotes
  emodl load --providers bttv,7tv       # Selected providers
  emodl conflicts                       # Names shared between providers
  emodl --format json --pretty          # JSON output
"#)]
#[command(version)]
#[command(author = "emodl Contributors")]
pub struct Cli {
    /// Subcommand to run. If none, runs 'load' by default.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output format (text or json).
    #[arg(long, short = 'f', default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Configuration file (defaults to the user config directory).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Quiet mode (minimal output).
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Load emotes and print a summary (default if no command specified).
    #[command(visible_alias = "l")]
    Load(load::LoadArgs),

    /// Load emotes and report names claimed by more than one provider.
    #[command(visible_alias = "c")]
    Conflicts(load::LoadArgs),

    /// List available providers.
    #[command(visible_alias = "p")]
    Providers,

    /// Manage configuration.
    Config(config::ConfigArgs),
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text with colors.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

/// CLI exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success.
    Success = 0,
    /// General error, or no data at all.
    Error = 1,
    /// Some providers failed.
    Partial = 2,
    /// The load deadline passed.
    Timeout = 4,
}

impl ExitCode {
    /// Maps a load result to an exit code.
    pub fn for_load(status: LoadStatus, timed_out: bool) -> Self {
        match status {
            LoadStatus::Complete => Self::Success,
            _ if timed_out => Self::Timeout,
            LoadStatus::Partial => Self::Partial,
            LoadStatus::Failed => Self::Error,
        }
    }
}

impl Cli {
    /// Loads the configuration named by `--config`, or the default one.
    pub fn load_config(&self) -> Result<Config> {
        let path = self.config_path();
        Config::load_from(&path).with_context(|| format!("Failed to load {}", path.display()))
    }

    /// Returns the configuration file path in effect.
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(Config::default_path)
    }
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool, level: &str) {
    if quiet {
        return; // No logging in quiet mode
    }

    let filter = if verbose {
        EnvFilter::new("emodl=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(format!("emodl={level}")))
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = cli
        .load_config()
        .map_or_else(|_| "warn".to_string(), |c| c.general.log_level);
    setup_logging(cli.verbose, cli.quiet, &level);

    let result = match &cli.command {
        Some(Commands::Load(args)) => load::run(args, &cli).await,
        Some(Commands::Conflicts(args)) => conflicts::run(args, &cli).await,
        Some(Commands::Providers) => providers::run(&cli),
        Some(Commands::Config(args)) => config::run(args, &cli),
        None => {
            // Default to load command
            load::run(&load::LoadArgs::default(), &cli).await
        }
    };

    match result {
        Ok(ExitCode::Success) => Ok(()),
        Ok(code) => std::process::exit(code as i32),
        Err(e) => {
            if !cli.quiet {
                eprintln!("Error: {e:#}");
            }
            std::process::exit(ExitCode::Error as i32);
        }
    }
}
