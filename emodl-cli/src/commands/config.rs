//! Config command - manage configuration.

use anyhow::{Context, Result, bail};
use clap::{Args, Subcommand};
use emodl_core::{ProviderKind, UserScope};
use emodl_providers::ProviderRegistry;
use emodl_store::{Config, config_key};
use tracing::info;

use crate::output::JsonFormatter;
use crate::{Cli, ExitCode, OutputFormat};

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration.
    Show,

    /// Show the configuration file path.
    Path,

    /// Write a default configuration file.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },

    /// Enable a provider.
    Enable {
        /// Provider to enable.
        provider: String,
    },

    /// Disable a provider.
    Disable {
        /// Provider to disable.
        provider: String,
    },

    /// Set (or clear) the user scope of a provider.
    Scope {
        /// Provider to configure.
        provider: String,
        /// `platform:id` or account id; omit to clear.
        scope: Option<String>,
    },

    /// Reset to defaults.
    Reset,
}

/// Runs the config command.
pub fn run(args: &ConfigArgs, cli: &Cli) -> Result<ExitCode> {
    match &args.action {
        ConfigAction::Show => show_config(cli)?,
        ConfigAction::Path => show_path(cli),
        ConfigAction::Init { force } => init_config(*force, cli)?,
        ConfigAction::Enable { provider } => set_enabled(provider, true, cli)?,
        ConfigAction::Disable { provider } => set_enabled(provider, false, cli)?,
        ConfigAction::Scope { provider, scope } => set_scope(provider, scope.as_deref(), cli)?,
        ConfigAction::Reset => reset_config(cli)?,
    }
    Ok(ExitCode::Success)
}

fn show_config(cli: &Cli) -> Result<()> {
    let config = cli.load_config()?;

    match cli.format {
        OutputFormat::Text => {
            println!("emodl Configuration");
            println!("{}", "─".repeat(40));
            println!();
            println!("Deadline: {}s", config.general.deadline_secs);
            println!("HTTP timeout: {}s", config.general.http_timeout_secs);
            println!("Log level: {}", config.general.log_level);
            println!();
            println!("Providers:");
            for kind in ProviderKind::all() {
                let state = if config.is_provider_enabled(*kind) {
                    "enabled"
                } else {
                    "disabled"
                };
                let scope = config
                    .provider(*kind)
                    .and_then(|p| p.scope.as_deref())
                    .unwrap_or("-");
                println!("  • {:<5} {:<9} scope: {}", kind.display_name(), state, scope);
            }
        }
        OutputFormat::Json => {
            println!("{}", JsonFormatter::new(cli.pretty).format(&config)?);
        }
    }

    Ok(())
}

fn show_path(cli: &Cli) {
    let path = cli.config_path();

    match cli.format {
        OutputFormat::Text => println!("{}", path.display()),
        OutputFormat::Json => {
            println!("{}", serde_json::json!({ "config": path.display().to_string() }));
        }
    }
}

fn init_config(force: bool, cli: &Cli) -> Result<()> {
    let path = cli.config_path();
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }

    Config::default().save_to(&path)?;
    if !cli.quiet {
        println!("Wrote {}", path.display());
    }
    Ok(())
}

fn resolve_provider(name: &str) -> Result<ProviderKind> {
    ProviderRegistry::get_by_cli_name(name)
        .map(|d| d.id)
        .with_context(|| format!("Unknown provider: {name}"))
}

fn set_enabled(name: &str, enabled: bool, cli: &Cli) -> Result<()> {
    let kind = resolve_provider(name)?;
    let mut config = cli.load_config()?;

    config
        .providers
        .entry(config_key(kind).to_string())
        .or_default()
        .enabled = enabled;
    config.save_to(&cli.config_path())?;

    info!(provider = %kind, enabled, "Updated provider");
    if !cli.quiet {
        let verb = if enabled { "Enabled" } else { "Disabled" };
        println!("{verb} {}", kind.display_name());
    }
    Ok(())
}

fn set_scope(name: &str, scope: Option<&str>, cli: &Cli) -> Result<()> {
    let kind = resolve_provider(name)?;
    if let Some(raw) = scope {
        let parsed: UserScope = raw.parse()?;
        let native_ok = ProviderRegistry::get(kind).is_some_and(|d| d.metadata.supports_native_account);
        if parsed.as_platform().is_none() && !native_ok {
            bail!("{} needs a platform:id scope", kind.display_name());
        }
    }

    let mut config = cli.load_config()?;
    config
        .providers
        .entry(config_key(kind).to_string())
        .or_default()
        .scope = scope.map(str::to_string);
    config.save_to(&cli.config_path())?;

    if !cli.quiet {
        match scope {
            Some(s) => println!("{} scope set to {s}", kind.display_name()),
            None => println!("{} scope cleared", kind.display_name()),
        }
    }
    Ok(())
}

fn reset_config(cli: &Cli) -> Result<()> {
    Config::default().save_to(&cli.config_path())?;
    if !cli.quiet {
        println!("Configuration reset to defaults");
    }
    Ok(())
}
