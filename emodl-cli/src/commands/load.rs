//! Load command - fetch every enabled provider and print the result.

use anyhow::{Context, Result, bail};
use clap::Args;
use emodl_core::{ProviderKind, UserScope};
use emodl_providers::ProviderRegistry;
use emodl_store::{CatalogSummary, EmoteLoader, LoadOutcome, LoaderOptions};
use std::time::Duration;
use tracing::{debug, warn};

use crate::output::{JsonFormatter, LoadOutput, TextFormatter};
use crate::{Cli, ExitCode, OutputFormat};

/// Arguments for the load command.
#[derive(Args, Debug, Clone, Default)]
pub struct LoadArgs {
    /// Providers to load (comma-separated: bttv,ffz,7tv or "all").
    #[arg(long, short = 'p')]
    pub providers: Option<String>,

    /// User whose emotes are added: `platform:id` (e.g. twitch:22484632)
    /// or a provider-native account id.
    #[arg(long, short = 'u')]
    pub user: Option<String>,

    /// Overall deadline in seconds.
    #[arg(long)]
    pub deadline: Option<u64>,

    /// Per-request HTTP timeout in seconds.
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Show the estimated memory footprint of each provider.
    #[arg(long)]
    pub sizes: bool,

    /// Print every loaded emote (the full catalog in JSON mode).
    #[arg(long)]
    pub catalog: bool,
}

/// Runs the load command.
pub async fn run(args: &LoadArgs, cli: &Cli) -> Result<ExitCode> {
    let outcome = load(args, cli).await?;
    let code = ExitCode::for_load(outcome.status(), outcome.timed_out);

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            if !cli.quiet {
                println!("{}", formatter.format_load(&outcome, args.sizes));
            }
            if args.catalog {
                println!("{}", formatter.format_catalog(&outcome.catalog));
            }
        }
        OutputFormat::Json => {
            let output = LoadOutput::from_outcome(&outcome, args.catalog);
            println!("{}", JsonFormatter::new(cli.pretty).format(&output)?);
        }
    }

    Ok(code)
}

/// Builds loader options from config and flags, then runs one load.
pub async fn load(args: &LoadArgs, cli: &Cli) -> Result<LoadOutcome> {
    let config = cli.load_config()?;
    let mut options = config
        .loader_options()
        .context("Invalid provider configuration")?;

    apply_args(&mut options, args)?;
    debug!(providers = ?options.enabled(), deadline = ?options.deadline, "Starting load");

    let outcome = EmoteLoader::new(options).load().await;
    debug!(summary = %CatalogSummary::from_catalog(&outcome.catalog), "Load finished");
    Ok(outcome)
}

/// Applies command-line overrides to options built from the config.
pub fn apply_args(options: &mut LoaderOptions, args: &LoadArgs) -> Result<()> {
    if let Some(secs) = args.deadline {
        if secs == 0 {
            bail!("--deadline must be positive");
        }
        options.deadline = Duration::from_secs(secs);
    }
    if let Some(secs) = args.timeout {
        if secs == 0 {
            bail!("--timeout must be positive");
        }
        options.http_timeout = Duration::from_secs(secs);
    }

    if let Some(list) = &args.providers {
        let selected = parse_providers(list)?;
        for kind in ProviderKind::all() {
            options.provider_mut(*kind).enabled = selected.contains(kind);
        }
    }

    if let Some(raw) = &args.user {
        let scope: UserScope = raw.parse()?;
        for kind in options.enabled() {
            let native_ok = ProviderRegistry::get(kind)
                .is_some_and(|d| d.metadata.supports_native_account);
            if scope.as_platform().is_none() && !native_ok {
                warn!(provider = %kind, %scope, "Provider has no account lookup, loading globals only");
                continue;
            }
            options.provider_mut(kind).scope = Some(scope.clone());
        }
    }

    Ok(())
}

/// Parses a comma-separated provider list.
pub fn parse_providers(list: &str) -> Result<Vec<ProviderKind>> {
    if list.trim().eq_ignore_ascii_case("all") {
        return Ok(ProviderKind::all().to_vec());
    }

    let mut kinds = Vec::new();
    for name in list.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let Some(desc) = ProviderRegistry::get_by_cli_name(name) else {
            bail!("Unknown provider: {name}");
        };
        if !kinds.contains(&desc.id) {
            kinds.push(desc.id);
        }
    }

    if kinds.is_empty() {
        bail!("No providers selected");
    }
    Ok(kinds)
}
