//! Providers command - list available providers.

use anyhow::Result;
use emodl_providers::ProviderRegistry;

use crate::output::{JsonFormatter, ProviderInfo, TextFormatter};
use crate::{Cli, ExitCode, OutputFormat};

/// Runs the providers command.
pub fn run(cli: &Cli) -> Result<ExitCode> {
    let config = cli.load_config()?;
    let providers = ProviderRegistry::all();

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_providers_header());
            for desc in providers {
                println!(
                    "{}",
                    formatter.format_provider_line(desc, config.is_provider_enabled(desc.id))
                );
            }
        }
        OutputFormat::Json => {
            let output: Vec<ProviderInfo> = providers
                .iter()
                .map(|desc| ProviderInfo::new(desc, config.is_provider_enabled(desc.id)))
                .collect();
            println!("{}", JsonFormatter::new(cli.pretty).format(&output)?);
        }
    }

    Ok(ExitCode::Success)
}
