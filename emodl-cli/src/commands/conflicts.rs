//! Conflicts command - names claimed by more than one provider.

use anyhow::Result;
use emodl_store::ConflictReport;

use super::load::{LoadArgs, load};
use crate::output::{ConflictsOutput, JsonFormatter, TextFormatter};
use crate::{Cli, ExitCode, OutputFormat};

/// Runs the conflicts command.
pub async fn run(args: &LoadArgs, cli: &Cli) -> Result<ExitCode> {
    let outcome = load(args, cli).await?;
    let report = ConflictReport::from_catalog(&outcome.catalog);

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            for failure in outcome.errors.failures() {
                eprintln!("{}", formatter.format_failure(failure));
            }
            if outcome.timed_out {
                eprintln!("{}", formatter.format_timeout(outcome.deadline));
            }
            println!("{}", formatter.format_conflicts(&report));
        }
        OutputFormat::Json => {
            let output = ConflictsOutput::new(&report, &outcome);
            println!("{}", JsonFormatter::new(cli.pretty).format(&output)?);
        }
    }

    Ok(ExitCode::for_load(outcome.status(), outcome.timed_out))
}
