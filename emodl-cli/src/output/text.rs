//! Text output formatting with colors.

use emodl_providers::ProviderDescriptor;
use emodl_store::{CatalogSummary, ConflictReport, EmoteCatalog, LoadOutcome, LoadStatus, ProviderFailure};
use std::time::Duration;

// ============================================================================
// ANSI Colors
// ============================================================================

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const CYAN: &str = "\x1b[36m";

/// Text formatter with optional colors.
pub struct TextFormatter {
    use_colors: bool,
}

impl TextFormatter {
    /// Creates a new text formatter.
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Formats the result of a load: summary, failures, then status.
    pub fn format_load(&self, outcome: &LoadOutcome, sizes: bool) -> String {
        let summary = CatalogSummary::from_catalog(&outcome.catalog);
        let mut lines = vec![if sizes {
            summary.with_sizes().to_string()
        } else {
            summary.to_string()
        }];

        if !outcome.errors.is_empty() || outcome.timed_out || outcome.merge_failed {
            lines.push(String::new());
        }
        if outcome.merge_failed {
            lines.push(format!("{}: merging fetch results failed", self.red("Error")));
        }
        for failure in outcome.errors.failures() {
            lines.push(self.format_failure(failure));
        }
        if outcome.timed_out {
            lines.push(self.format_timeout(outcome.deadline));
        }

        lines.push(String::new());
        lines.push(self.format_status(outcome.status(), outcome.duration));
        lines.join("\n")
    }

    /// Formats the status line.
    pub fn format_status(&self, status: LoadStatus, duration: Duration) -> String {
        let label = match status {
            LoadStatus::Complete => self.green("complete"),
            LoadStatus::Partial => self.yellow("partial"),
            LoadStatus::Failed => self.red("failed"),
        };
        format!("{} {} in {}ms", self.bold("Status:"), label, duration.as_millis())
    }

    /// Formats one failed fetch.
    pub fn format_failure(&self, failure: &ProviderFailure) -> String {
        // Multi-line bodies are indented under the header.
        let message = failure.error.to_string().replace('\n', "\n    ");
        format!(
            "{} {}: {} - {}",
            self.bold(failure.provider.display_name()),
            failure.stage,
            self.red("Error"),
            message
        )
    }

    /// Formats the deadline notice.
    pub fn format_timeout(&self, deadline: Duration) -> String {
        format!(
            "{}: deadline of {}s passed, results are incomplete",
            self.yellow("Timeout"),
            deadline.as_secs_f64()
        )
    }

    /// Formats every emote of the catalog, sorted by name.
    pub fn format_catalog(&self, catalog: &EmoteCatalog) -> String {
        let mut names: Vec<&String> = catalog.emotes.keys().collect();
        names.sort();

        names
            .into_iter()
            .filter_map(|name| catalog.emotes.get(name))
            .map(|emote| {
                let url = emote.preferred_image().map_or("−", |i| i.url.as_str());
                format!("{:<24} {:<26} {}", emote.name, self.dim(&emote.id), self.cyan(url))
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Formats a conflict report.
    pub fn format_conflicts(&self, report: &ConflictReport) -> String {
        let mut lines: Vec<String> = report
            .conflicts()
            .iter()
            .map(|c| {
                format!(
                    "{}: {} <-> {}",
                    self.bold(&c.name),
                    c.first.display_name(),
                    c.second.display_name()
                )
            })
            .collect();
        lines.push(format!("Total conflicts: {}", report.total()));
        lines.join("\n")
    }

    /// Formats the providers list header.
    pub fn format_providers_header(&self) -> String {
        format!(
            "{:<12} {:<6} {:<10} {:<8} {}",
            self.bold("Provider"),
            self.bold("CLI"),
            self.bold("Channel"),
            self.bold("Account"),
            self.bold("Homepage")
        )
    }

    /// Formats a single provider line.
    pub fn format_provider_line(&self, desc: &ProviderDescriptor, enabled: bool) -> String {
        let status = if enabled {
            self.green("✓")
        } else {
            self.dim("−")
        };

        let channel = if desc.metadata.supports_platform_user {
            self.green("✓")
        } else {
            self.dim("−")
        };

        let account = if desc.metadata.supports_native_account {
            self.green("✓")
        } else {
            self.dim("−")
        };

        format!(
            "{:<12} {:<6} {:<10} {:<8} {}",
            format!("{} {}", desc.display_name(), status),
            desc.cli_name(),
            channel,
            account,
            desc.metadata.homepage
        )
    }

    // ========================================================================
    // Color Helpers
    // ========================================================================

    fn paint(&self, code: &str, text: &str) -> String {
        if self.use_colors {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn bold(&self, text: &str) -> String {
        self.paint(BOLD, text)
    }

    fn dim(&self, text: &str) -> String {
        self.paint(DIM, text)
    }

    fn green(&self, text: &str) -> String {
        self.paint(GREEN, text)
    }

    fn yellow(&self, text: &str) -> String {
        self.paint(YELLOW, text)
    }

    fn red(&self, text: &str) -> String {
        self.paint(RED, text)
    }

    fn cyan(&self, text: &str) -> String {
        self.paint(CYAN, text)
    }
}
