//! JSON output formatting.

use anyhow::Result;
use chrono::{DateTime, Utc};
use emodl_core::ProviderKind;
use emodl_providers::ProviderDescriptor;
use emodl_store::{
    CatalogSummary, Conflict, ConflictReport, EmoteCatalog, JoinedError, LoadOutcome, LoadStatus,
};
use serde::{Serialize, Serializer};

// ============================================================================
// Output Types
// ============================================================================

/// JSON output of the load command.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadOutput<'a> {
    pub status: &'static str,
    pub timed_out: bool,
    pub duration_ms: u128,
    #[serde(serialize_with = "serialize_datetime")]
    pub finished_at: DateTime<Utc>,
    pub summary: CatalogSummary,
    pub errors: Vec<ErrorOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog: Option<&'a EmoteCatalog>,
}

impl<'a> LoadOutput<'a> {
    /// Builds the output of a load, optionally embedding the catalog.
    pub fn from_outcome(outcome: &'a LoadOutcome, with_catalog: bool) -> Self {
        Self {
            status: status_str(outcome.status()),
            timed_out: outcome.timed_out,
            duration_ms: outcome.duration.as_millis(),
            finished_at: outcome.finished_at,
            summary: CatalogSummary::from_catalog(&outcome.catalog),
            errors: ErrorOutput::from_joined(&outcome.errors),
            catalog: with_catalog.then_some(&outcome.catalog),
        }
    }
}

/// A failed fetch.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorOutput {
    pub provider: ProviderKind,
    pub stage: String,
    pub message: String,
}

impl ErrorOutput {
    fn from_joined(errors: &JoinedError) -> Vec<Self> {
        errors
            .failures()
            .iter()
            .map(|f| Self {
                provider: f.provider,
                stage: f.stage.to_string(),
                message: f.error.to_string(),
            })
            .collect()
    }
}

/// JSON output of the conflicts command.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictsOutput<'a> {
    pub status: &'static str,
    pub conflicts: &'a [Conflict],
    pub total: usize,
    pub errors: Vec<ErrorOutput>,
}

impl<'a> ConflictsOutput<'a> {
    /// Builds the output from a report and the load it came from.
    pub fn new(report: &'a ConflictReport, outcome: &LoadOutcome) -> Self {
        Self {
            status: status_str(outcome.status()),
            conflicts: report.conflicts(),
            total: report.total(),
            errors: ErrorOutput::from_joined(&outcome.errors),
        }
    }
}

/// A registered provider.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderInfo {
    pub id: ProviderKind,
    pub display_name: &'static str,
    pub cli_name: &'static str,
    pub aliases: &'static [&'static str],
    pub homepage: &'static str,
    pub api_base: &'static str,
    pub supports_platform_user: bool,
    pub supports_native_account: bool,
    pub enabled: bool,
}

impl ProviderInfo {
    /// Describes a provider.
    pub fn new(desc: &ProviderDescriptor, enabled: bool) -> Self {
        Self {
            id: desc.id,
            display_name: desc.metadata.display_name,
            cli_name: desc.cli.name,
            aliases: desc.cli.aliases,
            homepage: desc.metadata.homepage,
            api_base: desc.metadata.api_base,
            supports_platform_user: desc.metadata.supports_platform_user,
            supports_native_account: desc.metadata.supports_native_account,
            enabled,
        }
    }
}

fn status_str(status: LoadStatus) -> &'static str {
    match status {
        LoadStatus::Complete => "complete",
        LoadStatus::Partial => "partial",
        LoadStatus::Failed => "failed",
    }
}

fn serialize_datetime<S>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&dt.to_rfc3339())
}

// ============================================================================
// JSON Formatter
// ============================================================================

/// JSON formatter.
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter.
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Formats any serializable value.
    pub fn format<T: Serialize>(&self, data: &T) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(data)?
        } else {
            serde_json::to_string(data)?
        };
        Ok(json)
    }
}
