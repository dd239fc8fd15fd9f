//! Per-provider counts and memory footprint of a catalog.

use emodl_core::{EstimateSize, ProviderKind, human_size};
use serde::Serialize;
use std::fmt;

use crate::catalog::EmoteCatalog;

/// Counts for one provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderSummary {
    /// Provider.
    pub provider: ProviderKind,
    /// Records held in the provider map.
    pub emotes: usize,
    /// Estimated footprint of the provider map in bytes.
    pub bytes: usize,
}

/// Summary of a loaded catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogSummary {
    /// One entry per provider, in provider order.
    pub providers: Vec<ProviderSummary>,
    /// Distinct names in the merged catalog.
    pub total: usize,
    /// Estimated footprint of the whole catalog in bytes.
    pub total_bytes: usize,
}

impl CatalogSummary {
    /// Summarizes a catalog.
    pub fn from_catalog(catalog: &EmoteCatalog) -> Self {
        let providers = ProviderKind::all()
            .iter()
            .map(|kind| ProviderSummary {
                provider: *kind,
                emotes: catalog.provider_len(*kind),
                bytes: catalog.provider_size(*kind),
            })
            .collect();

        Self {
            providers,
            total: catalog.len(),
            total_bytes: catalog.estimated_size(),
        }
    }

    /// Returns a view that also prints sizes.
    pub fn with_sizes(&self) -> SizedSummary<'_> {
        SizedSummary(self)
    }
}

impl fmt::Display for CatalogSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for p in &self.providers {
            writeln!(f, "{:<5} {:>6} emotes", p.provider.display_name(), p.emotes)?;
        }
        write!(f, "{:<5} {:>6} emotes", "Total", self.total)
    }
}

/// [`CatalogSummary`] display with human-readable sizes.
pub struct SizedSummary<'a>(&'a CatalogSummary);

impl fmt::Display for SizedSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for p in &self.0.providers {
            writeln!(
                f,
                "{:<5} {:>6} emotes  {:>10}",
                p.provider.display_name(),
                p.emotes,
                human_size(p.bytes)
            )?;
        }
        write!(
            f,
            "{:<5} {:>6} emotes  {:>10}",
            "Total",
            self.0.total,
            human_size(self.0.total_bytes)
        )
    }
}
