//! The merged emote catalog.
//!
//! The catalog keeps one map of normalized emotes plus one map of native
//! records per provider, all keyed by emote name. [`EmoteCatalog::merge`]
//! is the only way records get in, so every name in a provider map is also
//! in [`EmoteCatalog::emotes`].

use emodl_core::{Emote, EstimateSize, ProviderKind};
use emodl_providers::{BttvEmote, FfzEmote, NativeEmote, SevenTvEmote};
use serde::Serialize;
use std::collections::HashMap;
use tracing::warn;

use crate::error::FetchStage;

// ============================================================================
// Batches
// ============================================================================

/// A native record paired with its normalized form.
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    /// Record as returned by the provider.
    pub native: NativeEmote,
    /// Normalized emote.
    pub emote: Emote,
}

/// The normalized output of one successful fetch task.
#[derive(Debug, Clone)]
pub struct EmoteBatch {
    /// Provider the records came from.
    pub provider: ProviderKind,
    /// Which fetch produced the records.
    pub stage: FetchStage,
    /// Normalized records.
    pub entries: Vec<CatalogEntry>,
}

impl EmoteBatch {
    /// Normalizes native records into a batch.
    ///
    /// Records that cannot be normalized are logged and left out, so they
    /// reach neither the provider map nor the merged map.
    pub fn normalize(provider: ProviderKind, stage: FetchStage, records: Vec<NativeEmote>) -> Self {
        let entries = records
            .into_iter()
            .filter_map(|native| match native.to_emote() {
                Ok(emote) => Some(CatalogEntry { native, emote }),
                Err(e) => {
                    warn!(%provider, %stage, name = native.name(), error = %e, "Dropping emote");
                    None
                }
            })
            .collect();

        Self {
            provider,
            stage,
            entries,
        }
    }

    /// Returns the number of records.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the batch has no records.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// Catalog
// ============================================================================

/// Name-indexed emotes from every provider.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EmoteCatalog {
    /// Normalized emotes. On a name collision the last merged batch wins.
    pub emotes: HashMap<String, Emote>,
    /// Native BTTV records.
    pub bttv: HashMap<String, BttvEmote>,
    /// Native FFZ records.
    pub ffz: HashMap<String, FfzEmote>,
    /// Native 7TV records.
    #[serde(rename = "seventv")]
    pub seven_tv: HashMap<String, SevenTvEmote>,
    #[serde(skip)]
    merged_batches: usize,
}

impl EmoteCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges a batch.
    ///
    /// Each record replaces any earlier record with the same name, both in
    /// its provider map and in the merged map.
    pub fn merge(&mut self, batch: EmoteBatch) {
        for CatalogEntry { native, emote } in batch.entries {
            let name = emote.name.clone();
            match native {
                NativeEmote::Bttv(e) => {
                    self.bttv.insert(name.clone(), e);
                }
                NativeEmote::Ffz(e) => {
                    self.ffz.insert(name.clone(), e);
                }
                NativeEmote::SevenTv(e) => {
                    self.seven_tv.insert(name.clone(), e);
                }
            }
            self.emotes.insert(name, emote);
        }
        self.merged_batches += 1;
    }

    /// Returns the number of merged emotes.
    pub fn len(&self) -> usize {
        self.emotes.len()
    }

    /// Returns true if no emote has been merged.
    pub fn is_empty(&self) -> bool {
        self.emotes.is_empty()
    }

    /// Returns the number of batches merged so far.
    pub fn merged_batches(&self) -> usize {
        self.merged_batches
    }

    /// Looks up a merged emote by name.
    pub fn get(&self, name: &str) -> Option<&Emote> {
        self.emotes.get(name)
    }

    /// Returns the number of records held for a provider.
    pub fn provider_len(&self, provider: ProviderKind) -> usize {
        match provider {
            ProviderKind::Bttv => self.bttv.len(),
            ProviderKind::Ffz => self.ffz.len(),
            ProviderKind::SevenTv => self.seven_tv.len(),
        }
    }

    /// Returns true if a provider holds a record named `name`.
    pub fn provider_contains(&self, provider: ProviderKind, name: &str) -> bool {
        match provider {
            ProviderKind::Bttv => self.bttv.contains_key(name),
            ProviderKind::Ffz => self.ffz.contains_key(name),
            ProviderKind::SevenTv => self.seven_tv.contains_key(name),
        }
    }

    /// Returns the record names held for a provider.
    pub fn provider_names(&self, provider: ProviderKind) -> Vec<&str> {
        match provider {
            ProviderKind::Bttv => self.bttv.keys().map(String::as_str).collect(),
            ProviderKind::Ffz => self.ffz.keys().map(String::as_str).collect(),
            ProviderKind::SevenTv => self.seven_tv.keys().map(String::as_str).collect(),
        }
    }

    /// Returns the estimated footprint of one provider map.
    pub fn provider_size(&self, provider: ProviderKind) -> usize {
        match provider {
            ProviderKind::Bttv => self.bttv.estimated_size(),
            ProviderKind::Ffz => self.ffz.estimated_size(),
            ProviderKind::SevenTv => self.seven_tv.estimated_size(),
        }
    }
}

impl EstimateSize for EmoteCatalog {
    fn estimated_size(&self) -> usize {
        std::mem::size_of::<usize>()
            + self.emotes.estimated_size()
            + self.bttv.estimated_size()
            + self.ffz.estimated_size()
            + self.seven_tv.estimated_size()
    }
}

// ============================================================================
// Tests
// ============================================================================
