//! Cross-provider name collisions.

use emodl_core::ProviderKind;
use serde::Serialize;
use std::fmt;

use crate::catalog::EmoteCatalog;

/// A name held by two providers.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Conflict {
    /// Colliding emote name.
    pub name: String,
    /// First provider of the pair.
    pub first: ProviderKind,
    /// Second provider of the pair.
    pub second: ProviderKind,
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} <-> {}", self.name, self.first, self.second)
    }
}

/// Every colliding provider pair in a catalog, sorted by name.
///
/// A name held by all three providers yields three conflicts.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConflictReport {
    conflicts: Vec<Conflict>,
}

impl ConflictReport {
    /// Compares the provider maps of `catalog` pairwise.
    pub fn from_catalog(catalog: &EmoteCatalog) -> Self {
        let kinds = ProviderKind::all();
        let mut conflicts = Vec::new();

        for (i, first) in kinds.iter().enumerate() {
            for second in &kinds[i + 1..] {
                for name in catalog.provider_names(*first) {
                    if catalog.provider_contains(*second, name) {
                        conflicts.push(Conflict {
                            name: name.to_string(),
                            first: *first,
                            second: *second,
                        });
                    }
                }
            }
        }

        conflicts.sort();
        Self { conflicts }
    }

    /// Returns the conflicts.
    pub fn conflicts(&self) -> &[Conflict] {
        &self.conflicts
    }

    /// Returns the number of colliding pairs.
    pub fn total(&self) -> usize {
        self.conflicts.len()
    }

    /// Returns true if no names collide.
    pub fn is_empty(&self) -> bool {
        self.conflicts.is_empty()
    }
}

impl fmt::Display for ConflictReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for conflict in &self.conflicts {
            writeln!(f, "{conflict}")?;
        }
        write!(f, "Total conflicts: {}", self.total())
    }
}
