//! Trait definitions for emodl.
//!
//! Memory-footprint estimation used for diagnostics output.

use std::collections::HashMap;

/// Binary unit suffixes used by [`human_size`].
const UNITS: [&str; 7] = ["B", "Ki", "Mi", "Gi", "Ti", "Pi", "Ei"];

/// Approximate in-memory footprint of a value.
///
/// The estimate is the inline size of the value plus the heap capacity it
/// owns. It is meant for diagnostics only and is not exact (allocator
/// overhead and hash table control bytes are ignored).
pub trait EstimateSize {
    /// Returns the estimated size in bytes.
    fn estimated_size(&self) -> usize;
}

impl<T: EstimateSize> EstimateSize for Vec<T> {
    fn estimated_size(&self) -> usize {
        std::mem::size_of::<Self>()
            + (self.capacity() - self.len()) * std::mem::size_of::<T>()
            + self.iter().map(EstimateSize::estimated_size).sum::<usize>()
    }
}

impl<T: EstimateSize> EstimateSize for HashMap<String, T> {
    fn estimated_size(&self) -> usize {
        std::mem::size_of::<Self>()
            + self
                .iter()
                .map(|(k, v)| std::mem::size_of::<String>() + k.capacity() + v.estimated_size())
                .sum::<usize>()
    }
}

/// Formats a byte count with binary units, e.g. `1.50 Ki`.
#[allow(clippy::cast_precision_loss)]
pub fn human_size(bytes: usize) -> String {
    let mut size = bytes as f64;
    let mut unit = 0;

    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }

    format!("{size:.2} {}", UNITS[unit])
}

// ============================================================================
// Tests
// ============================================================================
