//! CLI command implementations.

pub mod config;
pub mod conflicts;
pub mod load;
pub mod providers;
