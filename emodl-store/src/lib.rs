// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # emodl Store
//!
//! Loading, catalog state, and configuration for emodl.
//!
//! This crate provides:
//!
//! - **EmoteLoader**: Concurrent fetch of every enabled provider under a deadline
//! - **EmoteCatalog**: Name-indexed merged emotes plus per-provider native records
//! - **ConflictReport**: Names claimed by more than one provider
//! - **Config**: JSON configuration with defaults
//!
//! ## Usage
//!
//! ```ignore
//! use emodl_store::{ConflictReport, EmoteLoader, LoaderOptions, LoadStatus};
//!
//! let outcome = EmoteLoader::new(LoaderOptions::default()).load().await;
//! if outcome.status() != LoadStatus::Complete {
//!     eprintln!("{}", outcome.errors);
//! }
//! println!("{}", ConflictReport::from_catalog(&outcome.catalog));
//! ```

pub mod catalog;
pub mod config;
pub mod conflicts;
pub mod error;
pub mod loader;
pub mod summary;

pub use catalog::{CatalogEntry, EmoteBatch, EmoteCatalog};
pub use config::{Config, GeneralConfig, ProviderConfig, config_key};
pub use conflicts::{Conflict, ConflictReport};
pub use error::{FetchStage, JoinedError, LoadError, ProviderFailure, StoreError};
pub use loader::{
    DEFAULT_DEADLINE, EmoteLoader, LoadOutcome, LoadStatus, LoaderOptions, ProviderOptions,
};
pub use summary::{CatalogSummary, ProviderSummary, SizedSummary};
