// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # emodl Core
//!
//! Core types shared by every emodl crate.
//!
//! - Domain models ([`Emote`], [`Image`]) that every provider normalizes into
//! - Provider identity ([`ProviderKind`]) and user-scoped lookups ([`UserScope`])
//! - Error types
//! - The [`EstimateSize`] diagnostics trait and [`human_size`] formatting

pub mod error;
pub mod models;
pub mod traits;

pub use error::CoreError;

pub use models::{Emote, Image, ProviderKind, UserScope};

pub use traits::{EstimateSize, human_size};
