//! Domain models for emodl.
//!
//! - [`emote`] - The normalized [`Emote`] and its [`Image`] candidates
//! - [`provider`] - [`ProviderKind`] and [`UserScope`]

mod emote;
mod provider;

pub use emote::{Emote, Image};
pub use provider::{ProviderKind, UserScope};
