// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # emodl Providers
//!
//! Provider-specific implementations for emodl.
//!
//! Each provider module includes:
//!
//! - **API client**: Endpoint URLs and request/decoding for the provider
//! - **Model**: Native records and their normalization into [`Emote`](emodl_core::Emote)
//! - **Fetcher**: The [`EmoteSource`] implementation used by the loader
//! - **Descriptor**: Static metadata registered in the [`ProviderRegistry`]
//!
//! ## Supported Providers
//!
//! | Provider | Global | Platform user | Native account | Per-set fan-out |
//! |----------|--------|---------------|----------------|-----------------|
//! | BTTV | ✅ | ✅ | ❌ | ❌ |
//! | FFZ | ✅ | ✅ | ❌ | ❌ |
//! | 7TV | ✅ | ✅ | ✅ | ✅ |
//!
//! ## Usage
//!
//! ```ignore
//! use emodl_core::ProviderKind;
//! use emodl_fetch::FetchContext;
//! use emodl_providers::ProviderRegistry;
//!
//! let desc = ProviderRegistry::get(ProviderKind::SevenTv).unwrap();
//! let source = desc.build_source();
//! let emotes = source.fetch_global(&FetchContext::new()).await?;
//! ```

pub mod descriptor;
pub mod registry;
pub mod source;

// Provider modules (alphabetical)
pub mod bttv;
pub mod ffz;
pub mod seventv;

// Re-export key types
pub use descriptor::ProviderDescriptor;
pub use registry::ProviderRegistry;
pub use source::{EmoteSource, NativeEmote, UserEmotes};

// Re-export provider descriptors
pub use bttv::bttv_descriptor;
pub use ffz::ffz_descriptor;
pub use seventv::seventv_descriptor;

// Re-export native records and sources
pub use bttv::{BttvEmote, BttvSource};
pub use ffz::{FfzEmote, FfzSource};
pub use seventv::{SevenTvEmote, SevenTvSource};
