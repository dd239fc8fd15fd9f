// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # emodl Fetch
//!
//! HTTP infrastructure shared by the emote provider implementations.
//!
//! ## Host APIs
//!
//! - [`host::http`] - HTTP client with tracing, domain allowlist, and the
//!   provider error-payload convention
//!
//! ## Context
//!
//! - [`context::FetchContext`] - Bundles the HTTP client with fetch settings
//! - [`context::FetchSettings`] - Request timeout
//!
//! ## Example
//!
//! ```ignore
//! use emodl_fetch::FetchContext;
//!
//! let ctx = FetchContext::new();
//! let emotes: Vec<BttvEmote> = ctx.http.get_json(url).await?;
//! ```

pub mod context;
pub mod error;
pub mod host;

// Errors
pub use error::{FetchError, HttpError};

// Host APIs
pub use host::http::{ApiErrorPayload, HttpClient, PROVIDER_DOMAINS};

// Context
pub use context::{FetchContext, FetchContextBuilder, FetchSettings};
