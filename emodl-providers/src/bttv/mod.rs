//! BetterTTV provider implementation.
//!
//! API documentation: <https://betterttv.com/developers/api>

mod api;
mod descriptor;
mod fetcher;
mod model;

pub use api::{BTTV_API_BASE, BttvApiClient};
pub use descriptor::bttv_descriptor;
pub use fetcher::BttvSource;
pub use model::{BttvEmote, BttvUser};
