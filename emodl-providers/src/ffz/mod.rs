//! FrankerFaceZ provider implementation.
//!
//! API documentation: <https://api.frankerfacez.com/docs/>

mod api;
mod descriptor;
mod fetcher;
mod model;

pub use api::{FFZ_API_BASE, FfzApiClient};
pub use descriptor::ffz_descriptor;
pub use fetcher::FfzSource;
pub use model::{FfzEmote, FfzEmoteSet, FfzGlobalResponse, FfzRoom, FfzRoomResponse};
