//! Output formatting for CLI.

mod json;
mod text;

pub use json::{ConflictsOutput, JsonFormatter, LoadOutput, ProviderInfo};
pub use text::TextFormatter;
