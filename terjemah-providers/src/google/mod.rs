//! Google Cloud Translation provider.
//!
//! Uses the v2 REST API. The API key travels as the `key` query parameter.

mod adapter;
mod api;
mod descriptor;

pub use adapter::GoogleAdapter;
pub use api::{GOOGLE_API_BASE, GoogleApiClient, GoogleTranslateResponse, parse_translate_response};
pub use descriptor::google_descriptor;

/// Provider id.
pub const ID: &str = "google";
