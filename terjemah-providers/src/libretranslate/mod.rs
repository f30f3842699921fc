//! LibreTranslate provider.
//!
//! Open-source translation service. Public instances work without a key;
//! when one is configured it is sent in the request body.

mod adapter;
mod api;
mod descriptor;

pub use adapter::LibreTranslateAdapter;
pub use api::{LIBRETRANSLATE_API_BASE, LibreTranslateApiClient, LibreTranslateResponse, parse_translate_response};
pub use descriptor::libretranslate_descriptor;

/// Provider id.
pub const ID: &str = "libretranslate";
