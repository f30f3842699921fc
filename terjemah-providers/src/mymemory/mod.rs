//! MyMemory provider.
//!
//! Free public translation memory. No key; a plain GET with the text and a
//! `source|target` language pair.

mod adapter;
mod api;
mod descriptor;

pub use adapter::MyMemoryAdapter;
pub use api::{MYMEMORY_API_BASE, MyMemoryApiClient, MyMemoryResponse, parse_get_response};
pub use descriptor::mymemory_descriptor;

/// Provider id.
pub const ID: &str = "mymemory";
