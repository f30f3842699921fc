//! OpenAI GPT-4 provider.
//!
//! Translates through the chat completions API with a translation-only
//! system message. Needs an API key, sent as a bearer token.

mod adapter;
mod api;
mod descriptor;

pub use adapter::OpenAiAdapter;
pub use api::{ChatResponse, OPENAI_API_BASE, OpenAiApiClient, parse_chat_response, system_prompt};
pub use descriptor::openai_descriptor;

/// Provider id.
pub const ID: &str = "gpt4";
