// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Terjemah Providers
//!
//! Concrete translation backends. Each provider module includes:
//!
//! - **API client**: request and response types plus a parser
//! - **Adapter**: the [`terjemah_fetch::TranslationAdapter`] implementation
//! - **Descriptor**: id, tier, default priority and quota, credential needs
//!
//! ## Supported Providers
//!
//! | Provider | Id | Tier | Key | Confidence |
//! |----------|----|------|-----|------------|
//! | GPT-4 (OpenAI) | `gpt4` | LLM | required | 0.95 |
//! | Google Translate | `google` | Commercial | required | 0.90 |
//! | LibreTranslate | `libretranslate` | Open service | optional | 0.80 |
//! | MyMemory | `mymemory` | Public | none | 0.80 |
//!
//! ## Usage
//!
//! ```ignore
//! use terjemah_providers::ProviderRegistry;
//!
//! let dispatcher = ProviderRegistry::dispatcher_builder()
//!     .store(store)
//!     .build()
//!     .await?;
//! ```

pub mod descriptor;
pub mod registry;

// Provider modules (alphabetical)
pub mod google;
pub mod libretranslate;
pub mod mymemory;
pub mod openai;

// Re-export key types
pub use descriptor::{CredentialConfig, DefaultSettings, ProviderDescriptor};
pub use registry::ProviderRegistry;

// Re-export adapters and descriptors
pub use google::{GoogleAdapter, google_descriptor};
pub use libretranslate::{LibreTranslateAdapter, libretranslate_descriptor};
pub use mymemory::{MyMemoryAdapter, mymemory_descriptor};
pub use openai::{OpenAiAdapter, openai_descriptor};
