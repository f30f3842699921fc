// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Terjemah Store
//!
//! Settings persistence for the Terjemah application.
//!
//! This crate provides:
//!
//! - **SettingsBackend**: Key-value settings storage (JSON file or memory)
//! - **ProviderSettingsStore**: The persisted provider collection
//! - **Persistence**: File I/O helpers for JSON data
//!
//! ## Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use terjemah_store::{JsonFileStore, ProviderSettingsStore};
//!
//! let backend = JsonFileStore::open_default().await?;
//! let store = ProviderSettingsStore::new(Arc::new(backend));
//!
//! let saved = store.load().await?;
//! store.save(&providers).await?;
//! ```

pub mod error;
pub mod persistence;
pub mod settings_store;

pub use error::StoreError;
pub use persistence::{default_config_dir, default_settings_path, load_json, save_json};
pub use settings_store::{
    JsonFileStore, MemoryStore, PROVIDER_SETTINGS_KEY, ProviderSettingsStore, SettingsBackend,
};
#[cfg(test)]
mod persistence_tests;
