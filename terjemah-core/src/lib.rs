// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Terjemah Core
//!
//! Core types and models shared by every Terjemah crate:
//!
//! - Domain models (languages, providers, quotas, results)
//! - Error types
//!
//! ## Key Types
//!
//! - [`Language`] - Indonesian or Japanese, with provider language codes
//! - [`ProviderConfig`] - One provider's settings and today's usage
//! - [`ProviderUpdate`] - Partial provider update
//! - [`ProviderTable`] - All providers; candidate selection and quota accounting
//! - [`ProviderTier`] - Static tier that fixes a provider's confidence
//! - [`TranslationRequest`] / [`TranslationResult`] - Dispatch input and output

pub mod error;
pub mod models;

pub use error::CoreError;

pub use models::{
    Language, ProviderConfig, ProviderTable, ProviderTier, ProviderUpdate, StoredProvider,
    TranslationRequest, TranslationResult,
};
