// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Terjemah Fetch
//!
//! Provider dispatch and host APIs for Terjemah.
//!
//! ## Host APIs
//!
//! - [`http::HttpClient`] - HTTP client with tracing and status handling
//! - [`context::TranslateContext`] - what every adapter call receives
//!
//! ## Dispatch
//!
//! - [`adapter::TranslationAdapter`] - trait for one external service
//! - [`adapter::AdapterRegistry`] - provider id to adapter table
//! - [`dispatcher::TranslationDispatcher`] - fallback dispatch, provider
//!   configuration and the daily quota reset timer
//!
//! ## Example
//!
//! ```ignore
//! use terjemah_fetch::TranslationDispatcher;
//!
//! let dispatcher = TranslationDispatcher::builder()
//!     .provider(ProviderConfig::new("mymemory", "MyMemory", 4, 1000), Arc::new(MyMemoryAdapter::new()))
//!     .store(store)
//!     .build()
//!     .await?;
//!
//! let request = TranslationRequest::new("terima kasih", Language::Indonesian, Language::Japanese);
//! let result = dispatcher.dispatch(&request).await?;
//! ```

pub mod adapter;
pub mod context;
pub mod dispatcher;
pub mod error;
pub mod http;
pub mod schedule;


// Errors
pub use error::{DispatchError, HttpError, ProviderError};

// Host APIs
pub use context::{TranslateContext, TranslateContextBuilder, TranslateSettings};
pub use http::HttpClient;

// Dispatch
pub use adapter::{AdapterRegistry, TranslationAdapter, require_credential};
pub use dispatcher::{DispatchAttempt, DispatchOutcome, DispatcherBuilder, TranslationDispatcher};
pub use schedule::{ResetSchedule, duration_until_next_midnight};
