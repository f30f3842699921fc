//! Translation adapter trait and capability table.
//!
//! An adapter turns a [`TranslationRequest`] into translated text using one
//! external service. The dispatcher never talks to a service directly; it
//! looks the adapter up by provider id in an [`AdapterRegistry`].

use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use terjemah_core::{ProviderTier, TranslationRequest};

use crate::context::TranslateContext;
use crate::error::ProviderError;

// ============================================================================
// Translation Adapter Trait
// ============================================================================

/// One external translation service.
///
/// ## Implementing an Adapter
///
/// ```ignore
/// struct EchoAdapter;
///
/// #[async_trait]
/// impl TranslationAdapter for EchoAdapter {
///     fn id(&self) -> &str {
///         "echo"
///     }
///
///     fn tier(&self) -> ProviderTier {
///         ProviderTier::Public
///     }
///
///     async fn translate(
///         &self,
///         _ctx: &TranslateContext,
///         request: &TranslationRequest,
///         _credential: Option<&str>,
///     ) -> Result<String, ProviderError> {
///         Ok(request.text.clone())
///     }
/// }
/// ```
#[async_trait]
pub trait TranslationAdapter: Send + Sync {
    /// Provider id this adapter serves (e.g. `"mymemory"`).
    fn id(&self) -> &str;

    /// Quality tier, which fixes the reported confidence.
    fn tier(&self) -> ProviderTier;

    /// Whether a call without a credential is pointless.
    fn requires_credential(&self) -> bool {
        false
    }

    /// Translates `request`.
    ///
    /// `credential` is the provider's configured API key, if any. Adapters
    /// that require one must fail with [`ProviderError::MissingCredential`]
    /// before touching the network.
    async fn translate(
        &self,
        ctx: &TranslateContext,
        request: &TranslationRequest,
        credential: Option<&str>,
    ) -> Result<String, ProviderError>;
}

/// Returns the credential or a [`ProviderError::MissingCredential`] for `provider`.
///
/// Blank credentials count as missing.
///
/// # Errors
///
/// Returns error if `credential` is `None` or blank.
pub fn require_credential<'a>(
    provider: &str,
    credential: Option<&'a str>,
) -> Result<&'a str, ProviderError> {
    match credential.map(str::trim) {
        Some(key) if !key.is_empty() => Ok(key),
        _ => Err(ProviderError::MissingCredential(provider.to_string())),
    }
}

// ============================================================================
// Adapter Registry
// ============================================================================

/// Capability table mapping provider ids to adapters.
#[derive(Clone, Default)]
pub struct AdapterRegistry {
    adapters: HashMap<String, Arc<dyn TranslationAdapter>>,
}

impl AdapterRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an adapter under its own id, replacing any previous one.
    pub fn register(&mut self, adapter: Arc<dyn TranslationAdapter>) {
        self.adapters.insert(adapter.id().to_string(), adapter);
    }

    /// Looks up the adapter for `id`.
    pub fn get(&self, id: &str) -> Option<&Arc<dyn TranslationAdapter>> {
        self.adapters.get(id)
    }

    /// Returns true if an adapter is registered for `id`.
    pub fn contains(&self, id: &str) -> bool {
        self.adapters.contains_key(id)
    }

    /// Registered ids, sorted.
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.adapters.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Number of registered adapters.
    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    /// Returns true if no adapter is registered.
    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }
}

impl fmt::Debug for AdapterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdapterRegistry")
            .field("ids", &self.ids())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use terjemah_core::Language;

    struct EchoAdapter(&'static str);

    #[async_trait]
    impl TranslationAdapter for EchoAdapter {
        fn id(&self) -> &str {
            self.0
        }

        fn tier(&self) -> ProviderTier {
            ProviderTier::Public
        }

        async fn translate(
            &self,
            _ctx: &TranslateContext,
            request: &TranslationRequest,
            _credential: Option<&str>,
        ) -> Result<String, ProviderError> {
            Ok(request.text.clone())
        }
    }

    #[test]
    fn test_require_credential() {
        assert_eq!(require_credential("gpt4", Some("sk-1")).unwrap(), "sk-1");
        assert!(matches!(
            require_credential("gpt4", None),
            Err(ProviderError::MissingCredential(id)) if id == "gpt4"
        ));
        assert!(require_credential("gpt4", Some("   ")).is_err());
    }

    #[test]
    fn test_registry_lookup() {
        let mut registry = AdapterRegistry::new();
        assert!(registry.is_empty());

        registry.register(Arc::new(EchoAdapter("b")));
        registry.register(Arc::new(EchoAdapter("a")));
        registry.register(Arc::new(EchoAdapter("a")));

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.ids(), vec!["a", "b"]);
        assert!(registry.contains("a"));
        assert!(registry.get("missing").is_none());
    }

    #[tokio::test]
    async fn test_adapter_defaults() {
        let adapter = EchoAdapter("echo");
        assert!(!adapter.requires_credential());

        let ctx = TranslateContext::new();
        let request = TranslationRequest::new("halo", Language::Indonesian, Language::Japanese);
        assert_eq!(adapter.translate(&ctx, &request, None).await.unwrap(), "halo");
    }
}
