//! Key-value settings storage.
//!
//! Provider configuration lives under a single key in a key-value settings
//! backend. Two backends ship with the crate:
//!
//! - [`JsonFileStore`] - a JSON object on disk, one entry per key
//! - [`MemoryStore`] - process-local, for tests and ephemeral sessions
//!
//! [`ProviderSettingsStore`] layers the provider collection format on top of
//! any backend.

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use terjemah_core::{ProviderConfig, StoredProvider};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::error::StoreError;
use crate::persistence::{default_settings_path, load_json, save_json};

/// Key under which the provider collection is stored.
pub const PROVIDER_SETTINGS_KEY: &str = "translation_api_settings";

// ============================================================================
// Settings Backend
// ============================================================================

/// A persistent key-value store for settings.
#[async_trait]
pub trait SettingsBackend: Send + Sync {
    /// Reads the value stored under `key`.
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;

    /// Writes `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: Value) -> Result<(), StoreError>;

    /// Human-readable location of the store, for diagnostics.
    fn location(&self) -> String;
}

// ============================================================================
// JSON File Store
// ============================================================================

/// Settings backend backed by a JSON object file.
///
/// The whole file is cached in memory and rewritten atomically on each `set`.
pub struct JsonFileStore {
    path: PathBuf,
    entries: RwLock<Map<String, Value>>,
}

impl JsonFileStore {
    /// Opens the store at the default settings path.
    ///
    /// # Errors
    ///
    /// Returns error if an existing settings file cannot be read.
    pub async fn open_default() -> Result<Self, StoreError> {
        Self::open(default_settings_path()).await
    }

    /// Opens the store at `path`.
    ///
    /// A missing file yields an empty store. A file that is not valid JSON
    /// is logged and treated as empty; it is replaced on the next write.
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();

        let entries = if path.exists() {
            info!(path = %path.display(), "Loading settings");
            match load_json::<Value>(&path).await {
                Ok(Value::Object(map)) => map,
                Ok(_) => {
                    warn!(path = %path.display(), "Settings file is not a JSON object, using defaults");
                    Map::new()
                }
                Err(StoreError::Io(e)) => return Err(StoreError::Io(e)),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Failed to parse settings, using defaults");
                    Map::new()
                }
            }
        } else {
            debug!(path = %path.display(), "Settings file not found, using defaults");
            Map::new()
        };

        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    /// Returns the settings file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SettingsBackend for JsonFileStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), value);
        save_json(&self.path, &*entries).await?;
        debug!(path = %self.path.display(), key, "Settings saved");
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

// ============================================================================
// Memory Store
// ============================================================================

/// In-memory settings backend.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Value>>,
    writes: RwLock<u64>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with one entry.
    pub fn with_entry(key: impl Into<String>, value: Value) -> Self {
        let mut entries = HashMap::new();
        entries.insert(key.into(), value);
        Self {
            entries: RwLock::new(entries),
            writes: RwLock::new(0),
        }
    }

    /// Number of `set` calls so far.
    pub async fn write_count(&self) -> u64 {
        *self.writes.read().await
    }
}

#[async_trait]
impl SettingsBackend for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        self.entries.write().await.insert(key.to_string(), value);
        *self.writes.write().await += 1;
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}

// ============================================================================
// Provider Settings Store
// ============================================================================

/// Reads and writes the provider collection through a settings backend.
#[derive(Clone)]
pub struct ProviderSettingsStore {
    backend: Arc<dyn SettingsBackend>,
}

impl ProviderSettingsStore {
    /// Wraps a backend.
    pub fn new(backend: Arc<dyn SettingsBackend>) -> Self {
        Self { backend }
    }

    /// Store backed by a fresh [`MemoryStore`].
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// Returns the underlying backend.
    pub fn backend(&self) -> &Arc<dyn SettingsBackend> {
        &self.backend
    }

    /// Loads the persisted provider entries.
    ///
    /// Returns an empty list when nothing has been saved yet. Entries are
    /// parsed one at a time: a malformed entry is logged and skipped without
    /// affecting the others. A stored value that is not a list is ignored.
    ///
    /// # Errors
    ///
    /// Returns error if the backend cannot be read.
    pub async fn load(&self) -> Result<Vec<StoredProvider>, StoreError> {
        let Some(value) = self.backend.get(PROVIDER_SETTINGS_KEY).await? else {
            debug!("No saved provider settings");
            return Ok(Vec::new());
        };

        let Value::Array(entries) = value else {
            warn!("Saved provider settings are not a list, using defaults");
            return Ok(Vec::new());
        };

        let total = entries.len();
        let stored: Vec<StoredProvider> = entries
            .into_iter()
            .enumerate()
            .filter_map(|(index, entry)| {
                let id = entry.get("id").and_then(Value::as_str).map(str::to_string);
                match serde_json::from_value::<StoredProvider>(entry) {
                    Ok(provider) => Some(provider),
                    Err(e) => {
                        warn!(index, id = ?id, error = %e, "Skipping malformed provider entry");
                        None
                    }
                }
            })
            .collect();

        debug!(count = stored.len(), skipped = total - stored.len(), "Loaded provider settings");
        Ok(stored)
    }

    /// Persists the full provider collection.
    ///
    /// # Errors
    ///
    /// Returns error if the collection cannot be serialized or written.
    pub async fn save(&self, providers: &[ProviderConfig]) -> Result<(), StoreError> {
        let value = serde_json::to_value(providers)?;
        self.backend.set(PROVIDER_SETTINGS_KEY, value).await?;
        debug!(count = providers.len(), "Provider settings saved");
        Ok(())
    }
}

impl std::fmt::Debug for ProviderSettingsStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderSettingsStore")
            .field("location", &self.backend.location())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert!(store.get("missing").await.unwrap().is_none());

        store.set("key", serde_json::json!([1, 2])).await.unwrap();
        assert_eq!(store.get("key").await.unwrap(), Some(serde_json::json!([1, 2])));
        assert_eq!(store.write_count().await, 1);
    }

    #[tokio::test]
    async fn test_provider_store_empty() {
        let store = ProviderSettingsStore::in_memory();
        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_provider_store_save_and_load() {
        let store = ProviderSettingsStore::in_memory();
        let providers = vec![
            ProviderConfig::new("gpt4", "GPT-4 (OpenAI)", 1, 100).with_api_key("sk-test"),
            ProviderConfig::new("mymemory", "MyMemory", 4, 1000).with_used_today(12),
        ];

        store.save(&providers).await.unwrap();
        let stored = store.load().await.unwrap();

        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0].id, "gpt4");
        assert_eq!(stored[0].fields.api_key.as_deref(), Some("sk-test"));
        assert_eq!(stored[1].fields.used_today, Some(12));
    }

    #[tokio::test]
    async fn test_provider_store_skips_only_malformed_entries() {
        let backend = MemoryStore::with_entry(
            PROVIDER_SETTINGS_KEY,
            serde_json::json!([
                {"id": "gpt4", "apiKey": "sk-keep", "usedToday": 7},
                {"id": "google", "dailyQuota": 500.5},
                {"enabled": true},
                {"id": "mymemory", "enabled": false}
            ]),
        );
        let store = ProviderSettingsStore::new(Arc::new(backend));

        let stored = store.load().await.unwrap();
        let ids: Vec<&str> = stored.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["gpt4", "mymemory"]);
        assert_eq!(stored[0].fields.api_key.as_deref(), Some("sk-keep"));
        assert_eq!(stored[0].fields.used_today, Some(7));
        assert_eq!(stored[1].fields.enabled, Some(false));
    }

    #[tokio::test]
    async fn test_provider_store_malformed_value() {
        let backend = MemoryStore::with_entry(PROVIDER_SETTINGS_KEY, serde_json::json!("oops"));
        let store = ProviderSettingsStore::new(Arc::new(backend));
        assert!(store.load().await.unwrap().is_empty());
    }
}
