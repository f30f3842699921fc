//! Persistence round-trip and edge case tests.
//!
//! Tests file I/O operations, the JSON file backend, and provider settings
//! surviving a reopen.

use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

use crate::persistence::{load_json, save_json};
use crate::settings_store::{
    JsonFileStore, PROVIDER_SETTINGS_KEY, ProviderSettingsStore, SettingsBackend,
};
use terjemah_core::ProviderConfig;

// ============================================================================
// JSON Persistence Tests
// ============================================================================

#[tokio::test]
async fn test_save_creates_parent_directories() {
    let temp_dir = TempDir::new().unwrap();
    let nested_path = temp_dir.path().join("deeply").join("nested").join("settings.json");

    let data = serde_json::json!({"key": "value"});

    let result = save_json(&nested_path, &data).await;
    assert!(result.is_ok());
    assert!(nested_path.exists());
}

#[tokio::test]
async fn test_save_leaves_no_temp_file() {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("settings.json");

    save_json(&file_path, &serde_json::json!({"a": 1})).await.unwrap();

    assert!(file_path.exists());
    assert!(!temp_dir.path().join("settings.json.tmp").exists());
}

#[tokio::test]
async fn test_load_nonexistent_file() {
    let file_path = PathBuf::from("/nonexistent/path/settings.json");

    let result: Result<serde_json::Value, _> = load_json(&file_path).await;
    assert!(result.is_err());
}

// ============================================================================
// JSON File Store Tests
// ============================================================================

#[tokio::test]
async fn test_file_store_missing_file_is_empty() {
    let temp_dir = TempDir::new().unwrap();
    let store = JsonFileStore::open(temp_dir.path().join("settings.json"))
        .await
        .unwrap();

    assert!(store.get(PROVIDER_SETTINGS_KEY).await.unwrap().is_none());
}

#[tokio::test]
async fn test_file_store_persists_across_reopen() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("settings.json");

    {
        let store = JsonFileStore::open(&path).await.unwrap();
        store.set("theme", serde_json::json!("dark")).await.unwrap();
        store.set("fontSize", serde_json::json!(14)).await.unwrap();
    }

    let reopened = JsonFileStore::open(&path).await.unwrap();
    assert_eq!(reopened.get("theme").await.unwrap(), Some(serde_json::json!("dark")));
    assert_eq!(reopened.get("fontSize").await.unwrap(), Some(serde_json::json!(14)));
}

#[tokio::test]
async fn test_file_store_corrupt_file_uses_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("settings.json");
    tokio::fs::write(&path, "{ not json").await.unwrap();

    let store = JsonFileStore::open(&path).await.unwrap();
    assert!(store.get(PROVIDER_SETTINGS_KEY).await.unwrap().is_none());

    // The next write replaces the corrupt file.
    store.set("k", serde_json::json!(true)).await.unwrap();
    let raw: serde_json::Value = load_json(&path).await.unwrap();
    assert_eq!(raw, serde_json::json!({"k": true}));
}

#[tokio::test]
async fn test_file_store_non_object_uses_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("settings.json");
    tokio::fs::write(&path, "[1, 2, 3]").await.unwrap();

    let store = JsonFileStore::open(&path).await.unwrap();
    assert!(store.get("anything").await.unwrap().is_none());
}

// ============================================================================
// Provider Settings Persistence Tests
// ============================================================================

#[tokio::test]
async fn test_provider_settings_full_roundtrip() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("settings.json");

    let providers = vec![
        ProviderConfig::new("gpt4", "GPT-4 (OpenAI)", 1, 100).with_api_key("sk-abc"),
        ProviderConfig::new("google", "Google Translate", 2, 500).with_enabled(false),
        ProviderConfig::new("mymemory", "MyMemory", 4, 1000).with_used_today(999),
    ];

    {
        let store = ProviderSettingsStore::new(Arc::new(JsonFileStore::open(&path).await.unwrap()));
        store.save(&providers).await.unwrap();
    }

    let store = ProviderSettingsStore::new(Arc::new(JsonFileStore::open(&path).await.unwrap()));
    let stored = store.load().await.unwrap();

    assert_eq!(stored.len(), 3);
    assert_eq!(stored[0].fields.api_key.as_deref(), Some("sk-abc"));
    assert_eq!(stored[1].fields.enabled, Some(false));
    assert_eq!(stored[2].fields.used_today, Some(999));
    assert_eq!(stored[2].fields.daily_quota, Some(1000));
}

#[tokio::test]
async fn test_provider_settings_file_layout() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("settings.json");

    let store = ProviderSettingsStore::new(Arc::new(JsonFileStore::open(&path).await.unwrap()));
    store
        .save(&[ProviderConfig::new("mymemory", "MyMemory", 4, 1000)])
        .await
        .unwrap();

    let raw: serde_json::Value = load_json(&path).await.unwrap();
    let entry = &raw[PROVIDER_SETTINGS_KEY][0];
    assert_eq!(entry["id"], "mymemory");
    assert_eq!(entry["dailyQuota"], 1000);
    assert_eq!(entry["usedToday"], 0);
    assert!(entry.get("apiKey").is_none());
}
