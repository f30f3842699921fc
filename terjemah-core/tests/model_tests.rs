//! Integration tests for core model types.

use terjemah_core::{ProviderConfig, ProviderTable, ProviderTier, StoredProvider, TranslationResult};

#[test]
fn test_saved_table_restores_onto_defaults() {
    let mut saved = ProviderTable::new([
        ProviderConfig::new("gpt4", "GPT-4 (OpenAI)", 1, 100),
        ProviderConfig::new("mymemory", "MyMemory", 4, 1000),
    ]);
    saved.record_success("mymemory").unwrap();
    let json = serde_json::to_string(&saved.to_vec()).unwrap();

    let stored: Vec<StoredProvider> = serde_json::from_str(&json).unwrap();
    let mut restored = ProviderTable::new([
        ProviderConfig::new("gpt4", "GPT-4 (OpenAI)", 1, 100),
        ProviderConfig::new("mymemory", "MyMemory", 4, 1000),
    ]);
    assert_eq!(restored.overlay(&stored), 2);
    assert_eq!(restored, saved);
}

#[test]
fn test_result_confidence_from_tier() {
    let result = TranslationResult::new("terima kasih", "mymemory", "MyMemory", ProviderTier::Public);
    assert_eq!(result.confidence, 0.8);

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["translatedText"], "terima kasih");
    assert_eq!(json["providerName"], "MyMemory");
}
