//! Preset Store Integration Tests
//!
//! Lifecycle tests for the custom preset collection: upsert semantics,
//! capacity eviction, and the import/export paths.

use std::sync::Arc;
use std::time::Duration;

use promptify::services::validation::MAX_CUSTOM_PRESETS;
use promptify::{
    AppError, ExportBundle, ImportOptions, ImportReport, MemoryKvBackend, Preset, PresetStore,
};

// ============================================================================
// Helper Functions
// ============================================================================

fn store() -> PresetStore {
    PresetStore::new(Arc::new(MemoryKvBackend::new()))
}

fn preset(id: &str, name: &str) -> Preset {
    Preset {
        id: id.to_string(),
        name: name.to_string(),
        description: "test preset".to_string(),
        system_prompt: "Rewrite the following:\n\n{{input}}".to_string(),
        tags: vec!["test".to_string()],
        is_built_in: false,
        examples: vec![],
        created_at: None,
        updated_at: None,
    }
}

fn preset_json(id: &str, name: &str) -> String {
    format!(
        r#"{{"id": "{}", "name": "{}", "systemPrompt": "Rewrite:\n\n{{{{input}}}}"}}"#,
        id, name
    )
}

// ============================================================================
// Upsert Semantics
// ============================================================================

#[tokio::test]
async fn test_upsert_idempotence() {
    let store = store();

    let first = store.upsert(preset("p1", "P1")).await.unwrap();
    let second = store.upsert(preset("p1", "P1")).await.unwrap();

    let all = store.list().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, "p1");
    assert_eq!(second.created_at, first.created_at);
}

#[tokio::test]
async fn test_upsert_replaces_content() {
    let store = store();
    store.upsert(preset("p1", "Original")).await.unwrap();

    let mut changed = preset("p1", "Renamed");
    changed.description = "changed".to_string();
    store.upsert(changed).await.unwrap();

    let all = store.list().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].name, "Renamed");
    assert_eq!(all[0].description, "changed");
}

#[tokio::test]
async fn test_upsert_rejects_template_without_placeholder() {
    let store = store();
    let mut bad = preset("p1", "Bad");
    bad.system_prompt = "no token here".to_string();

    let err = store.upsert(bad).await.unwrap_err();
    match err {
        AppError::Validation(msg) => assert!(msg.contains("{{input}}")),
        other => panic!("expected validation error, got {}", other),
    }
    assert!(store.list().await.unwrap().is_empty());
}

// ============================================================================
// Capacity Eviction
// ============================================================================

#[tokio::test]
async fn test_eviction_keeps_most_recently_updated() {
    let store = store();

    for i in 0..=MAX_CUSTOM_PRESETS {
        store
            .upsert(preset(&format!("p{}", i), &format!("P{}", i)))
            .await
            .unwrap();
        // Keep updatedAt strictly increasing so recency is unambiguous.
        tokio::time::sleep(Duration::from_millis(2)).await;
    }

    let all = store.list().await.unwrap();
    assert_eq!(all.len(), MAX_CUSTOM_PRESETS);

    // The very first insert is the stalest and must be gone.
    assert!(!all.iter().any(|p| p.id == "p0"));
    // The newest insert survived.
    assert!(all.iter().any(|p| p.id == format!("p{}", MAX_CUSTOM_PRESETS)));
}

#[tokio::test]
async fn test_updating_existing_preset_does_not_evict() {
    let store = store();

    for i in 0..MAX_CUSTOM_PRESETS {
        store
            .upsert(preset(&format!("p{}", i), &format!("P{}", i)))
            .await
            .unwrap();
    }

    // Re-saving an existing id keeps the count at the cap.
    store.upsert(preset("p0", "P0 updated")).await.unwrap();
    assert_eq!(store.list().await.unwrap().len(), MAX_CUSTOM_PRESETS);
}

// ============================================================================
// Delete / Clear
// ============================================================================

#[tokio::test]
async fn test_delete_then_clear() {
    let store = store();
    store.upsert(preset("p1", "P1")).await.unwrap();
    store.upsert(preset("p2", "P2")).await.unwrap();

    store.delete("p1").await.unwrap();
    assert_eq!(store.list().await.unwrap().len(), 1);

    // Deleting an absent id is not an error.
    store.delete("p1").await.unwrap();

    store.clear().await.unwrap();
    assert!(store.list().await.unwrap().is_empty());
}

// ============================================================================
// Export
// ============================================================================

#[tokio::test]
async fn test_export_one_round_trip() {
    let store = store();
    store.upsert(preset("p1", "P1")).await.unwrap();

    let json = store.export_one("p1").await.unwrap();
    let parsed: Preset = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.id, "p1");
    assert_eq!(parsed.name, "P1");
}

#[tokio::test]
async fn test_export_one_unknown_id_fails() {
    let err = store().export_one("nope").await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_export_all_envelope() {
    let store = store();
    store.upsert(preset("p1", "P1")).await.unwrap();
    store.upsert(preset("p2", "P2")).await.unwrap();

    let json = store.export_all().await.unwrap();
    let bundle: ExportBundle = serde_json::from_str(&json).unwrap();
    assert_eq!(bundle.presets_count, 2);
    assert_eq!(bundle.presets.len(), 2);
    assert!(!bundle.exported_at.is_empty());
    assert_eq!(bundle.version, "1.0.0");
}

#[tokio::test]
async fn test_export_all_empty_collection_fails() {
    let err = store().export_all().await.unwrap_err();
    assert!(matches!(err, AppError::Storage(_)));
}

// ============================================================================
// Import (single)
// ============================================================================

#[tokio::test]
async fn test_import_without_id_mints_one() {
    let store = store();
    let json = r#"{"name": "Imported", "systemPrompt": "Go:\n\n{{input}}"}"#;

    let imported = store
        .import_one(json, ImportOptions::default())
        .await
        .unwrap();
    assert!(imported.id.starts_with("preset-"));
    assert_eq!(imported.name, "Imported");
    assert!(!imported.is_built_in);
}

#[tokio::test]
async fn test_import_collision_without_overwrite_mints_new_id() {
    let store = store();
    store.upsert(preset("p1", "Existing")).await.unwrap();

    let imported = store
        .import_one(&preset_json("p1", "Incoming"), ImportOptions::default())
        .await
        .unwrap();

    assert_ne!(imported.id, "p1");
    let all = store.list().await.unwrap();
    assert_eq!(all.len(), 2);
    // The original entry is untouched.
    assert_eq!(
        all.iter().find(|p| p.id == "p1").unwrap().name,
        "Existing"
    );
}

#[tokio::test]
async fn test_import_collision_with_overwrite_replaces() {
    let store = store();
    store.upsert(preset("p1", "Existing")).await.unwrap();

    let imported = store
        .import_one(
            &preset_json("p1", "Incoming"),
            ImportOptions {
                overwrite: true,
                merge: true,
            },
        )
        .await
        .unwrap();

    assert_eq!(imported.id, "p1");
    let all = store.list().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].name, "Incoming");
}

#[tokio::test]
async fn test_import_preserves_supplied_created_at() {
    let store = store();
    let json = r#"{"name": "Old", "systemPrompt": "{{input}}", "createdAt": 12345}"#;

    let imported = store
        .import_one(json, ImportOptions::default())
        .await
        .unwrap();
    assert_eq!(imported.created_at, Some(12345));
    assert!(imported.updated_at.unwrap() > 12345);
}

#[tokio::test]
async fn test_import_rejects_missing_fields() {
    let store = store();

    let err = store
        .import_one(r#"{"systemPrompt": "{{input}}"}"#, ImportOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let err = store
        .import_one(r#"{"name": "No template"}"#, ImportOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let err = store
        .import_one("not json at all", ImportOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Storage(_)));
}

// ============================================================================
// Import (bulk)
// ============================================================================

#[tokio::test]
async fn test_bulk_import_partial_success() {
    let store = store();
    let json = r#"{
        "presets": [
            {"name": "First", "systemPrompt": "A:\n\n{{input}}"},
            {"systemPrompt": "missing a name {{input}}"},
            {"name": "Third", "systemPrompt": "C:\n\n{{input}}"}
        ]
    }"#;

    let report: ImportReport = store
        .import_many(
            json,
            ImportOptions {
                overwrite: false,
                merge: true,
            },
        )
        .await
        .unwrap();

    assert_eq!(report.imported, 2);
    assert_eq!(report.skipped, 1);
    assert_eq!(report.errors.len(), 1);
    assert!(report.errors[0].contains("name is required"));

    assert_eq!(store.list().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_bulk_import_replace_all_mode() {
    let store = store();
    store.upsert(preset("keepme", "Keep Me")).await.unwrap();

    let json = r#"{"presets": [{"name": "Only One", "systemPrompt": "{{input}}"}]}"#;
    let report = store
        .import_many(json, ImportOptions::default())
        .await
        .unwrap();

    assert_eq!(report.imported, 1);
    let all = store.list().await.unwrap();
    // merge=false, overwrite=false clears the existing collection first.
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].name, "Only One");
}

#[tokio::test]
async fn test_bulk_import_merge_mode_keeps_existing() {
    let store = store();
    store.upsert(preset("keepme", "Keep Me")).await.unwrap();

    let json = r#"{"presets": [{"name": "Added", "systemPrompt": "{{input}}"}]}"#;
    store
        .import_many(
            json,
            ImportOptions {
                overwrite: false,
                merge: true,
            },
        )
        .await
        .unwrap();

    let all = store.list().await.unwrap();
    assert_eq!(all.len(), 2);
    assert!(all.iter().any(|p| p.id == "keepme"));
}

#[tokio::test]
async fn test_bulk_import_requires_presets_array() {
    let err = store()
        .import_many(r#"{"version": "1.0.0"}"#, ImportOptions::default())
        .await
        .unwrap_err();
    match err {
        AppError::Storage(msg) => assert!(msg.contains("presets")),
        other => panic!("expected storage error, got {}", other),
    }
}

#[tokio::test]
async fn test_exported_bundle_imports_back() {
    let store = store();
    store.upsert(preset("p1", "P1")).await.unwrap();
    store.upsert(preset("p2", "P2")).await.unwrap();
    let json = store.export_all().await.unwrap();

    let other = PresetStore::new(Arc::new(MemoryKvBackend::new()));
    let report = other
        .import_many(&json, ImportOptions::default())
        .await
        .unwrap();

    assert_eq!(report.imported, 2);
    assert_eq!(report.skipped, 0);
    let all = other.list().await.unwrap();
    assert_eq!(all.len(), 2);
}
