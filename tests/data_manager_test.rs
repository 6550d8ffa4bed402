//! Data manager tests: export snapshots, conflict modes, seed files.

mod common;

use std::fs;

use role_matrix::config::Config;
use role_matrix::models::data_manager::export::{export_data, export_json};
use role_matrix::models::data_manager::import::{import_data, parse_payload};
use role_matrix::models::data_manager::types::{ConflictMode, ExportPayload, ImportPayload};
use role_matrix::models::module::{AccessLevel, Module};
use role_matrix::models::role::ModuleCount;
use role_matrix::{AppError, RoleMatrixStore, seed};
use tempfile::TempDir;
use common::*;

fn payload(json: &str) -> ImportPayload {
    parse_payload(json).expect("valid payload JSON")
}

// ============================================================================
// EXPORT
// ============================================================================

#[test]
fn test_export_snapshot() {
    let store = seeded_store();

    let snapshot = export_data(&store);

    assert_eq!(snapshot.roles.len(), 6);
    assert_eq!(snapshot.role_names.len(), 6);
    assert_eq!(snapshot.matrix.len(), 6);
    assert_eq!(snapshot.matrix.level("Clinical", Module::Medication), AccessLevel::Full);
}

#[test]
fn test_export_json_shape() {
    let store = seeded_store();

    let json = export_json(&store).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["roles"][0]["id"], "administrator");
    assert_eq!(value["roles"][0]["module_count"], "All");
    assert_eq!(value["roles"][4]["module_count"], 9);
    assert_eq!(value["matrix"]["Clinical"]["Medication (eMAR)"], "Full");

    let back: ExportPayload = serde_json::from_str(&json).unwrap();
    assert_eq!(back, export_data(&store));
}

// ============================================================================
// IMPORT
// ============================================================================

#[test]
fn test_import_creates_in_payload_order() {
    let mut store = RoleMatrixStore::new();
    let json = r#"{
        "roles": [
            { "name": "Night Lead", "access": { "Repairs": "None" } },
            { "name": "Day Lead", "status": "Inactive", "user_count": 4 }
        ]
    }"#;

    let result = import_data(&mut store, &payload(json)).unwrap();

    assert_eq!(result.created, 2);
    let ids: Vec<&str> = store.roles().iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["night-lead", "day-lead"]);
    assert_eq!(store.role("night-lead").unwrap().module_count, ModuleCount::Count(11));
    assert_eq!(store.role("day-lead").unwrap().user_count, 4);
    assert_eq!(store.role("day-lead").unwrap().permissions_label, "Custom");
    assert_views_consistent(&store);
}

#[test]
fn test_import_reports_invalid_items() {
    let mut store = RoleMatrixStore::new();
    let json = r#"{ "roles": [ { "name": "  " }, { "name": "Valid" } ] }"#;

    let result = import_data(&mut store, &payload(json)).unwrap();

    assert_eq!(result.created, 1);
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].reason, "Name is required");
}

#[test]
fn test_import_rejects_unknown_module() {
    let err = parse_payload(r#"{ "roles": [ { "name": "X", "access": { "Payroll": "Full" } } ] }"#)
        .unwrap_err();
    assert!(matches!(err, AppError::Json(_)));
}

#[test]
fn test_import_skip_mode() {
    let mut store = seeded_store();
    let json = r#"{ "conflict_mode": "skip", "roles": [
        { "name": "clinical", "description": "ignored" },
        { "name": "Night Lead" }
    ] }"#;

    let result = import_data(&mut store, &payload(json)).unwrap();

    assert_eq!((result.created, result.skipped, result.updated), (1, 1, 0));
    assert_eq!(store.role("clinical").unwrap().description, "Therapists and case managers.");
}

#[test]
fn test_import_upsert_overlays_access() {
    let mut store = seeded_store();
    let json = r#"{ "conflict_mode": "upsert", "roles": [
        { "name": "Clinical", "description": "Clinical services", "user_count": 7,
          "access": { "Repairs": "Edit" } }
    ] }"#;

    let result = import_data(&mut store, &payload(json)).unwrap();

    assert_eq!(result.updated, 1);
    let clinical = store.role("clinical").unwrap();
    assert_eq!(clinical.description, "Clinical services");
    assert_eq!(clinical.user_count, 7);
    assert_eq!(clinical.module_count, ModuleCount::Count(10));
    let matrix = store.access_matrix();
    assert_eq!(matrix.level("Clinical", Module::Repairs), AccessLevel::Edit);
    assert_eq!(matrix.level("Clinical", Module::Medication), AccessLevel::Full);
}

#[test]
fn test_import_upsert_by_id_renames() {
    let mut store = seeded_store();
    let json = r#"{ "conflict_mode": "upsert", "roles": [
        { "id": "jjyds-i", "name": "JJYDS I (Trainee)" }
    ] }"#;

    import_data(&mut store, &payload(json)).unwrap();

    assert_eq!(store.role("jjyds-i").unwrap().name, "JJYDS I (Trainee)");
    assert!(!store.access_matrix().contains("JJYDS I"));
    assert_eq!(store.access_matrix().level("JJYDS I (Trainee)", Module::Medication), AccessLevel::None);
    assert_eq!(store.role_names()[3], "JJYDS I (Trainee)");
    assert_views_consistent(&store);
}

#[test]
fn test_import_fail_mode_leaves_store_untouched() {
    let mut store = seeded_store();
    let before = export_data(&store);
    let json = r#"{ "conflict_mode": "fail", "roles": [
        { "name": "Night Lead" },
        { "name": "Maintenance" }
    ] }"#;

    let err = import_data(&mut store, &payload(json)).unwrap_err();

    assert!(matches!(err, AppError::Import(_)), "unexpected error {err}");
    assert_eq!(export_data(&store), before);
}

#[test]
fn test_import_fail_mode_catches_duplicates_within_payload() {
    let mut store = RoleMatrixStore::new();
    let json = r#"{ "conflict_mode": "fail", "roles": [
        { "name": "Night Lead" },
        { "name": "NIGHT LEAD" }
    ] }"#;

    assert!(import_data(&mut store, &payload(json)).is_err());
    assert!(store.roles().is_empty());
}

#[test]
fn test_import_is_audited() {
    let mut store = RoleMatrixStore::new();

    import_data(&mut store, &payload(r#"{ "roles": [ { "name": "A" } ] }"#)).unwrap();

    let entry = store.audit().latest().unwrap();
    assert_eq!(entry.action, "data.imported");
    assert_eq!(entry.details["created"], 1);
}

// ============================================================================
// CONFIG + SEED FILES
// ============================================================================

fn write_seed(dir: &TempDir, json: &str) -> std::path::PathBuf {
    let path = dir.path().join("roles.json");
    fs::write(&path, json).expect("Failed to write seed file");
    path
}

#[test]
fn test_build_store_with_defaults_and_seed_file() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_seed(&dir, r#"{ "roles": [ { "name": "Night Lead" } ] }"#);
    let config = Config { seed_path: Some(path), ..Config::default() };

    let store = seed::build_store(&config).unwrap();

    assert_eq!(store.roles().len(), 7);
    assert!(store.role("night-lead").is_some());
}

#[test]
fn test_build_store_seed_file_only() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_seed(&dir, r#"{ "roles": [ { "name": "Night Lead" } ] }"#);
    let config = Config { seed_path: Some(path), seed_defaults: false, ..Config::default() };

    let store = seed::build_store(&config).unwrap();

    assert_eq!(store.roles().len(), 1);
}

#[test]
fn test_build_store_conflict_mode_from_config() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_seed(&dir, r#"{ "roles": [ { "name": "Clinical", "description": "From file" } ] }"#);
    let config = Config {
        seed_path: Some(path),
        conflict_mode: ConflictMode::Upsert,
        ..Config::default()
    };

    let store = seed::build_store(&config).unwrap();

    assert_eq!(store.role("clinical").unwrap().description, "From file");
}

#[test]
fn test_build_store_missing_seed_file() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = Config { seed_path: Some(dir.path().join("absent.json")), ..Config::default() };

    let err = seed::build_store(&config).unwrap_err();

    assert!(matches!(err, AppError::Io(_)));
}

#[test]
fn test_build_store_respects_audit_retention() {
    let config = Config { audit_retention: 2, ..Config::default() };

    let mut store = seed::build_store(&config).unwrap();
    for name in ["A", "B", "C"] {
        create_role(&mut store, name, |_| {});
    }

    assert_eq!(store.audit().retention(), 2);
    assert_eq!(store.audit().len(), 2);
}
