//! Module access checks against the seeded matrix.

mod common;

use role_matrix::AppError;
use role_matrix::auth::access::{granted_modules, has_module_access, require_module_access};
use role_matrix::models::module::{AccessLevel, Module};
use common::*;

#[test]
fn test_administrator_has_full_system_admin() {
    let store = seeded_store();
    let matrix = store.access_matrix();

    assert!(has_module_access(matrix, "Administrator", Module::SystemAdmin, AccessLevel::Full));
    assert_eq!(granted_modules(matrix, "Administrator", AccessLevel::Full).len(), Module::COUNT);
}

#[test]
fn test_direct_care_denied_medication() {
    let store = seeded_store();
    let matrix = store.access_matrix();

    assert!(!has_module_access(matrix, "JJYDS I", Module::Medication, AccessLevel::View));

    let err = require_module_access(matrix, "JJYDS I", Module::Medication, AccessLevel::View).unwrap_err();
    assert!(matches!(err, AppError::PermissionDenied(_)));
    assert_eq!(err.to_string(), "Permission denied: Medication (eMAR): View");
}

#[test]
fn test_granted_modules_by_threshold() {
    let store = seeded_store();
    let matrix = store.access_matrix();

    assert_eq!(
        granted_modules(matrix, "Maintenance", AccessLevel::View),
        vec![
            Module::InventoryManagement,
            Module::UnitCondition,
            Module::LogBook,
            Module::IncidentManagement,
            Module::FirePlanManagement,
            Module::Repairs,
        ]
    );
    assert_eq!(
        granted_modules(matrix, "Maintenance", AccessLevel::Edit),
        vec![
            Module::InventoryManagement,
            Module::UnitCondition,
            Module::FirePlanManagement,
            Module::Repairs,
        ]
    );
}

#[test]
fn test_unknown_role_reads_as_view() {
    let store = seeded_store();
    let matrix = store.access_matrix();

    assert!(has_module_access(matrix, "Visitor", Module::Repairs, AccessLevel::View));
    assert!(!has_module_access(matrix, "Visitor", Module::Repairs, AccessLevel::Edit));
}

#[test]
fn test_cell_edit_changes_access() {
    let mut store = seeded_store();

    store.set_cell_access("JJYDS I", Module::Medication, AccessLevel::View);

    assert!(require_module_access(store.access_matrix(), "JJYDS I", Module::Medication, AccessLevel::View).is_ok());
}
