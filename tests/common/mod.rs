//! Shared test infrastructure for role store tests.
//!
//! # Store Setup
//! - `seeded_store()` - store loaded with the built-in default roles
//! - `create_role()` - open a create session, fill it, save
//! - `assert_views_consistent()` - tile/row parity and matrix completeness

#![allow(dead_code)]

use std::collections::HashSet;

use role_matrix::models::module::Module;
use role_matrix::models::role::{RoleForm, RoleMatrixStore, SaveOutcome};
use role_matrix::seed::{DEFAULT_SEED, import_seed};

// ============================================================================
// TEST CONSTANTS
// ============================================================================

/// Ids of the built-in roles, in store order.
pub const SEEDED_IDS: [&str; 6] = [
    "administrator",
    "shift-supervisor",
    "jjyds-ii",
    "jjyds-i",
    "clinical",
    "maintenance",
];

// ============================================================================
// STORE SETUP
// ============================================================================

pub fn seeded_store() -> RoleMatrixStore {
    let mut store = RoleMatrixStore::new();
    import_seed(&mut store, DEFAULT_SEED, "test", None).expect("Failed to seed default roles");
    store
}

/// Create a role through the form flow. `fill` edits the blank form after the
/// name has been set.
pub fn create_role(store: &mut RoleMatrixStore, name: &str, fill: impl FnOnce(&mut RoleForm)) -> SaveOutcome {
    let form = store.open_create();
    form.name = name.to_string();
    fill(form);
    store.save()
}

/// Edit a role through the form flow.
pub fn edit_role(store: &mut RoleMatrixStore, id: &str, fill: impl FnOnce(&mut RoleForm)) -> SaveOutcome {
    store.open_edit(id);
    if let Some(form) = store.draft_mut() {
        fill(form);
    }
    store.save()
}

// ============================================================================
// INVARIANTS
// ============================================================================

pub fn assert_views_consistent(store: &RoleMatrixStore) {
    let tile_ids: HashSet<String> = store.tiles().into_iter().map(|t| t.id).collect();
    let row_ids: HashSet<String> = store.rows().into_iter().map(|r| r.id).collect();
    assert_eq!(tile_ids, row_ids, "tiles and rows disagree");

    let mut seen = HashSet::new();
    for name in store.role_names() {
        assert!(seen.insert(name.clone()), "duplicate role name '{name}'");
        let entry = store
            .access_matrix()
            .entry(name)
            .unwrap_or_else(|| panic!("no matrix entry for '{name}'"));
        for module in Module::ALL {
            assert!(entry.contains_key(&module), "'{name}' missing {module}");
        }
    }
}
