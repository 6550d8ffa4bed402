use std::collections::HashSet;

use chrono::Local;
use serde_json::json;

use crate::auth::validate::validate_role;
use crate::errors::AppError;
use crate::models::role::store::short_date;
use crate::models::role::{DEFAULT_PERMISSIONS_LABEL, ModuleCount, Role, RoleMatrixStore, slug};

use super::types::{ConflictMode, ImportError, ImportPayload, ImportResult, RoleImport};

/// Id an imported role will use: its explicit id, or the slug of its name.
fn resolve_id(item: &RoleImport, now_millis: i64) -> String {
    item.id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(String::from)
        .unwrap_or_else(|| slug::allocate_id(&item.name, now_millis))
}

/// In `Fail` mode, find the first item that collides with the store or with
/// an earlier item of the same payload.
fn first_conflict<'a>(
    store: &RoleMatrixStore,
    items: &'a [(String, &'a RoleImport)],
) -> Option<&'a (String, &'a RoleImport)> {
    let mut seen_ids = HashSet::new();
    let mut seen_names = HashSet::new();
    items.iter().find(|(id, item)| {
        let name = item.name.trim().to_lowercase();
        store.find_conflict(id, &item.name).is_some()
            || !seen_ids.insert(id.clone())
            || !seen_names.insert(name)
    })
}

/// Import roles into the store.
///
/// Invalid items are reported in `errors` and skipped. Conflicts (same id,
/// or same case-insensitive name) are skipped or overwritten per
/// `conflict_mode`; `Fail` rejects the whole payload before anything changes.
pub fn import_data(store: &mut RoleMatrixStore, payload: &ImportPayload) -> Result<ImportResult, AppError> {
    let mut result = ImportResult::default();
    let now = Local::now();

    let mut valid: Vec<(String, &RoleImport)> = Vec::with_capacity(payload.roles.len());
    for item in &payload.roles {
        let errors = validate_role(&item.name, &item.description);
        if errors.is_empty() {
            valid.push((resolve_id(item, now.timestamp_millis()), item));
        } else {
            result.errors.push(ImportError {
                item: serde_json::to_value(item)?,
                reason: errors.join("; "),
            });
        }
    }

    if payload.conflict_mode == ConflictMode::Fail {
        if let Some((id, item)) = first_conflict(store, &valid) {
            return Err(AppError::Import(format!(
                "role '{}' ({id}) conflicts with an existing role",
                item.name.trim()
            )));
        }
    }

    for (id, item) in valid {
        let role = Role {
            id,
            name: item.name.trim().to_string(),
            description: item.description.clone(),
            status: item.status,
            user_count: item.user_count,
            module_count: ModuleCount::from_access(&item.access),
            permissions_label: item
                .permissions_label
                .clone()
                .unwrap_or_else(|| DEFAULT_PERMISSIONS_LABEL.to_string()),
            last_modified: item.last_modified.clone().unwrap_or_else(|| short_date(now)),
        };

        let existing_id = store.find_conflict(&role.id, &role.name).map(|r| r.id.clone());
        match (existing_id, payload.conflict_mode) {
            (None, _) => {
                store.insert_imported(role, &item.access);
                result.created += 1;
            }
            (Some(existing_id), ConflictMode::Upsert) => {
                store.update_imported(Role { id: existing_id, ..role }, &item.access);
                result.updated += 1;
            }
            (Some(existing_id), _) => {
                log::debug!("Import skipped '{}': exists as '{existing_id}'", role.name);
                result.skipped += 1;
            }
        }
    }

    for err in &result.errors {
        log::warn!("Import: {}", err.reason);
    }
    log::info!(
        "Imported roles: created={}, updated={}, skipped={}, errors={}",
        result.created,
        result.updated,
        result.skipped,
        result.errors.len()
    );
    store.audit_mut().log(
        "data.imported",
        "role",
        "",
        json!({
            "created": result.created,
            "updated": result.updated,
            "skipped": result.skipped,
            "errors": result.errors.len(),
        }),
    );

    Ok(result)
}

/// Parse an import payload from JSON.
pub fn parse_payload(json: &str) -> Result<ImportPayload, AppError> {
    Ok(serde_json::from_str(json)?)
}
