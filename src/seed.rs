use crate::config::Config;
use crate::errors::AppError;
use crate::models::data_manager::import::{import_data, parse_payload};
use crate::models::data_manager::types::ConflictMode;
use crate::models::role::RoleMatrixStore;

/// Built-in roles loaded into a fresh store.
pub const DEFAULT_SEED: &str = include_str!("../data/seed/roles.json");

/// Import a JSON seed into the store. Returns (created, skipped) counts.
pub fn import_seed(
    store: &mut RoleMatrixStore,
    json: &str,
    label: &str,
    conflict_mode: Option<ConflictMode>,
) -> Result<(usize, usize), AppError> {
    let mut payload = parse_payload(json)?;
    if let Some(mode) = conflict_mode {
        payload.conflict_mode = mode;
    }
    let result = import_data(store, &payload)?;
    log::info!(
        "Seed {}: created={}, updated={}, skipped={}, errors={}",
        label,
        result.created,
        result.updated,
        result.skipped,
        result.errors.len()
    );
    Ok((result.created, result.skipped))
}

/// Build a store per configuration: built-in roles first, then the seed file.
pub fn build_store(config: &Config) -> Result<RoleMatrixStore, AppError> {
    let mut store = RoleMatrixStore::with_audit_retention(config.audit_retention);

    if config.seed_defaults {
        import_seed(&mut store, DEFAULT_SEED, "defaults", None)?;
    }

    if let Some(path) = &config.seed_path {
        let json = std::fs::read_to_string(path)?;
        import_seed(&mut store, &json, &path.display().to_string(), Some(config.conflict_mode))?;
    }

    log::info!("Role store ready with {} roles", store.roles().len());
    Ok(store)
}
