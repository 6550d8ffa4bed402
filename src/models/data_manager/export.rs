use crate::errors::AppError;
use crate::models::role::RoleMatrixStore;

use super::types::ExportPayload;

/// Snapshot of every role, the role-name list and the full matrix.
pub fn export_data(store: &RoleMatrixStore) -> ExportPayload {
    ExportPayload {
        roles: store.roles().to_vec(),
        role_names: store.role_names().to_vec(),
        matrix: store.access_matrix().clone(),
    }
}

pub fn export_json(store: &RoleMatrixStore) -> Result<String, AppError> {
    Ok(serde_json::to_string_pretty(&export_data(store))?)
}
