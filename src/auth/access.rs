//! Module-level access checks against the role matrix.
//!
//! A role holds a module at some `AccessLevel`; a check passes when that
//! level is at least the required one (`Full > Edit > View > None`).
//! Roles or modules without a matrix entry read as `View`, so a `View` check
//! on an unknown role passes. Callers that need fail-closed behavior for
//! unknown roles should check `AccessMatrix::contains` first.

use crate::errors::AppError;
use crate::models::access_matrix::AccessMatrix;
use crate::models::module::{AccessLevel, Module};

pub fn has_module_access(
    matrix: &AccessMatrix,
    role_name: &str,
    module: Module,
    required: AccessLevel,
) -> bool {
    matrix.level(role_name, module) >= required
}

/// Handler-level guard: `Ok(())` when the role holds `required` on `module`,
/// `Err(PermissionDenied)` naming the module and level otherwise.
pub fn require_module_access(
    matrix: &AccessMatrix,
    role_name: &str,
    module: Module,
    required: AccessLevel,
) -> Result<(), AppError> {
    if has_module_access(matrix, role_name, module, required) {
        Ok(())
    } else {
        log::debug!("Role '{role_name}' denied {required} on {module}");
        Err(AppError::PermissionDenied(format!("{module}: {required}")))
    }
}

/// Modules where the role holds at least `min`, in display order.
pub fn granted_modules(matrix: &AccessMatrix, role_name: &str, min: AccessLevel) -> Vec<Module> {
    Module::ALL
        .iter()
        .copied()
        .filter(|m| has_module_access(matrix, role_name, *m, min))
        .collect()
}
