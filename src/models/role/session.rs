use crate::auth::validate::validate_role;
use crate::errors::AppError;
use crate::models::module::{AccessLevel, Module, ModuleAccess, default_access};

use super::types::{Role, RoleStatus};

/// Form fields of the create/edit role modal.
#[derive(Debug, Clone, PartialEq)]
pub struct RoleForm {
    pub name: String,
    pub description: String,
    pub status: RoleStatus,
    pub module_access: ModuleAccess,
}

impl Default for RoleForm {
    fn default() -> Self {
        RoleForm {
            name: String::new(),
            description: String::new(),
            status: RoleStatus::Active,
            module_access: default_access(),
        }
    }
}

impl RoleForm {
    pub fn named(name: &str) -> Self {
        RoleForm {
            name: name.to_string(),
            ..Self::default()
        }
    }

    pub fn set_access(&mut self, module: Module, level: AccessLevel) -> &mut Self {
        self.module_access.insert(module, level);
        self
    }

    /// Set every module to `level`.
    pub fn set_all(&mut self, level: AccessLevel) -> &mut Self {
        for m in Module::ALL {
            self.module_access.insert(m, level);
        }
        self
    }

    /// Check name and description lengths. Saving does not require this;
    /// callers that want a named role check first.
    pub fn validate(&self) -> Result<(), AppError> {
        let errors = validate_role(&self.name, &self.description);
        if errors.is_empty() { Ok(()) } else { Err(AppError::Validation(errors)) }
    }

    pub(crate) fn seeded_from(role: &Role, module_access: ModuleAccess) -> Self {
        RoleForm {
            name: role.name.clone(),
            description: role.description.clone(),
            status: role.status,
            module_access,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EditMode {
    Create,
    /// `previous_name` is the matrix key the role had when the session was
    /// opened; `None` when the id did not resolve to a role.
    Edit {
        id: String,
        previous_name: Option<String>,
    },
}

/// An open create/edit modal.
#[derive(Debug, Clone, PartialEq)]
pub struct EditSession {
    pub mode: EditMode,
    pub form: RoleForm,
}

impl EditSession {
    pub fn create(form: RoleForm) -> Self {
        EditSession { mode: EditMode::Create, form }
    }

    pub fn edit(id: &str, previous_name: Option<String>, form: RoleForm) -> Self {
        EditSession {
            mode: EditMode::Edit {
                id: id.to_string(),
                previous_name,
            },
            form,
        }
    }

    pub fn is_create(&self) -> bool {
        matches!(self.mode, EditMode::Create)
    }
}

/// Result of opening an edit session by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    Found,
    NotFound,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Created(String),
    Updated(String),
    /// Create skipped because a role with this id, or the same name, exists.
    /// Carries the id of the existing role.
    Duplicate(String),
    /// Edit of an id that is no longer in the store. The matrix is still
    /// updated under the session's role name.
    RoleMissing(String),
    NoSession,
}

impl SaveOutcome {
    pub fn id(&self) -> Option<&str> {
        match self {
            SaveOutcome::Created(id)
            | SaveOutcome::Updated(id)
            | SaveOutcome::Duplicate(id)
            | SaveOutcome::RoleMissing(id) => Some(id),
            SaveOutcome::NoSession => None,
        }
    }
}

/// A delete waiting for confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DeleteOutcome {
    Deleted(Role),
    NotFound(String),
    NoPending,
}

/// One cell write in a bulk matrix edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellChange {
    pub role_name: String,
    pub module: Module,
    pub level: AccessLevel,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatrixDiff {
    pub changed: usize,
    pub unchanged: usize,
}
