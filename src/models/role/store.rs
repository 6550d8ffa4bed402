//! Single-writer store for roles and their module access.
//!
//! One `Role` record per id backs both the tile and the table views, so the
//! two can never disagree about which roles exist. The access matrix is keyed
//! by role *name*: saves overlay onto `matrix[name]`, renames move the entry,
//! and deletes leave it (and the role-name list) in place.

use chrono::{DateTime, Local};
use serde_json::json;

use crate::audit::AuditLog;
use crate::errors::AppError;
use crate::models::access_matrix::AccessMatrix;
use crate::models::module::{AccessLevel, Module, ModuleAccess};

use super::session::{
    CellChange, DeleteOutcome, EditMode, EditSession, Lookup, MatrixDiff, PendingDelete,
    RoleForm, SaveOutcome,
};
use super::slug;
use super::types::{DEFAULT_PERMISSIONS_LABEL, ModuleCount, Role, RoleRow, RoleTile};

/// Short date used for `last_modified`, e.g. `3/7/2026`.
pub fn short_date(now: DateTime<Local>) -> String {
    now.format("%-m/%-d/%Y").to_string()
}

#[derive(Debug, Clone, Default)]
pub struct RoleMatrixStore {
    roles: Vec<Role>,
    matrix: AccessMatrix,
    role_names: Vec<String>,
    session: Option<EditSession>,
    pending_delete: Option<PendingDelete>,
    cell_editor: Option<(String, Module)>,
    audit: AuditLog,
}

impl RoleMatrixStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_audit_retention(retention: usize) -> Self {
        RoleMatrixStore {
            audit: AuditLog::new(retention),
            ..Self::default()
        }
    }

    // ── Reads ────────────────────────────────────────────────────────

    /// Roles in display order, as tile summaries.
    pub fn list_roles(&self) -> Vec<RoleTile> {
        self.tiles()
    }

    pub fn tiles(&self) -> Vec<RoleTile> {
        self.roles.iter().map(Role::tile).collect()
    }

    pub fn rows(&self) -> Vec<RoleRow> {
        self.roles.iter().map(Role::row).collect()
    }

    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    pub fn role(&self, id: &str) -> Option<&Role> {
        self.roles.iter().find(|r| r.id == id)
    }

    pub fn require_role(&self, id: &str) -> Result<&Role, AppError> {
        self.role(id).ok_or(AppError::NotFound)
    }

    pub fn access_matrix(&self) -> &AccessMatrix {
        &self.matrix
    }

    /// Role names with a matrix entry, in insertion order.
    pub fn role_names(&self) -> &[String] {
        &self.role_names
    }

    pub fn audit(&self) -> &AuditLog {
        &self.audit
    }

    pub fn audit_mut(&mut self) -> &mut AuditLog {
        &mut self.audit
    }

    // ── Edit session ─────────────────────────────────────────────────

    pub fn session(&self) -> Option<&EditSession> {
        self.session.as_ref()
    }

    /// Form of the open session, if any.
    pub fn draft_mut(&mut self) -> Option<&mut RoleForm> {
        self.session.as_mut().map(|s| &mut s.form)
    }

    /// Open a blank create session, discarding any open one.
    pub fn open_create(&mut self) -> &mut RoleForm {
        if self.session.is_some() {
            log::debug!("Discarding open role session for a new create");
        }
        let session = self.session.insert(EditSession::create(RoleForm::default()));
        &mut session.form
    }

    /// Open an edit session for `id`, seeded from the stored role and its
    /// matrix row. An unknown id still opens an (empty) edit session.
    pub fn open_edit(&mut self, id: &str) -> Lookup {
        let (session, lookup) = match self.role(id) {
            Some(role) => {
                let key = role.matrix_key().to_string();
                let form = RoleForm::seeded_from(role, self.matrix.resolved(&key));
                (EditSession::edit(id, Some(key), form), Lookup::Found)
            }
            None => {
                log::debug!("Edit requested for unknown role '{id}'");
                (EditSession::edit(id, None, RoleForm::default()), Lookup::NotFound)
            }
        };
        self.session = Some(session);
        lookup
    }

    pub fn cancel_edit(&mut self) {
        self.session = None;
    }

    /// Commit the open session and close it.
    pub fn save(&mut self) -> SaveOutcome {
        match self.session.take() {
            Some(session) => self.commit(session, Local::now()),
            None => {
                log::debug!("Save with no open role session ignored");
                SaveOutcome::NoSession
            }
        }
    }

    /// Commit `session` directly. Any open session is closed.
    pub fn save_session(&mut self, session: EditSession) -> SaveOutcome {
        self.session = None;
        self.commit(session, Local::now())
    }

    fn commit(&mut self, session: EditSession, now: DateTime<Local>) -> SaveOutcome {
        let EditSession { mode, form } = session;
        let name = form.name.trim().to_string();
        let today = short_date(now);

        let (id, previous_name) = match &mode {
            EditMode::Create => (slug::allocate_id(&name, now.timestamp_millis()), None),
            EditMode::Edit { id, previous_name } => (id.clone(), previous_name.clone()),
        };
        let role_name = if name.is_empty() { id.clone() } else { name.clone() };

        // Count from the row the matrix will hold once the form is overlaid.
        let mut row = self.matrix.resolved(&role_name);
        row.extend(form.module_access.iter().map(|(m, l)| (*m, *l)));
        let module_count = ModuleCount::from_access(&row);

        let outcome = match mode {
            EditMode::Create => match self.find_conflict(&id, &name) {
                Some(existing) => {
                    log::warn!(
                        "Role '{}' not created: conflicts with existing role '{}'",
                        name,
                        existing.id
                    );
                    SaveOutcome::Duplicate(existing.id.clone())
                }
                None => {
                    self.roles.insert(
                        0,
                        Role {
                            id: id.clone(),
                            name: name.clone(),
                            description: form.description.clone(),
                            status: form.status,
                            user_count: 0,
                            module_count,
                            permissions_label: DEFAULT_PERMISSIONS_LABEL.to_string(),
                            last_modified: today,
                        },
                    );
                    log::info!("Created role '{id}'");
                    self.audit.log(
                        "role.created",
                        "role",
                        &id,
                        json!({ "role_name": name, "module_count": module_count.to_string() }),
                    );
                    SaveOutcome::Created(id.clone())
                }
            },
            EditMode::Edit { .. } => match self.roles.iter_mut().find(|r| r.id == id) {
                Some(role) => {
                    role.name = name.clone();
                    role.description = form.description.clone();
                    role.status = form.status;
                    role.module_count = module_count;
                    role.last_modified = today;
                    log::info!("Updated role '{id}'");
                    self.audit.log(
                        "role.updated",
                        "role",
                        &id,
                        json!({
                            "role_name": name,
                            "status": form.status.label(),
                            "module_count": module_count.to_string(),
                        }),
                    );
                    SaveOutcome::Updated(id.clone())
                }
                None => {
                    log::warn!("Saved edit for role '{id}' which no longer exists");
                    SaveOutcome::RoleMissing(id.clone())
                }
            },
        };

        self.matrix.overlay(&role_name, &form.module_access);

        match previous_name.filter(|prev| *prev != role_name) {
            Some(prev) => {
                self.matrix.remove(&prev);
                self.rename_in_names(&prev, &role_name);
                log::info!("Renamed role '{prev}' to '{role_name}'");
                self.audit.log(
                    "role.renamed",
                    "role",
                    &id,
                    json!({ "from": prev, "to": role_name }),
                );
            }
            None => self.push_name(&role_name),
        }

        outcome
    }

    /// Existing role that a create for (`id`, `name`) would collide with:
    /// same id, or same case-insensitive trimmed non-empty name.
    pub(crate) fn find_conflict(&self, id: &str, name: &str) -> Option<&Role> {
        let wanted = name.trim().to_lowercase();
        self.roles
            .iter()
            .find(|r| r.id == id || (!wanted.is_empty() && r.name.trim().to_lowercase() == wanted))
    }

    fn push_name(&mut self, role_name: &str) {
        if !self.role_names.iter().any(|n| n == role_name) {
            self.role_names.push(role_name.to_string());
        }
    }

    /// Replace `from` with `to` in place, then drop later duplicates so the
    /// first occurrence of each name keeps its position.
    fn rename_in_names(&mut self, from: &str, to: &str) {
        let mut replaced = false;
        for n in self.role_names.iter_mut().filter(|n| n.as_str() == from) {
            *n = to.to_string();
            replaced = true;
        }
        if !replaced {
            self.role_names.push(to.to_string());
        }
        let mut seen = std::collections::HashSet::new();
        self.role_names.retain(|n| seen.insert(n.clone()));
    }

    // ── Delete ───────────────────────────────────────────────────────

    /// Ask for confirmation before deleting; nothing changes yet.
    pub fn request_delete(&mut self, id: &str, name: &str) {
        self.pending_delete = Some(PendingDelete {
            id: id.to_string(),
            name: name.to_string(),
        });
    }

    pub fn pending_delete(&self) -> Option<&PendingDelete> {
        self.pending_delete.as_ref()
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Remove the pending role from the tile and row views. Its matrix entry
    /// and its place in `role_names` are kept.
    pub fn confirm_delete(&mut self) -> DeleteOutcome {
        let Some(pending) = self.pending_delete.take() else {
            log::debug!("Delete confirmed with nothing pending");
            return DeleteOutcome::NoPending;
        };
        match self.roles.iter().position(|r| r.id == pending.id) {
            Some(pos) => {
                let role = self.roles.remove(pos);
                log::info!("Deleted role '{}'", role.id);
                self.audit.log(
                    "role.deleted",
                    "role",
                    &role.id,
                    json!({ "role_name": pending.name }),
                );
                DeleteOutcome::Deleted(role)
            }
            None => {
                log::debug!("Delete of unknown role '{}' ignored", pending.id);
                DeleteOutcome::NotFound(pending.id)
            }
        }
    }

    // ── Matrix cells ─────────────────────────────────────────────────

    pub fn open_cell_editor(&mut self, role_name: &str, module: Module) {
        self.cell_editor = Some((role_name.to_string(), module));
    }

    pub fn close_cell_editor(&mut self) {
        self.cell_editor = None;
    }

    pub fn cell_editor(&self) -> Option<(&str, Module)> {
        self.cell_editor.as_ref().map(|(r, m)| (r.as_str(), *m))
    }

    /// Write one matrix cell. No check that `role_name` belongs to a role;
    /// tiles and rows are not touched. Returns the previous level.
    pub fn set_cell_access(&mut self, role_name: &str, module: Module, level: AccessLevel) -> AccessLevel {
        let previous = self.matrix.set(role_name, module, level);
        self.cell_editor = None;
        if previous != level {
            self.audit.log(
                "role.access_changed",
                "matrix",
                role_name,
                json!({ "module": module.label(), "from": previous.label(), "to": level.label() }),
            );
        }
        previous
    }

    /// Apply several cell writes, counting only real changes. One audit
    /// entry covers the whole batch.
    pub fn apply_cells(&mut self, changes: &[CellChange]) -> MatrixDiff {
        let mut diff = MatrixDiff::default();
        for change in changes {
            if self.matrix.set(&change.role_name, change.module, change.level) == change.level {
                diff.unchanged += 1;
            } else {
                diff.changed += 1;
            }
        }
        self.cell_editor = None;
        if diff.changed > 0 {
            let summary = format!("{} changed, {} unchanged via matrix editor", diff.changed, diff.unchanged);
            log::info!("{summary}");
            self.audit.log(
                "role.permissions_changed",
                "matrix",
                "",
                json!({ "summary": summary, "changed": diff.changed, "unchanged": diff.unchanged }),
            );
        }
        diff
    }

    // ── Import support ───────────────────────────────────────────────

    /// Append an imported role and overlay its access.
    pub(crate) fn insert_imported(&mut self, mut role: Role, access: &ModuleAccess) {
        let key = role.matrix_key().to_string();
        self.matrix.overlay(&key, access);
        role.module_count = ModuleCount::from_access(&self.matrix.resolved(&key));
        self.push_name(&key);
        self.roles.push(role);
    }

    /// Overwrite the role with `update.id`, moving its matrix entry if the
    /// name changed. Returns false if no such role exists.
    pub(crate) fn update_imported(&mut self, update: Role, access: &ModuleAccess) -> bool {
        let Some(pos) = self.roles.iter().position(|r| r.id == update.id) else {
            return false;
        };
        let previous_key = self.roles[pos].matrix_key().to_string();
        let key = update.matrix_key().to_string();
        if previous_key != key {
            if let Some(moved) = self.matrix.remove(&previous_key) {
                self.matrix.overlay(&key, &moved);
            }
            self.rename_in_names(&previous_key, &key);
        } else {
            self.push_name(&key);
        }
        self.matrix.overlay(&key, access);
        let module_count = ModuleCount::from_access(&self.matrix.resolved(&key));
        self.roles[pos] = Role { module_count, ..update };
        true
    }
}
