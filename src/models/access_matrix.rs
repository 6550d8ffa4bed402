use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::module::{AccessLevel, Module, ModuleAccess, default_access, merged_over_default};

/// Role name → per-module access.
///
/// Keyed by the role's *name*, not its id, so renames have to move entries.
/// Every entry this type creates covers all modules; reads of anything
/// missing fall back to `View`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessMatrix(BTreeMap<String, ModuleAccess>);

impl AccessMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, role_name: &str) -> bool {
        self.0.contains_key(role_name)
    }

    pub fn entry(&self, role_name: &str) -> Option<&ModuleAccess> {
        self.0.get(role_name)
    }

    pub fn role_names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ModuleAccess)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Access for one cell, `View` when the role or module has no setting.
    pub fn level(&self, role_name: &str, module: Module) -> AccessLevel {
        self.0
            .get(role_name)
            .and_then(|access| access.get(&module))
            .copied()
            .unwrap_or_default()
    }

    /// Full row for a role with `View` filling any gaps.
    pub fn resolved(&self, role_name: &str) -> ModuleAccess {
        match self.0.get(role_name) {
            Some(access) => merged_over_default(access),
            None => default_access(),
        }
    }

    /// Lay `access` over the existing entry for `role_name`. Modules not named
    /// in `access` keep their current value.
    pub fn overlay(&mut self, role_name: &str, access: &ModuleAccess) {
        let entry = self
            .0
            .entry(role_name.to_string())
            .or_insert_with(default_access);
        entry.extend(access.iter().map(|(m, l)| (*m, *l)));
    }

    /// Write one cell and return the level it replaced.
    pub fn set(&mut self, role_name: &str, module: Module, level: AccessLevel) -> AccessLevel {
        let entry = self
            .0
            .entry(role_name.to_string())
            .or_insert_with(default_access);
        entry.insert(module, level).unwrap_or_default()
    }

    pub fn remove(&mut self, role_name: &str) -> Option<ModuleAccess> {
        self.0.remove(role_name)
    }
}

impl FromIterator<(String, ModuleAccess)> for AccessMatrix {
    fn from_iter<I: IntoIterator<Item = (String, ModuleAccess)>>(iter: I) -> Self {
        AccessMatrix(iter.into_iter().collect())
    }
}
