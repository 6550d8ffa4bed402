use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::models::module::{Module, ModuleAccess, merged_over_default};

/// Label shown for a role saved without a name.
pub const NEW_ROLE_LABEL: &str = "New Role";

/// Permissions tag given to roles created through the form.
pub const DEFAULT_PERMISSIONS_LABEL: &str = "Custom";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RoleStatus {
    #[default]
    Active,
    Inactive,
}

impl RoleStatus {
    pub fn label(self) -> &'static str {
        match self {
            RoleStatus::Active => "Active",
            RoleStatus::Inactive => "Inactive",
        }
    }
}

impl fmt::Display for RoleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RoleStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(RoleStatus::Active),
            "inactive" => Ok(RoleStatus::Inactive),
            other => Err(format!("unknown role status '{other}'")),
        }
    }
}

/// Number of modules a role can reach, or `All` when none are set to `None`.
///
/// Serializes as the string `"All"` or as a bare number, matching how the
/// tiles and table render it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleCount {
    All,
    Count(usize),
}

impl ModuleCount {
    /// Classify a role's access. Modules missing from `access` read as `View`.
    pub fn from_access(access: &ModuleAccess) -> Self {
        let full = merged_over_default(access);
        let granted = Module::ALL
            .iter()
            .filter(|m| full.get(*m).is_some_and(|l| l.is_granted()))
            .count();
        if granted == Module::COUNT {
            ModuleCount::All
        } else {
            ModuleCount::Count(granted)
        }
    }

    /// Numeric value, `All` counting as every module.
    pub fn value(self) -> usize {
        match self {
            ModuleCount::All => Module::COUNT,
            ModuleCount::Count(n) => n,
        }
    }
}

impl fmt::Display for ModuleCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModuleCount::All => f.write_str("All"),
            ModuleCount::Count(n) => write!(f, "{n}"),
        }
    }
}

impl Serialize for ModuleCount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ModuleCount::All => serializer.serialize_str("All"),
            ModuleCount::Count(n) => serializer.serialize_u64(*n as u64),
        }
    }
}

impl<'de> Deserialize<'de> for ModuleCount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(usize),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Ok(ModuleCount::Count(n)),
            Raw::Text(s) if s.eq_ignore_ascii_case("all") => Ok(ModuleCount::All),
            Raw::Text(s) => s
                .trim()
                .parse()
                .map(ModuleCount::Count)
                .map_err(|_| de::Error::custom(format!("invalid module count '{s}'"))),
        }
    }
}

/// The single record behind both the tile and the table row of a role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    pub id: String,
    /// Trimmed name as entered; may be empty.
    pub name: String,
    pub description: String,
    pub status: RoleStatus,
    pub user_count: i64,
    pub module_count: ModuleCount,
    pub permissions_label: String,
    pub last_modified: String,
}

impl Role {
    /// Name for display, `"New Role"` when the role was saved without one.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() { NEW_ROLE_LABEL } else { &self.name }
    }

    /// Key of this role's entry in the access matrix: its name, or its id
    /// when the name is empty.
    pub fn matrix_key(&self) -> &str {
        if self.name.is_empty() { &self.id } else { &self.name }
    }

    pub fn tile(&self) -> RoleTile {
        RoleTile {
            id: self.id.clone(),
            name: self.display_name().to_string(),
            description: self.description.clone(),
            status: self.status,
            user_count: self.user_count,
            module_count: self.module_count,
            permissions_label: self.permissions_label.clone(),
        }
    }

    pub fn row(&self) -> RoleRow {
        RoleRow {
            id: self.id.clone(),
            name: self.display_name().to_string(),
            description: self.description.clone(),
            status: self.status,
            user_count: self.user_count,
            module_count: self.module_count,
            last_modified: self.last_modified.clone(),
        }
    }
}

/// Compact card view of a role. Also the shape returned by role listings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoleTile {
    pub id: String,
    pub name: String,
    pub description: String,
    pub status: RoleStatus,
    pub user_count: i64,
    pub module_count: ModuleCount,
    pub permissions_label: String,
}

/// Dense table row view of a role.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoleRow {
    pub id: String,
    pub name: String,
    pub description: String,
    pub status: RoleStatus,
    pub user_count: i64,
    pub module_count: ModuleCount,
    pub last_modified: String,
}
