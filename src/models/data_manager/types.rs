use serde::{Deserialize, Serialize};

use crate::models::access_matrix::AccessMatrix;
use crate::models::module::ModuleAccess;
use crate::models::role::{Role, RoleStatus};

/// How to handle a role whose id or name already exists in the store.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ConflictMode {
    #[default]
    Skip,
    Upsert,
    Fail,
}

impl std::str::FromStr for ConflictMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "skip" => Ok(ConflictMode::Skip),
            "upsert" => Ok(ConflictMode::Upsert),
            "fail" => Ok(ConflictMode::Fail),
            other => Err(format!("unknown conflict mode '{other}'")),
        }
    }
}

// ── Import types ──────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportPayload {
    #[serde(default)]
    pub conflict_mode: ConflictMode,
    #[serde(default)]
    pub roles: Vec<RoleImport>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleImport {
    pub name: String,
    /// Explicit id; derived from the name when absent.
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: RoleStatus,
    #[serde(default)]
    pub user_count: i64,
    #[serde(default)]
    pub permissions_label: Option<String>,
    #[serde(default)]
    pub last_modified: Option<String>,
    /// Module label → access level. Missing modules read as `View`.
    #[serde(default)]
    pub access: ModuleAccess,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ImportResult {
    pub created: usize,
    pub updated: usize,
    pub skipped: usize,
    pub errors: Vec<ImportError>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImportError {
    pub item: serde_json::Value,
    pub reason: String,
}

// ── Export types ───────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExportPayload {
    pub roles: Vec<Role>,
    pub role_names: Vec<String>,
    pub matrix: AccessMatrix,
}
