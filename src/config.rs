use std::path::PathBuf;

use crate::audit::AuditLog;
use crate::models::data_manager::types::ConflictMode;

/// Runtime configuration, read from the environment (and `.env` when the
/// binary loads it).
///
/// - `ROLE_MATRIX_SEED`: path to a JSON seed file in import format
/// - `ROLE_MATRIX_SEED_DEFAULTS`: load the built-in roles (default `true`)
/// - `ROLE_MATRIX_AUDIT_RETENTION`: audit entries to keep (default 500)
/// - `ROLE_MATRIX_CONFLICT_MODE`: `skip` | `upsert` | `fail` for the seed file
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub seed_path: Option<PathBuf>,
    pub seed_defaults: bool,
    pub audit_retention: usize,
    pub conflict_mode: ConflictMode,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            seed_path: None,
            seed_defaults: true,
            audit_retention: AuditLog::DEFAULT_RETENTION,
            conflict_mode: ConflictMode::Skip,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; invalid values fall back to defaults with a warning.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let seed_path = lookup("ROLE_MATRIX_SEED")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        let seed_defaults = match lookup("ROLE_MATRIX_SEED_DEFAULTS") {
            Some(val) => match val.trim().to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" => true,
                "false" | "0" | "no" => false,
                other => {
                    log::warn!("ROLE_MATRIX_SEED_DEFAULTS '{other}' is not a boolean, using default");
                    defaults.seed_defaults
                }
            },
            None => defaults.seed_defaults,
        };

        let audit_retention = match lookup("ROLE_MATRIX_AUDIT_RETENTION") {
            Some(val) => match val.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    log::warn!(
                        "ROLE_MATRIX_AUDIT_RETENTION '{val}' invalid, using {}",
                        defaults.audit_retention
                    );
                    defaults.audit_retention
                }
            },
            None => defaults.audit_retention,
        };

        let conflict_mode = match lookup("ROLE_MATRIX_CONFLICT_MODE") {
            Some(val) => val.parse().unwrap_or_else(|e| {
                log::warn!("{e}, using skip");
                defaults.conflict_mode
            }),
            None => defaults.conflict_mode,
        };

        Config { seed_path, seed_defaults, audit_retention, conflict_mode }
    }
}
