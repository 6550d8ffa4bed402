use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Feature areas a role can be granted access to.
///
/// Declaration order is the display order of the matrix columns, and `Ord`
/// follows it so a `BTreeMap<Module, _>` iterates the way the page renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Module {
    #[serde(rename = "System Admin")]
    SystemAdmin,
    #[serde(rename = "Inventory Management")]
    InventoryManagement,
    #[serde(rename = "Resident Behavior")]
    ResidentBehavior,
    #[serde(rename = "Unit Condition (UCR)")]
    UnitCondition,
    #[serde(rename = "Sleep Log & Watch")]
    SleepLog,
    #[serde(rename = "Log Book & Events")]
    LogBook,
    #[serde(rename = "Incident Management")]
    IncidentManagement,
    #[serde(rename = "Fire Plan Management")]
    FirePlanManagement,
    #[serde(rename = "Medication (eMAR)")]
    Medication,
    #[serde(rename = "Medical Runs")]
    MedicalRuns,
    #[serde(rename = "Visitation & Phone Log")]
    Visitation,
    #[serde(rename = "Repairs")]
    Repairs,
}

impl Module {
    pub const ALL: [Module; 12] = [
        Module::SystemAdmin,
        Module::InventoryManagement,
        Module::ResidentBehavior,
        Module::UnitCondition,
        Module::SleepLog,
        Module::LogBook,
        Module::IncidentManagement,
        Module::FirePlanManagement,
        Module::Medication,
        Module::MedicalRuns,
        Module::Visitation,
        Module::Repairs,
    ];

    pub const COUNT: usize = Self::ALL.len();

    pub fn label(self) -> &'static str {
        match self {
            Module::SystemAdmin => "System Admin",
            Module::InventoryManagement => "Inventory Management",
            Module::ResidentBehavior => "Resident Behavior",
            Module::UnitCondition => "Unit Condition (UCR)",
            Module::SleepLog => "Sleep Log & Watch",
            Module::LogBook => "Log Book & Events",
            Module::IncidentManagement => "Incident Management",
            Module::FirePlanManagement => "Fire Plan Management",
            Module::Medication => "Medication (eMAR)",
            Module::MedicalRuns => "Medical Runs",
            Module::Visitation => "Visitation & Phone Log",
            Module::Repairs => "Repairs",
        }
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Module {
    type Err = String;

    /// Parse a module from its display label (case-insensitive, trimmed).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Module::ALL
            .iter()
            .copied()
            .find(|m| m.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("unknown module '{wanted}'"))
    }
}

/// Granularity of a role's permission on a module.
///
/// Ordered `Full > Edit > View > None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AccessLevel {
    Full,
    Edit,
    #[default]
    View,
    None,
}

impl AccessLevel {
    pub const ALL: [AccessLevel; 4] = [
        AccessLevel::Full,
        AccessLevel::Edit,
        AccessLevel::View,
        AccessLevel::None,
    ];

    fn rank(self) -> u8 {
        match self {
            AccessLevel::None => 0,
            AccessLevel::View => 1,
            AccessLevel::Edit => 2,
            AccessLevel::Full => 3,
        }
    }

    /// Anything other than `None` counts as a granted module.
    pub fn is_granted(self) -> bool {
        self != AccessLevel::None
    }

    pub fn label(self) -> &'static str {
        match self {
            AccessLevel::Full => "Full",
            AccessLevel::Edit => "Edit",
            AccessLevel::View => "View",
            AccessLevel::None => "None",
        }
    }
}

impl PartialOrd for AccessLevel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for AccessLevel {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AccessLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        AccessLevel::ALL
            .iter()
            .copied()
            .find(|l| l.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("unknown access level '{wanted}'"))
    }
}

/// Per-module access for one role.
pub type ModuleAccess = BTreeMap<Module, AccessLevel>;

/// Every module set to `View`.
pub fn default_access() -> ModuleAccess {
    Module::ALL.iter().map(|m| (*m, AccessLevel::View)).collect()
}

/// `View` defaults with `overrides` laid on top; the result covers every module.
pub fn merged_over_default(overrides: &ModuleAccess) -> ModuleAccess {
    let mut access = default_access();
    access.extend(overrides.iter().map(|(m, l)| (*m, *l)));
    access
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn access_levels_order_full_to_none() {
        assert!(AccessLevel::Full > AccessLevel::Edit);
        assert!(AccessLevel::Edit > AccessLevel::View);
        assert!(AccessLevel::View > AccessLevel::None);
        assert_eq!(AccessLevel::default(), AccessLevel::View);
    }

    #[test]
    fn module_labels_parse_back() {
        for m in Module::ALL {
            assert_eq!(m.label().parse::<Module>(), Ok(m));
        }
        assert_eq!(" medication (emar) ".parse::<Module>(), Ok(Module::Medication));
        assert!("Payroll".parse::<Module>().is_err());
    }

    #[test]
    fn module_serializes_as_label() {
        let json = serde_json::to_string(&Module::UnitCondition).unwrap();
        assert_eq!(json, "\"Unit Condition (UCR)\"");
    }

    #[test]
    fn merge_keeps_overrides_and_fills_view() {
        let mut overrides = ModuleAccess::new();
        overrides.insert(Module::Repairs, AccessLevel::None);
        let merged = merged_over_default(&overrides);
        assert_eq!(merged.len(), Module::COUNT);
        assert_eq!(merged[&Module::Repairs], AccessLevel::None);
        assert_eq!(merged[&Module::SystemAdmin], AccessLevel::View);
    }
}
