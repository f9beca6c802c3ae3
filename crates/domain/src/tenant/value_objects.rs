//! Tenant value objects.

use serde::{Deserialize, Serialize};

/// Why a tenant was suspended.
///
/// Recorded on the suspension event and surfaced in audit views so operators
/// can distinguish planned maintenance windows from enforcement actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuspensionCategory {
    /// Planned maintenance window.
    Maintenance,
    /// Unpaid invoices or billing disputes.
    Billing,
    /// Terms-of-service violation.
    Abuse,
    /// Anything that doesn't fit the named categories.
    Other,
}

impl SuspensionCategory {
    /// Returns the category name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            SuspensionCategory::Maintenance => "maintenance",
            SuspensionCategory::Billing => "billing",
            SuspensionCategory::Abuse => "abuse",
            SuspensionCategory::Other => "other",
        }
    }
}

impl std::fmt::Display for SuspensionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SuspensionCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "maintenance" => Ok(SuspensionCategory::Maintenance),
            "billing" => Ok(SuspensionCategory::Billing),
            "abuse" => Ok(SuspensionCategory::Abuse),
            "other" => Ok(SuspensionCategory::Other),
            _ => Err(format!("unknown suspension category: {s}")),
        }
    }
}
