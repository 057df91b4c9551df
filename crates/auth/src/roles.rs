use core::str::FromStr;

use serde::{Deserialize, Serialize};

use hrm_core::DomainError;

/// Role of a portal user.
///
/// Exactly three roles exist. The serialized names (`admin`, `manager`,
/// `employee`) are the ones stored in the persisted session slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[serde(rename = "admin")]
    Administrator,
    Manager,
    Employee,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Administrator, Role::Manager, Role::Employee];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Administrator => "admin",
            Role::Manager => "manager",
            Role::Employee => "employee",
        }
    }

    /// Roles that work from the main dashboard rather than the employee portal.
    pub fn is_staff(&self) -> bool {
        matches!(self, Role::Administrator | Role::Manager)
    }

    pub fn description(&self) -> &'static str {
        match self {
            Role::Administrator => "Full system administrator with all permissions",
            Role::Manager => "Department manager with broad operational permissions",
            Role::Employee => "Employee with access to their own profile and leave",
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Administrator),
            "manager" => Ok(Role::Manager),
            "employee" => Ok(Role::Employee),
            other => Err(DomainError::validation(format!("unknown role: {other:?}"))),
        }
    }
}
