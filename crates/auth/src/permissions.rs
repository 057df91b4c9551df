use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Permission identifier.
///
/// Permissions are modeled as opaque strings (e.g. "apply_leave").
/// The special wildcard permission `"all"` grants every permission.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permission(Cow<'static, str>);

impl Permission {
    pub const WILDCARD: &'static str = "all";

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn all() -> Self {
        Self::new(Self::WILDCARD)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_wildcard(&self) -> bool {
        self.as_str() == Self::WILDCARD
    }
}

impl core::fmt::Display for Permission {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for Permission {
    fn from(value: &'static str) -> Self {
        Self::new(value)
    }
}

/// Permissions referenced by the employee self-service pages.
pub mod well_known {
    use super::Permission;

    pub const VIEW_OWN_PROFILE: &str = "view_own_profile";
    pub const VIEW_OWN_LEAVE: &str = "view_own_leave";
    pub const APPLY_LEAVE: &str = "apply_leave";

    pub fn employee_self_service() -> Vec<Permission> {
        vec![
            Permission::new(VIEW_OWN_PROFILE),
            Permission::new(VIEW_OWN_LEAVE),
            Permission::new(APPLY_LEAVE),
        ]
    }
}
