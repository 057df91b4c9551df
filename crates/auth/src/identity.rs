//! The signed-in principal.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use hrm_core::{Email, Entity, UserId};

use crate::{Permission, Role};

/// Profile, role and permissions of an authenticated portal user.
///
/// The serialized form (camelCase JSON) is what the session store writes to
/// the persisted `hrm_user` slot, so field names are part of the storage
/// format.
///
/// # Invariants
/// - `role` is exactly one of the [`Role`] variants.
/// - `permissions` may be empty but is always present; a persisted value
///   without it does not deserialize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub id: UserId,
    pub email: Email,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub department: String,
    pub position: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub permissions: BTreeSet<Permission>,
}

impl Identity {
    pub fn display_name(&self) -> String {
        match (self.first_name.is_empty(), self.last_name.is_empty()) {
            (false, false) => format!("{} {}", self.first_name, self.last_name),
            (false, true) => self.first_name.clone(),
            (true, false) => self.last_name.clone(),
            (true, true) => self.email.to_string(),
        }
    }

    /// Uppercase initials for avatar placeholders (e.g. "JA").
    pub fn initials(&self) -> String {
        [&self.first_name, &self.last_name]
            .iter()
            .filter_map(|name| name.chars().next())
            .flat_map(char::to_uppercase)
            .collect()
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.role == role
    }

    /// Avatar reference, treating an empty string as "no avatar".
    pub fn avatar(&self) -> Option<&str> {
        self.avatar.as_deref().filter(|a| !a.is_empty())
    }
}

impl Entity for Identity {
    type Id = UserId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
