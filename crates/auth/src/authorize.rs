//! Permission checks against an [`Identity`].

use serde::Serialize;
use thiserror::Error;

use crate::{Identity, Permission};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("forbidden: missing permission '{0}'")]
    Forbidden(String),
}

/// Authorize an identity for a permission.
///
/// Granted when the identity holds `required` or the `all` wildcard.
pub fn authorize(identity: &Identity, required: &Permission) -> Result<(), AuthzError> {
    if identity
        .permissions
        .iter()
        .any(|p| p.is_wildcard() || p == required)
    {
        Ok(())
    } else {
        Err(AuthzError::Forbidden(required.as_str().to_string()))
    }
}

/// Detailed explanation of an authorization decision (for audit/debug views).
#[derive(Debug, Clone, Serialize)]
pub struct AuthorizationExplanation {
    pub required_permission: String,
    pub granted: bool,
    pub reason: String,
    pub role: String,
    /// Sorted.
    pub effective_permissions: Vec<String>,
    pub has_wildcard: bool,
}

/// Explain why `authorize` would allow or deny `required` for `identity`.
pub fn explain_authorization(identity: &Identity, required: &Permission) -> AuthorizationExplanation {
    let effective_permissions: Vec<String> = identity
        .permissions
        .iter()
        .map(|p| p.as_str().to_string())
        .collect();
    let has_wildcard = identity.permissions.iter().any(Permission::is_wildcard);
    let granted = authorize(identity, required).is_ok();

    let reason = if has_wildcard {
        format!(
            "Identity has wildcard permission '{}' (granted by role '{}')",
            Permission::WILDCARD,
            identity.role
        )
    } else if granted {
        format!("Identity has explicit permission '{required}'")
    } else {
        format!(
            "Identity does not have permission '{required}'. Current permissions: {effective_permissions:?}"
        )
    };

    AuthorizationExplanation {
        required_permission: required.as_str().to_string(),
        granted,
        reason,
        role: identity.role.to_string(),
        effective_permissions,
        has_wildcard,
    }
}
