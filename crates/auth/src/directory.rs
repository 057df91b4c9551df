//! Credential directory: the login oracle.

use std::collections::{BTreeSet, HashMap};

use hrm_core::{DomainResult, Email, UserId};

use crate::permissions::well_known;
use crate::{Identity, Permission, Role};

/// Read-only lookup of identities and expected passwords by email.
///
/// Lookups compare the email exactly (no trimming, no case folding).
pub trait CredentialDirectory: Send + Sync {
    fn lookup_identity(&self, email: &str) -> Option<&Identity>;

    fn lookup_password(&self, email: &str) -> Option<&str>;
}

#[derive(Debug, Clone)]
struct Account {
    identity: Identity,
    password: String,
}

/// In-memory directory populated once at startup.
#[derive(Debug, Clone, Default)]
pub struct StaticDirectory {
    accounts: HashMap<String, Account>,
}

impl StaticDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an account, replacing any account with the same email.
    pub fn with_account(mut self, identity: Identity, password: impl Into<String>) -> Self {
        self.accounts.insert(
            identity.email.to_string(),
            Account {
                identity,
                password: password.into(),
            },
        );
        self
    }

    /// The three demo accounts the portal ships with.
    pub fn demo() -> DomainResult<Self> {
        let all: BTreeSet<Permission> = [Permission::all()].into_iter().collect();

        Ok(Self::new()
            .with_account(
                Identity {
                    id: UserId::new("admin-001")?,
                    email: Email::parse("admin@hrm.com")?,
                    first_name: "John".to_string(),
                    last_name: "Admin".to_string(),
                    role: Role::Administrator,
                    department: "Administration".to_string(),
                    position: "System Administrator".to_string(),
                    avatar: Some(String::new()),
                    permissions: all.clone(),
                },
                "admin123",
            )
            .with_account(
                Identity {
                    id: UserId::new("emp-001")?,
                    email: Email::parse("employee@hrm.com")?,
                    first_name: "Jane".to_string(),
                    last_name: "Employee".to_string(),
                    role: Role::Employee,
                    department: "Human Resources".to_string(),
                    position: "HR Specialist".to_string(),
                    avatar: Some(String::new()),
                    permissions: well_known::employee_self_service().into_iter().collect(),
                },
                "employee123",
            )
            .with_account(
                Identity {
                    id: UserId::new("emp-002")?,
                    email: Email::parse("manager@hrm.com")?,
                    first_name: "Mike".to_string(),
                    last_name: "Manager".to_string(),
                    role: Role::Manager,
                    department: "Operations".to_string(),
                    position: "Operations Manager".to_string(),
                    avatar: Some(String::new()),
                    permissions: all,
                },
                "manager123",
            ))
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Identities in the directory, sorted by email.
    pub fn identities(&self) -> Vec<&Identity> {
        let mut identities: Vec<&Identity> =
            self.accounts.values().map(|a| &a.identity).collect();
        identities.sort_by(|a, b| a.email.cmp(&b.email));
        identities
    }
}

impl CredentialDirectory for StaticDirectory {
    fn lookup_identity(&self, email: &str) -> Option<&Identity> {
        self.accounts.get(email).map(|a| &a.identity)
    }

    fn lookup_password(&self, email: &str) -> Option<&str> {
        self.accounts.get(email).map(|a| a.password.as_str())
    }
}
