//! Session store: the single owner of the current identity.
//!
//! The store is constructed once at startup and shared (usually behind an
//! `Arc`) with every consumer that needs to read or change the session.
//! It is the only writer of the persisted [`SESSION_KEY`] slot.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::Serialize;
use thiserror::Error;

use crate::directory::CredentialDirectory;
use crate::latency::{FixedLatency, Latency};
use crate::storage::{KeyValueStore, StorageError};
use crate::Identity;

/// Storage slot holding the serialized [`Identity`] of the signed-in user.
pub const SESSION_KEY: &str = "hrm_user";

/// User-facing login messages.
pub mod messages {
    pub const LOGIN_SUCCESSFUL: &str = "Login successful";
    pub const INVALID_CREDENTIALS: &str = "Invalid email or password";
    pub const LOGIN_FAILED: &str = "Login failed. Please try again.";
    pub const LOGIN_IN_PROGRESS: &str = "A login attempt is already in progress";
}

/// Result of a login attempt.
///
/// A failed login is a normal outcome, not an error: callers branch on
/// `success` and show `message` to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginOutcome {
    pub success: bool,
    pub message: String,
}

impl LoginOutcome {
    pub fn success() -> Self {
        Self {
            success: true,
            message: messages::LOGIN_SUCCESSFUL.to_string(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }

    pub fn invalid_credentials() -> Self {
        Self::failure(messages::INVALID_CREDENTIALS)
    }
}

/// Point-in-time view of the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub identity: Option<Identity>,
    /// True before the first restore and while a login is in flight.
    pub loading: bool,
}

impl SessionState {
    /// State of a freshly constructed store, before `restore` has run.
    pub fn initializing() -> Self {
        Self {
            identity: None,
            loading: true,
        }
    }

    pub fn signed_out() -> Self {
        Self {
            identity: None,
            loading: false,
        }
    }

    pub fn signed_in(identity: Identity) -> Self {
        Self {
            identity: Some(identity),
            loading: false,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }
}

#[derive(Debug, Error)]
enum PersistError {
    #[error("failed to serialize identity: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Owns the session and the persisted session slot.
///
/// # Concurrency
/// Login is single-flight: while one attempt is waiting on its latency, a
/// second `login` resolves immediately to a failure and changes nothing.
/// `logout` is not blocked by an in-flight login; if the login then
/// succeeds, the user ends up signed in.
pub struct SessionStore<D, S, L = FixedLatency> {
    directory: D,
    storage: S,
    latency: L,
    state: RwLock<SessionState>,
    login_in_flight: AtomicBool,
}

impl<D, S> SessionStore<D, S, FixedLatency>
where
    D: CredentialDirectory,
    S: KeyValueStore,
{
    /// Create a store with the default one-second simulated latency.
    pub fn new(directory: D, storage: S) -> Self {
        Self::with_latency(directory, storage, FixedLatency::default())
    }
}

impl<D, S, L> SessionStore<D, S, L>
where
    D: CredentialDirectory,
    S: KeyValueStore,
    L: Latency,
{
    pub fn with_latency(directory: D, storage: S, latency: L) -> Self {
        Self {
            directory,
            storage,
            latency,
            state: RwLock::new(SessionState::initializing()),
            login_in_flight: AtomicBool::new(false),
        }
    }

    pub fn directory(&self) -> &D {
        &self.directory
    }

    /// Restore the session from the persisted slot.
    ///
    /// - empty slot: signed out
    /// - slot holds a valid identity: signed in as that identity
    /// - slot holds anything else: slot is cleared, signed out
    ///
    /// Never fails; always clears the loading flag. Returns whether an
    /// identity was restored.
    pub fn restore(&self) -> bool {
        let restored = match self.storage.get(SESSION_KEY) {
            Ok(None) => None,
            Ok(Some(raw)) => match serde_json::from_str::<Identity>(&raw) {
                Ok(identity) => Some(identity),
                Err(err) => {
                    tracing::warn!(error = %err, "discarding malformed persisted session");
                    if let Err(err) = self.storage.remove(SESSION_KEY) {
                        tracing::warn!(error = %err, "failed to clear malformed persisted session");
                    }
                    None
                }
            },
            Err(err) => {
                tracing::warn!(error = %err, "failed to read persisted session");
                None
            }
        };

        let restored_any = restored.is_some();
        if let Some(identity) = &restored {
            tracing::info!(user_id = %identity.id, role = %identity.role, "session restored");
        }

        let mut state = self.write_state();
        state.identity = restored;
        state.loading = false;
        restored_any
    }

    /// Attempt to sign in.
    ///
    /// Waits on the configured latency, then checks the directory. The
    /// password must match exactly. On success the identity is persisted and
    /// becomes current; on failure nothing changes. The loading flag is
    /// cleared on every path.
    pub async fn login(&self, email: &str, password: &str) -> LoginOutcome {
        if self
            .login_in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::warn!(email, "login rejected: another attempt is in flight");
            return LoginOutcome::failure(messages::LOGIN_IN_PROGRESS);
        }
        let _in_flight = InFlightLogin { store: self };

        self.write_state().loading = true;

        if let Err(err) = self.latency.wait().await {
            tracing::error!(error = %err, "login attempt failed before credential check");
            return LoginOutcome::failure(messages::LOGIN_FAILED);
        }

        let identity = match (
            self.directory.lookup_identity(email),
            self.directory.lookup_password(email),
        ) {
            (Some(identity), Some(expected)) if expected == password => identity.clone(),
            _ => {
                tracing::info!(email, "login failed: invalid credentials");
                return LoginOutcome::invalid_credentials();
            }
        };

        if let Err(err) = self.persist(&identity) {
            tracing::error!(error = %err, user_id = %identity.id, "failed to persist session");
            return LoginOutcome::failure(messages::LOGIN_FAILED);
        }

        tracing::info!(user_id = %identity.id, role = %identity.role, "login successful");
        self.write_state().identity = Some(identity);
        LoginOutcome::success()
    }

    /// Sign out: clear the persisted slot and the current identity.
    pub fn logout(&self) {
        if let Err(err) = self.storage.remove(SESSION_KEY) {
            tracing::warn!(error = %err, "failed to clear persisted session on logout");
        }

        let previous = self.write_state().identity.take();
        if let Some(identity) = previous {
            tracing::info!(user_id = %identity.id, "logged out");
        }
    }

    pub fn snapshot(&self) -> SessionState {
        self.read_state().clone()
    }

    pub fn identity(&self) -> Option<Identity> {
        self.read_state().identity.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.read_state().loading
    }

    pub fn is_authenticated(&self) -> bool {
        self.read_state().is_authenticated()
    }

    fn persist(&self, identity: &Identity) -> Result<(), PersistError> {
        let raw = serde_json::to_string(identity)?;
        self.storage.set(SESSION_KEY, &raw)?;
        Ok(())
    }

    fn read_state(&self) -> RwLockReadGuard<'_, SessionState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, SessionState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Clears the single-flight flag and the loading flag when a login attempt
/// ends, including when its future is dropped mid-wait.
struct InFlightLogin<'a, D, S, L> {
    store: &'a SessionStore<D, S, L>,
}

impl<D, S, L> Drop for InFlightLogin<'_, D, S, L> {
    fn drop(&mut self) {
        self.store
            .state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .loading = false;
        self.store.login_in_flight.store(false, Ordering::Release);
    }
}
