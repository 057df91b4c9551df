//! `hrm-auth` — session and authorization boundary of the HRM portal.
//!
//! This crate is decoupled from rendering and from any concrete storage
//! backend: storage is reached through [`KeyValueStore`], latency through
//! [`Latency`].

pub mod authorize;
pub mod directory;
pub mod gate;
pub mod identity;
pub mod latency;
pub mod permissions;
pub mod roles;
pub mod session;
pub mod storage;

pub use authorize::{AuthzError, authorize, explain_authorization};
pub use directory::{CredentialDirectory, StaticDirectory};
pub use gate::{GateDecision, Redirect, RouteGuard, check_access, landing_route};
pub use identity::Identity;
pub use latency::{FixedLatency, Latency, LatencyError, NoLatency};
pub use permissions::Permission;
pub use roles::Role;
pub use session::{LoginOutcome, SESSION_KEY, SessionState, SessionStore};
pub use storage::{InMemoryStore, KeyValueStore, StorageError};
