//! `hrm-portal`
//!
//! **Responsibility:** the HRM portal client core.
//!
//! This crate provides:
//! - the route table and the application shell that resolves navigations
//! - sign-in / sign-up form validation
//! - document upload validation and simulated uploads
//! - file-backed persistence of the session slot
//!
//! Session and authorization decisions live in `hrm-auth`.

pub mod config;
pub mod documents;
pub mod forms;
pub mod routes;
pub mod shell;
pub mod storage;

use std::sync::Arc;

use anyhow::Context;
use hrm_auth::{FixedLatency, SessionStore, StaticDirectory};

pub use config::PortalConfig;
pub use shell::{Navigation, PortalShell};
pub use storage::FileStore;

/// Shell wired to the demo directory and file-backed storage.
pub type Shell = PortalShell<StaticDirectory, FileStore, FixedLatency>;

/// Build the shell described by `config` and restore any persisted session.
pub fn open_shell(config: &PortalConfig) -> anyhow::Result<Shell> {
    let storage = FileStore::open(&config.data_dir).with_context(|| {
        format!("failed to open session storage at {:?}", config.data_dir)
    })?;
    let directory = StaticDirectory::demo().context("failed to build the demo directory")?;

    let session = SessionStore::with_latency(
        directory,
        storage,
        FixedLatency(config.login_latency),
    );
    let shell = PortalShell::new(Arc::new(session));
    shell.start();
    Ok(shell)
}
