//! Simulated round-trip latency for login attempts.

use std::future::Future;
use std::time::Duration;

use thiserror::Error;

/// The wait itself failed (e.g. the timer was torn down).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("simulated latency failed: {0}")]
pub struct LatencyError(pub String);

/// Stand-in for the network round trip of a login request.
///
/// Injected into the session store so tests can run without waiting.
pub trait Latency: Send + Sync {
    fn wait(&self) -> impl Future<Output = Result<(), LatencyError>> + Send;
}

/// Sleep for a fixed duration on the tokio timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedLatency(pub Duration);

impl FixedLatency {
    pub const DEFAULT: Duration = Duration::from_millis(1000);
}

impl Default for FixedLatency {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl Latency for FixedLatency {
    async fn wait(&self) -> Result<(), LatencyError> {
        tokio::time::sleep(self.0).await;
        Ok(())
    }
}

/// Resolve immediately.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoLatency;

impl Latency for NoLatency {
    async fn wait(&self) -> Result<(), LatencyError> {
        Ok(())
    }
}
