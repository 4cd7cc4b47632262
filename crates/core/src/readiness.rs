//! Database readiness gate used at process startup.
//!
//! When the backend starts alongside its database (docker compose, CI), the
//! database is usually not accepting connections yet. [`wait_for_database`]
//! blocks the startup path, polling an injected [`DatabaseProbe`] once per
//! second until it succeeds.
//!
//! The gate only absorbs the two "not yet reachable" failure kinds
//! ([`ProbeError::Connection`] and [`ProbeError::Operational`]); anything
//! else is returned to the caller immediately so misconfiguration does not
//! turn into a silent infinite loop.

use std::time::Duration;

use async_trait::async_trait;

/// Fixed delay between probe attempts.
pub const RETRY_DELAY: Duration = Duration::from_secs(1);

/// The logical database target checked by the default startup path.
pub const DEFAULT_TARGET: &str = "default";

/// Failure kinds reported by a [`DatabaseProbe`].
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    /// The server could not be reached at all (socket/TLS level).
    #[error("connection error: {0}")]
    Connection(String),

    /// The server was reached but refused to serve the check (still starting
    /// up, authentication backend not ready, etc.).
    #[error("operational error: {0}")]
    Operational(String),

    /// Any other failure. Never retried by the gate.
    #[error("probe failed: {0}")]
    Fatal(String),
}

impl ProbeError {
    /// Whether the gate should keep waiting after this error.
    fn is_transient(&self) -> bool {
        matches!(self, ProbeError::Connection(_) | ProbeError::Operational(_))
    }
}

/// Capability to check whether named logical databases accept connections.
///
/// Injected into [`wait_for_database`] so tests can script a sequence of
/// outcomes without a real server.
#[async_trait]
pub trait DatabaseProbe: Send + Sync {
    /// Check every target, returning `Ok(())` only if all are reachable.
    async fn check(&self, targets: &[&str]) -> Result<(), ProbeError>;
}

/// Block until `probe.check(targets)` succeeds.
///
/// Retries indefinitely with a fixed 1-second delay while the probe reports
/// a transient error. This is deliberate: the gate exists for container
/// startup ordering, where the database will come up eventually and an
/// attempt cap would just turn a slow boot into a crash loop.
///
/// Returns `Err` only for [`ProbeError::Fatal`], which is never retried.
pub async fn wait_for_database<P>(probe: &P, targets: &[&str]) -> Result<(), ProbeError>
where
    P: DatabaseProbe + ?Sized,
{
    tracing::info!(?targets, "Waiting for database");
    loop {
        match probe.check(targets).await {
            Ok(()) => {
                tracing::info!(?targets, "Database available");
                return Ok(());
            }
            Err(err) if err.is_transient() => {
                tracing::warn!(error = %err, "Database unavailable, retrying in 1s");
                tokio::time::sleep(RETRY_DELAY).await;
            }
            Err(err) => return Err(err),
        }
    }
}
