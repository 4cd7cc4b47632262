//! Concrete Postgres implementation of the startup readiness probe.

use std::collections::HashMap;

use async_trait::async_trait;
use ladle_core::readiness::{DatabaseProbe, ProbeError, DEFAULT_TARGET};
use sqlx::postgres::PgConnection;
use sqlx::Connection;

/// Probes Postgres by opening a fresh connection per named target and
/// running `SELECT 1`.
///
/// A fresh connection (rather than a pool) keeps the probe honest: a pool
/// would mask "server not accepting connections yet" behind its own retry
/// and timeout behavior.
pub struct PgProbe {
    /// Logical target name -> connection URL.
    targets: HashMap<String, String>,
}

impl PgProbe {
    /// Build a probe with an explicit target map.
    pub fn new(targets: HashMap<String, String>) -> Self {
        Self { targets }
    }

    /// Build a probe mapping the `"default"` target to `DATABASE_URL`.
    ///
    /// # Panics
    ///
    /// Panics if `DATABASE_URL` is not set.
    pub fn from_env() -> Self {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        Self::new(HashMap::from([(DEFAULT_TARGET.to_string(), url)]))
    }
}

#[async_trait]
impl DatabaseProbe for PgProbe {
    async fn check(&self, targets: &[&str]) -> Result<(), ProbeError> {
        for name in targets {
            let url = self.targets.get(*name).ok_or_else(|| {
                ProbeError::Fatal(format!("unknown database target '{name}'"))
            })?;

            let mut conn = PgConnection::connect(url).await.map_err(classify)?;
            sqlx::query("SELECT 1")
                .execute(&mut conn)
                .await
                .map_err(classify)?;
            // Ignore close errors: the check itself already passed.
            let _ = conn.close().await;
        }
        Ok(())
    }
}

/// Map a sqlx error onto the gate's error taxonomy.
///
/// Socket and TLS failures mean the server is not reachable yet; server-side
/// errors and protocol hiccups mean it is up but not ready to serve. Both
/// are retried by the gate. Everything else (bad URL, pool closed, decode
/// bugs) is fatal.
fn classify(err: sqlx::Error) -> ProbeError {
    match err {
        sqlx::Error::Io(e) => ProbeError::Connection(e.to_string()),
        sqlx::Error::Tls(e) => ProbeError::Connection(e.to_string()),
        sqlx::Error::Database(e) => ProbeError::Operational(e.to_string()),
        sqlx::Error::Protocol(e) => ProbeError::Operational(e),
        sqlx::Error::PoolTimedOut => ProbeError::Operational("pool timed out".into()),
        other => ProbeError::Fatal(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unknown_target_is_fatal() {
        let probe = PgProbe::new(HashMap::new());
        let err = probe.check(&["default"]).await.unwrap_err();
        assert!(matches!(err, ProbeError::Fatal(_)));
    }

    #[test]
    fn io_errors_classify_as_connection() {
        let err = classify(sqlx::Error::Io(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "connection refused",
        )));
        assert!(matches!(err, ProbeError::Connection(_)));
    }

    #[test]
    fn protocol_errors_classify_as_operational() {
        let err = classify(sqlx::Error::Protocol("unexpected message".into()));
        assert!(matches!(err, ProbeError::Operational(_)));
    }

    #[test]
    fn other_errors_classify_as_fatal() {
        let err = classify(sqlx::Error::RowNotFound);
        assert!(matches!(err, ProbeError::Fatal(_)));
    }
}
