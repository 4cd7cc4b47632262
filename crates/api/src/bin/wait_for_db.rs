//! Block until the configured database accepts connections, then exit 0.
//!
//! Intended for container startup ordering: run this before migrations or
//! the server itself when the database may still be booting. Retries
//! indefinitely on "not yet reachable" errors; exits nonzero on anything
//! else (bad URL, failed authentication).

use ladle_core::readiness::{self, DEFAULT_TARGET};
use ladle_db::probe::PgProbe;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let probe = PgProbe::from_env();

    readiness::wait_for_database(&probe, &[DEFAULT_TARGET])
        .await
        .expect("Database readiness probe failed");
}
