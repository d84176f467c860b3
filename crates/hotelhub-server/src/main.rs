//! HotelHub Server — application entry point.
//!
//! Initializes tracing, connects to the database, runs migrations,
//! and constructs the session core. The HTTP layer that consumes the
//! session service lives outside this repository.

use hotelhub_core::SystemClock;
use hotelhub_db::repository::{SurrealTokenRepository, SurrealUserRepository};
use hotelhub_db::{DbConfig, DbManager};
use hotelhub_session::password::Argon2CredentialVerifier;
use hotelhub_session::{SessionConfig, SessionService};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("hotelhub=info".parse()?),
        )
        .json()
        .init();

    tracing::info!("Starting HotelHub server...");

    let db_config = DbConfig::from_env();
    let manager = DbManager::connect(&db_config).await?;
    hotelhub_db::run_migrations(manager.client()).await?;

    let db = manager.client().clone();
    let _sessions = SessionService::new(
        SurrealUserRepository::new(db.clone()),
        SurrealTokenRepository::new(db),
        Argon2CredentialVerifier::new(),
        SystemClock,
        SessionConfig::default(),
    );

    tracing::info!("Session core ready");

    // TODO: mount the HTTP session/user/critique routes once the
    // transport layer lands.

    tracing::info!("HotelHub server stopped.");
    Ok(())
}
