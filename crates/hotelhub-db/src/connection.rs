//! Database connection handling.
//!
//! The store is reached over WebSocket; namespace and database
//! selection happen once at connect time. Configuration comes from
//! `HOTELHUB_DB_*` environment variables, falling back to local
//! development defaults.

use surrealdb::Surreal;
use surrealdb::engine::remote::ws::{Client, Ws};
use surrealdb::opt::auth::Root;
use tracing::{debug, info};

/// Connection settings for the backing store.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Endpoint address, host:port (no scheme).
    pub url: String,
    pub namespace: String,
    pub database: String,
    pub username: String,
    pub password: String,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            url: "127.0.0.1:8000".into(),
            namespace: "hotelhub".into(),
            database: "main".into(),
            username: "root".into(),
            password: "root".into(),
        }
    }
}

fn env_or(key: &str, fallback: String) -> String {
    std::env::var(key).unwrap_or(fallback)
}

impl DbConfig {
    /// Build a config from `HOTELHUB_DB_URL`, `HOTELHUB_DB_NAMESPACE`,
    /// `HOTELHUB_DB_DATABASE`, `HOTELHUB_DB_USERNAME`, and
    /// `HOTELHUB_DB_PASSWORD`. Unset variables keep their defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            url: env_or("HOTELHUB_DB_URL", defaults.url),
            namespace: env_or("HOTELHUB_DB_NAMESPACE", defaults.namespace),
            database: env_or("HOTELHUB_DB_DATABASE", defaults.database),
            username: env_or("HOTELHUB_DB_USERNAME", defaults.username),
            password: env_or("HOTELHUB_DB_PASSWORD", defaults.password),
        }
    }
}

/// Owns the live database handle. Cheap to clone; repositories each
/// take their own clone of the client.
#[derive(Clone)]
pub struct DbManager {
    db: Surreal<Client>,
}

impl DbManager {
    /// Open a connection, authenticate, and select the configured
    /// namespace and database.
    pub async fn connect(config: &DbConfig) -> Result<Self, surrealdb::Error> {
        debug!(url = %config.url, "Opening database connection");

        let db = Surreal::new::<Ws>(&config.url).await?;
        db.signin(Root {
            username: config.username.clone(),
            password: config.password.clone(),
        })
        .await?;
        db.use_ns(&config.namespace)
            .use_db(&config.database)
            .await?;

        info!(
            namespace = %config.namespace,
            database = %config.database,
            "Database connection ready"
        );

        Ok(Self { db })
    }

    pub fn client(&self) -> &Surreal<Client> {
        &self.db
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_env_overrides_defaults_and_keeps_the_rest() {
        // set_var is unsafe in edition 2024; this test is the only
        // place in the crate touching process environment.
        unsafe {
            std::env::set_var("HOTELHUB_DB_URL", "db.internal:9000");
            std::env::set_var("HOTELHUB_DB_DATABASE", "staging");
            std::env::remove_var("HOTELHUB_DB_NAMESPACE");
            std::env::remove_var("HOTELHUB_DB_USERNAME");
            std::env::remove_var("HOTELHUB_DB_PASSWORD");
        }

        let config = DbConfig::from_env();
        assert_eq!(config.url, "db.internal:9000");
        assert_eq!(config.database, "staging");
        assert_eq!(config.namespace, "hotelhub");
        assert_eq!(config.username, "root");
        assert_eq!(config.password, "root");

        unsafe {
            std::env::remove_var("HOTELHUB_DB_URL");
            std::env::remove_var("HOTELHUB_DB_DATABASE");
        }
    }
}
