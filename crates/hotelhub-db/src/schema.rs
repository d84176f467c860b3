//! Schema definitions and migration runner for SurrealDB.
//!
//! All table definitions use SCHEMAFULL mode for data integrity.
//! Timestamps are stored as whole seconds since epoch (`int`
//! columns). Generated ids and token insertion sequence numbers come
//! from `counter` records incremented atomically.

use surrealdb::{Connection, Surreal};
use tracing::info;

use crate::error::DbError;

// -----------------------------------------------------------------------
// Migration tracking
// -----------------------------------------------------------------------

const MIGRATION_TABLE_DDL: &str = "\
DEFINE TABLE IF NOT EXISTS _migration SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS version ON TABLE _migration TYPE int;
DEFINE FIELD IF NOT EXISTS name ON TABLE _migration TYPE string;
DEFINE FIELD IF NOT EXISTS applied_at ON TABLE _migration TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX IF NOT EXISTS idx_schema_version ON TABLE _migration \
    COLUMNS version UNIQUE;
";

struct Migration {
    version: u32,
    name: &'static str,
    ddl: &'static str,
}

static MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "initial_schema",
    ddl: SCHEMA_V1,
}];

async fn applied_versions<C: Connection>(db: &Surreal<C>) -> Result<Vec<u32>, DbError> {
    let mut result = db.query("SELECT VALUE version FROM _migration").await?;
    Ok(result.take(0)?)
}

// -----------------------------------------------------------------------
// Schema v1 — initial table definitions
// -----------------------------------------------------------------------

const SCHEMA_V1: &str = "\
-- =======================================================================
-- Users
-- =======================================================================
DEFINE TABLE user SCHEMAFULL;
DEFINE FIELD username ON TABLE user TYPE string;
DEFINE FIELD email ON TABLE user TYPE string;
DEFINE FIELD password_validation ON TABLE user TYPE string;
DEFINE FIELD role ON TABLE user TYPE string \
    ASSERT $value IN ['Admin', 'Member'];
DEFINE INDEX idx_user_username ON TABLE user COLUMNS username UNIQUE;

-- =======================================================================
-- Session tokens
-- =======================================================================
DEFINE TABLE token SCHEMAFULL;
DEFINE FIELD user_id ON TABLE token TYPE int;
DEFINE FIELD token_validation ON TABLE token TYPE string;
DEFINE FIELD seq ON TABLE token TYPE int;
DEFINE FIELD created_at ON TABLE token TYPE int;
DEFINE FIELD last_used_at ON TABLE token TYPE int;
DEFINE INDEX idx_token_validation ON TABLE token \
    COLUMNS token_validation UNIQUE;
DEFINE INDEX idx_token_user ON TABLE token COLUMNS user_id;

-- =======================================================================
-- Counters (id / sequence generation)
-- =======================================================================
DEFINE TABLE counter SCHEMAFULL;
DEFINE FIELD next ON TABLE counter TYPE int;
";

// -----------------------------------------------------------------------
// Public API
// -----------------------------------------------------------------------

/// Bring the store's schema up to date.
///
/// Sets up the `_migration` tracking table, reads the set of versions
/// already applied, and runs whatever is missing, recording each
/// version as it lands. Safe to call on every startup.
pub async fn run_migrations<C: Connection>(db: &Surreal<C>) -> Result<(), DbError> {
    db.query(MIGRATION_TABLE_DDL)
        .await?
        .check()
        .map_err(|e| DbError::Migration(format!("migration tracking setup failed: {e}")))?;

    let applied = applied_versions(db).await?;

    for migration in MIGRATIONS.iter().filter(|m| !applied.contains(&m.version)) {
        info!(
            version = migration.version,
            name = migration.name,
            "applying schema migration"
        );

        db.query(migration.ddl).await?.check().map_err(|e| {
            DbError::Migration(format!(
                "schema v{} ({}) failed: {e}",
                migration.version, migration.name,
            ))
        })?;

        db.query("CREATE _migration SET version = $version, name = $name")
            .bind(("version", migration.version))
            .bind(("name", migration.name))
            .await?
            .check()
            .map_err(|e| {
                DbError::Migration(format!(
                    "could not record schema v{}: {e}",
                    migration.version,
                ))
            })?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_v1_covers_core_tables() {
        for table in ["user", "token", "counter"] {
            assert!(
                SCHEMA_V1.contains(&format!("DEFINE TABLE {table} ")),
                "missing table definition: {table}"
            );
        }
    }

    #[test]
    fn migration_versions_are_strictly_increasing() {
        for pair in MIGRATIONS.windows(2) {
            assert!(
                pair[0].version < pair[1].version,
                "migration versions out of order"
            );
        }
    }
}
