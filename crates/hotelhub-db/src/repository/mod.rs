//! SurrealDB repository implementations.

mod token;
mod user;

pub use token::SurrealTokenRepository;
pub use user::SurrealUserRepository;

use surrealdb::{Connection, Surreal};

use crate::error::DbError;

/// Atomically increment and return the named counter.
///
/// Counters have sequence semantics: a value consumed by a failed
/// insert is skipped, never reused.
async fn next_counter_value<C: Connection>(
    db: &Surreal<C>,
    key: &str,
) -> Result<i64, DbError> {
    let mut result = db
        .query("UPSERT type::record('counter', $key) SET next += 1 RETURN VALUE next")
        .bind(("key", key.to_string()))
        .await?;

    let values: Vec<i64> = result.take(0)?;
    values
        .into_iter()
        .next()
        .ok_or_else(|| DbError::Integrity(format!("counter '{key}' returned no value")))
}
