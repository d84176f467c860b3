//! SurrealDB implementation of [`TokenRepository`].
//!
//! The capacity bound is enforced by running eviction and insertion
//! inside a single transaction, so two concurrent `create` calls for
//! the same user can never both observe the pre-eviction token set.
//! Validation identifiers are bearer credentials and are never
//! logged.

use chrono::{DateTime, Utc};
use hotelhub_core::error::HubResult;
use hotelhub_core::models::token::{Token, TokenValidationInfo};
use hotelhub_core::models::user::User;
use hotelhub_core::repository::TokenRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::{debug, info};

use crate::error::DbError;
use crate::repository::next_counter_value;
use crate::repository::user::UserRowWithId;

#[derive(Debug, SurrealValue)]
struct TokenRow {
    user_id: i64,
    token_validation: String,
    #[allow(dead_code)]
    seq: i64,
    created_at: i64,
    last_used_at: i64,
}

fn timestamp_to_datetime(secs: i64) -> Result<DateTime<Utc>, DbError> {
    DateTime::from_timestamp(secs, 0)
        .ok_or_else(|| DbError::Integrity(format!("timestamp out of range: {secs}")))
}

impl TokenRow {
    fn try_into_token(self) -> Result<Token, DbError> {
        Ok(Token {
            validation: TokenValidationInfo(self.token_validation),
            user_id: self.user_id,
            created_at: timestamp_to_datetime(self.created_at)?,
            last_used_at: timestamp_to_datetime(self.last_used_at)?,
        })
    }
}

fn map_create_error(e: surrealdb::Error) -> DbError {
    if e.to_string().contains("idx_token_validation") {
        DbError::AlreadyExists {
            entity: "token".into(),
        }
    } else {
        DbError::Surreal(e)
    }
}

/// SurrealDB implementation of the Token repository.
#[derive(Clone)]
pub struct SurrealTokenRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealTokenRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> TokenRepository for SurrealTokenRepository<C> {
    async fn create(&self, token: &Token, max_tokens: u32) -> HubResult<()> {
        if max_tokens == 0 {
            return Err(DbError::InvalidArgument(
                "max_tokens must be at least 1".into(),
            )
            .into());
        }

        // Sequence number doubles as the deterministic tie-break for
        // eviction ordering when last_used_at values are equal.
        let seq = next_counter_value(&self.db, "token").await?;
        let offset = i64::from(max_tokens) - 1;

        // Eviction sees only the pre-insert token set; the new token
        // is created afterwards, inside the same transaction, so it
        // always survives its own creating call.
        let result = self
            .db
            .query(
                "BEGIN TRANSACTION; \
                 DELETE token \
                 WHERE user_id = $user_id \
                     AND token_validation IN ( \
                         SELECT VALUE token_validation FROM token \
                         WHERE user_id = $user_id \
                         ORDER BY last_used_at DESC, seq DESC \
                         START $offset \
                     ) \
                 RETURN BEFORE; \
                 CREATE token SET \
                     user_id = $user_id, \
                     token_validation = $token_validation, \
                     seq = $seq, \
                     created_at = $created_at, \
                     last_used_at = $last_used_at; \
                 COMMIT TRANSACTION;",
            )
            .bind(("user_id", token.user_id))
            .bind(("offset", offset))
            .bind(("token_validation", token.validation.0.clone()))
            .bind(("seq", seq))
            .bind(("created_at", token.created_at.timestamp()))
            .bind(("last_used_at", token.last_used_at.timestamp()))
            .await
            .map_err(map_create_error)?;

        let mut result = result.check().map_err(map_create_error)?;

        // BEGIN TRANSACTION occupies result index 0, so the DELETE's
        // RETURN BEFORE rows land at index 1.
        let evicted: Vec<TokenRow> = result.take(1).map_err(DbError::from)?;
        info!(
            user_id = token.user_id,
            evicted = evicted.len(),
            "tokens evicted when creating new token"
        );

        Ok(())
    }

    async fn update_last_used(
        &self,
        validation: &TokenValidationInfo,
        now: DateTime<Utc>,
    ) -> HubResult<u64> {
        // math::max keeps last_used_at monotonically non-decreasing
        // even if a caller hands in a stale clock reading.
        let mut result = self
            .db
            .query(
                "UPDATE token \
                 SET last_used_at = math::max([last_used_at, $now]) \
                 WHERE token_validation = $token_validation \
                 RETURN AFTER",
            )
            .bind(("now", now.timestamp()))
            .bind(("token_validation", validation.0.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<TokenRow> = result.take(0).map_err(DbError::from)?;
        Ok(rows.len() as u64)
    }

    async fn get_by_validation(
        &self,
        validation: &TokenValidationInfo,
    ) -> HubResult<(User, Token)> {
        // Token and owning user resolved in a single round trip.
        let mut result = self
            .db
            .query(
                "SELECT * FROM token \
                 WHERE token_validation = $token_validation; \
                 SELECT meta::id(id) AS record_id, * FROM user \
                 WHERE meta::id(id) IN ( \
                     SELECT VALUE user_id FROM token \
                     WHERE token_validation = $token_validation \
                 );",
            )
            .bind(("token_validation", validation.0.clone()))
            .await
            .map_err(DbError::from)?;

        let token_rows: Vec<TokenRow> = result.take(0).map_err(DbError::from)?;
        if token_rows.len() > 1 {
            return Err(DbError::Integrity(format!(
                "{} token rows share one validation identifier",
                token_rows.len()
            ))
            .into());
        }
        let token_row = token_rows
            .into_iter()
            .next()
            .ok_or_else(|| DbError::NotFound {
                entity: "token".into(),
                id: "validation identifier".into(),
            })?;

        let user_rows: Vec<UserRowWithId> = result.take(1).map_err(DbError::from)?;
        if user_rows.len() > 1 {
            return Err(DbError::Integrity(format!(
                "{} user rows share one id",
                user_rows.len()
            ))
            .into());
        }
        let user_row = user_rows.into_iter().next().ok_or_else(|| {
            DbError::Integrity(format!(
                "token references missing user {}",
                token_row.user_id
            ))
        })?;

        Ok((user_row.try_into_user()?, token_row.try_into_token()?))
    }

    async fn remove_by_validation(&self, validation: &TokenValidationInfo) -> HubResult<u64> {
        let mut result = self
            .db
            .query(
                "DELETE token \
                 WHERE token_validation = $token_validation \
                 RETURN BEFORE",
            )
            .bind(("token_validation", validation.0.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<TokenRow> = result.take(0).map_err(DbError::from)?;
        debug!(removed = rows.len(), "token removal");
        Ok(rows.len() as u64)
    }
}
