//! SurrealDB implementation of [`UserRepository`].

use hotelhub_core::error::HubResult;
use hotelhub_core::models::user::{PasswordValidationInfo, Role, User};
use hotelhub_core::repository::UserRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::debug;

use crate::error::DbError;
use crate::repository::next_counter_value;

/// DB-side row struct that includes the record ID via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
pub(crate) struct UserRowWithId {
    pub(crate) record_id: i64,
    pub(crate) username: String,
    pub(crate) email: String,
    pub(crate) password_validation: String,
    pub(crate) role: String,
}

/// Row struct for count queries.
#[derive(Debug, SurrealValue)]
struct CountRow {
    total: u64,
}

pub(crate) fn parse_role(s: &str) -> Result<Role, DbError> {
    match s {
        "Admin" => Ok(Role::Admin),
        "Member" => Ok(Role::Member),
        other => Err(DbError::Integrity(format!("unknown user role: {other}"))),
    }
}

fn role_to_string(role: Role) -> &'static str {
    match role {
        Role::Admin => "Admin",
        Role::Member => "Member",
    }
}

impl UserRowWithId {
    pub(crate) fn try_into_user(self) -> Result<User, DbError> {
        Ok(User {
            id: self.record_id,
            username: self.username,
            email: self.email,
            password_validation: PasswordValidationInfo(self.password_validation),
            role: parse_role(&self.role)?,
        })
    }
}

/// Map a uniqueness-constraint violation on the username index to
/// `AlreadyExists`; everything else stays a database error.
fn map_create_error(e: surrealdb::Error) -> DbError {
    if e.to_string().contains("idx_user_username") {
        DbError::AlreadyExists {
            entity: "user".into(),
        }
    } else {
        DbError::Surreal(e)
    }
}

/// SurrealDB implementation of the User repository.
#[derive(Clone)]
pub struct SurrealUserRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealUserRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> UserRepository for SurrealUserRepository<C> {
    async fn get_by_username(&self, username: &str) -> HubResult<User> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM user \
                 WHERE username = $username",
            )
            .bind(("username", username.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<UserRowWithId> = result.take(0).map_err(DbError::from)?;
        if rows.len() > 1 {
            return Err(DbError::Integrity(format!(
                "{} user rows share one username",
                rows.len()
            ))
            .into());
        }
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "user".into(),
            id: format!("username={username}"),
        })?;

        Ok(row.try_into_user()?)
    }

    async fn exists_by_username(&self, username: &str) -> HubResult<bool> {
        let mut result = self
            .db
            .query(
                "SELECT count() AS total FROM user \
                 WHERE username = $username GROUP ALL",
            )
            .bind(("username", username.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<CountRow> = result.take(0).map_err(DbError::from)?;
        Ok(rows.first().map(|r| r.total).unwrap_or(0) > 0)
    }

    async fn exists_by_id(&self, id: i64) -> HubResult<bool> {
        let mut result = self
            .db
            .query("SELECT count() AS total FROM type::record('user', $id) GROUP ALL")
            .bind(("id", id))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<CountRow> = result.take(0).map_err(DbError::from)?;
        Ok(rows.first().map(|r| r.total).unwrap_or(0) > 0)
    }

    async fn create(
        &self,
        username: &str,
        email: &str,
        password_validation: &PasswordValidationInfo,
        role: Role,
    ) -> HubResult<i64> {
        let id = next_counter_value(&self.db, "user").await?;

        let result = self
            .db
            .query(
                "CREATE type::record('user', $id) SET \
                 username = $username, \
                 email = $email, \
                 password_validation = $password_validation, \
                 role = $role",
            )
            .bind(("id", id))
            .bind(("username", username.to_string()))
            .bind(("email", email.to_string()))
            .bind(("password_validation", password_validation.0.clone()))
            .bind(("role", role_to_string(role).to_string()))
            .await
            .map_err(map_create_error)?;

        result.check().map_err(map_create_error)?;

        debug!(user_id = id, "user created");
        Ok(id)
    }

    async fn delete_all(&self) -> HubResult<()> {
        // Tokens reference users, so they go first, in one transaction.
        self.db
            .query(
                "BEGIN TRANSACTION; \
                 DELETE token; \
                 DELETE user; \
                 COMMIT TRANSACTION;",
            )
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(DbError::from)?;

        debug!("all users and tokens deleted");
        Ok(())
    }
}
