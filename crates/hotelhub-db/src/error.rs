//! Database-specific error types and conversions.

use hotelhub_core::error::HubError;

/// Database-layer error type.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("SurrealDB error: {0}")]
    Surreal(#[from] surrealdb::Error),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Record not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Record already exists: {entity}")]
    AlreadyExists { entity: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Store corruption: more rows than a uniqueness constraint
    /// allows, or a token whose owning user row is gone.
    #[error("Integrity fault: {0}")]
    Integrity(String),
}

impl From<DbError> for HubError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => HubError::NotFound { entity, id },
            DbError::AlreadyExists { entity } => HubError::AlreadyExists { entity },
            DbError::InvalidArgument(message) => HubError::InvalidArgument { message },
            DbError::Integrity(message) => HubError::Integrity { message },
            other => HubError::Database(other.to_string()),
        }
    }
}
