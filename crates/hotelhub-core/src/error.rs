//! Error types for the HotelHub session core.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HubError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Entity already exists: {entity}")]
    AlreadyExists { entity: String },

    /// The presented session token does not resolve to a live token.
    /// Covers evicted, revoked, and never-issued tokens alike — the
    /// caller must not be able to tell which.
    #[error("Session is invalid")]
    SessionInvalid,

    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// More rows than a uniqueness constraint allows, or a token
    /// pointing at a missing user. Indicates store corruption; not
    /// retryable.
    #[error("Data integrity fault: {message}")]
    Integrity { message: String },

    #[error("Database error: {0}")]
    Database(String),

    #[error("Cryptography error: {0}")]
    Crypto(String),
}

pub type HubResult<T> = Result<T, HubError>;
