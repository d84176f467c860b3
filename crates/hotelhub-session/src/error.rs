//! Session error types.

use hotelhub_core::error::HubError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("user or password are invalid")]
    UserOrPasswordInvalid,

    #[error("session is invalid")]
    SessionInvalid,

    #[error("cryptography error: {0}")]
    Crypto(String),
}

impl From<SessionError> for HubError {
    fn from(err: SessionError) -> Self {
        match err {
            // Both collapse to the same caller-visible kind: neither
            // login failures nor dead tokens reveal which part was
            // wrong, or when an eviction happened.
            SessionError::UserOrPasswordInvalid | SessionError::SessionInvalid => {
                HubError::SessionInvalid
            }
            SessionError::Crypto(msg) => HubError::Crypto(msg),
        }
    }
}
