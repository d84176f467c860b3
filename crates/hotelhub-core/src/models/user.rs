//! User domain model.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Role {
    Admin,
    Member,
}

/// Opaque password-validation blob (Argon2id PHC string). Never
/// compared in plaintext; verification is delegated to the
/// credential-verifier collaborator.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PasswordValidationInfo(pub String);

// Keeps the hash out of debug logs.
impl fmt::Debug for PasswordValidationInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordValidationInfo(..)")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_validation: PasswordValidationInfo,
    pub role: Role,
}
