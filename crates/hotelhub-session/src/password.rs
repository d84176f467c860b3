//! Credential verification using Argon2id.

use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use hotelhub_core::models::user::PasswordValidationInfo;

use crate::error::SessionError;

/// Verifies a plaintext password against a stored validation blob.
/// Swappable so tests and alternative credential schemes can
/// substitute their own implementation.
pub trait CredentialVerifier: Send + Sync {
    /// Returns `Ok(true)` on match, `Ok(false)` on mismatch, or
    /// `Err(SessionError::Crypto)` if the stored blob is malformed.
    fn verify(
        &self,
        password: &str,
        validation: &PasswordValidationInfo,
    ) -> Result<bool, SessionError>;
}

/// Argon2id verifier with an optional server-side pepper.
#[derive(Debug, Clone, Default)]
pub struct Argon2CredentialVerifier {
    pepper: Option<String>,
}

impl Argon2CredentialVerifier {
    pub fn new() -> Self {
        Self { pepper: None }
    }

    pub fn with_pepper(pepper: String) -> Self {
        Self {
            pepper: Some(pepper),
        }
    }
}

impl CredentialVerifier for Argon2CredentialVerifier {
    fn verify(
        &self,
        password: &str,
        validation: &PasswordValidationInfo,
    ) -> Result<bool, SessionError> {
        let peppered: String;
        let input = match self.pepper.as_deref() {
            Some(p) => {
                peppered = format!("{p}{password}");
                peppered.as_bytes()
            }
            None => password.as_bytes(),
        };

        let parsed_hash = argon2::PasswordHash::new(&validation.0)
            .map_err(|e| SessionError::Crypto(format!("invalid hash format: {e}")))?;

        let argon2 = Argon2::default();
        match argon2.verify_password(input, &parsed_hash) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(SessionError::Crypto(format!("verify error: {e}"))),
        }
    }
}

/// Hash a password with Argon2id using OWASP-recommended parameters
/// (memory: 19 MiB, iterations: 2, parallelism: 1). Salt is randomly
/// generated per hash.
///
/// Used by the (external) registration path and by tests to produce
/// the opaque blob the user store persists.
pub fn hash_password(
    password: &str,
    pepper: Option<&str>,
) -> Result<PasswordValidationInfo, SessionError> {
    let params = argon2::Params::new(19456, 2, 1, None)
        .map_err(|e| SessionError::Crypto(format!("argon2 params error: {e}")))?;
    let argon2 = Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params);

    let peppered: String;
    let input = match pepper {
        Some(p) => {
            peppered = format!("{p}{password}");
            peppered.as_bytes()
        }
        None => password.as_bytes(),
    };

    let salt = SaltString::generate(&mut argon2::password_hash::rand_core::OsRng);
    let hash = argon2
        .hash_password(input, &salt)
        .map_err(|e| SessionError::Crypto(format!("password hash error: {e}")))?;

    Ok(PasswordValidationInfo(hash.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correct_password_matches() {
        let hash = hash_password("hunter2", None).unwrap();
        let verifier = Argon2CredentialVerifier::new();
        assert!(verifier.verify("hunter2", &hash).unwrap());
    }

    #[test]
    fn wrong_password_does_not_match() {
        let hash = hash_password("hunter2", None).unwrap();
        let verifier = Argon2CredentialVerifier::new();
        assert!(!verifier.verify("wrong", &hash).unwrap());
    }

    #[test]
    fn pepper_is_applied() {
        let hash = hash_password("hunter2", Some("pepper!")).unwrap();
        let with = Argon2CredentialVerifier::with_pepper("pepper!".into());
        assert!(with.verify("hunter2", &hash).unwrap());
        // Without pepper should fail.
        let without = Argon2CredentialVerifier::new();
        assert!(!without.verify("hunter2", &hash).unwrap());
    }

    #[test]
    fn malformed_hash_returns_error() {
        let verifier = Argon2CredentialVerifier::new();
        let result = verifier.verify("pw", &PasswordValidationInfo("not-a-hash".into()));
        assert!(result.is_err());
    }
}
