//! Opaque bearer token generation and hashing.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use hotelhub_core::models::token::TokenValidationInfo;
use sha2::{Digest, Sha256};

/// Generate a cryptographically random opaque bearer value
/// (32 bytes, base64url-encoded, no padding). This is what the
/// client holds; it is never persisted.
pub fn generate_token_value() -> String {
    let mut rng = rand::rng();
    let bytes: [u8; 32] = rand::Rng::random(&mut rng);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// SHA-256 hash of a raw bearer value, hex-encoded.
///
/// This is the validation identifier stored in the database as
/// `token.token_validation`, so a database leak does not leak usable
/// credentials.
pub fn validation_info(raw: &str) -> TokenValidationInfo {
    let mut hasher = Sha256::new();
    hasher.update(raw.as_bytes());
    TokenValidationInfo(hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_value_is_url_safe() {
        let token = generate_token_value();
        // base64url characters only (A-Z a-z 0-9 - _), no padding.
        assert!(
            token
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
        // 32 bytes → 43 base64url chars.
        assert_eq!(token.len(), 43);
    }

    #[test]
    fn token_values_are_unique() {
        assert_ne!(generate_token_value(), generate_token_value());
    }

    #[test]
    fn validation_info_is_deterministic() {
        let raw = "some-bearer-token";
        assert_eq!(validation_info(raw), validation_info(raw));
    }

    #[test]
    fn different_tokens_different_validation_info() {
        assert_ne!(validation_info("token-a"), validation_info("token-b"));
    }
}
