//! Session token domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque validation identifier for a session token — the SHA-256
/// digest of the raw bearer value, hex-encoded. This is the value
/// persisted and looked up; the raw bearer value is never stored.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct TokenValidationInfo(pub String);

// A validation identifier is a bearer credential; it must never end
// up in logs via a stray debug format.
impl fmt::Debug for TokenValidationInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TokenValidationInfo(..)")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub validation: TokenValidationInfo,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    /// Monotonically non-decreasing; refreshed on each successful use.
    pub last_used_at: DateTime<Utc>,
}
