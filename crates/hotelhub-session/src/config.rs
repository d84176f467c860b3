//! Session configuration.

/// Configuration for the session service.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Hard per-user cap on live tokens. Creating a token beyond the
    /// cap evicts the least-recently-used one.
    pub max_tokens_per_user: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_tokens_per_user: 3,
        }
    }
}
