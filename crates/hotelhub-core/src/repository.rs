//! Repository trait definitions for data access abstraction.
//!
//! All repository operations are async. Implementations live in the
//! database crate; an alternative backing (e.g. in-memory) only needs
//! to satisfy these traits.

use chrono::{DateTime, Utc};

use crate::error::HubResult;
use crate::models::token::{Token, TokenValidationInfo};
use crate::models::user::{PasswordValidationInfo, Role, User};

pub trait UserRepository: Send + Sync {
    /// Exact, case-sensitive lookup. `NotFound` if absent; more than
    /// one row is an `Integrity` fault.
    fn get_by_username(&self, username: &str) -> impl Future<Output = HubResult<User>> + Send;

    fn exists_by_username(&self, username: &str) -> impl Future<Output = HubResult<bool>> + Send;

    fn exists_by_id(&self, id: i64) -> impl Future<Output = HubResult<bool>> + Send;

    /// Single atomic insert; a username uniqueness violation surfaces
    /// as `AlreadyExists`. Returns the generated user id.
    fn create(
        &self,
        username: &str,
        email: &str,
        password_validation: &PasswordValidationInfo,
        role: Role,
    ) -> impl Future<Output = HubResult<i64>> + Send;

    /// Administrative wipe of all users and their tokens. Tokens are
    /// removed first, inside the same transaction.
    fn delete_all(&self) -> impl Future<Output = HubResult<()>> + Send;
}

pub trait TokenRepository: Send + Sync {
    /// Atomically evict the least-recently-used tokens of
    /// `token.user_id` down to `max_tokens - 1` survivors, then insert
    /// the new token. The new token is inserted after eviction runs,
    /// so it always survives its own creating call.
    ///
    /// `max_tokens == 0` is rejected with `InvalidArgument`.
    fn create(
        &self,
        token: &Token,
        max_tokens: u32,
    ) -> impl Future<Output = HubResult<()>> + Send;

    /// Set `last_used_at` for the matching token, never decreasing
    /// it. Returns the number of rows affected; zero rows is not an
    /// error — the caller decides whether absence matters.
    fn update_last_used(
        &self,
        validation: &TokenValidationInfo,
        now: DateTime<Utc>,
    ) -> impl Future<Output = HubResult<u64>> + Send;

    /// Resolve a validation identifier to the token and its owning
    /// user in one round trip. `NotFound` if no token matches.
    fn get_by_validation(
        &self,
        validation: &TokenValidationInfo,
    ) -> impl Future<Output = HubResult<(User, Token)>> + Send;

    /// Revocation. Idempotent: returns the number of rows removed,
    /// 0 for a token that does not exist.
    fn remove_by_validation(
        &self,
        validation: &TokenValidationInfo,
    ) -> impl Future<Output = HubResult<u64>> + Send;
}
