//! Session service — authentication, refresh, and revocation
//! orchestration.

use hotelhub_core::clock::Clock;
use hotelhub_core::error::{HubError, HubResult};
use hotelhub_core::models::token::Token;
use hotelhub_core::models::user::User;
use hotelhub_core::repository::{TokenRepository, UserRepository};
use tracing::{debug, info};

use crate::config::SessionConfig;
use crate::error::SessionError;
use crate::password::CredentialVerifier;
use crate::token;

/// Successful authentication result.
#[derive(Debug)]
pub struct IssuedToken {
    /// Raw opaque bearer value (return to client, not stored).
    pub token_value: String,
    /// Persisted token metadata.
    pub token: Token,
}

/// Session service.
///
/// Generic over repository, verifier, and clock implementations so
/// the orchestration layer has no dependency on the database crate.
pub struct SessionService<U, T, V, C>
where
    U: UserRepository,
    T: TokenRepository,
    V: CredentialVerifier,
    C: Clock,
{
    users: U,
    tokens: T,
    verifier: V,
    clock: C,
    config: SessionConfig,
}

impl<U, T, V, C> SessionService<U, T, V, C>
where
    U: UserRepository,
    T: TokenRepository,
    V: CredentialVerifier,
    C: Clock,
{
    pub fn new(users: U, tokens: T, verifier: V, clock: C, config: SessionConfig) -> Self {
        Self {
            users,
            tokens,
            verifier,
            clock,
            config,
        }
    }

    /// Authenticate a user with username + password and issue a
    /// session token, evicting the least-recently-used token if the
    /// user is at capacity.
    ///
    /// Unknown users and wrong passwords are indistinguishable to the
    /// caller.
    pub async fn authenticate(&self, username: &str, password: &str) -> HubResult<IssuedToken> {
        let user = match self.users.get_by_username(username).await {
            Ok(u) => u,
            Err(HubError::NotFound { .. }) => {
                return Err(SessionError::UserOrPasswordInvalid.into());
            }
            Err(e) => return Err(e),
        };

        let valid = self.verifier.verify(password, &user.password_validation)?;
        if !valid {
            return Err(SessionError::UserOrPasswordInvalid.into());
        }

        let now = self.clock.now();
        let token_value = token::generate_token_value();
        let token = Token {
            validation: token::validation_info(&token_value),
            user_id: user.id,
            created_at: now,
            last_used_at: now,
        };

        self.tokens
            .create(&token, self.config.max_tokens_per_user)
            .await?;

        info!(user_id = user.id, "session token issued");
        Ok(IssuedToken { token_value, token })
    }

    /// Refresh a session: bump the token's `last_used_at` to the
    /// current time. The lookup and the update are one atomic
    /// statement, so a token evicted or revoked concurrently simply
    /// affects zero rows and surfaces as `SessionInvalid`.
    pub async fn refresh(&self, token_value: &str) -> HubResult<()> {
        let validation = token::validation_info(token_value);
        let updated = self
            .tokens
            .update_last_used(&validation, self.clock.now())
            .await?;

        if updated == 0 {
            return Err(SessionError::SessionInvalid.into());
        }
        Ok(())
    }

    /// Revoke a session (logout). Idempotent: succeeds whether or not
    /// the token still exists.
    pub async fn revoke(&self, token_value: &str) -> HubResult<()> {
        let validation = token::validation_info(token_value);
        let removed = self.tokens.remove_by_validation(&validation).await?;
        debug!(removed, "session revoked");
        Ok(())
    }

    /// Resolve a bearer value to its owning user and token metadata,
    /// for the authorization layer. Evicted, revoked, and never-issued
    /// tokens all surface as `SessionInvalid`.
    pub async fn resolve(&self, token_value: &str) -> HubResult<(User, Token)> {
        let validation = token::validation_info(token_value);
        match self.tokens.get_by_validation(&validation).await {
            Ok(pair) => Ok(pair),
            Err(HubError::NotFound { .. }) => Err(SessionError::SessionInvalid.into()),
            Err(e) => Err(e),
        }
    }
}
