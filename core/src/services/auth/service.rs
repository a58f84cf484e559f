//! Main authentication service implementation

use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::entities::token::TokenPair;
use crate::domain::entities::user::{NewUser, Role, User};
use crate::errors::{AuthError, DomainError};
use crate::repositories::UserRepository;
use crate::services::cache::CacheService;
use crate::services::token::TokenService;

/// Result of a successful registration or login
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user: User,
    pub tokens: TokenPair,
}

/// Service orchestrating account credentials and session tokens
pub struct AuthService<U: UserRepository, C: CacheService> {
    users: U,
    tokens: Arc<TokenService<C>>,
}

impl<U: UserRepository, C: CacheService> AuthService<U, C> {
    /// Creates a new authentication service
    pub fn new(users: U, tokens: Arc<TokenService<C>>) -> Self {
        Self { users, tokens }
    }

    /// The underlying token service, shared with the auth middleware
    pub fn token_service(&self) -> Arc<TokenService<C>> {
        Arc::clone(&self.tokens)
    }

    /// Registers a new account and opens a session for it
    ///
    /// Username and email must both be unused. The role defaults to
    /// [`Role::Agent`] when the caller does not provide one.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
        role: Option<Role>,
    ) -> Result<AuthSession, DomainError> {
        if self.users.find_by_username(username).await?.is_some() {
            return Err(AuthError::UserAlreadyExists.into());
        }
        if self.users.find_by_email(email).await?.is_some() {
            return Err(AuthError::EmailAlreadyExists.into());
        }

        let password_hash =
            bcrypt::hash(password, bcrypt::DEFAULT_COST).map_err(|e| DomainError::Internal {
                message: format!("password hashing failed: {e}"),
            })?;

        let user = self
            .users
            .create(NewUser {
                username: username.to_string(),
                email: email.to_string(),
                password_hash,
                role: role.unwrap_or_default(),
            })
            .await?;

        info!(user_id = user.id, username = %user.username, "registered new user");

        let tokens = self
            .tokens
            .generate_token_pair(user.id, &user.username, user.role)
            .await?;

        Ok(AuthSession { user, tokens })
    }

    /// Authenticates credentials and opens a session
    ///
    /// Unknown usernames and wrong passwords both answer
    /// [`AuthError::InvalidCredentials`]; the API must not leak which
    /// half failed.
    pub async fn login(&self, username: &str, password: &str) -> Result<AuthSession, DomainError> {
        let user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !user.verify_password(password) {
            warn!(username, "login with wrong password");
            return Err(AuthError::InvalidCredentials.into());
        }

        let tokens = self
            .tokens
            .generate_token_pair(user.id, &user.username, user.role)
            .await?;

        Ok(AuthSession { user, tokens })
    }

    /// Exchanges a refresh token for a rotated pair
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, DomainError> {
        self.tokens.refresh_token(refresh_token).await
    }

    /// Closes the user's session
    ///
    /// Revokes the live refresh token and blacklists the presented
    /// access token for its remaining lifetime, so it stops working
    /// immediately rather than at natural expiry.
    pub async fn logout(&self, user_id: i64, access_token: &str) -> Result<(), DomainError> {
        self.tokens.revoke_token(user_id).await?;
        self.tokens.blacklist_token(access_token).await?;
        info!(user_id, "user logged out");
        Ok(())
    }

    /// Looks up the account behind an authenticated session
    pub async fn current_user(&self, user_id: i64) -> Result<User, DomainError> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AuthError::UserNotFound.into())
    }
}
