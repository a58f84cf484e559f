//! Main token service implementation

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use tracing::{debug, error, warn};

use crate::domain::entities::token::{Claims, TokenPair};
use crate::domain::entities::user::Role;
use crate::errors::{CacheError, DomainError, TokenError};
use crate::services::cache::CacheService;

use super::config::TokenServiceConfig;

/// Cache key for the single live refresh token of a user
fn refresh_key(user_id: i64) -> String {
    format!("refresh_token:{user_id}")
}

/// Cache key marking an individual token as blacklisted
fn blacklist_key(token: &str) -> String {
    format!("blacklist:{token}")
}

/// Service for minting, validating, refreshing, and revoking signed
/// session tokens
///
/// The service holds no mutable state: all per-user session state
/// lives in the cache, so concurrent invocation across request
/// handlers is safe. Concurrent refreshes for the same user race
/// last-writer-wins; the loser fails its mismatch check and must
/// re-authenticate or use the pair the winner received.
pub struct TokenService<C: CacheService> {
    cache: C,
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl<C: CacheService> TokenService<C> {
    /// Creates a new token service
    ///
    /// Signing is pinned to HS256: tokens whose algorithm header
    /// differs are rejected during validation, which defends against
    /// algorithm-confusion attacks.
    pub fn new(cache: C, config: TokenServiceConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.issuer]);
        validation.validate_exp = true;
        validation.validate_nbf = true;
        // No clock-skew allowance: an expired token must fail
        // immediately, otherwise it dodges both validation and the
        // logout blacklist during the grace window.
        validation.leeway = 0;

        Self {
            cache,
            config,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Issues a signed access/refresh token pair for a user
    ///
    /// The refresh token is mirrored in the cache under the per-user
    /// session key with the refresh TTL, overwriting any previous
    /// record. On any failure no partial pair is returned and any
    /// prior session record is left untouched.
    pub async fn generate_token_pair(
        &self,
        user_id: i64,
        username: &str,
        role: Role,
    ) -> Result<TokenPair, DomainError> {
        let access_claims = Claims::new(
            user_id,
            username,
            role,
            self.config.access_token_ttl,
            &self.config.issuer,
        );
        let refresh_claims = Claims::new(
            user_id,
            username,
            role,
            self.config.refresh_token_ttl,
            &self.config.issuer,
        );

        let access_token = self.encode_jwt(&access_claims)?;
        let refresh_token = self.encode_jwt(&refresh_claims)?;

        self.cache
            .set(
                &refresh_key(user_id),
                &refresh_token,
                self.config.refresh_token_ttl,
            )
            .await
            .map_err(|e| {
                error!(user_id, error = %e, "failed to store refresh token");
                DomainError::Token(TokenError::CachePersist(e))
            })?;

        Ok(TokenPair::new(access_token, refresh_token))
    }

    /// Parses a token, verifies its signature and claims, and returns
    /// the embedded claims verbatim
    ///
    /// Signature failure, malformed input, wrong algorithm, bad
    /// issuer, and expiry all surface as [`TokenError::InvalidToken`];
    /// the detail is logged at debug level. The blacklist is not
    /// consulted here; that is the caller's job via
    /// [`TokenService::is_token_blacklisted`].
    pub fn validate_token(&self, token: &str) -> Result<Claims, DomainError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                debug!(error = %e, "token validation failed");
                DomainError::Token(TokenError::InvalidToken)
            })?;

        Ok(token_data.claims)
    }

    /// Exchanges a refresh token for a brand-new pair (rotation)
    ///
    /// The presented token must validate and must byte-equal the
    /// stored live refresh token for its user; a superseded token
    /// fails with [`TokenError::RefreshMismatch`], a revoked or
    /// expired session with [`TokenError::RefreshNotFound`]. Backend
    /// faults fail closed.
    pub async fn refresh_token(&self, refresh_token: &str) -> Result<TokenPair, DomainError> {
        let claims = self.validate_token(refresh_token)?;

        let stored = match self.cache.get(&refresh_key(claims.user_id)).await {
            Ok(stored) => stored,
            Err(CacheError::NotFound) => {
                debug!(user_id = claims.user_id, "no live refresh token for user");
                return Err(DomainError::Token(TokenError::RefreshNotFound));
            }
            Err(e) => return Err(DomainError::Cache(e)),
        };

        if stored != refresh_token {
            warn!(
                user_id = claims.user_id,
                "superseded refresh token presented"
            );
            return Err(DomainError::Token(TokenError::RefreshMismatch));
        }

        self.generate_token_pair(claims.user_id, &claims.username, claims.role)
            .await
    }

    /// Revokes the user's session by deleting the live refresh token
    ///
    /// Idempotent: revoking a user with no session succeeds. Backend
    /// faults fail closed.
    pub async fn revoke_token(&self, user_id: i64) -> Result<(), DomainError> {
        self.cache
            .delete(&refresh_key(user_id))
            .await
            .map_err(DomainError::Cache)
    }

    /// Marks an individual token as invalid before its natural expiry
    ///
    /// The token must validate first: garbage cannot be blacklisted.
    /// The marker's TTL equals the token's remaining lifetime, so the
    /// entry expires together with the token itself; a token already
    /// at or past expiry is a no-op.
    pub async fn blacklist_token(&self, token: &str) -> Result<(), DomainError> {
        let claims = self.validate_token(token)?;

        let remaining = claims.remaining_ttl();
        if remaining <= 0 {
            return Ok(());
        }

        self.cache
            .set(&blacklist_key(token), "1", remaining)
            .await
            .map_err(|e| {
                error!(user_id = claims.user_id, error = %e, "failed to blacklist token");
                DomainError::Token(TokenError::CachePersist(e))
            })
    }

    /// Checks whether a token has been blacklisted
    ///
    /// Fails open: a backend error reads as "not blacklisted" so that
    /// losing the cache does not lock out every legitimate session.
    pub async fn is_token_blacklisted(&self, token: &str) -> bool {
        match self.cache.exists(&blacklist_key(token)).await {
            Ok(found) => found,
            Err(e) => {
                warn!(error = %e, "blacklist check failed, failing open");
                false
            }
        }
    }

    /// Encodes claims into a signed JWT
    fn encode_jwt(&self, claims: &Claims) -> Result<String, DomainError> {
        let header = Header::new(Algorithm::HS256);
        encode(&header, claims, &self.encoding_key).map_err(|e| {
            error!(error = %e, "jwt signing failed");
            DomainError::Token(TokenError::SigningError)
        })
    }
}
