//! Token service configuration

use sca_shared::config::JwtConfig;

/// Configuration for the token service
///
/// Loaded once at construction and read-only afterwards; the signing
/// secret is immutable process-wide state.
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// Symmetric secret for HS256 signing and verification
    pub secret: String,

    /// Access token lifetime in seconds
    pub access_token_ttl: i64,

    /// Refresh token lifetime in seconds, also the TTL of the cached
    /// per-user session record
    pub refresh_token_ttl: i64,

    /// Issuer claim, the configured application name
    pub issuer: String,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            secret: String::from("change-me-in-production"),
            access_token_ttl: 900,
            refresh_token_ttl: 604800,
            issuer: String::from("spy-cats-api"),
        }
    }
}

impl TokenServiceConfig {
    /// Build the token service configuration from the application's
    /// JWT settings and name.
    pub fn from_jwt(jwt: &JwtConfig, app_name: &str) -> Self {
        Self {
            secret: jwt.secret.clone(),
            access_token_ttl: jwt.access_token_ttl,
            refresh_token_ttl: jwt.refresh_token_ttl,
            issuer: app_name.to_string(),
        }
    }
}
