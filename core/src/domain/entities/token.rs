//! Token entities for JWT-based session management.

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

use super::user::Role;

/// Claims structure for the JWT payload
///
/// Claims are immutable once signed; any mutation invalidates the
/// signature. `nbf` always equals `iat` in this design.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject user identifier
    pub user_id: i64,

    /// Display name, carried for convenience and not re-validated
    /// against the user store on every request
    pub username: String,

    /// Authorization role, parsed into a closed enum at the boundary
    pub role: Role,

    /// Issued at timestamp (Unix seconds)
    pub iat: i64,

    /// Not before timestamp (Unix seconds)
    pub nbf: i64,

    /// Expiration timestamp (Unix seconds)
    pub exp: i64,

    /// Issuer, fixed to the configured application name
    pub iss: String,
}

impl Claims {
    /// Creates claims expiring `ttl_seconds` from now.
    pub fn new(user_id: i64, username: &str, role: Role, ttl_seconds: i64, issuer: &str) -> Self {
        let now = Utc::now();
        let expiry = now + Duration::seconds(ttl_seconds);

        Self {
            user_id,
            username: username.to_string(),
            role,
            iat: now.timestamp(),
            nbf: now.timestamp(),
            exp: expiry.timestamp(),
            iss: issuer.to_string(),
        }
    }

    /// Seconds remaining until expiry; non-positive once expired.
    pub fn remaining_ttl(&self) -> i64 {
        self.exp - Utc::now().timestamp()
    }

    /// Checks whether the claims have expired
    pub fn is_expired(&self) -> bool {
        self.remaining_ttl() <= 0
    }
}

/// Result of token issuance or refresh: a signed access/refresh pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// Short-lived access token
    pub access_token: String,

    /// Long-lived refresh token, mirrored in the cache as the single
    /// live refresh token for its user
    pub refresh_token: String,
}

impl TokenPair {
    /// Creates a new token pair
    pub fn new(access_token: String, refresh_token: String) -> Self {
        Self {
            access_token,
            refresh_token,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claims_carry_identity_fields() {
        let claims = Claims::new(7, "whiskers", Role::Agent, 900, "spy-cats-api");
        assert_eq!(claims.user_id, 7);
        assert_eq!(claims.username, "whiskers");
        assert_eq!(claims.role, Role::Agent);
        assert_eq!(claims.iss, "spy-cats-api");
        assert_eq!(claims.iat, claims.nbf);
        assert_eq!(claims.exp - claims.iat, 900);
    }

    #[test]
    fn negative_ttl_produces_expired_claims() {
        let claims = Claims::new(1, "ghost", Role::Admin, -10, "spy-cats-api");
        assert!(claims.is_expired());
        assert!(claims.remaining_ttl() <= 0);
    }

    #[test]
    fn claims_round_trip_through_json() {
        let claims = Claims::new(42, "shadow", Role::Admin, 600, "spy-cats-api");
        let json = serde_json::to_string(&claims).unwrap();
        let parsed: Claims = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, claims);
    }
}
