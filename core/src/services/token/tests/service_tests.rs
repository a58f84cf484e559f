//! Tests for the token service lifecycle

use async_trait::async_trait;
use std::time::Duration;

use crate::domain::entities::user::Role;
use crate::errors::{CacheError, DomainError, TokenError};
use crate::services::cache::{CacheService, MockCacheService};
use crate::services::token::{TokenService, TokenServiceConfig};

fn test_config() -> TokenServiceConfig {
    TokenServiceConfig {
        secret: "test-secret-key-for-session-tokens".to_string(),
        access_token_ttl: 900,
        refresh_token_ttl: 604800,
        issuer: "spy-cats-api".to_string(),
    }
}

fn test_service() -> TokenService<MockCacheService> {
    TokenService::new(MockCacheService::new(), test_config())
}

/// Cache double simulating a backend outage
struct FailingCache;

#[async_trait]
impl CacheService for FailingCache {
    async fn set(&self, _: &str, _: &str, _: i64) -> Result<(), CacheError> {
        Err(CacheError::BackendUnavailable {
            message: "connection refused".to_string(),
        })
    }

    async fn get(&self, _: &str) -> Result<String, CacheError> {
        Err(CacheError::BackendUnavailable {
            message: "connection refused".to_string(),
        })
    }

    async fn delete(&self, _: &str) -> Result<(), CacheError> {
        Err(CacheError::BackendUnavailable {
            message: "connection refused".to_string(),
        })
    }

    async fn exists(&self, _: &str) -> Result<bool, CacheError> {
        Err(CacheError::BackendUnavailable {
            message: "connection refused".to_string(),
        })
    }

    async fn ping(&self) -> Result<(), CacheError> {
        Err(CacheError::BackendUnavailable {
            message: "connection refused".to_string(),
        })
    }

    async fn close(&self) -> Result<(), CacheError> {
        Ok(())
    }
}

#[tokio::test]
async fn round_trip_preserves_identity_claims() {
    let service = test_service();
    let pair = service
        .generate_token_pair(1, "alice", Role::Admin)
        .await
        .unwrap();

    let claims = service.validate_token(&pair.access_token).unwrap();
    assert_eq!(claims.user_id, 1);
    assert_eq!(claims.username, "alice");
    assert_eq!(claims.role, Role::Admin);
    assert_eq!(claims.iss, "spy-cats-api");

    let refresh_claims = service.validate_token(&pair.refresh_token).unwrap();
    assert_eq!(refresh_claims.user_id, 1);
    assert_eq!(refresh_claims.role, Role::Admin);
}

#[tokio::test]
async fn expired_token_is_rejected() {
    let config = TokenServiceConfig {
        access_token_ttl: -30,
        ..test_config()
    };
    let service = TokenService::new(MockCacheService::new(), config);

    let pair = service
        .generate_token_pair(2, "bob", Role::Agent)
        .await
        .unwrap();

    let err = service.validate_token(&pair.access_token).unwrap_err();
    assert!(matches!(err, DomainError::Token(TokenError::InvalidToken)));
}

#[tokio::test]
async fn expiry_gets_no_clock_skew_grace() {
    // Even a token that expired a single second ago must fail.
    let config = TokenServiceConfig {
        access_token_ttl: -1,
        ..test_config()
    };
    let service = TokenService::new(MockCacheService::new(), config);

    let pair = service
        .generate_token_pair(2, "bob", Role::Agent)
        .await
        .unwrap();

    let err = service.validate_token(&pair.access_token).unwrap_err();
    assert!(matches!(err, DomainError::Token(TokenError::InvalidToken)));
}

#[tokio::test]
async fn tampered_signature_is_rejected() {
    let service = test_service();
    let pair = service
        .generate_token_pair(3, "carol", Role::Agent)
        .await
        .unwrap();

    // Flip the first character of the signature segment; the final
    // character only carries base64 padding bits.
    let dot = pair.access_token.rfind('.').unwrap();
    let mut tampered: Vec<char> = pair.access_token.chars().collect();
    tampered[dot + 1] = if tampered[dot + 1] == 'A' { 'B' } else { 'A' };
    let tampered: String = tampered.into_iter().collect();

    assert!(service.validate_token(&pair.access_token).is_ok());
    let err = service.validate_token(&tampered).unwrap_err();
    assert!(matches!(err, DomainError::Token(TokenError::InvalidToken)));
}

#[tokio::test]
async fn structurally_malformed_token_is_rejected() {
    let service = test_service();
    for garbage in ["", "not-a-token", "a.b", "a.b.c.d"] {
        let err = service.validate_token(garbage).unwrap_err();
        assert!(matches!(err, DomainError::Token(TokenError::InvalidToken)));
    }
}

#[tokio::test]
async fn foreign_algorithm_header_is_rejected() {
    use jsonwebtoken::{encode, EncodingKey, Header};

    let service = test_service();
    let claims = crate::domain::entities::token::Claims::new(
        4,
        "mallory",
        Role::Agent,
        900,
        "spy-cats-api",
    );

    // Same secret, different HMAC variant in the header.
    let token = encode(
        &Header::new(jsonwebtoken::Algorithm::HS384),
        &claims,
        &EncodingKey::from_secret("test-secret-key-for-session-tokens".as_bytes()),
    )
    .unwrap();

    let err = service.validate_token(&token).unwrap_err();
    assert!(matches!(err, DomainError::Token(TokenError::InvalidToken)));
}

#[tokio::test]
async fn cross_secret_isolation() {
    let service_a = test_service();
    let service_b = TokenService::new(
        MockCacheService::new(),
        TokenServiceConfig {
            secret: "a-completely-different-secret".to_string(),
            ..test_config()
        },
    );

    let pair = service_a
        .generate_token_pair(5, "dave", Role::Agent)
        .await
        .unwrap();

    let err = service_b.validate_token(&pair.access_token).unwrap_err();
    assert!(matches!(err, DomainError::Token(TokenError::InvalidToken)));
}

#[tokio::test]
async fn issuer_mismatch_is_rejected() {
    let service_a = test_service();
    let service_b = TokenService::new(
        MockCacheService::new(),
        TokenServiceConfig {
            issuer: "another-agency".to_string(),
            ..test_config()
        },
    );

    let pair = service_a
        .generate_token_pair(6, "erin", Role::Agent)
        .await
        .unwrap();

    let err = service_b.validate_token(&pair.access_token).unwrap_err();
    assert!(matches!(err, DomainError::Token(TokenError::InvalidToken)));
}

#[tokio::test]
async fn refresh_rotates_and_supersedes_the_old_token() {
    let service = test_service();
    let original = service
        .generate_token_pair(7, "frank", Role::Agent)
        .await
        .unwrap();

    // Claims carry second-resolution timestamps; wait so the rotated
    // token signs differently from the original.
    tokio::time::sleep(Duration::from_millis(1100)).await;

    let rotated = service.refresh_token(&original.refresh_token).await.unwrap();
    assert_ne!(rotated.refresh_token, original.refresh_token);

    // The old refresh token is superseded, not blacklisted: it still
    // parses as valid but no longer matches the stored live token.
    assert!(service.validate_token(&original.refresh_token).is_ok());
    let err = service
        .refresh_token(&original.refresh_token)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Token(TokenError::RefreshMismatch)
    ));

    // The rotated token is the live one.
    assert!(service.refresh_token(&rotated.refresh_token).await.is_ok());
}

#[tokio::test]
async fn refresh_after_revocation_reports_not_found() {
    let service = test_service();
    let pair = service
        .generate_token_pair(8, "grace", Role::Admin)
        .await
        .unwrap();

    service.revoke_token(8).await.unwrap();

    let err = service.refresh_token(&pair.refresh_token).await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::Token(TokenError::RefreshNotFound)
    ));
}

#[tokio::test]
async fn revoking_an_absent_session_is_idempotent() {
    let service = test_service();
    service.revoke_token(999).await.unwrap();
    service.revoke_token(999).await.unwrap();
}

#[tokio::test]
async fn refresh_with_garbage_input_is_invalid() {
    let service = test_service();
    let err = service.refresh_token("invalid.refresh.token").await.unwrap_err();
    assert!(matches!(err, DomainError::Token(TokenError::InvalidToken)));
}

#[tokio::test]
async fn blacklist_flow() {
    let service = test_service();
    let pair = service
        .generate_token_pair(9, "heidi", Role::Agent)
        .await
        .unwrap();

    assert!(!service.is_token_blacklisted(&pair.access_token).await);

    service.blacklist_token(&pair.access_token).await.unwrap();
    assert!(service.is_token_blacklisted(&pair.access_token).await);

    // Still structurally valid and unexpired: rejection is the
    // middleware's job via the blacklist check.
    assert!(service.validate_token(&pair.access_token).is_ok());
}

#[tokio::test]
async fn blacklisting_garbage_fails() {
    let service = test_service();
    let err = service.blacklist_token("garbage-token").await.unwrap_err();
    assert!(matches!(err, DomainError::Token(TokenError::InvalidToken)));
}

#[tokio::test]
async fn blacklist_check_fails_open_on_backend_outage() {
    let healthy = test_service();
    let pair = healthy
        .generate_token_pair(10, "ivan", Role::Agent)
        .await
        .unwrap();

    let degraded = TokenService::new(FailingCache, test_config());
    assert!(!degraded.is_token_blacklisted(&pair.access_token).await);
}

#[tokio::test]
async fn issuance_fails_closed_on_backend_outage() {
    let service = TokenService::new(FailingCache, test_config());
    let err = service
        .generate_token_pair(11, "judy", Role::Agent)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Token(TokenError::CachePersist(_))
    ));
}

#[tokio::test]
async fn refresh_fails_closed_on_backend_outage() {
    let healthy = test_service();
    let pair = healthy
        .generate_token_pair(12, "karl", Role::Agent)
        .await
        .unwrap();

    let degraded = TokenService::new(FailingCache, test_config());
    let err = degraded.refresh_token(&pair.refresh_token).await.unwrap_err();
    assert!(matches!(err, DomainError::Cache(_)));
}

#[tokio::test]
async fn revoke_fails_closed_on_backend_outage() {
    let service = TokenService::new(FailingCache, test_config());
    let err = service.revoke_token(13).await.unwrap_err();
    assert!(matches!(err, DomainError::Cache(_)));
}
