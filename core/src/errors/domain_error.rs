//! Domain-specific error types for sessions, caching, and authentication.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Cache-layer errors
///
/// `NotFound` is a normal, expected outcome for readers (for example
/// "no live refresh token for this user") and must not be treated as
/// a fault by callers.
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("key not found")]
    NotFound,

    #[error("cache backend unavailable: {message}")]
    BackendUnavailable { message: String },

    #[error("cache serialization failed")]
    Serialization(#[from] serde_json::Error),
}

impl CacheError {
    /// Stable code for API responses and logs
    pub fn error_code(&self) -> &'static str {
        match self {
            CacheError::NotFound => "CACHE_KEY_NOT_FOUND",
            CacheError::BackendUnavailable { .. } => "CACHE_BACKEND_UNAVAILABLE",
            CacheError::Serialization(_) => "CACHE_SERIALIZATION_FAILED",
        }
    }
}

/// Token-lifecycle errors
#[derive(Error, Debug)]
pub enum TokenError {
    /// Signature failure, malformed input, wrong algorithm, or expiry.
    /// The caller recovers by re-authenticating; the distinction is
    /// logged but not exposed.
    #[error("invalid token")]
    InvalidToken,

    /// No live refresh token stored for the user; the session was
    /// revoked or expired out of the cache
    #[error("refresh token not found")]
    RefreshNotFound,

    /// The presented refresh token is not the stored live one; it was
    /// superseded by a rotation
    #[error("refresh token mismatch")]
    RefreshMismatch,

    /// Internal fault while signing a token
    #[error("token signing failed")]
    SigningError,

    /// The session-state write failed during issuance; no partial
    /// token pair is returned
    #[error("failed to persist session state")]
    CachePersist(#[source] CacheError),
}

impl TokenError {
    /// Stable code for API responses and logs
    pub fn error_code(&self) -> &'static str {
        match self {
            TokenError::InvalidToken => "INVALID_TOKEN",
            TokenError::RefreshNotFound => "REFRESH_TOKEN_NOT_FOUND",
            TokenError::RefreshMismatch => "REFRESH_TOKEN_MISMATCH",
            TokenError::SigningError => "TOKEN_SIGNING_FAILED",
            TokenError::CachePersist(_) => "SESSION_PERSIST_FAILED",
        }
    }
}

/// Authentication errors
#[derive(Error, Debug)]
pub enum AuthError {
    /// Unknown username and wrong password are deliberately
    /// indistinguishable
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("username already taken")]
    UserAlreadyExists,

    #[error("email already registered")]
    EmailAlreadyExists,

    #[error("user not found")]
    UserNotFound,
}

impl AuthError {
    /// Stable code for API responses and logs
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials => "INVALID_CREDENTIALS",
            AuthError::UserAlreadyExists => "USER_ALREADY_EXISTS",
            AuthError::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            AuthError::UserNotFound => "USER_NOT_FOUND",
        }
    }
}

/// Umbrella error for the domain layer
#[derive(Error, Debug)]
pub enum DomainError {
    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("validation failed: {message}")]
    Validation { message: String },

    #[error("database error: {message}")]
    Database { message: String },

    #[error("internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    /// Stable code for API responses and logs
    pub fn error_code(&self) -> &'static str {
        match self {
            DomainError::Token(e) => e.error_code(),
            DomainError::Cache(e) => e.error_code(),
            DomainError::Auth(e) => e.error_code(),
            DomainError::Validation { .. } => "VALIDATION_FAILED",
            DomainError::Database { .. } => "DATABASE_ERROR",
            DomainError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

/// Unified error body for API responses
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Timestamp when the error occurred
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(error: impl ToString, message: impl ToString) -> Self {
        Self {
            error: error.to_string(),
            message: message.to_string(),
            timestamp: Utc::now(),
        }
    }
}

impl From<&DomainError> for ErrorResponse {
    fn from(err: &DomainError) -> Self {
        ErrorResponse::new(err.error_code(), err)
    }
}
