//! DTOs for the authentication endpoints.

use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};
use validator::Validate;

use sca_core::domain::entities::user::{Role, User};
use sca_core::services::auth::AuthSession;

/// Request body for `POST /auth/register`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Desired username, unique across the agency.
    #[validate(length(min = 3, max = 50, message = "username must be 3-50 characters"))]
    pub username: String,

    /// Contact email, unique across the agency.
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,

    /// Plain-text password, hashed before storage.
    #[validate(length(min = 6, message = "password must be at least 6 characters"))]
    pub password: String,

    /// Optional role; new accounts default to `agent`.
    pub role: Option<Role>,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,

    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

/// Request body for `POST /auth/refresh`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RefreshRequest {
    #[validate(length(min = 1, message = "refresh_token is required"))]
    pub refresh_token: String,
}

/// Public view of a user account. Never carries the password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub role: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            role: user.role.to_string(),
            created_at: user.created_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            updated_at: user.updated_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }
}

/// Response body for register and login: the account plus a fresh token pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub user: UserResponse,
    pub access_token: String,
    pub refresh_token: String,
}

impl AuthResponse {
    pub fn from_session(session: &AuthSession) -> Self {
        Self {
            user: UserResponse::from(&session.user),
            access_token: session.tokens.access_token.clone(),
            refresh_token: session.tokens.refresh_token.clone(),
        }
    }
}

/// Response body for `POST /auth/logout`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoutResponse {
    pub message: String,
}

impl LogoutResponse {
    pub fn new() -> Self {
        Self {
            message: "logged out".to_string(),
        }
    }
}

impl Default for LogoutResponse {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_request_validates_field_lengths() {
        let request = RegisterRequest {
            username: "ab".to_string(),
            email: "not-an-email".to_string(),
            password: "short".to_string(),
            role: None,
        };

        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("username"));
        assert!(errors.field_errors().contains_key("email"));
        assert!(errors.field_errors().contains_key("password"));
    }

    #[test]
    fn register_request_accepts_valid_payload() {
        let request = RegisterRequest {
            username: "agent007".to_string(),
            email: "bond@sca.example".to_string(),
            password: "shaken-not-stirred".to_string(),
            role: Some(Role::Agent),
        };

        assert!(request.validate().is_ok());
    }

    #[test]
    fn user_response_formats_timestamps_as_rfc3339() {
        let user = User {
            id: 7,
            username: "whiskers".to_string(),
            email: "whiskers@sca.example".to_string(),
            password_hash: "$2b$12$abcdefghijklmnopqrstuv".to_string(),
            role: Role::Admin,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };

        let response = UserResponse::from(&user);
        assert_eq!(response.role, "admin");
        assert!(response.created_at.ends_with('Z'));
    }
}
