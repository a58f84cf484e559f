//! Mapping from domain errors to HTTP responses.
//!
//! Every handler funnels its `DomainError` through [`handle_domain_error`]
//! so that status codes and the JSON error envelope stay uniform across
//! the API.

use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use validator::ValidationErrors;

use sca_core::errors::{AuthError, DomainError, ErrorResponse, TokenError};

/// Converts a domain error into an HTTP response with a stable error code.
pub fn handle_domain_error(error: &DomainError) -> HttpResponse {
    let status = status_for(error);

    if status.is_server_error() {
        log::error!("request failed: {} ({})", error, error.error_code());
    } else {
        log::debug!("request rejected: {} ({})", error, error.error_code());
    }

    HttpResponse::build(status).json(ErrorResponse::from(error))
}

/// Builds a 400 response from validator output.
pub fn validation_error_response(errors: &ValidationErrors) -> HttpResponse {
    let error = DomainError::Validation {
        message: errors.to_string().replace('\n', "; "),
    };
    log::debug!("request rejected: {}", error);
    HttpResponse::BadRequest().json(ErrorResponse::from(&error))
}

fn status_for(error: &DomainError) -> StatusCode {
    match error {
        DomainError::Token(token_error) => match token_error {
            TokenError::InvalidToken
            | TokenError::RefreshNotFound
            | TokenError::RefreshMismatch => StatusCode::UNAUTHORIZED,
            TokenError::SigningError | TokenError::CachePersist(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        },
        DomainError::Auth(auth_error) => match auth_error {
            AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AuthError::UserAlreadyExists | AuthError::EmailAlreadyExists => StatusCode::CONFLICT,
            AuthError::UserNotFound => StatusCode::NOT_FOUND,
        },
        DomainError::Cache(_) => StatusCode::SERVICE_UNAVAILABLE,
        DomainError::Validation { .. } => StatusCode::BAD_REQUEST,
        DomainError::Database { .. } | DomainError::Internal { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}
