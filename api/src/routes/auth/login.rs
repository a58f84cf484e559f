use actix_web::{web, HttpResponse};
use validator::Validate;

use sca_core::repositories::UserRepository;
use sca_core::services::cache::CacheService;

use crate::dto::auth::{AuthResponse, LoginRequest};
use crate::handlers::error::{handle_domain_error, validation_error_response};

use super::AppState;

/// Handler for POST /api/v1/auth/login
///
/// Verifies credentials and opens a session.
///
/// # Request Body
///
/// ```json
/// {
///     "username": "agent007",
///     "password": "secret-password"
/// }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "user": { "id": 1, "username": "agent007", ... },
///     "access_token": "eyJ...",
///     "refresh_token": "eyJ..."
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: payload fails validation
/// - 401 Unauthorized: unknown username or wrong password (indistinguishable)
/// - 500 Internal Server Error: token issuance or storage failure
pub async fn login<U, C>(
    state: web::Data<AppState<U, C>>,
    request: web::Json<LoginRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    C: CacheService + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_error_response(&errors);
    }

    match state
        .auth_service
        .login(&request.username, &request.password)
        .await
    {
        Ok(session) => HttpResponse::Ok().json(AuthResponse::from_session(&session)),
        Err(error) => handle_domain_error(&error),
    }
}
