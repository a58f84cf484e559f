use actix_web::{web, HttpResponse};
use validator::Validate;

use sca_core::repositories::UserRepository;
use sca_core::services::cache::CacheService;

use crate::dto::auth::{AuthResponse, RegisterRequest};
use crate::handlers::error::{handle_domain_error, validation_error_response};

use super::AppState;

/// Handler for POST /api/v1/auth/register
///
/// Creates an account and opens a session for it.
///
/// # Request Body
///
/// ```json
/// {
///     "username": "agent007",
///     "email": "bond@sca.example",
///     "password": "secret-password",
///     "role": "agent"
/// }
/// ```
///
/// # Response
///
/// ## Success (201 Created)
/// ```json
/// {
///     "user": { "id": 1, "username": "agent007", "role": "agent", ... },
///     "access_token": "eyJ...",
///     "refresh_token": "eyJ..."
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: payload fails validation
/// - 409 Conflict: username or email already taken
/// - 500 Internal Server Error: token issuance or storage failure
pub async fn register<U, C>(
    state: web::Data<AppState<U, C>>,
    request: web::Json<RegisterRequest>,
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
        .register(
            &request.username,
            &request.email,
            &request.password,
            request.role,
        )
        .await
    {
        Ok(session) => HttpResponse::Created().json(AuthResponse::from_session(&session)),
        Err(error) => handle_domain_error(&error),
    }
}
