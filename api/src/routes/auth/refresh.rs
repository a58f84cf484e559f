use actix_web::{web, HttpResponse};
use validator::Validate;

use sca_core::repositories::UserRepository;
use sca_core::services::cache::CacheService;

use crate::dto::auth::RefreshRequest;
use crate::handlers::error::{handle_domain_error, validation_error_response};

use super::AppState;

/// Handler for POST /api/v1/auth/refresh
///
/// Exchanges a refresh token for a new token pair. The presented token
/// must match the one cached for the user; rotation replaces it, so an
/// older refresh token stops working after a successful exchange.
///
/// # Request Body
///
/// ```json
/// {
///     "refresh_token": "eyJ..."
/// }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "access_token": "eyJ...",
///     "refresh_token": "eyJ..."
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: payload fails validation
/// - 401 Unauthorized: invalid, expired, revoked, or superseded refresh token
/// - 503 Service Unavailable: session store unreachable
pub async fn refresh_token<U, C>(
    state: web::Data<AppState<U, C>>,
    request: web::Json<RefreshRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    C: CacheService + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_error_response(&errors);
    }

    match state.auth_service.refresh(&request.refresh_token).await {
        Ok(tokens) => HttpResponse::Ok().json(tokens),
        Err(error) => handle_domain_error(&error),
    }
}
