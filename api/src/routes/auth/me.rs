use actix_web::{web, HttpResponse};

use sca_core::repositories::UserRepository;
use sca_core::services::cache::CacheService;

use crate::dto::auth::UserResponse;
use crate::handlers::error::handle_domain_error;
use crate::middleware::auth::AuthContext;

use super::AppState;

/// Handler for GET /api/v1/auth/me
///
/// Returns the account behind the presented access token.
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "id": 1,
///     "username": "agent007",
///     "email": "bond@sca.example",
///     "role": "agent",
///     "created_at": "2026-08-30T12:00:00Z",
///     "updated_at": "2026-08-30T12:00:00Z"
/// }
/// ```
///
/// ## Errors
/// - 401 Unauthorized: missing, invalid, or blacklisted token
/// - 404 Not Found: account deleted after the token was issued
pub async fn me<U, C>(state: web::Data<AppState<U, C>>, auth: AuthContext) -> HttpResponse
where
    U: UserRepository + 'static,
    C: CacheService + 'static,
{
    match state.auth_service.current_user(auth.user_id).await {
        Ok(user) => HttpResponse::Ok().json(UserResponse::from(&user)),
        Err(error) => handle_domain_error(&error),
    }
}
