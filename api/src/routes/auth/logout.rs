use actix_web::{web, HttpResponse};

use sca_core::repositories::UserRepository;
use sca_core::services::cache::CacheService;

use crate::dto::auth::LogoutResponse;
use crate::handlers::error::handle_domain_error;
use crate::middleware::auth::AuthContext;

use super::AppState;

/// Handler for POST /api/v1/auth/logout
///
/// Ends the authenticated session: the cached refresh token is deleted
/// and the presented access token is blacklisted for its remaining
/// lifetime.
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "message": "logged out"
/// }
/// ```
///
/// ## Errors
/// - 401 Unauthorized: missing, invalid, or already blacklisted token
/// - 503 Service Unavailable: session store unreachable
pub async fn logout<U, C>(state: web::Data<AppState<U, C>>, auth: AuthContext) -> HttpResponse
where
    U: UserRepository + 'static,
    C: CacheService + 'static,
{
    match state.auth_service.logout(auth.user_id, &auth.token).await {
        Ok(()) => HttpResponse::Ok().json(LogoutResponse::new()),
        Err(error) => handle_domain_error(&error),
    }
}
