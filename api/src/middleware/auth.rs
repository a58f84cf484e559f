//! JWT authentication middleware for protected endpoints.
//!
//! The middleware extracts the bearer token from the Authorization header,
//! rejects tokens that have been blacklisted by logout, verifies the
//! signature and registered claims, and injects an [`AuthContext`] into the
//! request extensions for handlers to pick up.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    error::{ErrorForbidden, ErrorUnauthorized},
    http::header::AUTHORIZATION,
    Error, FromRequest, HttpMessage, HttpRequest, HttpResponse,
};
use async_trait::async_trait;
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};

use sca_core::domain::entities::token::Claims;
use sca_core::domain::entities::user::Role;
use sca_core::errors::DomainError;
use sca_core::services::cache::CacheService;
use sca_core::services::token::TokenService;

/// Narrow view of the token service the middleware needs. Keeping it a
/// trait object lets route construction stay independent of the concrete
/// cache backend behind the service.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    /// Whether the token was blacklisted by a logout.
    async fn is_blacklisted(&self, token: &str) -> bool;

    /// Verifies signature, expiry, and issuer, returning the claims.
    fn validate(&self, token: &str) -> Result<Claims, DomainError>;
}

#[async_trait]
impl<C: CacheService + 'static> TokenVerifier for TokenService<C> {
    async fn is_blacklisted(&self, token: &str) -> bool {
        self.is_token_blacklisted(token).await
    }

    fn validate(&self, token: &str) -> Result<Claims, DomainError> {
        self.validate_token(token)
    }
}

/// Authenticated user context injected into requests.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user_id: i64,
    pub username: String,
    pub role: Role,
    /// The raw bearer token, kept so logout can blacklist it.
    pub token: String,
}

/// JWT authentication middleware factory.
pub struct JwtAuth {
    verifier: Arc<dyn TokenVerifier>,
}

impl JwtAuth {
    pub fn new(verifier: Arc<dyn TokenVerifier>) -> Self {
        Self { verifier }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
            verifier: Arc::clone(&self.verifier),
        }))
    }
}

/// JWT authentication middleware service.
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
    verifier: Arc<dyn TokenVerifier>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let verifier = Arc::clone(&self.verifier);

        Box::pin(async move {
            let token = match extract_bearer_token(&req) {
                Some(token) => token,
                None => {
                    return Ok(unauthorized(
                        req,
                        ErrorUnauthorized("missing or invalid Authorization header"),
                    ));
                }
            };

            // Blacklist check happens before signature validation so a
            // logged-out token is rejected even while still unexpired.
            if verifier.is_blacklisted(&token).await {
                return Ok(unauthorized(req, ErrorUnauthorized("token has been revoked")));
            }

            let claims = match verifier.validate(&token) {
                Ok(claims) => claims,
                Err(_) => {
                    return Ok(unauthorized(
                        req,
                        ErrorUnauthorized("invalid or expired token"),
                    ));
                }
            };

            req.extensions_mut().insert(AuthContext {
                user_id: claims.user_id,
                username: claims.username,
                role: claims.role,
                token,
            });

            service
                .call(req)
                .await
                .map(ServiceResponse::map_into_left_body)
        })
    }
}

/// Turns an auth rejection into the response actix would render for the
/// error, so the middleware resolves instead of erroring the service call.
fn unauthorized<B>(req: ServiceRequest, err: Error) -> ServiceResponse<EitherBody<B>> {
    req.into_response(HttpResponse::from_error(err))
        .map_into_right_body()
}

/// Extracts the bearer token from the Authorization header.
fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|s| s.to_string())
}

/// Gates a handler on the session's role. Admins pass every check.
pub fn require_role(auth: &AuthContext, role: Role) -> Result<(), Error> {
    if auth.role == role || auth.role == Role::Admin {
        Ok(())
    } else {
        Err(ErrorForbidden("insufficient role"))
    }
}

impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| ErrorUnauthorized("authentication required"));

        ready(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context_with_role(role: Role) -> AuthContext {
        AuthContext {
            user_id: 1,
            username: "whiskers".to_string(),
            role,
            token: "token".to_string(),
        }
    }

    #[test]
    fn require_role_admits_matching_role() {
        let auth = context_with_role(Role::Agent);
        assert!(require_role(&auth, Role::Agent).is_ok());
    }

    #[test]
    fn require_role_admits_admin_everywhere() {
        let auth = context_with_role(Role::Admin);
        assert!(require_role(&auth, Role::Agent).is_ok());
        assert!(require_role(&auth, Role::Admin).is_ok());
    }

    #[test]
    fn require_role_rejects_agent_on_admin_checks() {
        let auth = context_with_role(Role::Agent);
        assert!(require_role(&auth, Role::Admin).is_err());
    }
}
