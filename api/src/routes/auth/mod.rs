//! Authentication route handlers
//!
//! This module contains all authentication endpoints:
//! - Account registration and credential login
//! - Token refresh (rotation)
//! - Logout (refresh revocation + access blacklisting)
//! - Current-user lookup

pub mod login;
pub mod logout;
pub mod me;
pub mod refresh;
pub mod register;

use std::sync::Arc;

use actix_web::{web, Scope};

use sca_core::repositories::UserRepository;
use sca_core::services::auth::AuthService;
use sca_core::services::cache::CacheService;

use crate::middleware::auth::{JwtAuth, TokenVerifier};

/// Shared application state injected into every auth handler.
pub struct AppState<U, C>
where
    U: UserRepository,
    C: CacheService,
{
    pub auth_service: AuthService<U, C>,
}

/// Builds the `/auth` scope.
///
/// Register, login, and refresh are public; logout and `/me` sit behind
/// the JWT middleware.
pub fn auth_scope<U, C>(verifier: Arc<dyn TokenVerifier>) -> Scope
where
    U: UserRepository + 'static,
    C: CacheService + 'static,
{
    web::scope("/auth")
        .route("/register", web::post().to(register::register::<U, C>))
        .route("/login", web::post().to(login::login::<U, C>))
        .route("/refresh", web::post().to(refresh::refresh_token::<U, C>))
        .service(
            web::scope("")
                .wrap(JwtAuth::new(verifier))
                .route("/logout", web::post().to(logout::logout::<U, C>))
                .route("/me", web::get().to(me::me::<U, C>)),
        )
}
