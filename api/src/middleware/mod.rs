//! Actix middleware: JWT authentication and CORS.

pub mod auth;
pub mod cors;

pub use auth::{require_role, AuthContext, JwtAuth, TokenVerifier};
pub use cors::create_cors;
