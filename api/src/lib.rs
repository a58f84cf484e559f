//! HTTP layer for the Spy Cat Agency backend.
//!
//! Exposes the REST surface exposed over actix-web: request/response DTOs,
//! the JWT authentication middleware, and the route handlers that delegate
//! to the core services.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
