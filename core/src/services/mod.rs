//! Business services

pub mod auth;
pub mod cache;
pub mod token;

pub use auth::AuthService;
pub use cache::CacheService;
pub use token::{TokenService, TokenServiceConfig};
