//! Route registration for the API.

pub mod auth;
pub mod health;

pub use auth::AppState;
