//! # Infrastructure Layer
//!
//! Concrete implementations of the core crate's abstractions:
//! - **Cache**: in-memory and Redis session-state backends plus the
//!   factory selecting between them
//! - **Database**: PostgreSQL user repository using SQLx

pub mod cache;
pub mod database;

use thiserror::Error;

/// Errors raised while constructing infrastructure services
#[derive(Error, Debug)]
pub enum InfraError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("cache connection failed")]
    Cache(#[from] redis::RedisError),

    #[error("database error")]
    Database(#[from] sqlx::Error),
}
