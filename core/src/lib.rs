//! # Spy Cat Agency Core
//!
//! Core business logic and domain layer for the agency backend.
//! This crate contains domain entities, the session token service,
//! the cache abstraction it depends on, repository interfaces, and
//! the error types shared across the application architecture.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;
