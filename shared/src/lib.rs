//! # Spy Cat Agency Shared
//!
//! Configuration types shared across the agency backend crates.
//! This crate is deliberately free of business logic: it only holds
//! plain data structures loaded once at startup and treated as
//! read-only afterwards.

pub mod config;

pub use config::AppConfig;
