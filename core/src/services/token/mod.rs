//! Token service module for the JWT session lifecycle
//!
//! This module handles all token-related operations:
//! - access/refresh token pair issuance
//! - signature and claims validation
//! - refresh rotation against the cached per-user session record
//! - revocation and per-token blacklisting

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::TokenServiceConfig;
pub use service::TokenService;
