//! Error types for the agency backend
//!
//! Errors are typed so callers can branch on kind instead of matching
//! strings: `RefreshNotFound` is recoverable by re-login while
//! `SigningError` is a hard internal fault.

mod domain_error;

pub use domain_error::{
    AuthError, CacheError, DomainError, ErrorResponse, TokenError,
};
