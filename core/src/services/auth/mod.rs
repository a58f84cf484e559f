//! Authentication service module
//!
//! Handles account registration, credential login, session refresh,
//! and logout on top of the token service and user repository.

mod service;


pub use service::{AuthService, AuthSession};
