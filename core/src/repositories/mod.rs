//! Repository interfaces and test doubles
//!
//! Concrete database-backed implementations live in the
//! infrastructure crate; the mocks here are lock-guarded maps used
//! by unit and handler tests.

pub mod user;

pub use user::{MockUserRepository, UserRepository};
