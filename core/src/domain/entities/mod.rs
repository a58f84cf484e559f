//! Domain entities

pub mod token;
pub mod user;

pub use token::{Claims, TokenPair};
pub use user::{NewUser, Role, User};
