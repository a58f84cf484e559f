//! Database implementations using SQLx and PostgreSQL

mod postgres;

pub use postgres::{connect_pool, ensure_schema, PgUserRepository};
