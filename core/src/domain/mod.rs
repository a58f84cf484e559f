//! Domain layer containing entities and value objects

pub mod entities;
