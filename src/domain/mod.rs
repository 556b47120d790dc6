//! Domain entities and search inputs shared by the repository layer.

pub mod member;
pub mod search;
pub mod team;
pub mod types;
