//! Database models for the member/team schema.

pub mod config;
pub mod member;
pub mod projection;
pub mod team;
