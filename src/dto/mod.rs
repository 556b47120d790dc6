//! Read-only shapes produced by projection queries.

pub mod member;
pub mod member_team;
