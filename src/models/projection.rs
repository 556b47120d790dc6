//! Row shapes for projection queries.
//!
//! Each struct maps a select clause onto a DTO without loading entities.
//! They differ in when a mismatch between the query and the struct is
//! caught:
//!
//! * [`MemberTeamRow`] and [`MemberDtoSelection`] derive `Selectable` with
//!   `check_for_backend`, so the select clause is generated from the struct
//!   and every field type is checked against the schema at compile time.
//! * [`MemberDtoRecord`] derives only `Queryable`: fields are filled by
//!   position from whatever tuple the query selects. A type mismatch fails
//!   to compile, but the caller owns the column order.
//! * [`MemberDtoByName`] and [`UserDtoByName`] derive `QueryableByName` and
//!   are meant for raw SQL. Columns are matched by name when the row is
//!   read, so a missing or mistyped column is a runtime deserialization
//!   error.

use diesel::prelude::*;
use diesel::sql_types::{Integer, Nullable, Text};

use crate::dto::member::{MemberDto, UserDto};
use crate::dto::member_team::MemberTeamView;
use crate::schema::{members, teams};

/// Select clause of the member ⟕ team view.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = members)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct MemberTeamRow {
    #[diesel(select_expression = members::id)]
    #[diesel(select_expression_type = members::id)]
    pub member_id: i32,
    pub username: Option<String>,
    pub age: i32,
    #[diesel(select_expression = teams::id.nullable())]
    #[diesel(select_expression_type = diesel::dsl::Nullable<teams::id>)]
    pub team_id: Option<i32>,
    #[diesel(select_expression = teams::name.nullable())]
    #[diesel(select_expression_type = diesel::dsl::Nullable<teams::name>)]
    pub team_name: Option<String>,
}

impl From<MemberTeamRow> for MemberTeamView {
    fn from(row: MemberTeamRow) -> Self {
        Self {
            member_id: row.member_id,
            username: row.username,
            age: row.age,
            team_id: row.team_id,
            team_name: row.team_name,
        }
    }
}

/// Positional `(username, age)` record.
#[derive(Debug, Clone, Queryable)]
pub struct MemberDtoRecord {
    pub username: Option<String>,
    pub age: i32,
}

impl From<MemberDtoRecord> for MemberDto {
    fn from(record: MemberDtoRecord) -> Self {
        MemberDto::new(record.username, record.age)
    }
}

/// `(username, age)` with the select clause derived from the struct.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = members)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct MemberDtoSelection {
    pub username: Option<String>,
    pub age: i32,
}

impl From<MemberDtoSelection> for MemberDto {
    fn from(selection: MemberDtoSelection) -> Self {
        MemberDto::new(selection.username, selection.age)
    }
}

/// `(username, age)` read by column name from raw SQL.
#[derive(Debug, Clone, QueryableByName)]
pub struct MemberDtoByName {
    #[diesel(sql_type = Nullable<Text>)]
    pub username: Option<String>,
    #[diesel(sql_type = Integer)]
    pub age: i32,
}

impl From<MemberDtoByName> for MemberDto {
    fn from(row: MemberDtoByName) -> Self {
        MemberDto::new(row.username, row.age)
    }
}

/// `(name, age)` read by column name; the query must alias its columns.
#[derive(Debug, Clone, QueryableByName)]
pub struct UserDtoByName {
    #[diesel(sql_type = Nullable<Text>)]
    pub name: Option<String>,
    #[diesel(sql_type = Integer)]
    pub age: i32,
}

impl From<UserDtoByName> for UserDto {
    fn from(row: UserDtoByName) -> Self {
        UserDto {
            name: row.name,
            age: row.age,
        }
    }
}
