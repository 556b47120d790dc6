//! Column projections over `members` that skip entity loading.

use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::dto::member::{MemberDto, UserDto};
use crate::models::projection::{
    MemberDtoByName, MemberDtoRecord, MemberDtoSelection, UserDtoByName,
};
use crate::repository::errors::RepositoryResult;
use crate::repository::{DieselRepository, MemberProjectionReader};
use crate::schema::members;

/// How rows are turned into [`MemberDto`]s. All styles yield the same values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProjectionStyle {
    /// Start from `MemberDto::default()` and call a setter per column.
    Setter,
    /// Build the struct literal from a `(username, age)` tuple.
    Field,
    /// Positional `Queryable` record converted through `MemberDto::new`.
    Constructor,
    /// `Selectable` record; the select clause comes from the struct itself.
    Selectable,
}

/// Every username, in id order.
pub fn list_usernames(conn: &mut SqliteConnection) -> RepositoryResult<Vec<Option<String>>> {
    let usernames = members::table
        .select(members::username)
        .order(members::id.asc())
        .load::<Option<String>>(conn)?;
    Ok(usernames)
}

/// `(username, age)` tuples, in id order.
pub fn list_username_ages(
    conn: &mut SqliteConnection,
) -> RepositoryResult<Vec<(Option<String>, i32)>> {
    let rows = members::table
        .select((members::username, members::age))
        .order(members::id.asc())
        .load::<(Option<String>, i32)>(conn)?;
    Ok(rows)
}

pub fn list_member_dtos(
    conn: &mut SqliteConnection,
    style: ProjectionStyle,
) -> RepositoryResult<Vec<MemberDto>> {
    let ordered = members::table.order(members::id.asc());

    let dtos = match style {
        ProjectionStyle::Setter => ordered
            .select((members::username, members::age))
            .load::<(Option<String>, i32)>(conn)?
            .into_iter()
            .map(|(username, age)| {
                let mut dto = MemberDto::default();
                dto.set_username(username);
                dto.set_age(age);
                dto
            })
            .collect(),
        ProjectionStyle::Field => ordered
            .select((members::username, members::age))
            .load::<(Option<String>, i32)>(conn)?
            .into_iter()
            .map(|(username, age)| MemberDto { username, age })
            .collect(),
        ProjectionStyle::Constructor => ordered
            .select((members::username, members::age))
            .load::<MemberDtoRecord>(conn)?
            .into_iter()
            .map(MemberDto::from)
            .collect(),
        ProjectionStyle::Selectable => ordered
            .select(MemberDtoSelection::as_select())
            .load::<MemberDtoSelection>(conn)?
            .into_iter()
            .map(MemberDto::from)
            .collect(),
    };

    Ok(dtos)
}

/// [`MemberDto`]s from a raw SQL string, matched by column name at runtime.
pub fn list_member_dtos_raw(conn: &mut SqliteConnection) -> RepositoryResult<Vec<MemberDto>> {
    let rows = diesel::sql_query("SELECT username, age FROM members ORDER BY id")
        .load::<MemberDtoByName>(conn)?;
    Ok(rows.into_iter().map(MemberDto::from).collect())
}

/// One [`UserDto`] per member: the username as `name` and, as `age`, the
/// oldest age across all members taken from a scalar subquery over an alias
/// of `members`.
pub fn list_user_dtos(conn: &mut SqliteConnection) -> RepositoryResult<Vec<UserDto>> {
    let sub_members = diesel::alias!(members as sub_members);
    let max_age = sub_members
        .select(diesel::dsl::max(sub_members.field(members::age)))
        .single_value();

    let rows = members::table
        .select((members::username, max_age))
        .order(members::id.asc())
        .load::<(Option<String>, Option<i32>)>(conn)?;

    // `MAX` is only NULL over an empty table, and then there are no rows.
    Ok(rows
        .into_iter()
        .map(|(name, age)| UserDto {
            name,
            age: age.unwrap_or_default(),
        })
        .collect())
}

/// [`list_user_dtos`] as a raw SQL string, with the column alias written out
/// and the result matched by name at runtime.
pub fn list_user_dtos_raw(conn: &mut SqliteConnection) -> RepositoryResult<Vec<UserDto>> {
    let rows = diesel::sql_query(
        "SELECT m.username AS name, \
         (SELECT MAX(sub.age) FROM members sub) AS age \
         FROM members m ORDER BY m.id",
    )
    .load::<UserDtoByName>(conn)?;
    Ok(rows.into_iter().map(UserDto::from).collect())
}

impl MemberProjectionReader for DieselRepository {
    fn list_usernames(&self) -> RepositoryResult<Vec<Option<String>>> {
        let mut conn = self.conn()?;
        list_usernames(&mut conn)
    }

    fn list_username_ages(&self) -> RepositoryResult<Vec<(Option<String>, i32)>> {
        let mut conn = self.conn()?;
        list_username_ages(&mut conn)
    }

    fn list_member_dtos(&self, style: ProjectionStyle) -> RepositoryResult<Vec<MemberDto>> {
        let mut conn = self.conn()?;
        list_member_dtos(&mut conn, style)
    }

    fn list_member_dtos_raw(&self) -> RepositoryResult<Vec<MemberDto>> {
        let mut conn = self.conn()?;
        list_member_dtos_raw(&mut conn)
    }

    fn list_user_dtos(&self) -> RepositoryResult<Vec<UserDto>> {
        let mut conn = self.conn()?;
        list_user_dtos(&mut conn)
    }

    fn list_user_dtos_raw(&self) -> RepositoryResult<Vec<UserDto>> {
        let mut conn = self.conn()?;
        list_user_dtos_raw(&mut conn)
    }
}
