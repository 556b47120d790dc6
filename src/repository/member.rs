//! Entity lookups and writes for members.

use diesel::prelude::*;
use diesel::sql_types::Text;
use diesel::sqlite::SqliteConnection;

use crate::domain::member::{Member, NewMember};
use crate::domain::types::MemberId;
use crate::models::member::{Member as DbMember, NewMember as DbNewMember};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, MemberReader, MemberWriter};
use crate::schema::members;

fn into_domain(rows: Vec<DbMember>) -> RepositoryResult<Vec<Member>> {
    rows.into_iter()
        .map(|row| Member::try_from(row).map_err(RepositoryError::from))
        .collect()
}

pub fn create(conn: &mut SqliteConnection, new_member: &NewMember) -> RepositoryResult<Member> {
    let db_new_member: DbNewMember = new_member.into();

    let db_member = diesel::insert_into(members::table)
        .values(&db_new_member)
        .returning(DbMember::as_returning())
        .get_result::<DbMember>(conn)?;

    Ok(Member::try_from(db_member)?)
}

/// `Ok(None)` when no member has this id.
pub fn find_by_id(conn: &mut SqliteConnection, id: MemberId) -> RepositoryResult<Option<Member>> {
    let db_member = members::table
        .find(id.get())
        .select(DbMember::as_select())
        .first::<DbMember>(conn)
        .optional()?;

    match db_member {
        Some(db_member) => Ok(Some(Member::try_from(db_member)?)),
        None => Ok(None),
    }
}

pub fn find_all(conn: &mut SqliteConnection) -> RepositoryResult<Vec<Member>> {
    let rows = members::table
        .select(DbMember::as_select())
        .order(members::id.asc())
        .load::<DbMember>(conn)?;
    into_domain(rows)
}

/// [`find_all`] written as a plain SQL string.
pub fn find_all_raw(conn: &mut SqliteConnection) -> RepositoryResult<Vec<Member>> {
    let rows = diesel::sql_query("SELECT id, username, age, team_id FROM members ORDER BY id")
        .load::<DbMember>(conn)?;
    into_domain(rows)
}

pub fn find_by_username(
    conn: &mut SqliteConnection,
    username: &str,
) -> RepositoryResult<Vec<Member>> {
    let rows = members::table
        .filter(members::username.eq(username))
        .select(DbMember::as_select())
        .order(members::id.asc())
        .load::<DbMember>(conn)?;
    into_domain(rows)
}

/// [`find_by_username`] written as a plain SQL string with a bound parameter.
pub fn find_by_username_raw(
    conn: &mut SqliteConnection,
    username: &str,
) -> RepositoryResult<Vec<Member>> {
    let rows = diesel::sql_query(
        "SELECT id, username, age, team_id FROM members WHERE username = ? ORDER BY id",
    )
    .bind::<Text, _>(username)
    .load::<DbMember>(conn)?;
    into_domain(rows)
}

/// Single-result lookup by username.
///
/// Returns `Ok(None)` when nothing matches and
/// [`RepositoryError::NonUniqueResult`] when more than one member does.
pub fn fetch_one_by_username(
    conn: &mut SqliteConnection,
    username: &str,
) -> RepositoryResult<Option<Member>> {
    // Two rows are enough to prove the result is not unique.
    let mut rows = members::table
        .filter(members::username.eq(username))
        .select(DbMember::as_select())
        .limit(2)
        .load::<DbMember>(conn)?;

    if rows.len() > 1 {
        let matched = members::table
            .filter(members::username.eq(username))
            .count()
            .get_result::<i64>(conn)?;
        return Err(RepositoryError::NonUniqueResult(matched as usize));
    }

    match rows.pop() {
        Some(row) => Ok(Some(Member::try_from(row)?)),
        None => Ok(None),
    }
}

/// Members whose age equals the maximum age, found with a scalar subquery.
pub fn find_oldest(conn: &mut SqliteConnection) -> RepositoryResult<Vec<Member>> {
    let sub_members = diesel::alias!(members as sub_members);
    let max_age = sub_members
        .select(diesel::dsl::max(sub_members.field(members::age)))
        .single_value();

    let rows = members::table
        .filter(members::age.nullable().eq(max_age))
        .select(DbMember::as_select())
        .order(members::id.asc())
        .load::<DbMember>(conn)?;
    into_domain(rows)
}

impl MemberWriter for DieselRepository {
    fn create_member(&self, new_member: &NewMember) -> RepositoryResult<Member> {
        let mut conn = self.conn()?;
        create(&mut conn, new_member)
    }
}

impl MemberReader for DieselRepository {
    fn find_member_by_id(&self, id: MemberId) -> RepositoryResult<Option<Member>> {
        let mut conn = self.conn()?;
        find_by_id(&mut conn, id)
    }

    fn find_all_members(&self) -> RepositoryResult<Vec<Member>> {
        let mut conn = self.conn()?;
        find_all(&mut conn)
    }

    fn find_all_members_raw(&self) -> RepositoryResult<Vec<Member>> {
        let mut conn = self.conn()?;
        find_all_raw(&mut conn)
    }

    fn find_members_by_username(&self, username: &str) -> RepositoryResult<Vec<Member>> {
        let mut conn = self.conn()?;
        find_by_username(&mut conn, username)
    }

    fn find_members_by_username_raw(&self, username: &str) -> RepositoryResult<Vec<Member>> {
        let mut conn = self.conn()?;
        find_by_username_raw(&mut conn, username)
    }

    fn fetch_one_member_by_username(&self, username: &str) -> RepositoryResult<Option<Member>> {
        let mut conn = self.conn()?;
        fetch_one_by_username(&mut conn, username)
    }

    fn find_oldest_members(&self) -> RepositoryResult<Vec<Member>> {
        let mut conn = self.conn()?;
        find_oldest(&mut conn)
    }
}
