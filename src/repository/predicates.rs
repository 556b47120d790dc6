//! Predicate fragments for the member ⟕ team view.
//!
//! Every [`SearchCondition`] field has a function returning
//! `Option<MemberTeamPredicate>`: `None` when the field is absent, the
//! comparison otherwise. [`all_of`] folds the present fragments into one
//! conjunction and falls back to [`match_all`] when nothing is present.
//!
//! The fragments are boxed so they share one type and can be stored in a
//! list; the query source they are checked against is the left join itself,
//! so a fragment referencing a column outside the join does not compile.

use diesel::dsl::LeftJoinQuerySource;
use diesel::prelude::*;
use diesel::sql_types::Bool;
use diesel::sqlite::Sqlite;

use crate::domain::search::{SearchCondition, has_text};
use crate::schema::{members, teams};

/// Query source of `members LEFT OUTER JOIN teams ON members.team_id = teams.id`.
pub type MemberTeamSource = LeftJoinQuerySource<members::table, teams::table>;

/// A boolean expression usable in the WHERE clause of the member/team join.
pub type MemberTeamPredicate = Box<dyn BoxableExpression<MemberTeamSource, Sqlite, SqlType = Bool>>;

/// The universal predicate: `WHERE 1` keeps every row.
pub fn match_all() -> MemberTeamPredicate {
    Box::new(true.into_sql::<Bool>())
}

/// `members.username = ?` when `username` has text.
pub fn username_eq(username: Option<&str>) -> Option<MemberTeamPredicate> {
    has_text(username).map(|username| -> MemberTeamPredicate {
        Box::new(members::username.assume_not_null().eq(username.to_owned()))
    })
}

/// `teams.name = ?` when `team_name` has text.
///
/// `teams` is the nullable side of the join, so the column is lifted to
/// `Nullable` before comparing. A missing team compares as `NULL` and is
/// filtered out, which is what an equality filter on the team should do.
pub fn team_name_eq(team_name: Option<&str>) -> Option<MemberTeamPredicate> {
    has_text(team_name).map(|team_name| -> MemberTeamPredicate {
        Box::new(
            teams::name
                .nullable()
                .eq(team_name.to_owned())
                .assume_not_null(),
        )
    })
}

/// `members.age >= ?`
pub fn age_goe(age: Option<i32>) -> Option<MemberTeamPredicate> {
    age.map(|age| -> MemberTeamPredicate { Box::new(members::age.ge(age)) })
}

/// `members.age <= ?`
pub fn age_loe(age: Option<i32>) -> Option<MemberTeamPredicate> {
    age.map(|age| -> MemberTeamPredicate { Box::new(members::age.le(age)) })
}

/// Fragments for every dimension of `condition`, in declaration order.
pub fn condition_fragments(condition: &SearchCondition) -> [Option<MemberTeamPredicate>; 4] {
    [
        username_eq(condition.username.as_deref()),
        team_name_eq(condition.team_name.as_deref()),
        age_goe(condition.age_goe),
        age_loe(condition.age_loe),
    ]
}

/// AND-combines the present fragments, skipping `None`s.
pub fn all_of<I>(fragments: I) -> MemberTeamPredicate
where
    I: IntoIterator<Item = Option<MemberTeamPredicate>>,
{
    fragments
        .into_iter()
        .flatten()
        .reduce(|acc, next| Box::new(acc.and(next)))
        .unwrap_or_else(match_all)
}

/// The full WHERE clause for `condition`.
pub fn search_predicate(condition: &SearchCondition) -> MemberTeamPredicate {
    all_of(condition_fragments(condition))
}
