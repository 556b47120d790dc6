//! Searches over the member ⟕ team view.
//!
//! Every function takes the connection explicitly; wrap calls in
//! `conn.transaction(..)` to run several of them against one snapshot.

use diesel::dsl::{IntoBoxed, LeftJoin};
use diesel::prelude::*;
use diesel::sqlite::{Sqlite, SqliteConnection};

use crate::domain::search::{
    MemberSort, MemberSortField, NullsOrder, SearchCondition, SortDirection, has_text,
};
use crate::dto::member_team::MemberTeamView;
use crate::models::projection::MemberTeamRow;
use crate::pagination::{PageRequest, PageResult, total_from_page};
use crate::repository::errors::RepositoryResult;
use crate::repository::predicates::search_predicate;
use crate::repository::{CountStrategy, DieselRepository, MemberTeamQuery, MemberTeamReader};
use crate::schema::{members, teams};

/// Boxed `members LEFT OUTER JOIN teams` statement before projection.
pub type MemberTeamStatement = IntoBoxed<'static, LeftJoin<members::table, teams::table>, Sqlite>;

/// Filters the join with one WHERE clause built by folding the condition's
/// predicate fragments.
pub fn filtered_by_fragments(condition: &SearchCondition) -> MemberTeamStatement {
    members::table
        .left_join(teams::table)
        .filter(search_predicate(condition))
        .into_boxed()
}

/// Filters the join by adding one `.filter()` per present field to a boxed
/// statement. Produces the same rows as [`filtered_by_fragments`].
pub fn filtered_by_builder(condition: &SearchCondition) -> MemberTeamStatement {
    let mut statement = members::table.left_join(teams::table).into_boxed();

    if let Some(username) = has_text(condition.username.as_deref()) {
        statement = statement.filter(members::username.eq(username.to_owned()));
    }
    if let Some(team_name) = has_text(condition.team_name.as_deref()) {
        statement = statement.filter(teams::name.eq(team_name.to_owned()));
    }
    if let Some(age) = condition.age_goe {
        statement = statement.filter(members::age.ge(age));
    }
    if let Some(age) = condition.age_loe {
        statement = statement.filter(members::age.le(age));
    }

    statement
}

/// Appends `ORDER BY` terms for `sort`, then `members.id` as a tiebreaker so
/// pages are stable.
pub fn ordered(mut statement: MemberTeamStatement, sort: &[MemberSort]) -> MemberTeamStatement {
    for criterion in sort {
        statement = order_nulls(statement, criterion);
        statement = match (criterion.field, criterion.direction) {
            (MemberSortField::MemberId, SortDirection::Asc) => {
                statement.then_order_by(members::id.asc())
            }
            (MemberSortField::MemberId, SortDirection::Desc) => {
                statement.then_order_by(members::id.desc())
            }
            (MemberSortField::Username, SortDirection::Asc) => {
                statement.then_order_by(members::username.asc())
            }
            (MemberSortField::Username, SortDirection::Desc) => {
                statement.then_order_by(members::username.desc())
            }
            (MemberSortField::Age, SortDirection::Asc) => statement.then_order_by(members::age.asc()),
            (MemberSortField::Age, SortDirection::Desc) => {
                statement.then_order_by(members::age.desc())
            }
            (MemberSortField::TeamName, SortDirection::Asc) => {
                statement.then_order_by(teams::name.asc())
            }
            (MemberSortField::TeamName, SortDirection::Desc) => {
                statement.then_order_by(teams::name.desc())
            }
        };
    }
    statement.then_order_by(members::id.asc())
}

// SQLite has no NULLS FIRST/LAST in Diesel's DSL; sort on `IS NULL` first.
fn order_nulls(statement: MemberTeamStatement, criterion: &MemberSort) -> MemberTeamStatement {
    match (criterion.field, criterion.nulls) {
        (_, NullsOrder::Native) | (MemberSortField::MemberId | MemberSortField::Age, _) => statement,
        (MemberSortField::Username, NullsOrder::First) => {
            statement.then_order_by(members::username.is_null().desc())
        }
        (MemberSortField::Username, NullsOrder::Last) => {
            statement.then_order_by(members::username.is_null().asc())
        }
        (MemberSortField::TeamName, NullsOrder::First) => {
            statement.then_order_by(teams::id.nullable().is_null().desc())
        }
        (MemberSortField::TeamName, NullsOrder::Last) => {
            statement.then_order_by(teams::id.nullable().is_null().asc())
        }
    }
}

/// Applies `OFFSET`/`LIMIT`. Returns `None` when the offset does not fit
/// SQLite's signed 64-bit range; such a window lies past every row. A limit
/// that large is clamped since no table holds more rows.
fn windowed(
    statement: MemberTeamStatement,
    page: Option<PageRequest>,
) -> Option<MemberTeamStatement> {
    let Some(page) = page else {
        return Some(statement);
    };
    let offset = i64::try_from(page.offset).ok()?;
    let limit = i64::try_from(page.limit).unwrap_or(i64::MAX);
    Some(statement.offset(offset).limit(limit))
}

fn project(
    conn: &mut SqliteConnection,
    statement: MemberTeamStatement,
) -> RepositoryResult<Vec<MemberTeamView>> {
    let rows = statement
        .select(MemberTeamRow::as_select())
        .load::<MemberTeamRow>(conn)?;
    Ok(rows.into_iter().map(MemberTeamView::from).collect())
}

/// Rows of the view matching `condition`, ordered by member id.
pub fn search(
    conn: &mut SqliteConnection,
    condition: &SearchCondition,
) -> RepositoryResult<Vec<MemberTeamView>> {
    log::debug!("Searching members with {condition:?}");
    project(conn, ordered(filtered_by_fragments(condition), &[]))
}

/// Same as [`search`] but composes the WHERE clause with the boxed builder.
pub fn search_by_builder(
    conn: &mut SqliteConnection,
    condition: &SearchCondition,
) -> RepositoryResult<Vec<MemberTeamView>> {
    log::debug!("Searching members (builder) with {condition:?}");
    project(conn, ordered(filtered_by_builder(condition), &[]))
}

/// Number of view rows matching `condition`.
pub fn count(conn: &mut SqliteConnection, condition: &SearchCondition) -> RepositoryResult<usize> {
    let total = filtered_by_fragments(condition)
        .count()
        .get_result::<i64>(conn)?;
    Ok(total as usize)
}

/// Runs `query`: filter, order, window, and count according to its
/// [`CountStrategy`].
///
/// Without pagination every matching row is returned and `total` is the
/// number of rows loaded.
pub fn query(
    conn: &mut SqliteConnection,
    query: &MemberTeamQuery,
) -> RepositoryResult<PageResult<MemberTeamView>> {
    let statement = windowed(
        ordered(filtered_by_fragments(&query.condition), &query.sort),
        query.pagination,
    );
    let items = match statement {
        Some(statement) => project(conn, statement)?,
        None => {
            log::debug!(
                "Window {:?} is out of range, returning an empty page",
                query.pagination
            );
            Vec::new()
        }
    };

    let page = match query.pagination {
        Some(page) => page,
        None => {
            let total = items.len();
            return Ok(PageResult::new(items, total, PageRequest::new(0, total)));
        }
    };

    let total = match query.count_strategy {
        CountStrategy::Always => count(conn, &query.condition)?,
        CountStrategy::WhenNeeded => match total_from_page(page, items.len()) {
            Some(total) => {
                log::debug!("Skipping count query, page proves total of {total}");
                total
            }
            None => count(conn, &query.condition)?,
        },
    };

    Ok(PageResult::new(items, total, page))
}

/// Page of view rows matching `condition`, ordered by member id. Always
/// issues the count query.
pub fn search_page(
    conn: &mut SqliteConnection,
    condition: &SearchCondition,
    offset: usize,
    limit: usize,
) -> RepositoryResult<PageResult<MemberTeamView>> {
    let page_query =
        MemberTeamQuery::new(condition.clone()).paginate(PageRequest::new(offset, limit));
    query(conn, &page_query)
}

/// Like [`search_page`] but skips the count query when the page itself
/// proves the total.
pub fn search_page_optimized(
    conn: &mut SqliteConnection,
    condition: &SearchCondition,
    offset: usize,
    limit: usize,
) -> RepositoryResult<PageResult<MemberTeamView>> {
    let page_query = MemberTeamQuery::new(condition.clone())
        .paginate(PageRequest::new(offset, limit))
        .count_strategy(CountStrategy::WhenNeeded);
    query(conn, &page_query)
}

impl MemberTeamReader for DieselRepository {
    fn search(&self, condition: &SearchCondition) -> RepositoryResult<Vec<MemberTeamView>> {
        let mut conn = self.conn()?;
        search(&mut conn, condition)
    }

    fn search_by_builder(
        &self,
        condition: &SearchCondition,
    ) -> RepositoryResult<Vec<MemberTeamView>> {
        let mut conn = self.conn()?;
        search_by_builder(&mut conn, condition)
    }

    fn count_member_teams(&self, condition: &SearchCondition) -> RepositoryResult<usize> {
        let mut conn = self.conn()?;
        count(&mut conn, condition)
    }

    fn search_page(
        &self,
        condition: &SearchCondition,
        offset: usize,
        limit: usize,
    ) -> RepositoryResult<PageResult<MemberTeamView>> {
        let mut conn = self.conn()?;
        search_page(&mut conn, condition, offset, limit)
    }

    fn search_page_optimized(
        &self,
        condition: &SearchCondition,
        offset: usize,
        limit: usize,
    ) -> RepositoryResult<PageResult<MemberTeamView>> {
        let mut conn = self.conn()?;
        search_page_optimized(&mut conn, condition, offset, limit)
    }

    fn query_member_teams(
        &self,
        query: MemberTeamQuery,
    ) -> RepositoryResult<PageResult<MemberTeamView>> {
        let mut conn = self.conn()?;
        self::query(&mut conn, &query)
    }
}
