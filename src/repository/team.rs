//! Entity lookups and writes for teams.

use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::domain::team::{NewTeam, Team};
use crate::domain::types::TeamId;
use crate::models::team::{NewTeam as DbNewTeam, Team as DbTeam};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, TeamReader, TeamWriter};
use crate::schema::teams;

pub fn create(conn: &mut SqliteConnection, new_team: &NewTeam) -> RepositoryResult<Team> {
    let db_new_team: DbNewTeam = new_team.into();

    let db_team = diesel::insert_into(teams::table)
        .values(&db_new_team)
        .returning(DbTeam::as_returning())
        .get_result::<DbTeam>(conn)?;

    Ok(Team::try_from(db_team)?)
}

/// `Ok(None)` when no team has this id.
pub fn find_by_id(conn: &mut SqliteConnection, id: TeamId) -> RepositoryResult<Option<Team>> {
    let db_team = teams::table
        .find(id.get())
        .select(DbTeam::as_select())
        .first::<DbTeam>(conn)
        .optional()?;

    match db_team {
        Some(db_team) => Ok(Some(Team::try_from(db_team)?)),
        None => Ok(None),
    }
}

pub fn find_all(conn: &mut SqliteConnection) -> RepositoryResult<Vec<Team>> {
    teams::table
        .select(DbTeam::as_select())
        .order(teams::id.asc())
        .load::<DbTeam>(conn)?
        .into_iter()
        .map(|team| Team::try_from(team).map_err(RepositoryError::from))
        .collect()
}

impl TeamWriter for DieselRepository {
    fn create_team(&self, new_team: &NewTeam) -> RepositoryResult<Team> {
        let mut conn = self.conn()?;
        create(&mut conn, new_team)
    }
}

impl TeamReader for DieselRepository {
    fn find_team_by_id(&self, id: TeamId) -> RepositoryResult<Option<Team>> {
        let mut conn = self.conn()?;
        find_by_id(&mut conn, id)
    }

    fn find_all_teams(&self) -> RepositoryResult<Vec<Team>> {
        let mut conn = self.conn()?;
        find_all(&mut conn)
    }
}
