#![allow(dead_code)]

use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use member_query::db::{DbPool, establish_connection_pool};
use member_query::domain::member::{Member, NewMember};
use member_query::domain::team::{NewTeam, Team};
use member_query::domain::types::{Age, TeamName};
use member_query::repository::{DieselRepository, MemberWriter, TeamWriter};
use tempfile::TempDir;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");

/// Migrated SQLite database living in a temporary directory.
///
/// The directory, and the database file with it, is removed on drop.
pub struct TestDb {
    _dir: TempDir,
    pool: DbPool,
}

impl TestDb {
    pub fn new(filename: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join(filename);
        let url = path.to_str().expect("utf-8 temp path").to_string();

        let pool = establish_connection_pool(&url).expect("create pool");
        let mut conn = pool.get().expect("get connection");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("run migrations");

        Self { _dir: dir, pool }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }

    pub fn repo(&self) -> DieselRepository {
        DieselRepository::new(self.pool())
    }
}

pub fn team(repo: &DieselRepository, name: &str) -> Team {
    repo.create_team(&NewTeam::new(TeamName::new(name).expect("valid team name")))
        .expect("create team")
}

pub fn member(repo: &DieselRepository, username: Option<&str>, age: i32, team: Option<&Team>) -> Member {
    let mut new_member = NewMember::new(
        username.map(str::to_string),
        Age::new(age).expect("valid age"),
    );
    if let Some(team) = team {
        new_member = new_member.with_team(team.id);
    }
    repo.create_member(&new_member).expect("create member")
}

/// Two teams with two members each: member1..member4 aged 10, 20, 30, 40.
/// member1 and member2 are in teamA, member3 and member4 in teamB.
pub fn seed_teams(repo: &DieselRepository) -> (Team, Team) {
    let team_a = team(repo, "teamA");
    let team_b = team(repo, "teamB");

    member(repo, Some("member1"), 10, Some(&team_a));
    member(repo, Some("member2"), 20, Some(&team_a));
    member(repo, Some("member3"), 30, Some(&team_b));
    member(repo, Some("member4"), 40, Some(&team_b));

    (team_a, team_b)
}
