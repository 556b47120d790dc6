use crate::{
    db::{DbConnection, DbPool, get_connection},
    domain::{
        member::{Member, NewMember},
        search::{MemberSort, SearchCondition},
        team::{NewTeam, Team},
        types::{MemberId, TeamId},
    },
    dto::{
        member::{MemberDto, UserDto},
        member_team::MemberTeamView,
    },
    pagination::{PageRequest, PageResult},
    repository::errors::RepositoryResult,
};

pub mod errors;
pub mod member;
pub mod member_team;
#[cfg(feature = "test-mocks")]
pub mod mock;
pub mod predicates;
pub mod projection;
pub mod team;

pub use projection::ProjectionStyle;

/// How the total of a paginated query is obtained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CountStrategy {
    /// Always run a separate `COUNT(*)` query.
    #[default]
    Always,
    /// Skip the count when the returned page already proves the total.
    WhenNeeded,
}

/// Search over the member/team view with ordering and an optional window.
#[derive(Debug, Clone, Default)]
pub struct MemberTeamQuery {
    pub condition: SearchCondition,
    pub sort: Vec<MemberSort>,
    pub pagination: Option<PageRequest>,
    pub count_strategy: CountStrategy,
}

impl MemberTeamQuery {
    pub fn new(condition: SearchCondition) -> Self {
        Self {
            condition,
            ..Self::default()
        }
    }

    pub fn sort_by(mut self, sort: MemberSort) -> Self {
        self.sort.push(sort);
        self
    }

    pub fn sort(mut self, sort: impl IntoIterator<Item = MemberSort>) -> Self {
        self.sort.extend(sort);
        self
    }

    pub fn paginate(mut self, page: PageRequest) -> Self {
        self.pagination = Some(page);
        self
    }

    pub fn count_strategy(mut self, strategy: CountStrategy) -> Self {
        self.count_strategy = strategy;
        self
    }
}

/// Repository backed by an r2d2 pool; every call checks out one connection.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(get_connection(&self.pool)?)
    }
}

pub trait MemberReader {
    fn find_member_by_id(&self, id: MemberId) -> RepositoryResult<Option<Member>>;
    fn find_all_members(&self) -> RepositoryResult<Vec<Member>>;
    fn find_all_members_raw(&self) -> RepositoryResult<Vec<Member>>;
    fn find_members_by_username(&self, username: &str) -> RepositoryResult<Vec<Member>>;
    fn find_members_by_username_raw(&self, username: &str) -> RepositoryResult<Vec<Member>>;
    fn fetch_one_member_by_username(&self, username: &str) -> RepositoryResult<Option<Member>>;
    fn find_oldest_members(&self) -> RepositoryResult<Vec<Member>>;
}

pub trait MemberWriter {
    fn create_member(&self, new_member: &NewMember) -> RepositoryResult<Member>;
}

pub trait TeamReader {
    fn find_team_by_id(&self, id: TeamId) -> RepositoryResult<Option<Team>>;
    fn find_all_teams(&self) -> RepositoryResult<Vec<Team>>;
}

pub trait TeamWriter {
    fn create_team(&self, new_team: &NewTeam) -> RepositoryResult<Team>;
}

pub trait MemberTeamReader {
    fn search(&self, condition: &SearchCondition) -> RepositoryResult<Vec<MemberTeamView>>;
    fn search_by_builder(
        &self,
        condition: &SearchCondition,
    ) -> RepositoryResult<Vec<MemberTeamView>>;
    fn count_member_teams(&self, condition: &SearchCondition) -> RepositoryResult<usize>;
    fn search_page(
        &self,
        condition: &SearchCondition,
        offset: usize,
        limit: usize,
    ) -> RepositoryResult<PageResult<MemberTeamView>>;
    fn search_page_optimized(
        &self,
        condition: &SearchCondition,
        offset: usize,
        limit: usize,
    ) -> RepositoryResult<PageResult<MemberTeamView>>;
    fn query_member_teams(
        &self,
        query: MemberTeamQuery,
    ) -> RepositoryResult<PageResult<MemberTeamView>>;
}

pub trait MemberProjectionReader {
    fn list_usernames(&self) -> RepositoryResult<Vec<Option<String>>>;
    fn list_username_ages(&self) -> RepositoryResult<Vec<(Option<String>, i32)>>;
    fn list_member_dtos(&self, style: ProjectionStyle) -> RepositoryResult<Vec<MemberDto>>;
    fn list_member_dtos_raw(&self) -> RepositoryResult<Vec<MemberDto>>;
    fn list_user_dtos(&self) -> RepositoryResult<Vec<UserDto>>;
    fn list_user_dtos_raw(&self) -> RepositoryResult<Vec<UserDto>>;
}
