//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::member::{Member, NewMember};
use crate::domain::search::SearchCondition;
use crate::domain::team::Team;
use crate::domain::types::{MemberId, TeamId};
use crate::dto::member_team::MemberTeamView;
use crate::pagination::PageResult;
use crate::repository::errors::RepositoryResult;
use crate::repository::{MemberReader, MemberTeamQuery, MemberTeamReader, MemberWriter, TeamReader};

mock! {
    pub Repository {}

    impl MemberReader for Repository {
        fn find_member_by_id(&self, id: MemberId) -> RepositoryResult<Option<Member>>;
        fn find_all_members(&self) -> RepositoryResult<Vec<Member>>;
        fn find_all_members_raw(&self) -> RepositoryResult<Vec<Member>>;
        fn find_members_by_username(&self, username: &str) -> RepositoryResult<Vec<Member>>;
        fn find_members_by_username_raw(&self, username: &str) -> RepositoryResult<Vec<Member>>;
        fn fetch_one_member_by_username(&self, username: &str) -> RepositoryResult<Option<Member>>;
        fn find_oldest_members(&self) -> RepositoryResult<Vec<Member>>;
    }

    impl MemberWriter for Repository {
        fn create_member(&self, new_member: &NewMember) -> RepositoryResult<Member>;
    }

    impl TeamReader for Repository {
        fn find_team_by_id(&self, id: TeamId) -> RepositoryResult<Option<Team>>;
        fn find_all_teams(&self) -> RepositoryResult<Vec<Team>>;
    }

    impl MemberTeamReader for Repository {
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
}
