use serde::Serialize;

/// Flat row of the member ⟕ team left join.
///
/// Team columns are `None` for members without a team.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct MemberTeamView {
    pub member_id: i32,
    pub username: Option<String>,
    pub age: i32,
    pub team_id: Option<i32>,
    pub team_name: Option<String>,
}

impl MemberTeamView {
    pub fn new(
        member_id: i32,
        username: Option<String>,
        age: i32,
        team_id: Option<i32>,
        team_name: Option<String>,
    ) -> Self {
        Self {
            member_id,
            username,
            age,
            team_id,
            team_name,
        }
    }
}
