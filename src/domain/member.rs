use serde::{Deserialize, Serialize};

use crate::domain::types::{Age, MemberId, TeamId};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Member {
    pub id: MemberId,
    /// Members may be stored without a username.
    pub username: Option<String>,
    pub age: Age,
    /// `None` when the member does not belong to any team.
    pub team_id: Option<TeamId>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewMember {
    pub username: Option<String>,
    pub age: Age,
    pub team_id: Option<TeamId>,
}

impl NewMember {
    #[must_use]
    pub fn new(username: Option<String>, age: Age) -> Self {
        Self {
            username,
            age,
            team_id: None,
        }
    }

    #[must_use]
    pub fn with_team(mut self, team_id: TeamId) -> Self {
        self.team_id = Some(team_id);
        self
    }
}
