//! Member lookups and registration.

use crate::domain::member::{Member, NewMember};
use crate::domain::types::{Age, MemberId, TeamId};
use crate::repository::{MemberReader, MemberWriter, TeamReader};
use crate::services::{ServiceError, ServiceResult};

/// Loads a member by its raw identifier.
pub fn get_member<R>(repo: &R, member_id: i32) -> ServiceResult<Member>
where
    R: MemberReader + ?Sized,
{
    let member_id = MemberId::new(member_id)?;

    repo.find_member_by_id(member_id)?
        .ok_or(ServiceError::NotFound)
}

/// Loads the single member with this username.
///
/// Several members sharing the name is reported as a repository error rather
/// than picking one of them.
pub fn get_member_by_username<R>(repo: &R, username: &str) -> ServiceResult<Member>
where
    R: MemberReader + ?Sized,
{
    repo.fetch_one_member_by_username(username)?
        .ok_or(ServiceError::NotFound)
}

/// Members sharing the highest age.
pub fn oldest_members<R>(repo: &R) -> ServiceResult<Vec<Member>>
where
    R: MemberReader + ?Sized,
{
    Ok(repo.find_oldest_members()?)
}

/// Persists a new member, checking that the referenced team exists first.
pub fn register_member<R>(
    repo: &R,
    username: Option<String>,
    age: i32,
    team_id: Option<i32>,
) -> ServiceResult<Member>
where
    R: MemberWriter + TeamReader + ?Sized,
{
    let mut new_member = NewMember::new(username, Age::new(age)?);

    if let Some(team_id) = team_id {
        let team_id = TeamId::new(team_id)?;
        let team = repo
            .find_team_by_id(team_id)?
            .ok_or(ServiceError::NotFound)?;
        new_member = new_member.with_team(team.id);
    }

    let member = repo.create_member(&new_member)?;
    log::info!("Registered member {} (team {:?})", member.id, member.team_id);

    Ok(member)
}
