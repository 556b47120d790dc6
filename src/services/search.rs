//! Paged search over the member/team view.

use crate::dto::member_team::MemberTeamView;
use crate::forms::search::{SearchMembersForm, SearchMembersPayload};
use crate::pagination::{PageRequest, PageResult};
use crate::repository::{CountStrategy, MemberTeamQuery, MemberTeamReader};
use crate::services::ServiceResult;

/// Bounds applied to the page size requested by a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimits {
    pub default_page_size: usize,
    pub max_page_size: usize,
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            default_page_size: 20,
            max_page_size: 100,
        }
    }
}

impl PageLimits {
    /// Window for the requested page, clamping the page size to the limits.
    pub fn window(&self, page: Option<usize>, per_page: Option<usize>) -> PageRequest {
        let per_page = per_page
            .unwrap_or(self.default_page_size)
            .clamp(1, self.max_page_size.max(1));
        PageRequest::of_page(page.unwrap_or(1), per_page)
    }
}

/// Validates the form and returns the requested page of matching rows.
///
/// The total is only counted separately when the page itself cannot prove it.
pub fn search_members<R>(
    repo: &R,
    limits: PageLimits,
    form: SearchMembersForm,
) -> ServiceResult<PageResult<MemberTeamView>>
where
    R: MemberTeamReader + ?Sized,
{
    let payload = SearchMembersPayload::try_from(form)?;
    let window = limits.window(payload.page, payload.per_page);

    log::debug!(
        "Searching members with {:?}, offset {}, limit {}",
        payload.condition,
        window.offset,
        window.limit
    );

    let query = MemberTeamQuery::new(payload.condition)
        .sort(payload.sort)
        .paginate(window)
        .count_strategy(CountStrategy::WhenNeeded);

    Ok(repo.query_member_teams(query)?)
}
