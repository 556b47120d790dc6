//! Query-string style form for searching the member/team view.

use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::domain::search::{MemberSort, SearchCondition};
use crate::forms::FormError;

/// Raw search parameters as received from a caller.
///
/// Text filters are normalised when converted into a payload: blank values
/// are dropped, everything else is passed through untouched.
#[derive(Debug, Default, Clone, Deserialize, Validate)]
#[validate(schema(function = "validate_age_range"))]
pub struct SearchMembersForm {
    pub username: Option<String>,
    pub team_name: Option<String>,
    #[validate(range(min = 0))]
    pub age_goe: Option<i32>,
    #[validate(range(min = 0))]
    pub age_loe: Option<i32>,
    /// 1-based page number.
    #[validate(range(min = 1))]
    pub page: Option<usize>,
    #[validate(range(min = 1))]
    pub per_page: Option<usize>,
    /// Sort expressions such as `age,desc` or `username,asc,nulls_last`.
    #[serde(default)]
    pub sort: Vec<String>,
}

fn validate_age_range(form: &SearchMembersForm) -> Result<(), ValidationError> {
    match (form.age_goe, form.age_loe) {
        (Some(goe), Some(loe)) if goe > loe => Err(ValidationError::new("age_range")),
        _ => Ok(()),
    }
}

/// Validated search parameters.
#[derive(Debug, Clone)]
pub struct SearchMembersPayload {
    pub condition: SearchCondition,
    pub sort: Vec<MemberSort>,
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

impl TryFrom<SearchMembersForm> for SearchMembersPayload {
    type Error = FormError;

    fn try_from(form: SearchMembersForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let sort = form
            .sort
            .iter()
            .filter(|s| !s.trim().is_empty())
            .map(|s| {
                s.parse::<MemberSort>()
                    .map_err(|e| FormError::InvalidSort(e.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let blank_to_none = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

        Ok(Self {
            condition: SearchCondition {
                username: blank_to_none(form.username),
                team_name: blank_to_none(form.team_name),
                age_goe: form.age_goe,
                age_loe: form.age_loe,
            },
            sort,
            page: form.page,
            per_page: form.per_page,
        })
    }
}
