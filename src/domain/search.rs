//! Search inputs for the member/team view.
//!
//! [`SearchCondition`] carries the optional filters; [`MemberSort`] describes
//! one ordering criterion. Neither knows anything about SQL.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::types::TypeConstraintError;

/// Optional filters applied to the member/team view.
///
/// Every field is independent; `None` means "no constraint on this
/// dimension". Text fields holding only whitespace are ignored as well.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCondition {
    pub username: Option<String>,
    pub team_name: Option<String>,
    /// Inclusive lower bound on the member age.
    pub age_goe: Option<i32>,
    /// Inclusive upper bound on the member age.
    pub age_loe: Option<i32>,
}

impl SearchCondition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn team_name(mut self, team_name: impl Into<String>) -> Self {
        self.team_name = Some(team_name.into());
        self
    }

    pub fn age_goe(mut self, age: i32) -> Self {
        self.age_goe = Some(age);
        self
    }

    pub fn age_loe(mut self, age: i32) -> Self {
        self.age_loe = Some(age);
        self
    }

    /// Returns `true` when no field would produce a filter.
    pub fn is_unconstrained(&self) -> bool {
        has_text(self.username.as_deref()).is_none()
            && has_text(self.team_name.as_deref()).is_none()
            && self.age_goe.is_none()
            && self.age_loe.is_none()
    }
}

/// Returns the value only if it contains at least one non-whitespace
/// character. The value itself is passed through untrimmed.
pub fn has_text(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Column of the member/team view that results can be ordered by.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberSortField {
    MemberId,
    Username,
    Age,
    TeamName,
}

/// Sort direction
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Placement of `NULL` values relative to the rest.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NullsOrder {
    /// Whatever the database does (SQLite sorts NULL as the smallest value).
    #[default]
    Native,
    First,
    Last,
}

/// A single ordering criterion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberSort {
    pub field: MemberSortField,
    pub direction: SortDirection,
    #[serde(default)]
    pub nulls: NullsOrder,
}

impl MemberSort {
    pub fn new(field: MemberSortField, direction: SortDirection) -> Self {
        Self {
            field,
            direction,
            nulls: NullsOrder::Native,
        }
    }

    pub fn asc(field: MemberSortField) -> Self {
        Self::new(field, SortDirection::Asc)
    }

    pub fn desc(field: MemberSortField) -> Self {
        Self::new(field, SortDirection::Desc)
    }

    pub fn nulls_first(mut self) -> Self {
        self.nulls = NullsOrder::First;
        self
    }

    pub fn nulls_last(mut self) -> Self {
        self.nulls = NullsOrder::Last;
        self
    }
}

impl FromStr for MemberSortField {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "id" | "member_id" => Ok(Self::MemberId),
            "username" => Ok(Self::Username),
            "age" => Ok(Self::Age),
            "team_name" | "team" => Ok(Self::TeamName),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown sort field `{other}`"
            ))),
        }
    }
}

impl Display for MemberSortField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            MemberSortField::MemberId => write!(f, "member_id"),
            MemberSortField::Username => write!(f, "username"),
            MemberSortField::Age => write!(f, "age"),
            MemberSortField::TeamName => write!(f, "team_name"),
        }
    }
}

/// Parses `field[,asc|desc][,nulls_first|nulls_last]`, e.g. `age,desc` or
/// `username,asc,nulls_last`.
impl FromStr for MemberSort {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(',').map(str::trim);
        let field = parts
            .next()
            .filter(|p| !p.is_empty())
            .ok_or(TypeConstraintError::EmptyString)?
            .parse::<MemberSortField>()?;

        let mut sort = MemberSort::asc(field);
        for part in parts {
            match part.to_lowercase().as_str() {
                "asc" => sort.direction = SortDirection::Asc,
                "desc" => sort.direction = SortDirection::Desc,
                "nulls_first" => sort.nulls = NullsOrder::First,
                "nulls_last" => sort.nulls = NullsOrder::Last,
                other => {
                    return Err(TypeConstraintError::InvalidValue(format!(
                        "unknown sort modifier `{other}`"
                    )));
                }
            }
        }
        Ok(sort)
    }
}
