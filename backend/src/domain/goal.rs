//! Personal goals.
//!
//! Goals are owned by a single user, listed newest first and deletable only
//! by their owner. They are never edited.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::UserId;

/// Validation errors returned by [`GoalDraft::try_new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoalValidationError {
    MissingName,
}

impl fmt::Display for GoalValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingName => write!(f, "Please give the goal a name."),
        }
    }
}

impl std::error::Error for GoalValidationError {}

/// Store-assigned goal identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GoalId(i32);

impl GoalId {
    pub const fn new(raw: i32) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for GoalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for GoalId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// Validated form input for a new goal.
///
/// ## Invariants
/// - `name` is non-empty after trimming.
/// - `target` and `notes` are kept as submitted; blank values become `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalDraft {
    name: String,
    target: Option<String>,
    notes: Option<String>,
}

fn non_blank(raw: Option<&str>) -> Option<String> {
    raw.filter(|value| !value.trim().is_empty())
        .map(str::to_owned)
}

impl GoalDraft {
    /// Validate raw form fields.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::GoalDraft;
    ///
    /// let draft = GoalDraft::try_new(Some("Run 5k"), Some(""), None).unwrap();
    /// assert_eq!(draft.name(), "Run 5k");
    /// assert!(draft.target().is_none());
    /// ```
    pub fn try_new(
        name: Option<&str>,
        target: Option<&str>,
        notes: Option<&str>,
    ) -> Result<Self, GoalValidationError> {
        let name = name
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or(GoalValidationError::MissingName)?;
        Ok(Self {
            name: name.to_owned(),
            target: non_blank(target),
            notes: non_blank(notes),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// Stamp the draft with its owner and creation time.
    pub fn into_new_goal(self, owner: UserId, created_at: DateTime<Utc>) -> NewGoal {
        NewGoal {
            user_id: owner,
            name: self.name,
            target: self.target,
            notes: self.notes,
            created_at,
        }
    }
}

/// Goal ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGoal {
    pub user_id: UserId,
    pub name: String,
    pub target: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Persisted goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Goal {
    pub id: GoalId,
    pub user_id: UserId,
    pub name: String,
    pub target: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    #[case(Some("  "))]
    fn name_is_required(#[case] name: Option<&str>) {
        assert_eq!(
            GoalDraft::try_new(name, Some("10km"), None),
            Err(GoalValidationError::MissingName)
        );
    }

    #[rstest]
    fn optional_fields_keep_submitted_text() {
        let draft = GoalDraft::try_new(Some(" Marathon "), Some(" 42 km"), Some("spring\nrace"))
            .expect("valid draft");
        assert_eq!(draft.name(), "Marathon");
        assert_eq!(draft.target(), Some(" 42 km"));
        assert_eq!(draft.notes(), Some("spring\nrace"));
    }

    #[rstest]
    fn blank_optional_fields_become_absent() {
        let draft = GoalDraft::try_new(Some("Swim"), Some("   "), Some("")).expect("valid draft");
        assert!(draft.target().is_none());
        assert!(draft.notes().is_none());
    }

    #[rstest]
    fn into_new_goal_carries_owner_and_timestamp() {
        let now = Utc::now();
        let goal = GoalDraft::try_new(Some("Swim"), None, None)
            .expect("valid draft")
            .into_new_goal(UserId::new(4), now);
        assert_eq!(goal.user_id, UserId::new(4));
        assert_eq!(goal.created_at, now);
        assert_eq!(goal.name, "Swim");
    }
}
