//! Driving ports for goal management.

use async_trait::async_trait;

use crate::domain::{Error, Goal, GoalId, UserId};

/// Raw goal form submitted by `owner`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateGoalRequest {
    pub owner: UserId,
    pub name: Option<String>,
    pub target: Option<String>,
    pub notes: Option<String>,
}

/// Goal mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GoalCommand: Send + Sync {
    /// Validate and store a goal. Validation failures are `invalid_request`.
    async fn create_goal(&self, request: CreateGoalRequest) -> Result<Goal, Error>;

    /// Delete a goal owned by `owner`. Missing or foreign goals are ignored.
    async fn delete_goal(&self, owner: UserId, goal_id: GoalId) -> Result<(), Error>;
}

/// Goal reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GoalQuery: Send + Sync {
    /// Goals owned by `owner`, newest first.
    async fn list_goals(&self, owner: UserId) -> Result<Vec<Goal>, Error>;
}
