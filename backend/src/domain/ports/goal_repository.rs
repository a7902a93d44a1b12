//! Port for goal persistence.

use async_trait::async_trait;

use crate::domain::{Goal, GoalId, NewGoal, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by goal repository adapters.
    pub enum GoalRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "goal repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "goal repository query failed: {message}",
    }
}

/// Port for writing, listing and deleting goals.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GoalRepository: Send + Sync {
    /// Persist a goal and return the stored row.
    async fn insert(&self, goal: &NewGoal) -> Result<Goal, GoalRepositoryError>;

    /// Goals owned by `owner`, newest first.
    async fn list_for_owner(&self, owner: UserId) -> Result<Vec<Goal>, GoalRepositoryError>;

    /// Delete `goal_id` if `owner` owns it. Returns whether a row was removed.
    async fn delete_owned(&self, owner: UserId, goal_id: GoalId)
    -> Result<bool, GoalRepositoryError>;
}
