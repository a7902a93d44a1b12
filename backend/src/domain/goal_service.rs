//! Goal domain service.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::debug;

use crate::domain::ports::{
    CreateGoalRequest, GoalCommand, GoalQuery, GoalRepository, GoalRepositoryError,
};
use crate::domain::{Error, Goal, GoalDraft, GoalId, UserId};

fn map_repository_error(error: GoalRepositoryError) -> Error {
    match error {
        GoalRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("goal repository unavailable: {message}"))
        }
        GoalRepositoryError::Query { message } => {
            Error::internal(format!("goal repository error: {message}"))
        }
    }
}

/// Service implementing the goal driving ports.
#[derive(Clone)]
pub struct GoalService<R> {
    goal_repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> GoalService<R> {
    pub fn new(goal_repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { goal_repo, clock }
    }
}

#[async_trait]
impl<R> GoalCommand for GoalService<R>
where
    R: GoalRepository,
{
    async fn create_goal(&self, request: CreateGoalRequest) -> Result<Goal, Error> {
        let draft = GoalDraft::try_new(
            request.name.as_deref(),
            request.target.as_deref(),
            request.notes.as_deref(),
        )
        .map_err(|err| Error::invalid_request(err.to_string()))?;

        let goal = draft.into_new_goal(request.owner, self.clock.utc());
        self.goal_repo
            .insert(&goal)
            .await
            .map_err(map_repository_error)
    }

    async fn delete_goal(&self, owner: UserId, goal_id: GoalId) -> Result<(), Error> {
        let removed = self
            .goal_repo
            .delete_owned(owner, goal_id)
            .await
            .map_err(map_repository_error)?;
        if !removed {
            debug!(%owner, %goal_id, "goal delete matched nothing");
        }
        Ok(())
    }
}

#[async_trait]
impl<R> GoalQuery for GoalService<R>
where
    R: GoalRepository,
{
    async fn list_goals(&self, owner: UserId) -> Result<Vec<Goal>, Error> {
        self.goal_repo
            .list_for_owner(owner)
            .await
            .map_err(map_repository_error)
    }
}
