//! SQLite-backed `GoalRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{GoalRepository, GoalRepositoryError};
use crate::domain::{Goal, GoalId, NewGoal, UserId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{GoalRow, NewGoalRow};
use super::pool::{DbPool, PoolError};
use super::schema::goals;

/// Diesel-backed implementation of the [`GoalRepository`] port.
#[derive(Clone)]
pub struct DieselGoalRepository {
    pool: DbPool,
}

impl DieselGoalRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> GoalRepositoryError {
    map_basic_pool_error(error, GoalRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> GoalRepositoryError {
    map_basic_diesel_error(
        error,
        GoalRepositoryError::query,
        GoalRepositoryError::connection,
    )
}

#[async_trait]
impl GoalRepository for DieselGoalRepository {
    async fn insert(&self, goal: &NewGoal) -> Result<Goal, GoalRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewGoalRow {
            user_id: goal.user_id.get(),
            name: &goal.name,
            target: goal.target.as_deref(),
            notes: goal.notes.as_deref(),
            created_at: goal.created_at.naive_utc(),
        };
        let stored: GoalRow = diesel::insert_into(goals::table)
            .values(&row)
            .returning(GoalRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(stored.into())
    }

    async fn list_for_owner(&self, owner: UserId) -> Result<Vec<Goal>, GoalRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<GoalRow> = goals::table
            .filter(goals::user_id.eq(owner.get()))
            .order((goals::created_at.desc(), goals::id.desc()))
            .select(GoalRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(Goal::from).collect())
    }

    async fn delete_owned(
        &self,
        owner: UserId,
        goal_id: GoalId,
    ) -> Result<bool, GoalRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let removed = diesel::delete(
            goals::table
                .filter(goals::id.eq(goal_id.get()))
                .filter(goals::user_id.eq(owner.get())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        Ok(removed > 0)
    }
}
