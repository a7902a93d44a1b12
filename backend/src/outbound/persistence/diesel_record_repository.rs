//! SQLite-backed `RecordRepository` implementation using Diesel ORM.
//!
//! Shared records publish an auto-post; the record and the post are written
//! in the same transaction so neither exists without the other.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::domain::ports::{RecordRepository, RecordRepositoryError};
use crate::domain::{ActivityRecord, NewPost, NewRecord, UserId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewPostRow, NewRecordRow, RecordRow};
use super::pool::{DbPool, PoolError};
use super::schema::{posts, records};

/// Diesel-backed implementation of the [`RecordRepository`] port.
#[derive(Clone)]
pub struct DieselRecordRepository {
    pool: DbPool,
}

impl DieselRecordRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> RecordRepositoryError {
    map_basic_pool_error(error, RecordRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> RecordRepositoryError {
    map_basic_diesel_error(
        error,
        RecordRepositoryError::query,
        RecordRepositoryError::connection,
    )
}

#[async_trait]
impl RecordRepository for DieselRecordRepository {
    async fn insert_with_post(
        &self,
        record: &NewRecord,
        post: Option<NewPost>,
    ) -> Result<ActivityRecord, RecordRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let record_row = NewRecordRow {
            user_id: record.user_id.get(),
            date: record.date,
            activity: &record.activity,
            value: record.value.as_str(),
            created_at: record.created_at.naive_utc(),
            shared: record.shared.as_str(),
        };

        let stored = conn
            .transaction(|conn| {
                async move {
                    let stored: RecordRow = diesel::insert_into(records::table)
                        .values(&record_row)
                        .returning(RecordRow::as_returning())
                        .get_result(conn)
                        .await?;

                    if let Some(post) = &post {
                        let post_row = NewPostRow {
                            user_id: post.user_id.get(),
                            content: &post.content,
                            visibility: post.visibility.as_str(),
                            created_at: post.created_at.naive_utc(),
                        };
                        diesel::insert_into(posts::table)
                            .values(&post_row)
                            .execute(conn)
                            .await?;
                    }

                    Ok::<_, diesel::result::Error>(stored)
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        Ok(stored.into())
    }

    async fn recent_for_owner(
        &self,
        owner: UserId,
        limit: i64,
    ) -> Result<Vec<ActivityRecord>, RecordRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<RecordRow> = records::table
            .filter(records::user_id.eq(owner.get()))
            .order((
                records::date.desc(),
                records::created_at.desc(),
                records::id.desc(),
            ))
            .limit(limit)
            .select(RecordRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(ActivityRecord::from).collect())
    }

    async fn chronological_for_owner(
        &self,
        owner: UserId,
    ) -> Result<Vec<ActivityRecord>, RecordRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<RecordRow> = records::table
            .filter(records::user_id.eq(owner.get()))
            .order((records::date.asc(), records::id.asc()))
            .select(RecordRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(ActivityRecord::from).collect())
    }
}
