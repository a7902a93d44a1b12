//! SQLite-backed `PostRepository` implementation using Diesel ORM.
//!
//! Feed reads join the author's username so handlers never need a second
//! lookup per post.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{PostRepository, PostRepositoryError};
use crate::domain::{FeedEntry, NewPost, Post, UserId, Visibility};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewPostRow, PostRow};
use super::pool::{DbPool, PoolError};
use super::schema::{friends, posts, users};

/// Diesel-backed implementation of the [`PostRepository`] port.
#[derive(Clone)]
pub struct DieselPostRepository {
    pool: DbPool,
}

impl DieselPostRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> PostRepositoryError {
    map_basic_pool_error(error, PostRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> PostRepositoryError {
    map_basic_diesel_error(
        error,
        PostRepositoryError::query,
        PostRepositoryError::connection,
    )
}

fn into_entries(rows: Vec<(PostRow, String)>) -> Vec<FeedEntry> {
    rows.into_iter()
        .map(|(row, author)| FeedEntry {
            post: Post::from(row),
            author,
        })
        .collect()
}

#[async_trait]
impl PostRepository for DieselPostRepository {
    async fn insert(&self, post: &NewPost) -> Result<Post, PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewPostRow {
            user_id: post.user_id.get(),
            content: &post.content,
            visibility: post.visibility.as_str(),
            created_at: post.created_at.naive_utc(),
        };
        let stored: PostRow = diesel::insert_into(posts::table)
            .values(&row)
            .returning(PostRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(stored.into())
    }

    async fn recent(&self, limit: i64) -> Result<Vec<FeedEntry>, PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<(PostRow, String)> = posts::table
            .inner_join(users::table)
            .order((posts::created_at.desc(), posts::id.desc()))
            .limit(limit)
            .select((PostRow::as_select(), users::username))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(into_entries(rows))
    }

    async fn visible_to(
        &self,
        viewer: UserId,
        limit: i64,
    ) -> Result<Vec<FeedEntry>, PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let outgoing = friends::table
            .filter(friends::user_id.eq(viewer.get()))
            .select(friends::friend_id);
        let incoming = friends::table
            .filter(friends::friend_id.eq(viewer.get()))
            .select(friends::user_id);

        // Own posts, community posts, and any post by a friend. A friend's
        // post is visible whichever audience it was published to.
        let rows: Vec<(PostRow, String)> = posts::table
            .inner_join(users::table)
            .filter(
                posts::visibility
                    .eq(Visibility::Community.as_str())
                    .or(posts::user_id.eq(viewer.get()))
                    .or(posts::user_id.eq_any(outgoing))
                    .or(posts::user_id.eq_any(incoming)),
            )
            .order((posts::created_at.desc(), posts::id.desc()))
            .limit(limit)
            .select((PostRow::as_select(), users::username))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(into_entries(rows))
    }
}
