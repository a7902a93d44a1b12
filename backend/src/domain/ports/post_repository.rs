//! Port for post persistence and the feed visibility query.

use async_trait::async_trait;

use crate::domain::{FeedEntry, NewPost, Post, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by post repository adapters.
    pub enum PostRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "post repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "post repository query failed: {message}",
    }
}

/// Port for writing posts and reading feeds.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Persist a post and return the stored row.
    async fn insert(&self, post: &NewPost) -> Result<Post, PostRepositoryError>;

    /// Most recent posts regardless of visibility.
    async fn recent(&self, limit: i64) -> Result<Vec<FeedEntry>, PostRepositoryError>;

    /// Posts `viewer` may see: community posts, their own posts and every
    /// post by a friend. Newest first.
    async fn visible_to(
        &self,
        viewer: UserId,
        limit: i64,
    ) -> Result<Vec<FeedEntry>, PostRepositoryError>;
}
