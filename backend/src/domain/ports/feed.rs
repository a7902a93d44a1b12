//! Driving ports for posting and reading feeds.

use async_trait::async_trait;

use crate::domain::{Error, FeedEntry, Post, UserId};

/// Raw post form submitted by `author`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePostRequest {
    pub author: UserId,
    pub content: Option<String>,
    pub visibility: Option<String>,
}

/// Post mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostCommand: Send + Sync {
    /// Validate and store an explicit post.
    async fn create_post(&self, request: CreatePostRequest) -> Result<Post, Error>;
}

/// Feed reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeedQuery: Send + Sync {
    /// Posts visible to `viewer`, newest first.
    async fn feed_for(&self, viewer: UserId) -> Result<Vec<FeedEntry>, Error>;

    /// Most recent posts across all users, for the dashboard.
    async fn recent_posts(&self) -> Result<Vec<FeedEntry>, Error>;
}
