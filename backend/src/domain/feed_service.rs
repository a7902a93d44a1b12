//! Feed service: explicit posts and visibility-filtered feeds.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;

use crate::domain::ports::{
    CreatePostRequest, FeedQuery, PostCommand, PostRepository, PostRepositoryError,
};
use crate::domain::{DASHBOARD_POST_LIMIT, Error, FEED_LIMIT, FeedEntry, Post, PostDraft, UserId};

fn map_repository_error(error: PostRepositoryError) -> Error {
    match error {
        PostRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("post repository unavailable: {message}"))
        }
        PostRepositoryError::Query { message } => {
            Error::internal(format!("post repository error: {message}"))
        }
    }
}

/// Service implementing [`PostCommand`] and [`FeedQuery`].
#[derive(Clone)]
pub struct FeedService<R> {
    post_repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> FeedService<R> {
    pub fn new(post_repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { post_repo, clock }
    }
}

#[async_trait]
impl<R> PostCommand for FeedService<R>
where
    R: PostRepository,
{
    async fn create_post(&self, request: CreatePostRequest) -> Result<Post, Error> {
        let draft =
            PostDraft::try_from_form(request.content.as_deref(), request.visibility.as_deref())
                .map_err(|err| Error::invalid_request(err.to_string()))?;
        let post = draft.into_new_post(request.author, self.clock.utc());
        self.post_repo
            .insert(&post)
            .await
            .map_err(map_repository_error)
    }
}

#[async_trait]
impl<R> FeedQuery for FeedService<R>
where
    R: PostRepository,
{
    async fn feed_for(&self, viewer: UserId) -> Result<Vec<FeedEntry>, Error> {
        self.post_repo
            .visible_to(viewer, FEED_LIMIT)
            .await
            .map_err(map_repository_error)
    }

    async fn recent_posts(&self) -> Result<Vec<FeedEntry>, Error> {
        self.post_repo
            .recent(DASHBOARD_POST_LIMIT)
            .await
            .map_err(map_repository_error)
    }
}
