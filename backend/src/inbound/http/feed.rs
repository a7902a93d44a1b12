//! Feed page and explicit posting.
//!
//! ```text
//! GET  /feed
//! POST /post  content=...&visibility=community
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::FeedEntry;
use crate::domain::ports::CreatePostRequest;
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::{current_user, notice_on_invalid, see_other};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::views::{Page, TIMESTAMP_DISPLAY, Views};

/// Form body for `POST /post`.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct PostForm {
    pub content: Option<String>,
    pub visibility: Option<String>,
}

/// A post as listed on the feed and dashboard.
#[derive(Debug, Serialize)]
pub(crate) struct PostView {
    author: String,
    content: String,
    visibility: &'static str,
    created_at: String,
}

impl From<FeedEntry> for PostView {
    fn from(entry: FeedEntry) -> Self {
        Self {
            author: entry.author,
            visibility: entry.post.visibility.as_str(),
            created_at: entry.post.created_at.format(TIMESTAMP_DISPLAY).to_string(),
            content: entry.post.content,
        }
    }
}

#[derive(Serialize)]
struct FeedBody {
    posts: Vec<PostView>,
}

/// Posts visible to the signed-in user, newest first.
#[get("/feed")]
pub async fn feed_page(
    state: web::Data<HttpState>,
    views: web::Data<Views>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let Some(viewer) = current_user(&state, &session).await? else {
        return Ok(see_other("/"));
    };
    let posts = state.feed.feed_for(viewer.id()).await?;
    views.render(
        "feed",
        &Page {
            title: "Feed",
            viewer: Some(viewer.username().as_ref()),
            notices: session.take_notices(),
            body: FeedBody {
                posts: posts.into_iter().map(PostView::from).collect(),
            },
        },
    )
}

/// Publish a post written by the signed-in user.
#[post("/post")]
pub async fn create_post(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<PostForm>,
) -> ApiResult<HttpResponse> {
    let Some(author) = current_user(&state, &session).await? else {
        return Ok(see_other("/"));
    };
    let PostForm {
        content,
        visibility,
    } = form.into_inner();
    let request = CreatePostRequest {
        author: author.id(),
        content,
        visibility,
    };
    notice_on_invalid(&session, state.posts.create_post(request).await)?;
    Ok(see_other("/dashboard"))
}
