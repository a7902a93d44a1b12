//! Dashboard page: the signed-in user's goals and friends next to the most
//! recent posts from everyone.

use actix_web::{HttpResponse, get, web};
use serde::Serialize;

use crate::domain::UserSummary;
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::{current_user, see_other};
use crate::inbound::http::feed::PostView;
use crate::inbound::http::goals::GoalView;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::views::{Page, Views};

#[derive(Serialize)]
struct DashboardBody {
    goals: Vec<GoalView>,
    friends: Vec<UserSummary>,
    posts: Vec<PostView>,
}

#[get("/dashboard")]
pub async fn dashboard(
    state: web::Data<HttpState>,
    views: web::Data<Views>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let Some(viewer) = current_user(&state, &session).await? else {
        return Ok(see_other("/"));
    };
    let goals = state.goals_query.list_goals(viewer.id()).await?;
    let friends = state.friendships_query.list_friends(viewer.id()).await?;
    let posts = state.feed.recent_posts().await?;
    views.render(
        "dashboard",
        &Page {
            title: "Dashboard",
            viewer: Some(viewer.username().as_ref()),
            notices: session.take_notices(),
            body: DashboardBody {
                goals: goals.into_iter().map(GoalView::from).collect(),
                friends: friends.iter().map(UserSummary::from).collect(),
                posts: posts.into_iter().map(PostView::from).collect(),
            },
        },
    )
}
