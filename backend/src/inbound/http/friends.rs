//! Friend pages.
//!
//! ```text
//! GET  /friends
//! POST /friends        other=2
//! POST /unfriend/{id}
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::{UserId, UserSummary};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::{current_user, see_other};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::views::{Page, Views};

/// Form body for `POST /friends`.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ConnectForm {
    pub other: Option<String>,
}

#[derive(Serialize)]
struct FriendsBody {
    users: Vec<UserSummary>,
    friends: Vec<UserSummary>,
}

/// Connection candidates and current friends.
#[get("/friends")]
pub async fn friends_page(
    state: web::Data<HttpState>,
    views: web::Data<Views>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let Some(viewer) = current_user(&state, &session).await? else {
        return Ok(see_other("/"));
    };
    let users = state.users.list_other_users(viewer.id()).await?;
    let friends = state.friendships_query.list_friends(viewer.id()).await?;
    views.render(
        "friends",
        &Page {
            title: "Friends",
            viewer: Some(viewer.username().as_ref()),
            notices: session.take_notices(),
            body: FriendsBody {
                users: users.iter().map(UserSummary::from).collect(),
                friends: friends.iter().map(UserSummary::from).collect(),
            },
        },
    )
}

/// Connect with another user. Every outcome is reported as a notice.
#[post("/friends")]
pub async fn connect(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<ConnectForm>,
) -> ApiResult<HttpResponse> {
    let Some(viewer) = current_user(&state, &session).await? else {
        return Ok(see_other("/"));
    };
    let target = form.into_inner().other.unwrap_or_default();
    let outcome = state.friendships.connect(viewer.id(), &target).await?;
    session.push_notice(outcome.notice())?;
    Ok(see_other("/friends"))
}

/// Remove the link with `id`, whichever side created it.
#[post("/unfriend/{id}")]
pub async fn unfriend(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let Some(viewer) = current_user(&state, &session).await? else {
        return Ok(see_other("/"));
    };
    state
        .friendships
        .disconnect(viewer.id(), UserId::new(path.into_inner()))
        .await?;
    Ok(see_other("/friends"))
}
