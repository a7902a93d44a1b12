//! Sign-in pages and the users listing.
//!
//! ```text
//! GET  /            user list and sign-in form
//! POST /            username=alice
//! GET  /logout
//! GET  /api/users
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{Error, UserSummary};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::{current_user, notice_on_invalid, see_other};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::views::{Page, Views};

/// Sign-in form body for `POST /`.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LoginForm {
    pub username: Option<String>,
}

#[derive(Serialize)]
struct IndexBody {
    users: Vec<UserSummary>,
}

/// Render the user list and sign-in form.
#[get("/")]
pub async fn index(
    state: web::Data<HttpState>,
    views: web::Data<Views>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let viewer = current_user(&state, &session).await?;
    let users = state.users.list_users().await?;
    views.render(
        "index",
        &Page {
            title: "Sign in",
            viewer: viewer.as_ref().map(|user| user.username().as_ref()),
            notices: session.take_notices(),
            body: IndexBody {
                users: users.iter().map(UserSummary::from).collect(),
            },
        },
    )
}

/// Sign in as `username`, registering it on first use.
#[post("/")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<LoginForm>,
) -> ApiResult<HttpResponse> {
    let username = form.into_inner().username.unwrap_or_default();
    let Some(user) = notice_on_invalid(&session, state.login.login(&username).await)? else {
        return Ok(see_other("/"));
    };
    session.persist_user(user.id())?;
    Ok(see_other("/dashboard"))
}

/// Forget the signed-in user.
#[get("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    if let Some(id) = session.user_id() {
        debug!(user_id = %id, "user signed out");
    }
    session.forget_user();
    see_other("/")
}

/// List every user, ordered by username.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use backend::inbound::http::users::list_users;
///
/// let app = App::new().service(list_users);
/// ```
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "Users ordered by username", body = [UserSummary]),
        (status = 503, description = "Store unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "listUsers",
    security([])
)]
#[get("/api/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<UserSummary>>> {
    let users = state.users.list_users().await?;
    Ok(web::Json(users.iter().map(UserSummary::from).collect()))
}
