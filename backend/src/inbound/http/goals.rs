//! Goal pages.
//!
//! ```text
//! GET  /goals
//! POST /goals              name=10k&target=sub+50&notes=
//! POST /goals/delete/{id}
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::ports::CreateGoalRequest;
use crate::domain::{Goal, GoalId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::{current_user, notice_on_invalid, see_other};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::views::{Page, TIMESTAMP_DISPLAY, Views};

/// Form body for `POST /goals`.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GoalForm {
    pub name: Option<String>,
    pub target: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct GoalView {
    id: i32,
    name: String,
    target: Option<String>,
    notes: Option<String>,
    created_at: String,
}

impl From<Goal> for GoalView {
    fn from(goal: Goal) -> Self {
        Self {
            id: goal.id.get(),
            created_at: goal.created_at.format(TIMESTAMP_DISPLAY).to_string(),
            name: goal.name,
            target: goal.target,
            notes: goal.notes,
        }
    }
}

#[derive(Serialize)]
struct GoalsBody {
    goals: Vec<GoalView>,
}

/// The signed-in user's goals, newest first.
#[get("/goals")]
pub async fn goals_page(
    state: web::Data<HttpState>,
    views: web::Data<Views>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let Some(owner) = current_user(&state, &session).await? else {
        return Ok(see_other("/"));
    };
    let goals = state.goals_query.list_goals(owner.id()).await?;
    views.render(
        "goals",
        &Page {
            title: "Goals",
            viewer: Some(owner.username().as_ref()),
            notices: session.take_notices(),
            body: GoalsBody {
                goals: goals.into_iter().map(GoalView::from).collect(),
            },
        },
    )
}

#[post("/goals")]
pub async fn create_goal(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<GoalForm>,
) -> ApiResult<HttpResponse> {
    let Some(owner) = current_user(&state, &session).await? else {
        return Ok(see_other("/"));
    };
    let GoalForm {
        name,
        target,
        notes,
    } = form.into_inner();
    let request = CreateGoalRequest {
        owner: owner.id(),
        name,
        target,
        notes,
    };
    notice_on_invalid(&session, state.goals.create_goal(request).await)?;
    Ok(see_other("/goals"))
}

/// Delete one of the signed-in user's goals. Foreign or missing ids are
/// ignored.
#[post("/goals/delete/{id}")]
pub async fn delete_goal(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let Some(owner) = current_user(&state, &session).await? else {
        return Ok(see_other("/"));
    };
    state
        .goals
        .delete_goal(owner.id(), GoalId::new(path.into_inner()))
        .await?;
    Ok(see_other("/goals"))
}
