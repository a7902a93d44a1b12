//! Activity record pages and chart data.
//!
//! ```text
//! GET  /records
//! POST /records          date=2024-01-01&activity=running&value=5.0&share=community
//! GET  /api/chart_data
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::ports::LogRecordRequest;
use crate::domain::{ActivityRecord, ChartData, ChartPoint, DATE_FORMAT, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::{current_user, notice_on_invalid, see_other};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::views::{Page, Views, script_json};

/// Form body for `POST /records`.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct RecordForm {
    pub date: Option<String>,
    pub activity: Option<String>,
    pub value: Option<String>,
    pub share: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct RecordView {
    date: String,
    activity: String,
    value: String,
    shared: &'static str,
}

impl From<ActivityRecord> for RecordView {
    fn from(record: ActivityRecord) -> Self {
        Self {
            date: record.date.format(DATE_FORMAT).to_string(),
            shared: record.shared.as_str(),
            activity: record.activity,
            value: record.value,
        }
    }
}

#[derive(Serialize)]
struct RecordsBody {
    records: Vec<RecordView>,
    chart_json: String,
}

/// Recent records plus the chart of all of them.
#[get("/records")]
pub async fn records_page(
    state: web::Data<HttpState>,
    views: web::Data<Views>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let Some(owner) = current_user(&state, &session).await? else {
        return Ok(see_other("/"));
    };
    let records = state.records_query.recent_records(owner.id()).await?;
    let chart = state.records_query.chart_data(owner.id()).await?;
    views.render(
        "records",
        &Page {
            title: "Records",
            viewer: Some(owner.username().as_ref()),
            notices: session.take_notices(),
            body: RecordsBody {
                records: records.into_iter().map(RecordView::from).collect(),
                chart_json: script_json(&chart)?,
            },
        },
    )
}

/// Log a record; shared records are also posted.
#[post("/records")]
pub async fn log_record(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<RecordForm>,
) -> ApiResult<HttpResponse> {
    let Some(author) = current_user(&state, &session).await? else {
        return Ok(see_other("/"));
    };
    let RecordForm {
        date,
        activity,
        value,
        share,
    } = form.into_inner();
    let request = LogRecordRequest {
        author,
        date,
        activity,
        value,
        share,
    };
    notice_on_invalid(&session, state.records.log_record(request).await)?;
    Ok(see_other("/records"))
}

/// The signed-in user's records grouped by activity, each series ordered by
/// date.
#[utoipa::path(
    get,
    path = "/api/chart_data",
    responses(
        (status = 200, description = "Activity to date-ordered points",
            body = std::collections::BTreeMap<String, Vec<ChartPoint>>),
        (status = 403, description = "Not signed in", body = Error),
        (status = 503, description = "Store unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["records"],
    operation_id = "chartData",
    security(("SessionCookie" = []))
)]
#[get("/api/chart_data")]
pub async fn chart_data(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<ChartData>> {
    let owner = current_user(&state, &session)
        .await?
        .ok_or_else(|| Error::forbidden("not logged in"))?;
    let chart = state.records_query.chart_data(owner.id()).await?;
    Ok(web::Json(chart))
}
