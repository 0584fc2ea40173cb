//! SLA deadline endpoint

use crate::server::middleware::get_session_actor;
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::sla::Priority;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::debug;

/// Configure SLA routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/api/sla").route("/due-date", web::post().to(due_date)));
}

/// Body of `POST /api/sla/due-date`
#[derive(Debug, Clone, Deserialize)]
pub struct DueDateRequest {
    pub created_at: DateTime<Utc>,
    pub priority: Priority,
    /// Evaluation instant, defaults to the current time
    #[serde(default)]
    pub now: Option<DateTime<Utc>>,
}

/// Compute the due date and status of an item
async fn due_date(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Json<DueDateRequest>,
) -> ActixResult<HttpResponse> {
    let actor = get_session_actor(&req)?;
    let body = body.into_inner();
    let now = body.now.unwrap_or_else(Utc::now);

    let evaluation = state.sla.evaluate(body.created_at, body.priority, now)?;
    debug!(user_id = actor.id(), status = ?evaluation.status, "SLA due date computed");

    Ok(HttpResponse::Ok().json(ApiResponse::success(evaluation)))
}
