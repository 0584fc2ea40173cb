//! Scoped search endpoint

use crate::search::{EntityResults, SearchEntity, SearchService};
use crate::server::middleware::get_session_actor;
use crate::server::routes::{ApiResponse, PaginationMeta};
use crate::server::state::AppState;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

/// Configure search routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/search", web::get().to(search));
}

/// Query parameters of `GET /api/search`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    /// Free text
    pub q: Option<String>,
    /// Single entity name
    pub entity: Option<String>,
    /// Comma-separated entity names
    pub entities: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

/// One entity's page in the response
#[derive(Debug, Clone, Serialize)]
pub struct EntityPage {
    pub entity: SearchEntity,
    pub items: Vec<serde_json::Value>,
    pub pagination: PaginationMeta,
}

impl EntityPage {
    fn new(results: EntityResults, page: u32, limit: u32) -> Self {
        Self {
            entity: results.entity,
            items: results.items,
            pagination: PaginationMeta::new(page, limit, results.total),
        }
    }
}

/// Search every requested entity the caller may read
async fn search(
    req: HttpRequest,
    state: web::Data<AppState>,
    query: web::Query<SearchQuery>,
) -> ActixResult<HttpResponse> {
    let actor = get_session_actor(&req)?;
    let query = query.into_inner();

    let entities =
        SearchService::parse_entities(query.entity.as_deref(), query.entities.as_deref())?;
    let request = state
        .search
        .build_request(query.q.as_deref(), entities, query.page, query.limit)?;

    let results = state.search.search(&actor, &request).await?;
    let total = results.total();

    info!(
        user_id = actor.id(),
        entities = results.results.len(),
        total,
        "Search completed"
    );

    let pages: Vec<EntityPage> = results
        .results
        .into_iter()
        .map(|r| EntityPage::new(r, request.page, request.limit))
        .collect();

    let meta = json!({
        "query": results.query,
        "page": request.page,
        "limit": request.limit,
        "total": total,
    });

    Ok(HttpResponse::Ok().json(ApiResponse::success_with_meta(pages, meta)))
}
