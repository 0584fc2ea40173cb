//! Tests for server module
//!
//! Requests go through the full application: middleware, routing and handlers.

#[cfg(test)]
mod tests {
    use crate::auth::{Role, SessionActor};
    use crate::config::Config;
    use crate::server::middleware::REQUEST_ID_HEADER;
    use crate::server::server::HttpServer;
    use crate::server::state::AppState;
    use crate::storage::{DocumentStore, InMemoryStore};
    use actix_web::http::StatusCode;
    use actix_web::{test, web};
    use serde_json::{Value, json};
    use std::sync::Arc;

    const SEED: &str = r#"{
        "work_orders": [
            { "_id": "wo-1", "orgId": "org-1", "title": "Leaking AC", "requester": { "userId": "tenant-1" } },
            { "_id": "wo-2", "orgId": "org-1", "title": "Broken lift", "requester": { "userId": "tenant-2" } }
        ],
        "invoices": [
            { "_id": "inv-1", "orgId": "org-1", "number": "INV-001", "payment": { "bankAccount": "SA0380000000608010167519" } }
        ]
    }"#;

    fn state() -> AppState {
        let store = InMemoryStore::new();
        store.load_seed(SEED).unwrap();
        let store: Arc<dyn DocumentStore> = Arc::new(store);
        let mut config = Config::default();
        config.service.security.pii_key = "Server-Test-Pii-Key-0123456789-abcdef".to_string();
        AppState::new(config, store).unwrap()
    }

    fn bearer(state: &AppState, actor: &SessionActor) -> (&'static str, String) {
        let token = state.auth.jwt().create_session_token(actor).unwrap();
        ("Authorization", format!("Bearer {}", token))
    }

    fn actor(id: &str, role: Role) -> SessionActor {
        SessionActor::builder(id, "org-1", role).build().unwrap()
    }

    #[actix_web::test]
    async fn test_health_is_public() {
        let app = test::init_service(HttpServer::create_app(web::Data::new(state()))).await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert!(resp.headers().contains_key(REQUEST_ID_HEADER));

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["status"], "healthy");
    }

    #[actix_web::test]
    async fn test_request_id_is_echoed() {
        let app = test::init_service(HttpServer::create_app(web::Data::new(state()))).await;

        let req = test::TestRequest::get()
            .uri("/health")
            .insert_header((REQUEST_ID_HEADER, "req-123"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.headers().get(REQUEST_ID_HEADER).unwrap(), "req-123");
    }

    #[actix_web::test]
    async fn test_search_requires_session() {
        let app = test::init_service(HttpServer::create_app(web::Data::new(state()))).await;

        let req = test::TestRequest::get().uri("/api/search?q=ac").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert!(resp.headers().contains_key(REQUEST_ID_HEADER));
    }

    #[actix_web::test]
    async fn test_rejected_request_carries_request_id() {
        let app = test::init_service(HttpServer::create_app(web::Data::new(state()))).await;

        let req = test::TestRequest::get()
            .uri("/api/search")
            .insert_header((REQUEST_ID_HEADER, "abc-123"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(resp.headers().get(REQUEST_ID_HEADER).unwrap(), "abc-123");

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "AUTH_ERROR");
        assert_eq!(body["error"]["request_id"], "abc-123");
    }

    #[actix_web::test]
    async fn test_handler_error_carries_request_id() {
        let state = state();
        let header = bearer(&state, &actor("tenant-1", Role::Tenant));
        let app = test::init_service(HttpServer::create_app(web::Data::new(state))).await;

        let req = test::TestRequest::get()
            .uri("/api/search?entity=invoices")
            .insert_header(header)
            .insert_header((REQUEST_ID_HEADER, "req-403"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        assert_eq!(resp.headers().get(REQUEST_ID_HEADER).unwrap(), "req-403");

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["request_id"], "req-403");
    }

    #[actix_web::test]
    async fn test_tenant_search_is_scoped() {
        let state = state();
        let header = bearer(&state, &actor("tenant-1", Role::Tenant));
        let app = test::init_service(HttpServer::create_app(web::Data::new(state))).await;

        let req = test::TestRequest::get()
            .uri("/api/search?entity=workOrders")
            .insert_header(header)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        let page = &body["data"][0];
        assert_eq!(page["entity"], "workOrders");
        assert_eq!(page["pagination"]["total"], 1);
        assert_eq!(page["items"][0]["_id"], "wo-1");
        assert_eq!(body["meta"]["total"], 1);
    }

    #[actix_web::test]
    async fn test_forbidden_entity() {
        let state = state();
        let header = bearer(&state, &actor("tenant-1", Role::Tenant));
        let app = test::init_service(HttpServer::create_app(web::Data::new(state))).await;

        let req = test::TestRequest::get()
            .uri("/api/search?entity=invoices")
            .insert_header(header)
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "FORBIDDEN");
    }

    #[actix_web::test]
    async fn test_unknown_entity_and_bad_paging() {
        let state = state();
        let header = bearer(&state, &actor("admin-1", Role::Admin));
        let app = test::init_service(HttpServer::create_app(web::Data::new(state))).await;

        for uri in [
            "/api/search?entity=payroll",
            "/api/search?page=0",
            "/api/search?limit=1000",
            "/api/search?page=abc",
        ] {
            let req = test::TestRequest::get()
                .uri(uri)
                .insert_header(header.clone())
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{uri}");
        }
    }

    #[actix_web::test]
    async fn test_finance_sees_masked_bank_account() {
        let state = state();
        let header = bearer(&state, &actor("fin-1", Role::Finance));
        let app = test::init_service(HttpServer::create_app(web::Data::new(state))).await;

        let req = test::TestRequest::get()
            .uri("/api/search?entities=invoices")
            .insert_header(header)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        let account = body["data"][0]["items"][0]["payment"]["bankAccount"]
            .as_str()
            .unwrap();
        assert!(account.starts_with("SA"));
        assert!(account.ends_with("7519"));
        assert!(account.contains('*'));
    }

    #[actix_web::test]
    async fn test_sla_due_date() {
        let state = state();
        let header = bearer(&state, &actor("tech-1", Role::Technician));
        let app = test::init_service(HttpServer::create_app(web::Data::new(state))).await;

        // Thursday 16:00 in Riyadh
        let req = test::TestRequest::post()
            .uri("/api/sla/due-date")
            .insert_header(header)
            .set_json(json!({
                "created_at": "2025-09-18T13:00:00Z",
                "priority": "urgent",
                "now": "2025-09-18T14:00:00Z"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["due_at"], "2025-09-21T07:00:00Z");
        assert_eq!(body["data"]["status"], "on_track");
        assert_eq!(body["data"]["elapsed_business_minutes"], 60);
    }

    #[actix_web::test]
    async fn test_sla_rejects_malformed_body() {
        let state = state();
        let header = bearer(&state, &actor("tech-1", Role::Technician));
        let app = test::init_service(HttpServer::create_app(web::Data::new(state))).await;

        let req = test::TestRequest::post()
            .uri("/api/sla/due-date")
            .insert_header(header)
            .set_json(json!({ "created_at": "yesterday", "priority": "urgent" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
