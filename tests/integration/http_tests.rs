//! HTTP API tests through the full application

#[cfg(test)]
mod tests {
    use crate::common::TestContext;
    use crate::common::fixtures::{ActorFactory, test_config};
    use actix_web::http::StatusCode;
    use actix_web::{test, web};
    use fixzit_scope::server::HttpServer;
    use serde_json::Value;

    #[actix_web::test]
    async fn test_mixed_entities_skip_forbidden_ones() {
        let ctx = TestContext::new();
        let header = ctx.bearer(&ActorFactory::tenant());
        let app = test::init_service(HttpServer::create_app(web::Data::new(ctx.state))).await;

        let req = test::TestRequest::get()
            .uri("/api/search?entities=invoices,workOrders,units&q=ac")
            .insert_header(header)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        let entities: Vec<&str> = body["data"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|page| page["entity"].as_str())
            .collect();
        assert_eq!(entities, vec!["workOrders", "units"]);
        assert_eq!(body["data"][0]["pagination"]["total"], 2);
        assert_eq!(body["meta"]["query"], "ac");
    }

    #[actix_web::test]
    async fn test_denied_scope_returns_empty_page() {
        let ctx = TestContext::new();
        let header = ctx.bearer(&ActorFactory::vendor_without_id());
        let app = test::init_service(HttpServer::create_app(web::Data::new(ctx.state))).await;

        let req = test::TestRequest::get()
            .uri("/api/search?entity=orders")
            .insert_header(header)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"][0]["items"], Value::Array(Vec::new()));
        assert_eq!(body["data"][0]["pagination"]["total"], 0);
    }

    #[actix_web::test]
    async fn test_pagination_meta() {
        let ctx = TestContext::new();
        let header = ctx.bearer(&ActorFactory::admin());
        let app = test::init_service(HttpServer::create_app(web::Data::new(ctx.state))).await;

        let req = test::TestRequest::get()
            .uri("/api/search?entity=work_orders&page=1&limit=2")
            .insert_header(header)
            .to_request();
        let resp = test::call_service(&app, req).await;

        let body: Value = test::read_body_json(resp).await;
        let pagination = &body["data"][0]["pagination"];
        assert_eq!(pagination["total"], 3);
        assert_eq!(pagination["pages"], 2);
        assert_eq!(pagination["has_next"], true);
        assert_eq!(body["data"][0]["items"].as_array().unwrap().len(), 2);
    }

    #[actix_web::test]
    async fn test_token_from_other_secret_rejected() {
        let ctx = TestContext::new();
        let foreign = TestContext::new();
        let header = foreign.bearer(&ActorFactory::admin());
        let app = test::init_service(HttpServer::create_app(web::Data::new(ctx.state))).await;

        let req = test::TestRequest::get()
            .uri("/api/search")
            .insert_header(header)
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "INVALID_TOKEN");
    }

    #[actix_web::test]
    async fn test_rate_limit_rejects_excess_requests() {
        let mut config = test_config();
        config.service.rate_limit.requests_per_minute = 1;
        config.service.rate_limit.burst = 2;

        let ctx = TestContext::with_config(config);
        let app = test::init_service(HttpServer::create_app(web::Data::new(ctx.state))).await;

        for _ in 0..2 {
            let req = test::TestRequest::get().uri("/health").to_request();
            assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
        }

        let req = test::TestRequest::get().uri("/health").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "RATE_LIMIT_EXCEEDED");
    }

    #[actix_web::test]
    async fn test_rotating_bogus_tokens_share_one_bucket() {
        let mut config = test_config();
        config.service.rate_limit.requests_per_minute = 1;
        config.service.rate_limit.burst = 2;

        let ctx = TestContext::with_config(config);
        let app = test::init_service(HttpServer::create_app(web::Data::new(ctx.state))).await;

        let mut statuses = Vec::new();
        for attempt in 0..3 {
            let req = test::TestRequest::get()
                .uri("/api/search")
                .insert_header(("Authorization", format!("Bearer guess-{}", attempt)))
                .to_request();
            statuses.push(test::call_service(&app, req).await.status());
        }

        assert_eq!(
            statuses,
            vec![
                StatusCode::UNAUTHORIZED,
                StatusCode::UNAUTHORIZED,
                StatusCode::TOO_MANY_REQUESTS
            ]
        );
    }

    #[actix_web::test]
    async fn test_sla_requires_known_priority() {
        let ctx = TestContext::new();
        let header = ctx.bearer(&ActorFactory::technician());
        let app = test::init_service(HttpServer::create_app(web::Data::new(ctx.state))).await;

        let req = test::TestRequest::post()
            .uri("/api/sla/due-date")
            .insert_header(header)
            .set_json(serde_json::json!({
                "created_at": "2025-09-18T13:00:00Z",
                "priority": "whenever"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "BAD_REQUEST");
    }

    #[actix_web::test]
    async fn test_sla_rejects_out_of_range_timestamps() {
        let ctx = TestContext::new();
        let header = ctx.bearer(&ActorFactory::technician());
        let app = test::init_service(HttpServer::create_app(web::Data::new(ctx.state))).await;

        let req = test::TestRequest::post()
            .uri("/api/sla/due-date")
            .insert_header(header)
            .set_json(serde_json::json!({
                "created_at": "1850-01-01T00:00:00Z",
                "priority": "low",
                "now": "2025-09-21T09:00:00Z"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }
}
