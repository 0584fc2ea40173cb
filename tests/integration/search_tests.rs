//! Search service tests over the seeded store

#[cfg(test)]
mod tests {
    use crate::common::TestContext;
    use crate::common::fixtures::ActorFactory;
    use crate::{assert_err, assert_ok};
    use bson::doc;
    use fixzit_scope::FixzitError;
    use fixzit_scope::auth::{Role, SessionActor};
    use fixzit_scope::pii::{ENCRYPTED_PREFIX, PiiGuard};
    use fixzit_scope::search::{SearchEntity, SearchRequest};
    use fixzit_scope::storage::DocumentStore;

    fn request(ctx: &TestContext, text: Option<&str>, entities: Vec<SearchEntity>) -> SearchRequest {
        assert_ok!(ctx.state.search.build_request(text, entities, None, None))
    }

    #[tokio::test]
    async fn test_text_search_is_case_insensitive_and_scoped() {
        let ctx = TestContext::new();
        let request = request(&ctx, Some("ac"), vec![SearchEntity::WorkOrders]);

        let results = assert_ok!(
            ctx.state
                .search
                .search(&ActorFactory::property_manager(), &request)
                .await
        );

        let titles: Vec<&str> = results.results[0]
            .items
            .iter()
            .filter_map(|item| item["title"].as_str())
            .collect();
        assert_eq!(titles, vec!["AC filter change", "AC not cooling"]);
    }

    #[tokio::test]
    async fn test_regex_metacharacters_are_literal() {
        let ctx = TestContext::new();
        let request = request(&ctx, Some(".*"), vec![SearchEntity::WorkOrders]);

        let results = assert_ok!(ctx.state.search.search(&ActorFactory::admin(), &request).await);
        assert_eq!(results.total(), 0);
    }

    #[tokio::test]
    async fn test_pagination_reports_full_total() {
        let ctx = TestContext::new();
        let request = assert_ok!(ctx.state.search.build_request(
            None,
            vec![SearchEntity::WorkOrders],
            Some(2),
            Some(2)
        ));

        let results = assert_ok!(ctx.state.search.search(&ActorFactory::admin(), &request).await);
        assert_eq!(results.results[0].total, 3);
        assert_eq!(results.results[0].items.len(), 1);
    }

    #[tokio::test]
    async fn test_all_entities_searched_when_none_requested() {
        let ctx = TestContext::new();
        let request = request(&ctx, None, Vec::new());

        let results = assert_ok!(ctx.state.search.search(&ActorFactory::tenant(), &request).await);
        let entities: Vec<SearchEntity> = results.results.iter().map(|r| r.entity).collect();
        assert_eq!(entities, vec![SearchEntity::WorkOrders, SearchEntity::Units]);
    }

    #[tokio::test]
    async fn test_permission_string_grants_search() {
        let ctx = TestContext::new();
        let viewer = SessionActor::builder("viewer", "org-1", Role::Viewer)
            .permission("invoices:read")
            .build()
            .unwrap();
        let request = request(&ctx, None, vec![SearchEntity::Invoices]);

        let results = assert_ok!(ctx.state.search.search(&viewer, &request).await);
        assert_eq!(results.total(), 1);
    }

    #[tokio::test]
    async fn test_forbidden_single_entity() {
        let ctx = TestContext::new();
        let request = request(&ctx, None, vec![SearchEntity::Invoices]);

        let err = assert_err!(ctx.state.search.search(&ActorFactory::tenant(), &request).await);
        assert!(matches!(err, FixzitError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_vendor_bank_details_masked_for_admin() {
        let ctx = TestContext::new();
        let request = request(&ctx, Some("cool"), vec![SearchEntity::Vendors]);

        let results = assert_ok!(ctx.state.search.search(&ActorFactory::admin(), &request).await);
        let iban = results.results[0].items[0]["bankDetails"]["iban"]
            .as_str()
            .unwrap()
            .to_string();
        assert_eq!(iban, format!("SA{}1234", "*".repeat(18)));

        let results = assert_ok!(
            ctx.state
                .search
                .search(&ActorFactory::super_admin(), &request)
                .await
        );
        assert_eq!(
            results.results[0].items[0]["bankDetails"]["iban"],
            "SA4420000001234567891234"
        );
    }

    #[tokio::test]
    async fn test_encrypted_fields_are_decrypted_then_masked() {
        let ctx = TestContext::new();
        let guard = assert_ok!(PiiGuard::new(ctx.state.config.security()));

        let mut tenant = doc! {
            "orgId": "org-1",
            "name": "Omar Saleh",
            "nationalId": "2098765432",
        };
        assert_eq!(assert_ok!(guard.encrypt_document("tenants", &mut tenant)), 1);
        assert!(tenant.get_str("nationalId").unwrap().starts_with(ENCRYPTED_PREFIX));
        assert_ok!(ctx.store.insert("tenants", tenant).await);

        let request = request(&ctx, Some("omar"), vec![SearchEntity::Tenants]);

        let masked = assert_ok!(ctx.state.search.search(&ActorFactory::admin(), &request).await);
        assert_eq!(masked.results[0].items[0]["nationalId"], "******5432");

        let plain = assert_ok!(
            ctx.state
                .search
                .search(&ActorFactory::super_admin(), &request)
                .await
        );
        assert_eq!(plain.results[0].items[0]["nationalId"], "2098765432");
    }
}
