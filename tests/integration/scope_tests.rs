//! Scope resolution executed against the store
//!
//! Each test scopes an empty base query for an actor and checks which seeded
//! rows the resulting filter actually returns.

#[cfg(test)]
mod tests {
    use crate::assert_ok;
    use crate::common::fixtures::{ActorFactory, OTHER_ORG};
    use crate::common::seeded_store;
    use bson::{Bson, Document, doc};
    use fixzit_scope::auth::SessionActor;
    use fixzit_scope::search::{ORG_KEY, SearchEntity, apply_entity_scope};
    use fixzit_scope::storage::{DocumentStore, FindOptions};

    /// Ids visible to `actor` for `entity`, or `None` when scoping denies access
    async fn visible_ids(actor: &SessionActor, entity: SearchEntity) -> Option<Vec<String>> {
        let decision = apply_entity_scope(entity, actor, Document::new());
        if !decision.allowed {
            return None;
        }

        let store = seeded_store();
        let options = FindOptions::default().with_sort(doc! { "_id": 1 });
        let documents = assert_ok!(
            store
                .find(entity.collection(), &decision.query, &options)
                .await
        );

        Some(
            documents
                .iter()
                .map(|d| match d.get("_id") {
                    Some(Bson::ObjectId(id)) => id.to_hex(),
                    Some(other) => other.as_str().unwrap_or_default().to_string(),
                    None => String::new(),
                })
                .collect(),
        )
    }

    #[tokio::test]
    async fn test_tenant_sees_own_requests_in_own_org() {
        let ids = visible_ids(&ActorFactory::tenant(), SearchEntity::WorkOrders).await;
        assert_eq!(ids, Some(vec!["wo-1".to_string(), "wo-3".to_string()]));
    }

    #[tokio::test]
    async fn test_tenant_sees_own_units() {
        let ids = visible_ids(&ActorFactory::tenant(), SearchEntity::Units).await;
        assert_eq!(ids, Some(vec!["650000000000000000000101".to_string()]));
    }

    #[tokio::test]
    async fn test_technician_sees_assigned_work_orders() {
        let ids = visible_ids(&ActorFactory::technician(), SearchEntity::WorkOrders).await;
        assert_eq!(ids, Some(vec!["wo-1".to_string()]));
    }

    #[tokio::test]
    async fn test_vendor_scoped_by_vendor_id() {
        let vendor = ActorFactory::vendor();

        assert_eq!(
            visible_ids(&vendor, SearchEntity::Orders).await,
            Some(vec!["po-1".to_string()])
        );
        assert_eq!(
            visible_ids(&vendor, SearchEntity::WorkOrders).await,
            Some(vec!["wo-1".to_string()])
        );
        assert_eq!(
            visible_ids(&vendor, SearchEntity::Vendors).await,
            Some(vec!["650000000000000000000201".to_string()])
        );
    }

    #[tokio::test]
    async fn test_vendor_without_id_is_denied() {
        let vendor = ActorFactory::vendor_without_id();
        for entity in [
            SearchEntity::Orders,
            SearchEntity::Rfqs,
            SearchEntity::Vendors,
            SearchEntity::WorkOrders,
        ] {
            assert_eq!(visible_ids(&vendor, entity).await, None, "{entity}");
        }
    }

    #[tokio::test]
    async fn test_owner_sees_assigned_property_tree() {
        let owner = ActorFactory::owner();

        assert_eq!(
            visible_ids(&owner, SearchEntity::Properties).await,
            Some(vec!["650000000000000000000002".to_string()])
        );
        assert_eq!(
            visible_ids(&owner, SearchEntity::Units).await.map(|ids| ids.len()),
            Some(2)
        );
        assert_eq!(
            visible_ids(&owner, SearchEntity::WorkOrders).await,
            Some(vec!["wo-2".to_string(), "wo-3".to_string()])
        );
    }

    #[tokio::test]
    async fn test_property_manager_sees_all_assigned_work_orders() {
        let ids = visible_ids(&ActorFactory::property_manager(), SearchEntity::WorkOrders).await;
        assert_eq!(ids.map(|ids| ids.len()), Some(3));
    }

    #[tokio::test]
    async fn test_support_agent_sees_org_work_orders() {
        let ids = visible_ids(&ActorFactory::support_agent(), SearchEntity::WorkOrders).await;
        assert_eq!(ids.map(|ids| ids.len()), Some(3));
    }

    #[tokio::test]
    async fn test_admin_is_confined_to_own_org() {
        let ids = visible_ids(&ActorFactory::admin(), SearchEntity::Invoices).await;
        assert_eq!(ids, Some(vec!["inv-1".to_string()]));
    }

    #[tokio::test]
    async fn test_super_admin_crosses_orgs() {
        let ids = visible_ids(&ActorFactory::super_admin(), SearchEntity::WorkOrders).await;
        assert_eq!(ids.map(|ids| ids.len()), Some(4));
    }

    #[tokio::test]
    async fn test_injected_org_cannot_widen_scope() {
        let decision = apply_entity_scope(
            SearchEntity::Invoices,
            &ActorFactory::admin(),
            doc! { ORG_KEY: OTHER_ORG },
        );

        let store = seeded_store();
        let count = assert_ok!(store.count("invoices", &decision.query).await);
        assert_eq!(count, 0);
    }
}
