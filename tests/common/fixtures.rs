//! Test fixtures and data factories
//!
//! All factories create real objects, not mocks.

use fixzit_scope::Config;
use fixzit_scope::auth::{Role, SessionActor, SubRole};
use fixzit_scope::server::AppState;
use fixzit_scope::storage::{DocumentStore, InMemoryStore};
use std::sync::Arc;

pub const ORG: &str = "org-1";
pub const OTHER_ORG: &str = "org-2";

pub const PROPERTY_TOWER: &str = "650000000000000000000001";
pub const PROPERTY_VILLA: &str = "650000000000000000000002";
pub const UNIT_A101: &str = "650000000000000000000101";
pub const UNIT_B201: &str = "650000000000000000000102";
pub const VENDOR_COOL_AIR: &str = "650000000000000000000201";
pub const TENANT_USER: &str = "tenant-user";
pub const TECHNICIAN_USER: &str = "tech-user";

/// Two organisations with work orders, properties, units, vendors, tenants,
/// invoices and purchase orders
pub const SEED: &str = r#"{
    "properties": [
        { "_id": { "$oid": "650000000000000000000001" }, "orgId": "org-1", "name": "Olaya Tower", "code": "P-001", "address": { "city": "Riyadh" } },
        { "_id": { "$oid": "650000000000000000000002" }, "orgId": "org-1", "name": "Palm Villa", "code": "P-002", "address": { "city": "Jeddah" } },
        { "_id": { "$oid": "650000000000000000000003" }, "orgId": "org-2", "name": "Other Tower", "code": "P-900", "address": { "city": "Riyadh" } }
    ],
    "units": [
        { "_id": { "$oid": "650000000000000000000101" }, "orgId": "org-1", "unitNumber": "A-101", "propertyId": { "$oid": "650000000000000000000001" } },
        { "_id": { "$oid": "650000000000000000000102" }, "orgId": "org-1", "unitNumber": "B-201", "propertyId": { "$oid": "650000000000000000000002" } },
        { "_id": { "$oid": "650000000000000000000103" }, "orgId": "org-1", "unitNumber": "C-301", "propertyId": { "$oid": "650000000000000000000002" } }
    ],
    "work_orders": [
        { "_id": "wo-1", "orgId": "org-1", "code": "WO-1", "title": "AC not cooling", "propertyId": { "$oid": "650000000000000000000001" },
          "requester": { "userId": "tenant-user" },
          "assignment": { "assignedTo": { "userId": "tech-user", "vendorId": { "$oid": "650000000000000000000201" } } } },
        { "_id": "wo-2", "orgId": "org-1", "code": "WO-2", "title": "Water leak", "propertyId": { "$oid": "650000000000000000000002" },
          "requester": { "userId": "someone-else" },
          "assignment": { "assignedTo": { "userId": "other-tech" } } },
        { "_id": "wo-3", "orgId": "org-1", "code": "WO-3", "title": "AC filter change", "propertyId": { "$oid": "650000000000000000000002" },
          "requester": { "userId": "tenant-user" } },
        { "_id": "wo-4", "orgId": "org-2", "code": "WO-4", "title": "AC noise", "requester": { "userId": "tenant-user" } }
    ],
    "vendors": [
        { "_id": { "$oid": "650000000000000000000201" }, "orgId": "org-1", "name": "Cool Air Co", "code": "V-1", "email": "ops@coolair.sa",
          "bankDetails": { "iban": "SA4420000001234567891234" } },
        { "_id": { "$oid": "650000000000000000000202" }, "orgId": "org-1", "name": "Spark Electric", "code": "V-2", "email": "hi@spark.sa" }
    ],
    "tenants": [
        { "_id": "t-1", "orgId": "org-1", "name": "Sara Ahmed", "email": "sara@example.com", "phone": "+966500000001", "nationalId": "1012345678" }
    ],
    "invoices": [
        { "_id": "inv-1", "orgId": "org-1", "number": "INV-1001", "customer": { "name": "Sara Ahmed" } },
        { "_id": "inv-2", "orgId": "org-2", "number": "INV-2001", "customer": { "name": "Other" } }
    ],
    "orders": [
        { "_id": "po-1", "orgId": "org-1", "orderNumber": "PO-1", "title": "Filters", "vendorId": { "$oid": "650000000000000000000201" } },
        { "_id": "po-2", "orgId": "org-1", "orderNumber": "PO-2", "title": "Cables", "vendorId": { "$oid": "650000000000000000000202" } }
    ]
}"#;

/// In-memory store loaded with [`SEED`]
pub fn seeded_store() -> Arc<InMemoryStore> {
    let store = InMemoryStore::new();
    store.load_seed(SEED).expect("seed fixture is valid");
    Arc::new(store)
}

/// Factory for session actors in [`ORG`]
pub struct ActorFactory;

impl ActorFactory {
    pub fn with_role(id: &str, role: Role) -> SessionActor {
        SessionActor::builder(id, ORG, role)
            .build()
            .expect("valid actor")
    }

    pub fn admin() -> SessionActor {
        Self::with_role("admin-user", Role::Admin)
    }

    pub fn super_admin() -> SessionActor {
        SessionActor::builder("root", "", Role::Viewer)
            .super_admin(true)
            .build()
            .expect("valid actor")
    }

    pub fn tenant() -> SessionActor {
        SessionActor::builder(TENANT_USER, ORG, Role::Tenant)
            .units([UNIT_A101])
            .build()
            .expect("valid actor")
    }

    pub fn technician() -> SessionActor {
        Self::with_role(TECHNICIAN_USER, Role::Technician)
    }

    pub fn vendor() -> SessionActor {
        SessionActor::builder("vendor-user", ORG, Role::Vendor)
            .vendor_id(VENDOR_COOL_AIR)
            .build()
            .expect("valid actor")
    }

    pub fn vendor_without_id() -> SessionActor {
        Self::with_role("vendor-user", Role::Vendor)
    }

    pub fn owner() -> SessionActor {
        SessionActor::builder("owner-user", ORG, Role::Owner)
            .assigned_properties([PROPERTY_VILLA])
            .build()
            .expect("valid actor")
    }

    pub fn property_manager() -> SessionActor {
        SessionActor::builder("pm-user", ORG, Role::PropertyManager)
            .assigned_properties([PROPERTY_TOWER, PROPERTY_VILLA])
            .build()
            .expect("valid actor")
    }

    pub fn support_agent() -> SessionActor {
        SessionActor::builder("support-user", ORG, Role::Viewer)
            .sub_role(SubRole::SupportAgent)
            .build()
            .expect("valid actor")
    }
}

/// Field-encryption secret shared by the test configurations
pub const PII_KEY: &str = "Fixture-Pii-Key-With-More-Than-32-Characters";

/// Default configuration with the required secrets filled in
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.service.security.pii_key = PII_KEY.to_string();
    config
}

/// Application state over the seeded store
pub struct TestContext {
    pub state: AppState,
    pub store: Arc<InMemoryStore>,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_config(test_config())
    }

    pub fn with_config(config: Config) -> Self {
        let store = seeded_store();
        let shared: Arc<dyn DocumentStore> = store.clone();
        let state = AppState::new(config, shared).expect("valid state");
        Self { state, store }
    }

    /// `Authorization` header for `actor`
    pub fn bearer(&self, actor: &SessionActor) -> (&'static str, String) {
        let token = self
            .state
            .auth
            .jwt()
            .create_session_token(actor)
            .expect("token");
        ("Authorization", format!("Bearer {}", token))
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
