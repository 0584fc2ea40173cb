//! RBAC system core functionality

use super::permissions::PermissionMatcher;
use super::types::SubRole;
use crate::auth::actor::SessionActor;
use crate::search::entities::SearchEntity;
use std::collections::{HashMap, HashSet};
use tracing::{debug, trace};

/// Read-access decisions for searchable entities
#[derive(Debug, Clone)]
pub struct RbacSystem {
    /// Entities each sub-role may read regardless of the primary role
    pub(super) sub_role_grants: HashMap<SubRole, HashSet<SearchEntity>>,
}

impl Default for RbacSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl RbacSystem {
    /// Create an RBAC system with the standard sub-role grants
    pub fn new() -> Self {
        use SearchEntity::*;

        let sub_role_grants = HashMap::from([
            (SubRole::SupportAgent, HashSet::from([Tenants, WorkOrders])),
            (SubRole::FinanceOfficer, HashSet::from([Invoices, Vendors])),
            (SubRole::HrOfficer, HashSet::from([Tenants])),
            (
                SubRole::OperationsManager,
                HashSet::from([WorkOrders, Properties, Units, Vendors]),
            ),
        ]);

        debug!("RBAC system initialized with {} sub-role grants", sub_role_grants.len());
        Self { sub_role_grants }
    }

    /// Whether `sub_role` independently grants read access to `entity`
    pub fn sub_role_grants(&self, sub_role: &SubRole, entity: SearchEntity) -> bool {
        self.sub_role_grants
            .get(sub_role)
            .is_some_and(|entities| entities.contains(&entity))
    }

    /// Decide whether the actor may search `entity` at all
    ///
    /// Row-level narrowing happens afterwards in the scope resolver; this only
    /// answers the yes/no question.
    pub fn can_search_entity(&self, actor: &SessionActor, entity: SearchEntity) -> bool {
        let descriptor = entity.descriptor();

        let granted_by = if actor.is_super_admin() {
            Some("super_admin")
        } else if actor.holds_any_role(&descriptor.roles) {
            Some("role")
        } else if self.has_read_permission(actor, entity) {
            Some("permission")
        } else if actor
            .sub_role()
            .is_some_and(|sub_role| self.sub_role_grants(sub_role, entity))
        {
            Some("sub_role")
        } else {
            None
        };

        trace!(
            entity = %entity,
            role = %actor.role(),
            granted_by = granted_by.unwrap_or("none"),
            "Search permission check"
        );
        granted_by.is_some()
    }

    /// Entities the actor may search, in registry order
    pub fn searchable_entities(&self, actor: &SessionActor) -> Vec<SearchEntity> {
        SearchEntity::ALL
            .into_iter()
            .filter(|entity| self.can_search_entity(actor, *entity))
            .collect()
    }

    fn has_read_permission(&self, actor: &SessionActor, entity: SearchEntity) -> bool {
        entity.descriptor().modules().iter().any(|module| {
            let required = PermissionMatcher::permission_for(module, "read");
            PermissionMatcher::any_matches(actor.permissions(), &required)
        })
    }
}
