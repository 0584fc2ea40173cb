//! Row-level scoping of search queries
//!
//! [`apply_entity_scope`] adds the tenant constraint and the role predicates
//! that restrict an actor to the rows it is entitled to see.

use super::entities::SearchEntity;
use super::ids::{normalize_id, normalize_ids};
use crate::auth::actor::SessionActor;
use crate::auth::rbac::{Role, SubRole};
use bson::{Bson, Document, doc};
use tracing::{debug, warn};

/// Tenant constraint key present on every scoped query
pub const ORG_KEY: &str = "orgId";

/// Outcome of scoping a query
#[derive(Debug, Clone, PartialEq)]
pub struct ScopeDecision {
    /// `false` means the actor can see no rows and the store must not be queried
    pub allowed: bool,
    pub query: Document,
}

impl ScopeDecision {
    fn allow(query: Document) -> Self {
        Self {
            allowed: true,
            query,
        }
    }

    fn deny(query: Document) -> Self {
        Self {
            allowed: false,
            query,
        }
    }
}

/// Add `key: value` to the query without overwriting an existing constraint
///
/// A second constraint on the same key is appended under `$and`.
pub fn add_predicate(query: &mut Document, key: &str, value: impl Into<Bson>) {
    let value = value.into();

    if !query.contains_key(key) {
        query.insert(key, value);
        return;
    }

    let mut predicate = Document::new();
    predicate.insert(key, value);

    match query.get_mut("$and") {
        Some(Bson::Array(clauses)) => clauses.push(Bson::Document(predicate)),
        Some(existing) => {
            let previous = std::mem::replace(existing, Bson::Null);
            *existing = Bson::Array(vec![previous, Bson::Document(predicate)]);
        }
        None => {
            query.insert("$and", vec![Bson::Document(predicate)]);
        }
    }
}

fn ensure_org_constraint(actor: &SessionActor, query: &mut Document) {
    let org_id = Bson::String(actor.org_id().to_string());

    match query.get(ORG_KEY) {
        Some(existing) if *existing == org_id => {}
        Some(existing) => {
            warn!(
                existing = %existing,
                org_id = actor.org_id(),
                "Base query targets another organisation, adding actor constraint"
            );
            add_predicate(query, ORG_KEY, org_id);
        }
        None => {
            query.insert(ORG_KEY, org_id);
        }
    }
}

/// Scope `base` to the rows of `entity` the actor may see
pub fn apply_entity_scope(
    entity: SearchEntity,
    actor: &SessionActor,
    base: Document,
) -> ScopeDecision {
    if actor.is_super_admin() {
        debug!(entity = %entity, rule = "super_admin", allowed = true, "Entity scope applied");
        return ScopeDecision::allow(base);
    }

    let mut query = base;
    ensure_org_constraint(actor, &mut query);

    let (rule, decision) = narrow(entity, actor, query);
    debug!(
        entity = %entity,
        role = %actor.role(),
        rule,
        allowed = decision.allowed,
        "Entity scope applied"
    );
    decision
}

fn narrow(
    entity: SearchEntity,
    actor: &SessionActor,
    mut query: Document,
) -> (&'static str, ScopeDecision) {
    use SearchEntity::*;

    let role = actor.role();
    let shared_entity = matches!(entity, WorkOrders | Properties);

    if role.is_org_wide() {
        return ("org_wide", ScopeDecision::allow(query));
    }
    if shared_entity
        && (*role == Role::TeamMember || actor.has_sub_role(&SubRole::SupportAgent))
    {
        return ("org_wide_shared", ScopeDecision::allow(query));
    }

    match (role, entity) {
        (Role::Tenant, WorkOrders) => {
            add_predicate(&mut query, "requester.userId", normalize_id(actor.id()));
            ("tenant_requester", ScopeDecision::allow(query))
        }
        (Role::Tenant, Units) => {
            let units = normalize_ids(actor.units());
            if units.is_empty() {
                return ("tenant_units", ScopeDecision::deny(query));
            }
            add_predicate(&mut query, "_id", doc! { "$in": units });
            ("tenant_units", ScopeDecision::allow(query))
        }
        (Role::Technician, WorkOrders) => {
            add_predicate(
                &mut query,
                "assignment.assignedTo.userId",
                normalize_id(actor.id()),
            );
            ("technician_assignee", ScopeDecision::allow(query))
        }
        (Role::Vendor, Orders | Rfqs | Vendors | WorkOrders) => {
            let Some(vendor_id) = actor.vendor_id() else {
                return ("vendor", ScopeDecision::deny(query));
            };
            let key = match entity {
                Vendors => "_id",
                WorkOrders => "assignment.assignedTo.vendorId",
                _ => "vendorId",
            };
            add_predicate(&mut query, key, normalize_id(vendor_id));
            ("vendor", ScopeDecision::allow(query))
        }
        (Role::Owner | Role::PropertyManager, Properties | Units | WorkOrders) => {
            let properties = normalize_ids(actor.assigned_properties());
            if properties.is_empty() {
                return ("assigned_properties", ScopeDecision::deny(query));
            }
            let key = if entity == Properties { "_id" } else { "propertyId" };
            add_predicate(&mut query, key, doc! { "$in": properties });
            ("assigned_properties", ScopeDecision::allow(query))
        }
        _ => ("org_only", ScopeDecision::allow(query)),
    }
}
