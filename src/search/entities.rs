//! Searchable entity registry

use crate::auth::rbac::Role;
use crate::utils::error::{FixzitError, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Logical search target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SearchEntity {
    WorkOrders,
    Properties,
    Units,
    Tenants,
    Vendors,
    Invoices,
    Orders,
    Rfqs,
    Agents,
    Listings,
    Projects,
}

/// Static description of a searchable entity
#[derive(Debug, Clone)]
pub struct EntityDescriptor {
    pub entity: SearchEntity,
    /// Logical name, also the permission module key
    pub name: &'static str,
    /// Backing collection
    pub collection: &'static str,
    /// Roles granting read access
    pub roles: Vec<Role>,
    /// Fields matched by free-text search
    pub search_fields: Vec<&'static str>,
}

impl EntityDescriptor {
    fn new(
        entity: SearchEntity,
        name: &'static str,
        collection: &'static str,
        roles: &[Role],
        search_fields: &[&'static str],
    ) -> Self {
        Self {
            entity,
            name,
            collection,
            roles: roles.to_vec(),
            search_fields: search_fields.to_vec(),
        }
    }

    /// Permission module keys accepted for this entity
    pub fn modules(&self) -> [&'static str; 2] {
        [self.name, self.collection]
    }
}

static REGISTRY: Lazy<Vec<EntityDescriptor>> = Lazy::new(|| {
    use Role::*;
    use SearchEntity as E;

    vec![
        EntityDescriptor::new(
            E::WorkOrders,
            "workOrders",
            "work_orders",
            &[
                Admin,
                CorporateAdmin,
                CorporateOwner,
                Manager,
                FmManager,
                PropertyManager,
                Owner,
                Tenant,
                Technician,
                TeamMember,
            ],
            &["title", "description", "code"],
        ),
        EntityDescriptor::new(
            E::Properties,
            "properties",
            "properties",
            &[
                Admin,
                CorporateAdmin,
                CorporateOwner,
                Manager,
                FmManager,
                PropertyManager,
                Owner,
                TeamMember,
            ],
            &["name", "code", "address.city"],
        ),
        EntityDescriptor::new(
            E::Units,
            "units",
            "units",
            &[
                Admin,
                CorporateAdmin,
                CorporateOwner,
                Manager,
                FmManager,
                PropertyManager,
                Owner,
                Tenant,
            ],
            &["unitNumber", "name"],
        ),
        EntityDescriptor::new(
            E::Tenants,
            "tenants",
            "tenants",
            &[Admin, CorporateAdmin, CorporateOwner, Manager, PropertyManager],
            &["name", "email", "phone"],
        ),
        EntityDescriptor::new(
            E::Vendors,
            "vendors",
            "vendors",
            &[
                Admin,
                CorporateAdmin,
                CorporateOwner,
                Manager,
                FmManager,
                Procurement,
                Vendor,
            ],
            &["name", "code", "email"],
        ),
        EntityDescriptor::new(
            E::Invoices,
            "invoices",
            "invoices",
            &[Admin, CorporateAdmin, CorporateOwner, Finance, Auditor],
            &["number", "customer.name"],
        ),
        EntityDescriptor::new(
            E::Orders,
            "orders",
            "orders",
            &[Admin, CorporateAdmin, Procurement, Vendor],
            &["orderNumber", "title"],
        ),
        EntityDescriptor::new(
            E::Rfqs,
            "rfqs",
            "rfqs",
            &[Admin, CorporateAdmin, Procurement, Vendor],
            &["code", "title"],
        ),
        EntityDescriptor::new(
            E::Agents,
            "agents",
            "agents",
            &[Admin, CorporateAdmin, CorporateOwner, Manager],
            &["name", "licenseNumber"],
        ),
        EntityDescriptor::new(
            E::Listings,
            "listings",
            "listings",
            &[Admin, CorporateAdmin, CorporateOwner, Manager, Owner],
            &["title", "address.city"],
        ),
        EntityDescriptor::new(
            E::Projects,
            "projects",
            "projects",
            &[Admin, CorporateAdmin, CorporateOwner, Manager, FmManager],
            &["name", "code"],
        ),
    ]
});

/// Lower-cased logical names and collection aliases
static BY_NAME: Lazy<HashMap<String, SearchEntity>> = Lazy::new(|| {
    let mut names = HashMap::new();
    for descriptor in REGISTRY.iter() {
        for module in descriptor.modules() {
            names.insert(module.to_ascii_lowercase(), descriptor.entity);
        }
    }
    names
});

impl SearchEntity {
    /// Every entity, in registry order
    pub const ALL: [SearchEntity; 11] = [
        SearchEntity::WorkOrders,
        SearchEntity::Properties,
        SearchEntity::Units,
        SearchEntity::Tenants,
        SearchEntity::Vendors,
        SearchEntity::Invoices,
        SearchEntity::Orders,
        SearchEntity::Rfqs,
        SearchEntity::Agents,
        SearchEntity::Listings,
        SearchEntity::Projects,
    ];

    pub fn descriptor(self) -> &'static EntityDescriptor {
        &REGISTRY[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.descriptor().name
    }

    pub fn collection(self) -> &'static str {
        self.descriptor().collection
    }

    /// Look up an entity by logical name or collection alias, ignoring case
    pub fn lookup(name: &str) -> Option<Self> {
        BY_NAME.get(&name.trim().to_ascii_lowercase()).copied()
    }
}

impl FromStr for SearchEntity {
    type Err = FixzitError;

    fn from_str(s: &str) -> Result<Self> {
        Self::lookup(s).ok_or_else(|| {
            FixzitError::bad_request(format!("Unknown search entity: {}", s.trim()))
        })
    }
}

impl fmt::Display for SearchEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
