//! Authenticated session actor
//!
//! A [`SessionActor`] is built once per request from a verified session token
//! and is read-only afterwards. The builder exists for minting tokens and for
//! tests.

use super::rbac::{Role, SubRole};
use crate::utils::error::{FixzitError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Identity, tenant and role attributes of the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionActor {
    id: String,
    org_id: String,
    role: Role,
    sub_role: Option<SubRole>,
    roles: Vec<Role>,
    permissions: BTreeSet<String>,
    is_super_admin: bool,
    assigned_properties: Vec<String>,
    units: Vec<String>,
    vendor_id: Option<String>,
}

impl SessionActor {
    /// Start building an actor with its identity, organisation and primary role
    pub fn builder(
        id: impl Into<String>,
        org_id: impl Into<String>,
        role: Role,
    ) -> SessionActorBuilder {
        SessionActorBuilder {
            actor: SessionActor {
                id: id.into(),
                org_id: org_id.into(),
                role,
                sub_role: None,
                roles: Vec::new(),
                permissions: BTreeSet::new(),
                is_super_admin: false,
                assigned_properties: Vec::new(),
                units: Vec::new(),
                vendor_id: None,
            },
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn org_id(&self) -> &str {
        &self.org_id
    }

    /// Primary role
    pub fn role(&self) -> &Role {
        &self.role
    }

    pub fn sub_role(&self) -> Option<&SubRole> {
        self.sub_role.as_ref()
    }

    /// Auxiliary roles
    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    pub fn permissions(&self) -> &BTreeSet<String> {
        &self.permissions
    }

    pub fn assigned_properties(&self) -> &[String] {
        &self.assigned_properties
    }

    pub fn units(&self) -> &[String] {
        &self.units
    }

    pub fn vendor_id(&self) -> Option<&str> {
        self.vendor_id.as_deref()
    }

    /// Raw super-admin flag carried by the token
    pub fn super_admin_flag(&self) -> bool {
        self.is_super_admin
    }

    /// Whether the actor holds `role` as its primary or an auxiliary role
    pub fn holds_role(&self, role: &Role) -> bool {
        if matches!(role, Role::Other(_)) {
            return false;
        }
        self.role == *role || self.roles.contains(role)
    }

    /// Whether the actor holds any of `roles`
    pub fn holds_any_role(&self, roles: &[Role]) -> bool {
        roles.iter().any(|role| self.holds_role(role))
    }

    /// Recognised super admin: the flag is set or the actor holds `SUPER_ADMIN`
    pub fn is_super_admin(&self) -> bool {
        self.is_super_admin || self.holds_role(&Role::SuperAdmin)
    }

    pub fn has_sub_role(&self, sub_role: &SubRole) -> bool {
        self.sub_role.as_ref() == Some(sub_role)
    }
}

/// Builder for [`SessionActor`]
#[derive(Debug, Clone)]
pub struct SessionActorBuilder {
    actor: SessionActor,
}

impl SessionActorBuilder {
    pub fn sub_role(mut self, sub_role: SubRole) -> Self {
        self.actor.sub_role = Some(sub_role);
        self
    }

    /// Add an auxiliary role
    pub fn role(mut self, role: Role) -> Self {
        if !self.actor.roles.contains(&role) {
            self.actor.roles.push(role);
        }
        self
    }

    /// Add auxiliary roles
    pub fn roles<I: IntoIterator<Item = Role>>(mut self, roles: I) -> Self {
        for role in roles {
            self = self.role(role);
        }
        self
    }

    /// Grant a permission string (trimmed; empty strings are ignored)
    pub fn permission(mut self, permission: impl AsRef<str>) -> Self {
        let permission = permission.as_ref().trim();
        if !permission.is_empty() {
            self.actor.permissions.insert(permission.to_string());
        }
        self
    }

    pub fn permissions<I, S>(mut self, permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for permission in permissions {
            self = self.permission(permission);
        }
        self
    }

    pub fn super_admin(mut self, is_super_admin: bool) -> Self {
        self.actor.is_super_admin = is_super_admin;
        self
    }

    pub fn assigned_properties<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.actor.assigned_properties = ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn units<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.actor.units = ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn vendor_id(mut self, vendor_id: impl Into<String>) -> Self {
        let vendor_id = vendor_id.into();
        self.actor.vendor_id = (!vendor_id.trim().is_empty()).then_some(vendor_id);
        self
    }

    /// Finish building, rejecting actors without identity or organisation
    pub fn build(self) -> Result<SessionActor> {
        let actor = self.actor;

        if actor.id.trim().is_empty() {
            return Err(FixzitError::auth("Session actor is missing a user id"));
        }
        if actor.org_id.trim().is_empty() && !actor.is_super_admin() {
            return Err(FixzitError::auth("Session actor is missing an organisation id"));
        }

        Ok(actor)
    }
}
