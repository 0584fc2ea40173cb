//! RBAC type definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Normalise a wire role name: trimmed, upper-snake case
fn normalize_role_name(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| match c {
            '-' | ' ' => '_',
            c => c.to_ascii_uppercase(),
        })
        .collect()
}

/// Primary or auxiliary role held by an actor
///
/// Unknown role names are kept verbatim in [`Role::Other`] and never grant access.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    SuperAdmin,
    CorporateAdmin,
    Admin,
    CorporateOwner,
    Manager,
    FmManager,
    PropertyManager,
    Owner,
    Tenant,
    Technician,
    Vendor,
    TeamMember,
    Finance,
    Hr,
    Procurement,
    Auditor,
    Viewer,
    Other(String),
}

impl Role {
    /// Upper-snake wire name
    pub fn as_str(&self) -> &str {
        match self {
            Role::SuperAdmin => "SUPER_ADMIN",
            Role::CorporateAdmin => "CORPORATE_ADMIN",
            Role::Admin => "ADMIN",
            Role::CorporateOwner => "CORPORATE_OWNER",
            Role::Manager => "MANAGER",
            Role::FmManager => "FM_MANAGER",
            Role::PropertyManager => "PROPERTY_MANAGER",
            Role::Owner => "OWNER",
            Role::Tenant => "TENANT",
            Role::Technician => "TECHNICIAN",
            Role::Vendor => "VENDOR",
            Role::TeamMember => "TEAM_MEMBER",
            Role::Finance => "FINANCE",
            Role::Hr => "HR",
            Role::Procurement => "PROCUREMENT",
            Role::Auditor => "AUDITOR",
            Role::Viewer => "VIEWER",
            Role::Other(name) => name,
        }
    }

    /// Parse a role name case-insensitively
    pub fn parse(name: &str) -> Self {
        match normalize_role_name(name).as_str() {
            "SUPER_ADMIN" => Role::SuperAdmin,
            "CORPORATE_ADMIN" => Role::CorporateAdmin,
            "ADMIN" => Role::Admin,
            "CORPORATE_OWNER" => Role::CorporateOwner,
            "MANAGER" => Role::Manager,
            "FM_MANAGER" => Role::FmManager,
            "PROPERTY_MANAGER" => Role::PropertyManager,
            "OWNER" => Role::Owner,
            "TENANT" => Role::Tenant,
            "TECHNICIAN" => Role::Technician,
            "VENDOR" => Role::Vendor,
            "TEAM_MEMBER" => Role::TeamMember,
            "FINANCE" => Role::Finance,
            "HR" => Role::Hr,
            "PROCUREMENT" => Role::Procurement,
            "AUDITOR" => Role::Auditor,
            "VIEWER" => Role::Viewer,
            _ => Role::Other(name.trim().to_string()),
        }
    }

    /// Roles that see every row of their organisation for every entity
    pub fn is_org_wide(&self) -> bool {
        matches!(
            self,
            Role::Admin
                | Role::CorporateAdmin
                | Role::CorporateOwner
                | Role::Manager
                | Role::FmManager
        )
    }
}

impl FromStr for Role {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Role::parse(s))
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        Role::parse(&value)
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Secondary role tag granting access independently of the primary role
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SubRole {
    SupportAgent,
    FinanceOfficer,
    HrOfficer,
    OperationsManager,
    Other(String),
}

impl SubRole {
    /// Upper-snake wire name
    pub fn as_str(&self) -> &str {
        match self {
            SubRole::SupportAgent => "SUPPORT_AGENT",
            SubRole::FinanceOfficer => "FINANCE_OFFICER",
            SubRole::HrOfficer => "HR_OFFICER",
            SubRole::OperationsManager => "OPERATIONS_MANAGER",
            SubRole::Other(name) => name,
        }
    }

    /// Parse a sub-role name case-insensitively
    pub fn parse(name: &str) -> Self {
        match normalize_role_name(name).as_str() {
            "SUPPORT_AGENT" => SubRole::SupportAgent,
            "FINANCE_OFFICER" => SubRole::FinanceOfficer,
            "HR_OFFICER" => SubRole::HrOfficer,
            "OPERATIONS_MANAGER" => SubRole::OperationsManager,
            _ => SubRole::Other(name.trim().to_string()),
        }
    }
}

impl FromStr for SubRole {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(SubRole::parse(s))
    }
}

impl From<String> for SubRole {
    fn from(value: String) -> Self {
        SubRole::parse(&value)
    }
}

impl From<SubRole> for String {
    fn from(sub_role: SubRole) -> Self {
        sub_role.as_str().to_string()
    }
}

impl fmt::Display for SubRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
