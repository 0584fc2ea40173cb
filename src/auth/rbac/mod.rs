//! Role-Based Access Control (RBAC) system
//!
//! Roles, sub-roles, permission-string matching and search access decisions.

mod permissions;
mod system;
mod types;

pub use permissions::PermissionMatcher;
pub use system::RbacSystem;
pub use types::{Role, SubRole};
