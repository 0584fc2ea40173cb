//! Permission string matching
//!
//! Permissions use the `module:action` form. A granted permission satisfies a
//! required one when it is identical, when it is the module wildcard
//! `module:*`, or when it is the global wildcard `*`.

/// Matches granted permission strings against required ones
#[derive(Debug, Clone, Copy, Default)]
pub struct PermissionMatcher;

impl PermissionMatcher {
    /// Global wildcard permission
    pub const WILDCARD: &'static str = "*";

    /// Check whether a single granted permission satisfies `required`
    pub fn matches(granted: &str, required: &str) -> bool {
        let granted = granted.trim();
        let required = required.trim();

        if granted.is_empty() || required.is_empty() {
            return false;
        }
        if granted == Self::WILDCARD || granted == required {
            return true;
        }

        match (granted.split_once(':'), required.split_once(':')) {
            (Some((module, "*")), Some((required_module, _))) => {
                module.trim() == required_module.trim()
            }
            _ => false,
        }
    }

    /// Check whether any granted permission satisfies `required`
    pub fn any_matches<'a, I>(granted: I, required: &str) -> bool
    where
        I: IntoIterator<Item = &'a String>,
    {
        granted
            .into_iter()
            .any(|permission| Self::matches(permission, required))
    }

    /// Build the permission string for an action on a module
    pub fn permission_for(module: &str, action: &str) -> String {
        format!("{}:{}", module, action)
    }
}
