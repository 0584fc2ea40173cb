//! Authentication and authorization
//!
//! Session tokens are verified into a [`SessionActor`], whose roles and
//! permissions drive search access decisions.

pub mod actor;
pub mod jwt;
pub mod rbac;

pub use actor::{SessionActor, SessionActorBuilder};
pub use jwt::JwtHandler;
pub use rbac::{PermissionMatcher, RbacSystem, Role, SubRole};

use crate::config::AuthConfig;
use crate::utils::error::{FixzitError, Result};
use std::sync::Arc;
use tracing::{debug, info};

/// Authentication method carried by a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthMethod {
    /// Bearer session token
    Jwt(String),
    /// No authentication
    None,
}

/// Main authentication system
#[derive(Debug, Clone)]
pub struct AuthSystem {
    /// JWT handler
    jwt: Arc<JwtHandler>,
    /// RBAC system
    rbac: Arc<RbacSystem>,
}

impl AuthSystem {
    /// Create a new authentication system
    pub fn new(config: &AuthConfig) -> Self {
        info!("Initializing authentication system");

        Self {
            jwt: Arc::new(JwtHandler::new(config)),
            rbac: Arc::new(RbacSystem::new()),
        }
    }

    /// Resolve the session actor for a request
    pub fn authenticate(&self, method: &AuthMethod) -> Result<SessionActor> {
        match method {
            AuthMethod::Jwt(token) => {
                let actor = self.jwt.authenticate(token)?;
                debug!(user_id = actor.id(), role = %actor.role(), "Request authenticated");
                Ok(actor)
            }
            AuthMethod::None => Err(FixzitError::auth("No authentication provided")),
        }
    }

    pub fn jwt(&self) -> &JwtHandler {
        &self.jwt
    }

    pub fn rbac(&self) -> &Arc<RbacSystem> {
        &self.rbac
    }
}
