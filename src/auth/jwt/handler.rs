//! Core JWT handler implementation

use super::types::{Claims, JwtHandler};
use crate::auth::actor::SessionActor;
use crate::auth::rbac::{Role, SubRole};
use crate::config::AuthConfig;
use crate::utils::error::{FixzitError, Result};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, warn};
use uuid::Uuid;

impl JwtHandler {
    /// Create a new JWT handler
    pub fn new(config: &AuthConfig) -> Self {
        let secret = config.jwt_secret.as_bytes();

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            expiration: config.jwt_expiration,
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
        }
    }

    /// Mint a session token carrying the actor's claims
    pub fn create_session_token(&self, actor: &SessionActor) -> Result<String> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| FixzitError::internal(format!("System time error: {}", e)))?
            .as_secs();

        let claims = Claims {
            sub: actor.id().to_string(),
            iat: now,
            exp: now + self.expiration,
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            jti: Uuid::new_v4().to_string(),
            org_id: actor.org_id().to_string(),
            role: actor.role().to_string(),
            sub_role: actor.sub_role().map(ToString::to_string),
            roles: actor.roles().iter().map(ToString::to_string).collect(),
            permissions: actor.permissions().iter().cloned().collect(),
            is_super_admin: actor.super_admin_flag(),
            assigned_properties: actor.assigned_properties().to_vec(),
            units: actor.units().to_vec(),
            vendor_id: actor.vendor_id().map(str::to_string),
        };

        self.encode_claims(&claims)
    }

    pub(super) fn encode_claims(&self, claims: &Claims) -> Result<String> {
        let header = Header::new(self.algorithm);
        let token = encode(&header, claims, &self.encoding_key).map_err(FixzitError::Jwt)?;

        debug!("Created session token for user: {}", claims.sub);
        Ok(token)
    }

    /// Verify and decode a token
    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::new(self.algorithm);
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            warn!("JWT verification failed: {}", e);
            FixzitError::Jwt(e)
        })?;

        debug!("Token verified for user: {}", token_data.claims.sub);
        Ok(token_data.claims)
    }

    /// Verify a token and build the session actor it describes
    pub fn authenticate(&self, token: &str) -> Result<SessionActor> {
        let claims = self.verify_token(token)?;
        claims.into_actor()
    }

    /// Extract token from Authorization header
    pub fn extract_token_from_header(header_value: &str) -> Option<&str> {
        header_value
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|token| !token.is_empty())
    }
}

impl Claims {
    /// Build the session actor described by these claims
    pub fn into_actor(self) -> Result<SessionActor> {
        let mut builder = SessionActor::builder(self.sub, self.org_id, Role::parse(&self.role))
            .roles(self.roles.iter().map(|role| Role::parse(role)))
            .permissions(self.permissions)
            .super_admin(self.is_super_admin)
            .assigned_properties(self.assigned_properties)
            .units(self.units);

        if let Some(sub_role) = self.sub_role.as_deref() {
            builder = builder.sub_role(SubRole::parse(sub_role));
        }
        if let Some(vendor_id) = self.vendor_id {
            builder = builder.vendor_id(vendor_id);
        }

        builder.build()
    }
}
