//! Environment variable overrides
//!
//! Any of the following variables, when set, replace the matching file value:
//! `FIXZIT_HOST`, `FIXZIT_PORT`, `FIXZIT_WORKERS`, `FIXZIT_JWT_SECRET`,
//! `FIXZIT_JWT_EXPIRATION`, `FIXZIT_PII_KEY`, `FIXZIT_LOG_LEVEL`,
//! `FIXZIT_LOG_JSON`, `FIXZIT_SEED_PATH`, `FIXZIT_RATE_LIMIT_RPM`.

use super::models::ServiceConfig;
use crate::utils::error::{FixzitError, Result};
use std::env;
use tracing::debug;

impl ServiceConfig {
    /// Apply overrides from the process environment
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(|key| env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("FIXZIT_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("FIXZIT_PORT") {
            self.server.port = parse_var("FIXZIT_PORT", &port)?;
        }
        if let Some(workers) = lookup("FIXZIT_WORKERS") {
            self.server.workers = Some(parse_var("FIXZIT_WORKERS", &workers)?);
        }

        if let Some(secret) = lookup("FIXZIT_JWT_SECRET") {
            self.auth.jwt_secret = secret;
        }
        if let Some(expiration) = lookup("FIXZIT_JWT_EXPIRATION") {
            self.auth.jwt_expiration = parse_var("FIXZIT_JWT_EXPIRATION", &expiration)?;
        }

        if let Some(key) = lookup("FIXZIT_PII_KEY") {
            self.security.pii_key = key;
        }

        if let Some(level) = lookup("FIXZIT_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(json) = lookup("FIXZIT_LOG_JSON") {
            self.logging.json = parse_var("FIXZIT_LOG_JSON", &json)?;
        }

        if let Some(path) = lookup("FIXZIT_SEED_PATH") {
            self.storage.seed_path = Some(path);
        }

        if let Some(rpm) = lookup("FIXZIT_RATE_LIMIT_RPM") {
            self.rate_limit.requests_per_minute = parse_var("FIXZIT_RATE_LIMIT_RPM", &rpm)?;
        }

        debug!("Environment overrides applied");
        Ok(())
    }
}

fn parse_var<T>(name: &str, value: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| FixzitError::Config(format!("Invalid value for {}: {}", name, e)))
}
