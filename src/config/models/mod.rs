//! Configuration data models
//!
//! This module defines all configuration structures used throughout the service.

pub mod auth;
pub mod logging;
pub mod rate_limit;
pub mod search;
pub mod security;
pub mod server;
pub mod service;
pub mod sla;
pub mod storage;

// Re-export all configuration types
pub use auth::*;
pub use logging::*;
pub use rate_limit::*;
pub use search::*;
pub use security::*;
pub use server::*;
pub use service::*;
pub use sla::*;
pub use storage::*;

use rand::distributions::Alphanumeric;
use rand::{Rng, thread_rng};

/// Default values for configuration
pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

/// Default server port
pub fn default_port() -> u16 {
    8080
}

/// Default timeout in seconds
pub fn default_timeout() -> u64 {
    30
}

/// Default maximum body size in bytes
pub fn default_max_body_size() -> usize {
    1024 * 1024 // 1MB
}

pub fn default_true() -> bool {
    true
}

/// Generate a 64-character random alphanumeric secret
pub fn generate_secret() -> String {
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect()
}
