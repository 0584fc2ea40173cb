//! # fixzit-scope
//!
//! Tenant-scoped search authorization, SLA business-hours arithmetic and PII
//! field protection for the Fixzit facilities-management platform.
//!
//! ## Features
//!
//! - **Entity permissions**: role, permission-string and sub-role grants decide
//!   which entities an actor may search
//! - **Row-level scoping**: every query is constrained to the actor's
//!   organisation and narrowed by role (requester, assignee, vendor, assigned
//!   properties)
//! - **SLA deadlines**: business-minute arithmetic over a configurable work
//!   week with holidays
//! - **PII protection**: AES-256-GCM field encryption and display masking
//!
//! ## Scoping a query
//!
//! ```rust
//! use bson::doc;
//! use fixzit_scope::auth::{Role, SessionActor};
//! use fixzit_scope::search::{SearchEntity, apply_entity_scope};
//!
//! let tenant = SessionActor::builder("user-1", "org-1", Role::Tenant)
//!     .build()
//!     .unwrap();
//! let decision = apply_entity_scope(SearchEntity::WorkOrders, &tenant, doc! {});
//!
//! assert!(decision.allowed);
//! assert_eq!(
//!     decision.query,
//!     doc! { "orgId": "org-1", "requester.userId": "user-1" }
//! );
//! ```
//!
//! ## Server mode
//!
//! ```rust,no_run
//! use fixzit_scope::Config;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/fixzit.yaml").await?;
//!     fixzit_scope::server::run_server(config).await?;
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod auth;
pub mod config;
pub mod pii;
pub mod search;
pub mod server;
pub mod sla;
pub mod storage;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use utils::error::{FixzitError, Result};

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
