//! RBAC-aware search
//!
//! Entity registry, row-level scoping and the search service that executes
//! scoped queries against the document store.

pub mod entities;
pub mod ids;
pub mod scope;
pub mod service;

pub use entities::{EntityDescriptor, SearchEntity};
pub use scope::{ORG_KEY, ScopeDecision, add_predicate, apply_entity_scope};
pub use service::{EntityResults, SearchRequest, SearchResults, SearchService, text_filter};
