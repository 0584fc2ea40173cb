//! Document storage
//!
//! The [`DocumentStore`] trait is the seam between search and persistence.
//! Filters are MongoDB-style filter documents, as produced by the scope
//! resolver.

pub mod filter;
pub mod memory;

pub use memory::InMemoryStore;

use crate::config::StorageConfig;
use crate::utils::error::Result;
use bson::{Bson, Document};
use std::sync::Arc;
use tracing::info;

/// Options for [`DocumentStore::find`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FindOptions {
    /// Documents to skip
    pub skip: u64,
    /// Maximum documents to return
    pub limit: Option<u64>,
    /// Sort specification, `{ field: 1 | -1 }`
    pub sort: Option<Document>,
}

impl FindOptions {
    /// Options for one page of results
    pub fn page(skip: u64, limit: u64) -> Self {
        Self {
            skip,
            limit: Some(limit),
            sort: None,
        }
    }

    pub fn with_sort(mut self, sort: Document) -> Self {
        self.sort = Some(sort);
        self
    }
}

/// Collection-oriented document store
#[async_trait::async_trait]
pub trait DocumentStore: Send + Sync + std::fmt::Debug {
    /// Find documents matching `filter`
    async fn find(
        &self,
        collection: &str,
        filter: &Document,
        options: &FindOptions,
    ) -> Result<Vec<Document>>;

    /// Count documents matching `filter`
    async fn count(&self, collection: &str, filter: &Document) -> Result<u64>;

    /// Insert a document, assigning an ObjectId `_id` when missing; returns the id
    async fn insert(&self, collection: &str, document: Document) -> Result<Bson>;
}

/// Build the configured document store
pub async fn create_store(config: &StorageConfig) -> Result<Arc<dyn DocumentStore>> {
    let store = match &config.seed_path {
        Some(path) => InMemoryStore::from_seed_file(path).await?,
        None => {
            info!("No seed file configured, starting with an empty store");
            InMemoryStore::new()
        }
    };
    Ok(Arc::new(store))
}

/// Convert a stored document to API JSON
///
/// ObjectIds become hex strings and dates RFC 3339 strings; everything else
/// uses relaxed extended JSON.
pub fn to_api_json(document: Document) -> serde_json::Value {
    bson_to_api_json(Bson::Document(document))
}

fn bson_to_api_json(value: Bson) -> serde_json::Value {
    match value {
        Bson::ObjectId(oid) => serde_json::Value::String(oid.to_hex()),
        Bson::DateTime(at) => match at.try_to_rfc3339_string() {
            Ok(text) => serde_json::Value::String(text),
            Err(_) => Bson::DateTime(at).into_relaxed_extjson(),
        },
        Bson::Document(document) => serde_json::Value::Object(
            document
                .into_iter()
                .map(|(key, value)| (key, bson_to_api_json(value)))
                .collect(),
        ),
        Bson::Array(items) => {
            serde_json::Value::Array(items.into_iter().map(bson_to_api_json).collect())
        }
        other => other.into_relaxed_extjson(),
    }
}
