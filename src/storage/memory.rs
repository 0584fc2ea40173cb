//! In-process document store

use super::filter::{compare_for_sort, matches, resolve_path};
use super::{DocumentStore, FindOptions};
use crate::utils::error::{FixzitError, Result};
use bson::oid::ObjectId;
use bson::{Bson, Document};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

/// Document store holding every collection in memory
#[derive(Debug, Default)]
pub struct InMemoryStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
}

impl InMemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a seed file of the form `{ "collection": [documents] }`
    ///
    /// Documents may use MongoDB extended JSON (`{"$oid": ...}`, `{"$date": ...}`).
    pub async fn from_seed_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading seed documents from: {:?}", path);

        let content = tokio::fs::read_to_string(path).await?;
        let store = Self::new();
        let loaded = store.load_seed(&content)?;

        info!("Seeded {} documents", loaded);
        Ok(store)
    }

    /// Insert the documents of a seed JSON string, returning how many were loaded
    pub fn load_seed(&self, json: &str) -> Result<usize> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        let serde_json::Value::Object(collections) = value else {
            return Err(FixzitError::storage(
                "Seed data must be an object keyed by collection name",
            ));
        };

        let mut loaded = 0;
        for (collection, documents) in collections {
            let serde_json::Value::Array(documents) = documents else {
                return Err(FixzitError::storage(format!(
                    "Seed collection '{}' must be an array",
                    collection
                )));
            };

            for document in documents {
                let Bson::Document(document) = Bson::try_from(document)? else {
                    return Err(FixzitError::storage(format!(
                        "Seed collection '{}' contains a non-document entry",
                        collection
                    )));
                };
                self.insert_document(&collection, document);
                loaded += 1;
            }
        }

        Ok(loaded)
    }

    fn insert_document(&self, collection: &str, mut document: Document) -> Bson {
        let id = match document.get("_id") {
            Some(id) => id.clone(),
            None => {
                let id = Bson::ObjectId(ObjectId::new());
                document.insert("_id", id.clone());
                id
            }
        };

        self.collections
            .write()
            .entry(collection.to_string())
            .or_default()
            .push(document);
        id
    }

    /// Number of documents in a collection, ignoring filters
    pub fn len(&self, collection: &str) -> usize {
        self.collections
            .read()
            .get(collection)
            .map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.collections.read().values().all(Vec::is_empty)
    }

    fn sort(documents: &mut [Document], sort: &Document) {
        documents.sort_by(|left, right| {
            sort.iter()
                .map(|(path, direction)| {
                    let ordering = compare_for_sort(
                        resolve_path(left, path).first().copied(),
                        resolve_path(right, path).first().copied(),
                    );
                    let descending = matches!(direction, Bson::Int32(-1) | Bson::Int64(-1))
                        || matches!(direction, Bson::Double(d) if *d < 0.0);
                    if descending { ordering.reverse() } else { ordering }
                })
                .find(|ordering| ordering.is_ne())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
    }
}

#[async_trait::async_trait]
impl DocumentStore for InMemoryStore {
    async fn find(
        &self,
        collection: &str,
        filter: &Document,
        options: &FindOptions,
    ) -> Result<Vec<Document>> {
        let mut found = {
            let collections = self.collections.read();
            let mut found = Vec::new();
            for document in collections.get(collection).into_iter().flatten() {
                if matches(document, filter)? {
                    found.push(document.clone());
                }
            }
            found
        };

        if let Some(sort) = &options.sort {
            Self::sort(&mut found, sort);
        }

        let skip = usize::try_from(options.skip).unwrap_or(usize::MAX);
        let limit = options
            .limit
            .map_or(usize::MAX, |limit| usize::try_from(limit).unwrap_or(usize::MAX));

        let page: Vec<Document> = found.into_iter().skip(skip).take(limit).collect();
        debug!(collection, returned = page.len(), "In-memory find");
        Ok(page)
    }

    async fn count(&self, collection: &str, filter: &Document) -> Result<u64> {
        let collections = self.collections.read();
        let mut total = 0u64;
        for document in collections.get(collection).into_iter().flatten() {
            if matches(document, filter)? {
                total += 1;
            }
        }
        Ok(total)
    }

    async fn insert(&self, collection: &str, document: Document) -> Result<Bson> {
        Ok(self.insert_document(collection, document))
    }
}
