//! Search orchestration
//!
//! Permission check, scoping, free-text filter, pagination and execution
//! against the document store, followed by PII masking of the results.

use super::entities::SearchEntity;
use super::scope::{ScopeDecision, apply_entity_scope};
use crate::auth::actor::SessionActor;
use crate::auth::rbac::RbacSystem;
use crate::config::SearchConfig;
use crate::pii::PiiGuard;
use crate::storage::{DocumentStore, FindOptions, to_api_json};
use crate::utils::error::{FixzitError, Result};
use crate::utils::truncate_string;
use bson::{Bson, Document, doc};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

/// A validated search request
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    /// Free text, already trimmed; `None` lists everything in scope
    pub text: Option<String>,
    /// Requested entities; empty means every entity the actor may search
    pub entities: Vec<SearchEntity>,
    pub page: u32,
    pub limit: u32,
}

impl SearchRequest {
    /// Offset of the first item of the page
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.limit)
    }
}

/// One entity's page of results
#[derive(Debug, Clone, Serialize)]
pub struct EntityResults {
    pub entity: SearchEntity,
    pub items: Vec<serde_json::Value>,
    pub total: u64,
}

/// Results across every searched entity
#[derive(Debug, Clone, Serialize)]
pub struct SearchResults {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    pub results: Vec<EntityResults>,
}

impl SearchResults {
    /// Sum of per-entity totals
    pub fn total(&self) -> u64 {
        self.results.iter().map(|r| r.total).sum()
    }
}

/// Scoped search over the document store
#[derive(Debug, Clone)]
pub struct SearchService {
    store: Arc<dyn DocumentStore>,
    rbac: Arc<RbacSystem>,
    pii: Arc<PiiGuard>,
    config: SearchConfig,
}

impl SearchService {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        rbac: Arc<RbacSystem>,
        pii: Arc<PiiGuard>,
        config: SearchConfig,
    ) -> Self {
        Self {
            store,
            rbac,
            pii,
            config,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Parse `entity` / `entities` query parameters
    ///
    /// Unknown names are rejected; duplicates are dropped keeping first-seen order.
    pub fn parse_entities(
        single: Option<&str>,
        list: Option<&str>,
    ) -> Result<Vec<SearchEntity>> {
        let mut entities = Vec::new();
        let names = single
            .into_iter()
            .chain(list.into_iter().flat_map(|list| list.split(',')))
            .map(str::trim)
            .filter(|name| !name.is_empty());

        for name in names {
            let entity: SearchEntity = name.parse()?;
            if !entities.contains(&entity) {
                entities.push(entity);
            }
        }
        Ok(entities)
    }

    /// Validate raw request parameters against the search limits
    pub fn build_request(
        &self,
        text: Option<&str>,
        entities: Vec<SearchEntity>,
        page: Option<u32>,
        limit: Option<u32>,
    ) -> Result<SearchRequest> {
        let page = page.unwrap_or(1);
        let limit = limit.unwrap_or(self.config.default_limit);

        if page == 0 {
            return Err(FixzitError::validation("Page must be greater than 0"));
        }
        if limit == 0 || limit > self.config.max_limit {
            return Err(FixzitError::validation(format!(
                "Limit must be between 1 and {}",
                self.config.max_limit
            )));
        }

        let text = text.map(str::trim).filter(|t| !t.is_empty());
        if let Some(text) = text {
            if text.chars().count() > self.config.max_query_length {
                return Err(FixzitError::validation(format!(
                    "Search text cannot exceed {} characters",
                    self.config.max_query_length
                )));
            }
        }

        Ok(SearchRequest {
            text: text.map(str::to_string),
            entities,
            page,
            limit,
        })
    }

    /// Decide which of the requested entities the actor may search
    pub fn resolve_targets(
        &self,
        actor: &SessionActor,
        requested: &[SearchEntity],
    ) -> Result<Vec<SearchEntity>> {
        let targets = match requested {
            [] => self.rbac.searchable_entities(actor),
            [entity] => {
                if !self.rbac.can_search_entity(actor, *entity) {
                    return Err(FixzitError::forbidden(format!(
                        "Not permitted to search {}",
                        entity
                    )));
                }
                vec![*entity]
            }
            many => many
                .iter()
                .copied()
                .filter(|entity| self.rbac.can_search_entity(actor, *entity))
                .collect(),
        };

        if targets.is_empty() {
            return Err(FixzitError::forbidden(
                "Not permitted to search any of the requested entities",
            ));
        }
        Ok(targets)
    }

    /// Run a search for the actor
    pub async fn search(
        &self,
        actor: &SessionActor,
        request: &SearchRequest,
    ) -> Result<SearchResults> {
        let targets = self.resolve_targets(actor, &request.entities)?;

        info!(
            user_id = actor.id(),
            entities = targets.len(),
            query = %request
                .text
                .as_deref()
                .map(|t| truncate_string(t, 40))
                .unwrap_or_default(),
            "Executing search"
        );

        let mut results = Vec::with_capacity(targets.len());
        for entity in targets {
            results.push(self.search_entity(actor, entity, request).await?);
        }

        Ok(SearchResults {
            query: request.text.clone(),
            results,
        })
    }

    async fn search_entity(
        &self,
        actor: &SessionActor,
        entity: SearchEntity,
        request: &SearchRequest,
    ) -> Result<EntityResults> {
        let mut base = Document::new();
        if let Some(text) = &request.text {
            base.insert("$or", text_filter(entity, text));
        }

        let ScopeDecision { allowed, query } = apply_entity_scope(entity, actor, base);
        if !allowed {
            debug!(entity = %entity, "Scope denies all rows, skipping store query");
            return Ok(EntityResults {
                entity,
                items: Vec::new(),
                total: 0,
            });
        }

        let collection = entity.collection();
        let total = self.store.count(collection, &query).await?;
        let options = FindOptions::page(request.offset(), u64::from(request.limit))
            .with_sort(doc! { "_id": -1 });
        let documents = self.store.find(collection, &query, &options).await?;

        let mut items = Vec::with_capacity(documents.len());
        for mut document in documents {
            self.pii.prepare_for_display(actor, collection, &mut document);
            items.push(to_api_json(document));
        }

        Ok(EntityResults {
            entity,
            items,
            total,
        })
    }
}

/// Case-insensitive match of the escaped text against every search field
pub fn text_filter(entity: SearchEntity, text: &str) -> Vec<Bson> {
    let pattern = regex::escape(text);
    entity
        .descriptor()
        .search_fields
        .iter()
        .map(|field| {
            let mut clause = Document::new();
            clause.insert(*field, doc! { "$regex": pattern.as_str(), "$options": "i" });
            Bson::Document(clause)
        })
        .collect()
}
