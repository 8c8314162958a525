use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::errors::ResourceResult;
use crate::domain::models::{CollectionResult, Entity, QueryParams};

/// CRUD access to one resource endpoint (e.g. `/books`).
///
/// Implemented by the plain REST accessor and by the caching decorator that
/// wraps it, so callers can swap one for the other.
#[async_trait]
pub trait ResourceAccessor: Send + Sync {
    /// Fetch one entity by its id segment below the endpoint (`/books/{id}`).
    async fn find(&self, id: &str) -> ResourceResult<Entity>;

    /// Fetch one entity by its `@id` identifier.
    async fn get(&self, iri: &str) -> ResourceResult<Entity>;

    /// Fetch the collection with the given query parameters.
    async fn list(&self, params: &QueryParams) -> ResourceResult<Arc<CollectionResult>>;

    /// Create the entity if it has no `@href` yet, otherwise replace it.
    async fn save(&self, entity: &Entity) -> ResourceResult<Entity>;

    /// Partially update an existing entity.
    async fn patch(&self, entity: &Entity, changes: &Value) -> ResourceResult<Entity>;

    /// Delete an existing entity.
    async fn delete(&self, entity: &Entity) -> ResourceResult<()>;
}
