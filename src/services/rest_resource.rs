//! Plain (uncached) accessor for one resource endpoint.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::domain::errors::{ResourceError, ResourceResult};
use crate::domain::models::{CollectionResult, Entity, QueryParams, HREF_FIELD};
use crate::domain::ports::ResourceAccessor;
use crate::services::rest_api::RestApi;

/// CRUD operations against `<api root><endpoint path>`.
#[derive(Debug, Clone)]
pub struct RestResource {
    api: Arc<RestApi>,
    endpoint_path: String,
}

impl RestResource {
    /// Create an accessor for `endpoint_path` (e.g. `/books`).
    pub fn new(api: Arc<RestApi>, endpoint_path: impl Into<String>) -> Self {
        Self {
            api,
            endpoint_path: endpoint_path.into(),
        }
    }

    /// The endpoint path this accessor was created for.
    pub fn endpoint_path(&self) -> &str {
        &self.endpoint_path
    }

    /// Collection URL: API base followed by the endpoint path.
    pub fn endpoint_url(&self) -> String {
        format!("{}{}", self.api.rest_api_base(), self.endpoint_path)
    }

    /// Item URL for an id segment.
    pub fn resource_url(&self, id: &str) -> String {
        format!("{}/{}", self.endpoint_url(), id)
    }

    fn href_of(entity: &Entity) -> ResourceResult<&str> {
        entity.href().ok_or(ResourceError::MissingReference)
    }
}

/// Entity fields as sent to the server; `@href` is client-side only.
fn request_body(entity: &Entity) -> Value {
    let mut fields = entity.fields().clone();
    fields.remove(HREF_FIELD);
    Value::Object(fields)
}

#[async_trait]
impl ResourceAccessor for RestResource {
    async fn find(&self, id: &str) -> ResourceResult<Entity> {
        self.api
            .get_single(&self.resource_url(id), &QueryParams::new())
            .await
    }

    async fn get(&self, iri: &str) -> ResourceResult<Entity> {
        self.api
            .get_single(&self.api.absolutize(iri), &QueryParams::new())
            .await
    }

    async fn list(&self, params: &QueryParams) -> ResourceResult<Arc<CollectionResult>> {
        let result = self.api.get_collection(&self.endpoint_url(), params).await?;
        Ok(Arc::new(result))
    }

    async fn save(&self, entity: &Entity) -> ResourceResult<Entity> {
        let body = request_body(entity);
        match entity.href() {
            Some(href) => {
                debug!(href, "updating resource");
                self.api.put_single(href, &body).await
            }
            None => {
                debug!(endpoint = %self.endpoint_path, "creating resource");
                self.api.post_single(&self.endpoint_url(), &body).await
            }
        }
    }

    async fn patch(&self, entity: &Entity, changes: &Value) -> ResourceResult<Entity> {
        let href = Self::href_of(entity)?;
        self.api.patch_single(href, changes).await
    }

    async fn delete(&self, entity: &Entity) -> ResourceResult<()> {
        let href = Self::href_of(entity)?;
        self.api.delete(href).await
    }
}
