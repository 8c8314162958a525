//! Transport plus normalization: the low-level REST API surface.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, instrument};

use crate::domain::errors::ResourceResult;
use crate::domain::models::{ClientConfig, CollectionResult, Entity, QueryParams};
use crate::domain::ports::{HttpMethod, Transport};
use crate::infrastructure::http::HttpTransport;
use crate::services::normalizer::EntityNormalizer;

/// Issues requests through a [`Transport`] and normalizes what comes back.
///
/// Shared by every resource accessor of one API.
#[derive(Clone)]
pub struct RestApi {
    transport: Arc<dyn Transport>,
    normalizer: EntityNormalizer,
}

impl RestApi {
    /// Create an API over an arbitrary transport.
    pub fn new(api_root: &str, transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            normalizer: EntityNormalizer::new(api_root),
        }
    }

    /// Create an API backed by the reqwest transport built from `config`.
    pub fn from_config(config: &ClientConfig) -> ResourceResult<Self> {
        let transport = HttpTransport::from_config(config)?;
        Ok(Self::new(&config.api_root, Arc::new(transport)))
    }

    /// API root without trailing slash.
    pub fn rest_api_base(&self) -> &str {
        self.normalizer.api_base()
    }

    /// The normalizer used for every response.
    pub const fn normalizer(&self) -> &EntityNormalizer {
        &self.normalizer
    }

    /// Turn an `@id` into an absolute URL.
    pub fn absolutize(&self, iri: &str) -> String {
        self.normalizer.absolutize(iri)
    }

    /// GET a single entity.
    #[instrument(skip(self, query), level = "debug")]
    pub async fn get_single(&self, url: &str, query: &QueryParams) -> ResourceResult<Entity> {
        let payload = self
            .transport
            .request(HttpMethod::Get, url, query, None)
            .await?;
        self.normalizer.normalize_entity(payload)
    }

    /// GET a collection envelope.
    #[instrument(skip(self, query), fields(params = query.len()), level = "debug")]
    pub async fn get_collection(
        &self,
        url: &str,
        query: &QueryParams,
    ) -> ResourceResult<CollectionResult> {
        let payload = self
            .transport
            .request(HttpMethod::Get, url, query, None)
            .await?;
        let result = self.normalizer.normalize_collection(payload)?;
        debug!(
            members = result.len(),
            total_items = result.total_items,
            paginated = result.view.is_some(),
            "collection fetched"
        );
        Ok(result)
    }

    /// POST a body and normalize the created entity.
    pub async fn post_single(&self, url: &str, body: &Value) -> ResourceResult<Entity> {
        self.send_single(HttpMethod::Post, url, body).await
    }

    /// PUT a body and normalize the replaced entity.
    pub async fn put_single(&self, url: &str, body: &Value) -> ResourceResult<Entity> {
        self.send_single(HttpMethod::Put, url, body).await
    }

    /// PATCH a body and normalize the updated entity.
    pub async fn patch_single(&self, url: &str, body: &Value) -> ResourceResult<Entity> {
        self.send_single(HttpMethod::Patch, url, body).await
    }

    /// DELETE a resource. The response body is discarded.
    #[instrument(skip(self), level = "debug")]
    pub async fn delete(&self, url: &str) -> ResourceResult<()> {
        self.transport
            .request(HttpMethod::Delete, url, &QueryParams::new(), None)
            .await?;
        Ok(())
    }

    #[instrument(skip(self, body), level = "debug")]
    async fn send_single(
        &self,
        method: HttpMethod,
        url: &str,
        body: &Value,
    ) -> ResourceResult<Entity> {
        let payload = self
            .transport
            .request(method, url, &QueryParams::new(), Some(body))
            .await?;
        self.normalizer.normalize_entity(payload)
    }
}

impl std::fmt::Debug for RestApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestApi")
            .field("api_base", &self.rest_api_base())
            .finish_non_exhaustive()
    }
}
