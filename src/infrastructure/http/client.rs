use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client as ReqwestClient, Method};
use serde_json::Value;
use tracing::{debug, instrument};

use crate::domain::errors::{ResourceError, ResourceResult};
use crate::domain::models::{ClientConfig, QueryParams};
use crate::domain::ports::{HttpMethod, Transport};

const LD_JSON: &str = "application/ld+json";
const MERGE_PATCH_JSON: &str = "application/merge-patch+json";

impl From<HttpMethod> for Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Self::GET,
            HttpMethod::Post => Self::POST,
            HttpMethod::Put => Self::PUT,
            HttpMethod::Patch => Self::PATCH,
            HttpMethod::Delete => Self::DELETE,
        }
    }
}

/// reqwest-backed transport
///
/// Features:
/// - Connection pooling and reuse (via `reqwest::Client`)
/// - JSON-LD `Accept` header plus configured default headers
/// - Merge-patch content type for PATCH bodies
/// - Empty response bodies decode to `Value::Null`
///
/// No retries are attempted; failures are reported as-is.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http_client: ReqwestClient,
}

impl HttpTransport {
    /// Build a transport from the client configuration.
    pub fn from_config(config: &ClientConfig) -> ResourceResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(LD_JSON));
        for (name, value) in &config.default_headers {
            let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                ResourceError::InvalidConfig(format!("invalid header name {name:?}: {e}"))
            })?;
            let value = HeaderValue::from_str(value).map_err(|e| {
                ResourceError::InvalidConfig(format!("invalid value for header {name}: {e}"))
            })?;
            headers.insert(name, value);
        }

        let http_client = ReqwestClient::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .pool_max_idle_per_host(10)
            .build()
            .map_err(|e| ResourceError::InvalidConfig(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { http_client })
    }

    /// Wrap an already configured reqwest client.
    pub const fn with_client(http_client: ReqwestClient) -> Self {
        Self { http_client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[instrument(skip(self, query, body), level = "debug")]
    async fn request(
        &self,
        method: HttpMethod,
        url: &str,
        query: &QueryParams,
        body: Option<&Value>,
    ) -> ResourceResult<Value> {
        let mut request = self.http_client.request(method.into(), url);
        if !query.is_empty() {
            request = request.query(query.pairs());
        }
        if let Some(body) = body {
            let content_type = if method == HttpMethod::Patch {
                MERGE_PATCH_JSON
            } else {
                LD_JSON
            };
            request = request
                .header(CONTENT_TYPE, content_type)
                .body(serde_json::to_vec(body)?);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error response".to_string());
            debug!(status = status.as_u16(), "request failed");
            return Err(ResourceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }
}
