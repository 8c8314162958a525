use std::fmt;

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::errors::ResourceResult;
use crate::domain::models::QueryParams;

/// HTTP verbs the resource layer issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    /// Upper-case verb as sent on the wire.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw request/response exchange with the API.
///
/// Implementations return the decoded JSON body (`Value::Null` for empty
/// bodies) or fail with a transport, status or decode error. They must not
/// retry on their own.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send one request to an absolute `url`.
    async fn request(
        &self,
        method: HttpMethod,
        url: &str,
        query: &QueryParams,
        body: Option<&Value>,
    ) -> ResourceResult<Value>;
}
