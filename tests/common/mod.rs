//! Common test utilities for integration tests
//!
//! Provides an in-memory [`Transport`] that records every request and can
//! hold responses back until the test releases them.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::sync::Semaphore;

use hydra_client::{HttpMethod, QueryParams, ResourceResult, RestApi, Transport};

/// API root used by the fake-backed tests.
pub const API_ROOT: &str = "http://example.com/api";

/// One request seen by [`FakeTransport`].
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: HttpMethod,
    pub url: String,
    pub query: QueryParams,
    pub body: Option<Value>,
}

type Handler = Box<dyn Fn(&RecordedRequest) -> ResourceResult<Value> + Send + Sync>;

/// Transport double.
///
/// The handler runs when the request is issued (so responses are assigned in
/// request order); with a gate the response is only delivered once a permit
/// is added to the semaphore.
pub struct FakeTransport {
    handler: Handler,
    requests: Mutex<Vec<RecordedRequest>>,
    gate: Option<Arc<Semaphore>>,
}

impl FakeTransport {
    pub fn new(
        handler: impl Fn(&RecordedRequest) -> ResourceResult<Value> + Send + Sync + 'static,
    ) -> Self {
        Self {
            handler: Box::new(handler),
            requests: Mutex::new(Vec::new()),
            gate: None,
        }
    }

    /// Like [`new`](Self::new) but every response waits for one permit on `gate`.
    pub fn gated(
        handler: impl Fn(&RecordedRequest) -> ResourceResult<Value> + Send + Sync + 'static,
        gate: Arc<Semaphore>,
    ) -> Self {
        Self {
            gate: Some(gate),
            ..Self::new(handler)
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn count(&self, method: HttpMethod) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|request| request.method == method)
            .count()
    }

    pub fn total(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn request(
        &self,
        method: HttpMethod,
        url: &str,
        query: &QueryParams,
        body: Option<&Value>,
    ) -> ResourceResult<Value> {
        let recorded = RecordedRequest {
            method,
            url: url.to_string(),
            query: query.clone(),
            body: body.cloned(),
        };
        self.requests.lock().unwrap().push(recorded.clone());
        let response = (self.handler)(&recorded);

        if let Some(gate) = &self.gate {
            gate.acquire().await.expect("gate closed").forget();
        }
        response
    }
}

/// Build a Hydra collection envelope for the given identifiers.
pub fn envelope(ids: &[&str], label: &str) -> Value {
    let members: Vec<Value> = ids
        .iter()
        .map(|id| json!({"@id": id, "name": format!("{label} {id}")}))
        .collect();
    json!({
        "hydra:member": members,
        "hydra:totalItems": ids.len(),
    })
}

/// Handler returning a fresh envelope per call, labelled `v1`, `v2`, ...
pub fn versioned_collection(
    ids: &'static [&'static str],
) -> impl Fn(&RecordedRequest) -> ResourceResult<Value> + Send + Sync + 'static {
    let calls = AtomicUsize::new(0);
    move |_request: &RecordedRequest| {
        let version = calls.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(envelope(ids, &format!("v{version}")))
    }
}

/// A [`RestApi`] over `transport` rooted at [`API_ROOT`].
pub fn api(transport: Arc<FakeTransport>) -> Arc<RestApi> {
    Arc::new(RestApi::new(API_ROOT, transport))
}

/// Setup test logging
///
/// Initializes tracing subscriber for test output.
pub fn setup_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}
