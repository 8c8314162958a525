//! Caching decorator for resource accessors with `@id` resolution.
//!
//! The unfiltered collection of an endpoint is fetched once per *generation*
//! and shared by every caller: concurrent `list()` calls join the same
//! in-flight request, later calls get the completed result without touching
//! the network. [`CachedResource::refresh`] starts a new generation; the next
//! demand triggers exactly one new fetch. Each completed fetch rebuilds an
//! [`IdentifierIndex`] from scratch, which [`CachedResource::resolve`] uses to
//! map identifiers to the cached entity handles.
//!
//! A generation whose fetch failed delivers the error to everyone who joined
//! it; the next caller starts a fresh fetch for the same generation.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::{BoxFuture, FutureExt, Shared};
use parking_lot::Mutex;
use serde_json::Value;
use tracing::{debug, trace, warn};

use crate::domain::errors::{ResourceError, ResourceResult};
use crate::domain::models::{CollectionResult, Entity, EntityRef, QueryParams};
use crate::domain::ports::ResourceAccessor;

/// Query parameter that disables server-side pagination.
const PAGINATION_PARAM: &str = "pagination";

/// Identifier → entity map built from one completed collection fetch.
#[derive(Debug, Default)]
pub struct IdentifierIndex {
    entries: HashMap<String, Arc<Entity>>,
}

impl IdentifierIndex {
    /// Index every member carrying an `@id`. Later duplicates win.
    pub fn from_collection(result: &CollectionResult) -> Self {
        let entries = result
            .iter()
            .filter_map(|member| member.id().map(|id| (id.to_string(), Arc::clone(member))))
            .collect();
        Self { entries }
    }

    /// The cached handle for `id`, if present.
    pub fn get(&self, id: &str) -> Option<Arc<Entity>> {
        self.entries.get(id).cloned()
    }

    /// True if `id` is indexed.
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Number of indexed identifiers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing is indexed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Result of one successful generation fetch.
#[derive(Debug)]
struct CacheSnapshot {
    generation: u64,
    result: Arc<CollectionResult>,
    index: Arc<IdentifierIndex>,
}

type SharedFetch = Shared<BoxFuture<'static, ResourceResult<Arc<CacheSnapshot>>>>;

#[derive(Default)]
struct CacheSlot {
    generation: u64,
    fetch: Option<SharedFetch>,
}

/// Caching wrapper around any [`ResourceAccessor`].
///
/// Only `list()` without parameters is cached. Filtered listings and all
/// other operations go straight to the wrapped accessor and never touch the
/// cache; writes do not invalidate it either, call [`refresh`] for that.
///
/// [`refresh`]: CachedResource::refresh
pub struct CachedResource<A: ResourceAccessor> {
    inner: Arc<A>,
    slot: Mutex<CacheSlot>,
    current: Arc<Mutex<Option<Arc<CacheSnapshot>>>>,
}

impl<A: ResourceAccessor + 'static> CachedResource<A> {
    /// Wrap an accessor. Nothing is fetched until first demand.
    pub fn new(inner: Arc<A>) -> Self {
        Self {
            inner,
            slot: Mutex::new(CacheSlot::default()),
            current: Arc::new(Mutex::new(None)),
        }
    }

    /// The wrapped accessor.
    pub const fn inner(&self) -> &Arc<A> {
        &self.inner
    }

    /// Current cache generation; starts at 0 and grows with every refresh.
    pub fn generation(&self) -> u64 {
        self.slot.lock().generation
    }

    /// The full, unpaginated collection for the current generation.
    pub async fn list_all(&self) -> ResourceResult<Arc<CollectionResult>> {
        let snapshot = self.shared_fetch().await?;
        Ok(Arc::clone(&snapshot.result))
    }

    /// Start a new generation.
    ///
    /// Fetches already in flight keep running and are still delivered to the
    /// callers that joined them; only later callers bind to the new generation.
    pub fn refresh(&self) {
        let mut slot = self.slot.lock();
        slot.generation += 1;
        slot.fetch = None;
        debug!(generation = slot.generation, "cache refreshed");
    }

    /// Resolve a reference to a cached entity.
    ///
    /// Absent references resolve to `None` and resolved entities are returned
    /// as-is, neither triggers a fetch. Identifiers wait for the current
    /// generation and are looked up in its index; unknown identifiers yield
    /// `None`.
    pub async fn resolve(
        &self,
        reference: impl Into<EntityRef> + Send,
    ) -> ResourceResult<Option<Arc<Entity>>> {
        match reference.into() {
            EntityRef::Absent => Ok(None),
            EntityRef::Resolved(entity) => Ok(Some(entity)),
            EntityRef::Iri(iri) => {
                let snapshot = self.shared_fetch().await?;
                let entity = snapshot.index.get(&iri);
                if entity.is_none() {
                    trace!(iri = %iri, generation = snapshot.generation, "identifier not in index");
                }
                Ok(entity)
            }
        }
    }

    /// Resolve many references against a single generation.
    pub async fn resolve_all<R>(
        &self,
        references: Vec<R>,
    ) -> ResourceResult<Vec<Option<Arc<Entity>>>>
    where
        R: Into<EntityRef> + Send,
    {
        let references: Vec<EntityRef> = references.into_iter().map(Into::into).collect();

        let index = if references.iter().any(|r| matches!(r, EntityRef::Iri(_))) {
            Some(Arc::clone(&self.shared_fetch().await?.index))
        } else {
            None
        };

        Ok(references
            .into_iter()
            .map(|reference| match reference {
                EntityRef::Absent => None,
                EntityRef::Resolved(entity) => Some(entity),
                EntityRef::Iri(iri) => index.as_ref().and_then(|index| index.get(&iri)),
            })
            .collect())
    }

    /// The current generation's result if its fetch has already succeeded.
    pub fn cached(&self) -> Option<Arc<CollectionResult>> {
        let slot = self.slot.lock();
        match slot.fetch.as_ref()?.peek()? {
            Ok(snapshot) => Some(Arc::clone(&snapshot.result)),
            Err(_) => None,
        }
    }

    /// Index of the most recently completed fetch, if any completed yet.
    pub fn index(&self) -> Option<Arc<IdentifierIndex>> {
        self.current
            .lock()
            .as_ref()
            .map(|snapshot| Arc::clone(&snapshot.index))
    }

    /// Join the current generation's fetch, starting it if needed.
    fn shared_fetch(&self) -> SharedFetch {
        let mut slot = self.slot.lock();
        if let Some(fetch) = &slot.fetch {
            if let Some(Err(err)) = fetch.peek() {
                warn!(
                    generation = slot.generation,
                    error = %err,
                    "previous fetch failed, fetching again"
                );
            } else {
                trace!(generation = slot.generation, "joining shared fetch");
                return fetch.clone();
            }
        }

        let fetch = self.start_fetch(slot.generation);
        slot.fetch = Some(fetch.clone());
        fetch
    }

    fn start_fetch(&self, generation: u64) -> SharedFetch {
        let inner = Arc::clone(&self.inner);
        let current = Arc::clone(&self.current);

        async move {
            debug!(generation, "fetching full collection");
            let params = QueryParams::new().with(PAGINATION_PARAM, false);
            let result = inner.list(&params).await.inspect_err(|err| {
                warn!(generation, error = %err, "collection fetch failed");
            })?;

            let index = Arc::new(IdentifierIndex::from_collection(&result));
            debug!(generation, entities = index.len(), "identifier index rebuilt");
            let snapshot = Arc::new(CacheSnapshot {
                generation,
                result,
                index,
            });

            {
                let mut current = current.lock();
                if current
                    .as_ref()
                    .is_none_or(|latest| latest.generation <= generation)
                {
                    *current = Some(Arc::clone(&snapshot));
                }
            }

            Ok::<_, ResourceError>(snapshot)
        }
        .boxed()
        .shared()
    }
}

#[async_trait]
impl<A: ResourceAccessor + 'static> ResourceAccessor for CachedResource<A> {
    async fn find(&self, id: &str) -> ResourceResult<Entity> {
        self.inner.find(id).await
    }

    async fn get(&self, iri: &str) -> ResourceResult<Entity> {
        self.inner.get(iri).await
    }

    async fn list(&self, params: &QueryParams) -> ResourceResult<Arc<CollectionResult>> {
        if params.is_empty() {
            return self.list_all().await;
        }
        trace!(params = params.len(), "filtered listing bypasses cache");
        self.inner.list(params).await
    }

    async fn save(&self, entity: &Entity) -> ResourceResult<Entity> {
        self.inner.save(entity).await
    }

    async fn patch(&self, entity: &Entity, changes: &Value) -> ResourceResult<Entity> {
        self.inner.patch(entity, changes).await
    }

    async fn delete(&self, entity: &Entity) -> ResourceResult<()> {
        self.inner.delete(entity).await
    }
}

impl<A: ResourceAccessor> fmt::Debug for CachedResource<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slot = self.slot.lock();
        f.debug_struct("CachedResource")
            .field("generation", &slot.generation)
            .field("fetch_started", &slot.fetch.is_some())
            .finish_non_exhaustive()
    }
}
