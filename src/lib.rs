//! Hydra Client - caching access layer for JSON-LD/Hydra REST APIs
//!
//! Normalizes API payloads into addressable entities (`@id` → `@href`),
//! provides CRUD access per resource endpoint, and layers a single-flight
//! collection cache with identifier resolution on top of it.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): Entities, collections, references, errors and port traits
//! - **Service Layer** (`services`): Normalization, REST access and caching
//! - **Infrastructure Layer** (`infrastructure`): HTTP transport, configuration, logging
//! - **CLI Layer** (`cli`): Command-line interface
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use hydra_client::{CachedResource, ClientConfig, RestApi, RestResource};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let api = Arc::new(RestApi::from_config(&ClientConfig::with_api_root("https://example.com/api"))?);
//! let books = CachedResource::new(Arc::new(RestResource::new(api, "/books")));
//!
//! let all = books.list_all().await?;
//! let first = books.resolve("/books/1").await?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::models::{
    ClientConfig, CollectionResult, Entity, EntityRef, LoggingConfig, PartialCollectionView,
    QueryParams, HREF_FIELD, ID_FIELD,
};
pub use domain::ports::{HttpMethod, ResourceAccessor, Transport};
pub use domain::{ResourceError, ResourceResult};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use infrastructure::http::HttpTransport;
pub use services::{CachedResource, EntityNormalizer, IdentifierIndex, RestApi, RestResource};
