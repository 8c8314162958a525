//! Service layer
//!
//! - `normalizer`: JSON-LD entity and Hydra collection normalization
//! - `rest_api`: transport + normalization for single/collection requests
//! - `rest_resource`: uncached CRUD accessor for one endpoint
//! - `cached_resource`: single-flight collection cache and `@id` resolver

pub mod cached_resource;
pub mod normalizer;
pub mod rest_api;
pub mod rest_resource;

pub use cached_resource::{CachedResource, IdentifierIndex};
pub use normalizer::EntityNormalizer;
pub use rest_api::RestApi;
pub use rest_resource::RestResource;
