//! Domain layer for the Hydra client
//!
//! Pure data types (entities, collections, references, configuration), the
//! error taxonomy, and the port traits infrastructure adapters implement.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{ResourceError, ResourceResult};
