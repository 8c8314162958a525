//! Port trait definitions (Hexagonal Architecture)
//!
//! - Transport: raw HTTP exchange returning decoded JSON
//! - ResourceAccessor: CRUD operations against one resource endpoint
//!
//! The resource services only ever talk to the network through these traits,
//! which keeps them testable against in-memory fakes.

pub mod resource_accessor;
pub mod transport;

pub use resource_accessor::ResourceAccessor;
pub use transport::{HttpMethod, Transport};
