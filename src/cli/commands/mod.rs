//! CLI command implementations.

pub mod resource;
