//! Infrastructure layer module
//!
//! This module contains the adapters for external concerns:
//! - HTTP transport (reqwest)
//! - Configuration management (figment)
//! - Logging infrastructure (tracing-subscriber)
//!
//! Infrastructure implementations satisfy the port traits defined in the domain layer.

pub mod config;
pub mod http;
pub mod logging;
