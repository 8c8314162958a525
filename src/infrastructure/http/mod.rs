//! HTTP transport infrastructure
//!
//! reqwest-backed implementation of the [`Transport`](crate::domain::ports::Transport) port.

pub mod client;

pub use client::HttpTransport;
