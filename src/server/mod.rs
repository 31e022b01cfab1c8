//! Server module for exposing GraphQL schemas over HTTP
//!
//! This module provides a `ServerBuilder` that wires configuration, the type
//! registry, persisted query providers and the execution engine into an axum
//! router.

pub mod builder;
pub mod executor;
pub mod exposure;
pub mod host;

pub use builder::ServerBuilder;
pub use executor::QueryExecutor;
pub use exposure::GraphQLExposure;
pub use host::BridgeHost;
