//! Execution engine seam
//!
//! The bridge only shapes requests; parsing, validation and execution belong
//! to the engine plugged in here.

use crate::routing::SingleRequest;
use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Executes one GraphQL query against a schema
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    /// Execute a single request and return the GraphQL response body
    ///
    /// An empty `query` must be answered with the engine's own validation
    /// error; the bridge never produces one itself.
    async fn execute(&self, schema: &str, request: SingleRequest) -> Result<Value>;
}
