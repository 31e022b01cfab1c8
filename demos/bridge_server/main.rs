//! GraphQL bridge server with an echo engine
//!
//! This example demonstrates:
//! - Loading schemas, entity types and persisted queries from YAML
//! - Single, batched, persisted and multipart upload requests
//! - Derived config entity fields at `/graphql/schema`
//!
//! The echo engine answers every request with the shape it received, so the
//! request handling can be explored with curl:
//!
//! ```text
//! curl 'localhost:3000/graphql?query=%7B%20a%20%7D'
//! curl localhost:3000/graphql -H 'content-type: application/json' -d '[{"query":"{a}"},{"query":"{b}"}]'
//! curl localhost:3000/graphql -H 'content-type: application/json' -d '{"queryId":"menus:all"}'
//! curl localhost:3000/graphql -F operations='{"query":"mutation($f: Upload!){ up(f: $f) }","variables":{"f":null}}' \
//!      -F map='{"0":["variables.f"]}' -F 0=@main.rs
//! ```

use graphql_bridge::prelude::*;
use serde_json::json;
use tracing_subscriber::EnvFilter;

/// Engine that reports the request it was given
struct EchoEngine;

#[async_trait]
impl QueryExecutor for EchoEngine {
    async fn execute(&self, schema: &str, request: SingleRequest) -> Result<serde_json::Value> {
        if request.query.is_empty() {
            return Ok(json!({ "errors": [{ "message": "Syntax Error: Unexpected <EOF>" }] }));
        }

        Ok(json!({
            "data": {
                "schema": schema,
                "query": request.query,
                "variables": request.variables,
                "persisted": request.persisted,
            }
        }))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,graphql_bridge=debug")),
        )
        .init();

    let config_path = concat!(env!("CARGO_MANIFEST_DIR"), "/demos/bridge_server/bridge.yaml");

    ServerBuilder::new()
        .with_config_file(config_path)?
        .with_executor(EchoEngine)
        .with_cors()
        .serve("127.0.0.1:3000")
        .await
}
