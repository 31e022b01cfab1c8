//! GraphQL API exposure
//!
//! Every configured schema gets a query endpoint accepting GET and POST
//! (JSON, form and multipart bodies), plus schema introspection routes. The
//! endpoint enhances the request into a single or batched execution and hands
//! it to the host's executor.

mod request;

pub use request::read_raw_request;

use crate::config::EXPLORERS_PATH;
use crate::core::error::{BridgeError, BridgeResult};
use crate::routing::{ExecutionRequest, explorer_links};
use crate::schema::render_sdl;
use crate::server::host::BridgeHost;
use anyhow::Result;
use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Request, State},
    response::IntoResponse,
    routing::get,
};
use serde_json::{Value, json};
use std::sync::Arc;

/// Router state of one schema's routes
#[derive(Clone)]
struct SchemaState {
    host: Arc<BridgeHost>,
    schema: String,
}

/// GraphQL API exposure implementation
pub struct GraphQLExposure;

impl GraphQLExposure {
    /// Build the GraphQL router from a host
    ///
    /// Per configured schema, at `{path}`:
    /// - `GET|POST {path}` - query endpoint (single and batch)
    /// - `GET {path}/schema` - SDL of the derived config entity fields
    /// - `GET {path}/fields` - derived and resolver-backed field definitions
    /// - `GET {path}/explorer` - explorer page (`explorer` feature)
    ///
    /// Plus `GET /graphql/explorers` listing the explorer links.
    ///
    /// Fails on configurations whose routes would collide.
    pub fn build_router(host: Arc<BridgeHost>) -> Result<Router> {
        host.config.validate()?;

        let mut router = Router::new().route(
            EXPLORERS_PATH,
            get(list_explorers).with_state(host.clone()),
        );

        for schema in &host.config.schemas {
            let state = SchemaState {
                host: host.clone(),
                schema: schema.id.clone(),
            };
            let schema_router = Router::new()
                .route(schema.endpoint(), get(graphql_request).post(graphql_request))
                .route(&schema.sub_path("schema"), get(schema_sdl))
                .route(&schema.sub_path("fields"), get(schema_fields));

            #[cfg(feature = "explorer")]
            let schema_router = schema_router.route(&schema.sub_path("explorer"), get(explorer_page));

            router = router.merge(schema_router.with_state(state));
        }

        Ok(router.layer(DefaultBodyLimit::max(host.config.server.body_limit)))
    }
}

/// Handler for GraphQL queries and mutations, single or batched
async fn graphql_request(
    State(state): State<SchemaState>,
    request: Request,
) -> BridgeResult<Json<Value>> {
    let host = &state.host;
    let route = host
        .route_for(&state.schema)
        .ok_or_else(|| BridgeError::UnknownSchema(state.schema.clone()))?;

    let raw = read_raw_request(request, host.config.server.body_limit).await?;
    let enhanced = host
        .enhancer
        .enhance(&route, &raw)
        .map_err(BridgeError::QueryProvider)?
        .ok_or_else(|| BridgeError::UnknownSchema(state.schema.clone()))?;

    tracing::debug!(
        schema = %enhanced.schema,
        controller = ?enhanced.controller,
        "Dispatching GraphQL request"
    );

    match enhanced.request {
        ExecutionRequest::Batch { queries } => {
            let classifier = host.enhancer.classifier();
            let requests = queries
                .iter()
                .map(|entry| classifier.resolve_entry(entry))
                .collect::<Result<Vec<_>>>()
                .map_err(BridgeError::QueryProvider)?;

            let responses = futures::future::try_join_all(
                requests
                    .into_iter()
                    .map(|single| host.executor.execute(&enhanced.schema, single)),
            )
            .await
            .map_err(BridgeError::Execution)?;

            Ok(Json(Value::Array(responses)))
        }
        ExecutionRequest::Single(single) => {
            let response = host
                .executor
                .execute(&enhanced.schema, single)
                .await
                .map_err(BridgeError::Execution)?;
            Ok(Json(response))
        }
    }
}

/// Handler for the derived schema SDL
async fn schema_sdl(State(state): State<SchemaState>) -> BridgeResult<impl IntoResponse> {
    let fields = state.host.deriver.derive().map_err(BridgeError::Registry)?;

    Ok((
        [(axum::http::header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        render_sdl(&fields),
    ))
}

/// Handler listing derived and resolver-backed fields
async fn schema_fields(State(state): State<SchemaState>) -> BridgeResult<Json<Value>> {
    let derived = state.host.deriver.derive().map_err(BridgeError::Registry)?;
    let resolved: Vec<_> = state.host.resolvers.iter().map(|r| r.definition()).collect();

    Ok(Json(json!({
        "schema": state.schema,
        "derived": derived,
        "resolved": resolved,
    })))
}

#[cfg(feature = "explorer")]
/// Handler for the GraphQL explorer page
async fn explorer_page(State(state): State<SchemaState>) -> impl IntoResponse {
    use async_graphql::http::{GraphQLPlaygroundConfig, playground_source};

    let endpoint = state
        .host
        .config
        .find_schema(&state.schema)
        .map(|s| s.endpoint().to_string())
        .unwrap_or_else(|| "/graphql".to_string());

    axum::response::Html(playground_source(GraphQLPlaygroundConfig::new(&endpoint)))
}

/// Handler listing explorer links of all schemas
async fn list_explorers(State(host): State<Arc<BridgeHost>>) -> impl IntoResponse {
    Json(explorer_links(&host.config.schemas))
}
