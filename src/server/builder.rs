//! ServerBuilder for fluent API to build GraphQL bridge servers

use super::executor::QueryExecutor;
use super::exposure::GraphQLExposure;
use super::host::BridgeHost;
use crate::config::BridgeConfig;
use crate::core::query_provider::{ChainQueryProvider, InMemoryQueryProvider, PersistedQueryProvider};
use crate::core::registry::{InMemoryTypeRegistry, TypeRegistry};
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Builder for creating GraphQL servers
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_config(BridgeConfig::from_yaml_file("bridge.yaml")?)
///     .with_executor(MyEngine::new())
///     .build()?;
/// ```
pub struct ServerBuilder {
    configs: Vec<BridgeConfig>,
    type_registry: Option<Arc<dyn TypeRegistry>>,
    query_providers: ChainQueryProvider,
    executor: Option<Arc<dyn QueryExecutor>>,
    custom_routes: Vec<Router>,
    cors: bool,
}

impl ServerBuilder {
    /// Create a new ServerBuilder
    pub fn new() -> Self {
        Self {
            configs: Vec::new(),
            type_registry: None,
            query_providers: ChainQueryProvider::new(),
            executor: None,
            custom_routes: Vec::new(),
            cors: false,
        }
    }

    /// Add a configuration; several configurations are merged
    pub fn with_config(mut self, config: BridgeConfig) -> Self {
        self.configs.push(config);
        self
    }

    /// Load and add a YAML configuration file
    pub fn with_config_file(self, path: &str) -> Result<Self> {
        let config = BridgeConfig::from_yaml_file(path)?;
        Ok(self.with_config(config))
    }

    /// Set the type registry
    ///
    /// Defaults to the entity types declared in the configuration.
    pub fn with_type_registry(mut self, registry: impl TypeRegistry + 'static) -> Self {
        self.type_registry = Some(Arc::new(registry));
        self
    }

    /// Add a persisted query provider
    ///
    /// Providers are asked in registration order, before the queries declared
    /// in the configuration.
    pub fn with_query_provider(mut self, provider: impl PersistedQueryProvider + 'static) -> Self {
        self.query_providers.push(Arc::new(provider));
        self
    }

    /// Set the execution engine (required)
    pub fn with_executor(mut self, executor: impl QueryExecutor + 'static) -> Self {
        self.executor = Some(Arc::new(executor));
        self
    }

    /// Add custom routes to the server
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Allow cross-origin requests from any origin
    pub fn with_cors(mut self) -> Self {
        self.cors = true;
        self
    }

    /// Build the transport-agnostic host
    pub fn build_host(&mut self) -> Result<BridgeHost> {
        let config = BridgeConfig::merge(std::mem::take(&mut self.configs));
        config.validate()?;

        let executor = self
            .executor
            .take()
            .ok_or_else(|| anyhow::anyhow!("QueryExecutor is required. Call .with_executor()"))?;

        let type_registry = self
            .type_registry
            .take()
            .unwrap_or_else(|| Arc::new(InMemoryTypeRegistry::new(config.entity_types.clone())));

        let mut providers = std::mem::take(&mut self.query_providers);
        if !config.persisted_queries.is_empty() {
            providers.push(Arc::new(InMemoryQueryProvider::new(config.persisted_queries.clone())));
        }

        tracing::debug!(
            schemas = config.schemas.len(),
            entity_types = config.entity_types.len(),
            query_providers = providers.len(),
            "Building GraphQL bridge host"
        );

        Ok(BridgeHost::new(config, type_registry, Arc::new(providers), executor))
    }

    /// Build the final router
    pub fn build(mut self) -> Result<Router> {
        let host = Arc::new(self.build_host()?);
        let mut app = GraphQLExposure::build_router(host)?;

        for routes in std::mem::take(&mut self.custom_routes) {
            app = app.merge(routes);
        }

        if self.cors {
            app = app.layer(CorsLayer::permissive());
        }

        Ok(app.layer(TraceLayer::new_for_http()))
    }

    /// Serve the application with graceful shutdown
    ///
    /// Handles SIGTERM and SIGINT (Ctrl+C).
    ///
    /// # Example
    ///
    /// ```ignore
    /// ServerBuilder::new()
    ///     .with_config(config)
    ///     .with_executor(engine)
    ///     .serve("127.0.0.1:3000").await?;
    /// ```
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("GraphQL bridge listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
