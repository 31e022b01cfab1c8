//! Server host holding all bridge state
//!
//! The host is transport-agnostic: HTTP exposures borrow it to shape
//! requests, derive schema fields and hand queries to the executor.

use super::executor::QueryExecutor;
use crate::config::BridgeConfig;
use crate::core::query_provider::PersistedQueryProvider;
use crate::core::registry::TypeRegistry;
use crate::routing::{QueryRouteEnhancer, RequestClassifier, RouteDefinition};
use crate::schema::SchemaFieldDeriver;
use crate::schema::fields::{FieldResolver, builtin_resolvers};
use std::sync::Arc;

/// Host context containing all bridge state
pub struct BridgeHost {
    /// Merged configuration
    pub config: Arc<BridgeConfig>,

    /// Route enhancer (parameter extraction + classification)
    pub enhancer: QueryRouteEnhancer,

    /// Field deriver over the type registry
    pub deriver: SchemaFieldDeriver,

    /// Runtime field resolvers
    pub resolvers: Vec<Box<dyn FieldResolver>>,

    /// External execution engine
    pub executor: Arc<dyn QueryExecutor>,
}

impl BridgeHost {
    pub fn new(
        config: BridgeConfig,
        type_registry: Arc<dyn TypeRegistry>,
        query_provider: Arc<dyn PersistedQueryProvider>,
        executor: Arc<dyn QueryExecutor>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            enhancer: QueryRouteEnhancer::new(RequestClassifier::new(query_provider)),
            deriver: SchemaFieldDeriver::new(type_registry),
            resolvers: builtin_resolvers(),
            executor,
        }
    }

    /// Query route of a configured schema
    pub fn route_for(&self, schema: &str) -> Option<RouteDefinition> {
        self.config
            .find_schema(schema)
            .map(|s| RouteDefinition::graphql(&s.id, s.endpoint()))
    }

    /// Ids of all configured schemas
    pub fn schema_ids(&self) -> Vec<&str> {
        self.config.schemas.iter().map(|s| s.id.as_str()).collect()
    }
}
