//! GraphQL route enhancement
//!
//! A GraphQL route does not know upfront which controller serves it: the same
//! path accepts single and batched requests. The enhancer extracts and
//! classifies the request parameters and picks the controller accordingly.

use super::classifier::{ExecutionRequest, RequestClassifier};
use super::params::{RawRequest, RequestParamExtractor};
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Controller serving an enhanced GraphQL route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Controller {
    /// Executes one query
    Single,
    /// Executes a batch of queries
    Multiple,
}

/// A route as known to the router
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteDefinition {
    pub name: String,
    pub path: String,
    /// Schema id for GraphQL routes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graphql_schema: Option<String>,
    /// Explicitly assigned controller; enhancement leaves such routes alone
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controller: Option<Controller>,
}

impl RouteDefinition {
    /// Query route of a GraphQL schema
    pub fn graphql(schema: impl Into<String>, path: impl Into<String>) -> Self {
        let schema = schema.into();
        Self {
            name: format!("graphql.query.{}", schema),
            path: path.into(),
            graphql_schema: Some(schema),
            controller: None,
        }
    }

    pub fn with_controller(mut self, controller: Controller) -> Self {
        self.controller = Some(controller);
        self
    }
}

/// Outcome of enhancing a GraphQL route
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnhancedRoute {
    pub schema: String,
    pub controller: Controller,
    pub request: ExecutionRequest,
}

/// Enhances GraphQL routes with their execution request
#[derive(Clone)]
pub struct QueryRouteEnhancer {
    extractor: RequestParamExtractor,
    classifier: RequestClassifier,
}

impl QueryRouteEnhancer {
    pub fn new(classifier: RequestClassifier) -> Self {
        Self {
            extractor: RequestParamExtractor::new(),
            classifier,
        }
    }

    /// Whether the route is a GraphQL route
    pub fn applies(&self, route: &RouteDefinition) -> bool {
        route.graphql_schema.is_some()
    }

    /// Enhance a route with the request it serves
    ///
    /// Returns `None` for routes this enhancer does not apply to and for
    /// routes that already have a controller.
    pub fn enhance(&self, route: &RouteDefinition, request: &RawRequest) -> Result<Option<EnhancedRoute>> {
        let Some(schema) = &route.graphql_schema else {
            return Ok(None);
        };
        if route.controller.is_some() {
            return Ok(None);
        }

        let params = self.extractor.extract(request);
        let request = self.classifier.classify(&params)?;
        let controller = match request {
            ExecutionRequest::Single(_) => Controller::Single,
            ExecutionRequest::Batch { .. } => Controller::Multiple,
        };

        tracing::debug!(route = %route.name, controller = ?controller, "Enhanced GraphQL route");

        Ok(Some(EnhancedRoute {
            schema: schema.clone(),
            controller,
            request,
        }))
    }

    pub fn classifier(&self) -> &RequestClassifier {
        &self.classifier
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::query_provider::NoQueryProvider;
    use crate::routing::classifier::SingleRequest;
    use std::sync::Arc;

    fn enhancer() -> QueryRouteEnhancer {
        QueryRouteEnhancer::new(RequestClassifier::new(Arc::new(NoQueryProvider)))
    }

    #[test]
    fn test_applies_only_to_graphql_routes() {
        let enhancer = enhancer();
        let graphql = RouteDefinition::graphql("default", "/graphql");
        let other = RouteDefinition {
            name: "user.login".to_string(),
            path: "/user/login".to_string(),
            graphql_schema: None,
            controller: None,
        };

        assert!(enhancer.applies(&graphql));
        assert!(!enhancer.applies(&other));
        assert!(enhancer.enhance(&other, &RawRequest::new()).unwrap().is_none());
    }

    #[test]
    fn test_single_controller() {
        let route = RouteDefinition::graphql("default", "/graphql");
        let request = RawRequest::new().with_raw_body(r#"{"query": "{ a }"}"#);

        let enhanced = enhancer().enhance(&route, &request).unwrap().unwrap();
        assert_eq!(enhanced.schema, "default");
        assert_eq!(enhanced.controller, Controller::Single);
        assert_eq!(route.name, "graphql.query.default");
    }

    #[test]
    fn test_multiple_controller() {
        let route = RouteDefinition::graphql("default", "/graphql");
        let request = RawRequest::new().with_raw_body(r#"[{"query": "{ a }"}, {"query": "{ b }"}]"#);

        let enhanced = enhancer().enhance(&route, &request).unwrap().unwrap();
        assert_eq!(enhanced.controller, Controller::Multiple);
        assert!(enhanced.request.is_batch());
    }

    #[test]
    fn test_unclassifiable_request_uses_single_controller() {
        let route = RouteDefinition::graphql("default", "/graphql");

        let enhanced = enhancer().enhance(&route, &RawRequest::new()).unwrap().unwrap();
        assert_eq!(enhanced.controller, Controller::Single);
        assert_eq!(enhanced.request, ExecutionRequest::Single(SingleRequest::empty()));
    }

    #[test]
    fn test_explicit_controller_is_untouched() {
        let route = RouteDefinition::graphql("default", "/graphql").with_controller(Controller::Single);
        let request = RawRequest::new().with_raw_body(r#"[{"query": "{ a }"}]"#);

        assert!(enhancer().enhance(&route, &request).unwrap().is_none());
    }
}
