//! Request routing: parameter extraction, request classification and route
//! enhancement for GraphQL endpoints

pub mod classifier;
pub mod enhancer;
pub mod explorer;
pub mod params;

pub use classifier::{ExecutionRequest, RequestClassifier, SingleRequest};
pub use enhancer::{Controller, EnhancedRoute, QueryRouteEnhancer, RouteDefinition};
pub use explorer::{ExplorerLink, explorer_links};
pub use params::{RawRequest, RequestParamExtractor};
