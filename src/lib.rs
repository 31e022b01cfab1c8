//! # GraphQL Bridge
//!
//! GraphQL request handling for content platforms.
//!
//! ## Features
//!
//! - **Request Shaping**: GET query strings, JSON bodies and multipart forms are
//!   merged into one parameter mapping with a fixed precedence
//! - **Batching**: contiguous numerically indexed payloads run as a batch
//! - **File Uploads**: multipart uploads are bound into `variables` following
//!   the GraphQL multipart request convention
//! - **Persisted Queries**: query text can be looked up from request parameters
//! - **Schema Derivation**: GraphQL fields are derived from config entity schemas
//! - **Configuration-Based**: schemas, entity types and persisted queries via YAML
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use graphql_bridge::prelude::*;
//!
//! let extractor = RequestParamExtractor::new();
//! let classifier = RequestClassifier::new(Arc::new(NoQueryProvider));
//!
//! let raw = RawRequest::new().with_raw_body(r#"[{"query":"{a}"},{"query":"{b}"}]"#);
//! let request = classifier.classify(&extractor.extract(&raw))?;
//! assert!(request.is_batch());
//! ```

pub mod config;
pub mod core;
pub mod routing;
pub mod schema;
pub mod server;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        error::{BridgeError, BridgeResult, ConfigError, RequestError},
        naming::Naming,
        query_provider::{
            ChainQueryProvider, InMemoryQueryProvider, NoQueryProvider, PersistedQueryProvider,
        },
        registry::{EntityKind, InMemoryTypeRegistry, PropertyDefinition, TypeDefinition, TypeRegistry},
        value::{Map, Params, UploadedFile, Value},
    };

    // === Routing ===
    pub use crate::routing::{
        Controller, EnhancedRoute, ExecutionRequest, ExplorerLink, QueryRouteEnhancer, RawRequest,
        RequestClassifier, RequestParamExtractor, RouteDefinition, SingleRequest, explorer_links,
    };

    // === Schema ===
    pub use crate::schema::{
        FieldDefinition, FieldDescriptor, FieldResolver, GraphQLScalar, InternalPathField,
        PropertyTypeMapper, ResolvedValue, RouteUrl, SchemaFieldDeriver, render_sdl,
    };

    // === Config ===
    pub use crate::config::{BridgeConfig, SchemaConfig, ServerConfig};

    // === Server ===
    pub use crate::server::{BridgeHost, GraphQLExposure, QueryExecutor, ServerBuilder};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use serde::{Deserialize, Serialize};
    pub use std::sync::Arc;

    // === Axum ===
    pub use axum::Router;
}
