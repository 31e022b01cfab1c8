//! Typed error handling for the bridge
//!
//! Classification ambiguity is never an error: malformed requests degrade to
//! a well-defined fallback shape. The errors here cover what genuinely fails:
//! reading the HTTP request, loading configuration, and collaborators
//! (type registry, persisted query provider, execution engine).
//!
//! # Error Categories
//!
//! - [`RequestError`]: the HTTP request could not be read
//! - [`ConfigError`]: configuration could not be loaded
//! - [`BridgeError::Registry`], [`BridgeError::QueryProvider`],
//!   [`BridgeError::Execution`]: collaborator failures, passed through as is

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// The main error type of the bridge
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error(transparent)]
    Request(#[from] RequestError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The type registry failed to enumerate definitions
    #[error("Type registry failure: {0}")]
    Registry(anyhow::Error),

    /// The persisted query provider failed
    #[error("Persisted query lookup failed: {0}")]
    QueryProvider(anyhow::Error),

    /// The execution engine failed
    #[error("GraphQL execution failed: {0}")]
    Execution(anyhow::Error),

    #[error("Unknown GraphQL schema '{0}'")]
    UnknownSchema(String),
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl BridgeError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            BridgeError::Request(e) => e.status_code(),
            BridgeError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            BridgeError::Registry(_) => StatusCode::INTERNAL_SERVER_ERROR,
            BridgeError::QueryProvider(_) => StatusCode::INTERNAL_SERVER_ERROR,
            BridgeError::Execution(_) => StatusCode::INTERNAL_SERVER_ERROR,
            BridgeError::UnknownSchema(_) => StatusCode::NOT_FOUND,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            BridgeError::Request(e) => e.error_code(),
            BridgeError::Config(_) => "CONFIG_ERROR",
            BridgeError::Registry(_) => "TYPE_REGISTRY_ERROR",
            BridgeError::QueryProvider(_) => "QUERY_PROVIDER_ERROR",
            BridgeError::Execution(_) => "GRAPHQL_EXECUTION_ERROR",
            BridgeError::UnknownSchema(_) => "UNKNOWN_SCHEMA",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
        }
    }
}

impl IntoResponse for BridgeError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), error = %self, "GraphQL request failed");
        }
        (status, Json(self.to_response())).into_response()
    }
}

// =============================================================================
// Request Errors
// =============================================================================

/// Errors raised while reading an incoming HTTP request
#[derive(Debug, Error)]
pub enum RequestError {
    /// The request body could not be read
    #[error("Failed to read request body: {0}")]
    Body(String),

    /// The query string could not be decoded
    #[error("Invalid query string: {0}")]
    QueryString(String),

    /// A multipart stream could not be decoded
    #[error("Invalid multipart request: {0}")]
    Multipart(String),

    /// The request body exceeds the configured limit
    #[error("Request body exceeds {limit} bytes")]
    TooLarge { limit: usize },
}

impl RequestError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RequestError::Body(_) => StatusCode::BAD_REQUEST,
            RequestError::QueryString(_) => StatusCode::BAD_REQUEST,
            RequestError::Multipart(_) => StatusCode::BAD_REQUEST,
            RequestError::TooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            RequestError::Body(_) => "INVALID_BODY",
            RequestError::QueryString(_) => "INVALID_QUERY_STRING",
            RequestError::Multipart(_) => "INVALID_MULTIPART",
            RequestError::TooLarge { .. } => "PAYLOAD_TOO_LARGE",
        }
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Duplicate schema id '{0}'")]
    DuplicateSchema(String),

    /// A schema path that cannot be routed
    #[error("Invalid path '{path}' for schema '{schema}': paths start with '/' and hold no '{{', '}}' or '*'")]
    InvalidPath { schema: String, path: String },

    /// Two schemas would register the same route
    #[error("Schemas '{first}' and '{second}' both route '{path}'")]
    DuplicatePath {
        path: String,
        first: String,
        second: String,
    },

    /// A schema route shadows a route of the bridge itself
    #[error("Route '{path}' of schema '{schema}' is reserved")]
    ReservedPath { schema: String, path: String },
}

/// Result type alias using BridgeError
pub type BridgeResult<T> = Result<T, BridgeError>;
