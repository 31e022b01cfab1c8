//! Configuration loading and management

use crate::core::error::ConfigError;
use crate::core::registry::TypeDefinition;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Default request body limit (2 MiB)
pub const DEFAULT_BODY_LIMIT: usize = 2 * 1024 * 1024;

/// Route listing the explorer links of all schemas
pub const EXPLORERS_PATH: &str = "/graphql/explorers";

/// A GraphQL schema exposed over HTTP
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaConfig {
    /// Schema id (e.g., "default")
    pub id: String,

    /// Query endpoint path (e.g., "/graphql")
    pub path: String,

    /// Human-readable title used for explorer links
    #[serde(default)]
    pub title: Option<String>,
}

impl SchemaConfig {
    pub fn new(id: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            path: path.into(),
            title: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Query endpoint path without trailing slash (`/` for the root)
    pub fn endpoint(&self) -> &str {
        match self.path.trim_end_matches('/') {
            "" => "/",
            path => path,
        }
    }

    /// Path of a route nested under the endpoint (e.g. `schema`)
    pub fn sub_path(&self, suffix: &str) -> String {
        format!("{}/{}", self.path.trim_end_matches('/'), suffix)
    }

    /// Every route registered for the schema
    pub fn route_paths(&self) -> Vec<String> {
        vec![
            self.endpoint().to_string(),
            self.sub_path("schema"),
            self.sub_path("fields"),
            self.sub_path("explorer"),
        ]
    }
}

/// HTTP server settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Maximum accepted request body size in bytes
    #[serde(default = "default_body_limit")]
    pub body_limit: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }
}

fn default_body_limit() -> usize {
    DEFAULT_BODY_LIMIT
}

/// Complete configuration of the bridge
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Exposed GraphQL schemas
    #[serde(default)]
    pub schemas: Vec<SchemaConfig>,

    /// Entity type definitions fed to field derivation
    #[serde(default)]
    pub entity_types: Vec<TypeDefinition>,

    /// Persisted queries (query id -> query text)
    #[serde(default)]
    pub persisted_queries: HashMap<String, String>,

    #[serde(default)]
    pub server: ServerConfig,
}

impl BridgeConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_string(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that schemas can be routed side by side
    ///
    /// Schema ids must be unique, paths must be absolute and free of route
    /// pattern characters, and no two routes may collide, neither with each
    /// other nor with [`EXPLORERS_PATH`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut ids = HashSet::new();
        let mut routes: HashMap<String, &str> = HashMap::new();

        for schema in &self.schemas {
            if !ids.insert(schema.id.as_str()) {
                return Err(ConfigError::DuplicateSchema(schema.id.clone()));
            }

            if !schema.path.starts_with('/') || schema.path.contains(['{', '}', '*']) {
                return Err(ConfigError::InvalidPath {
                    schema: schema.id.clone(),
                    path: schema.path.clone(),
                });
            }

            for path in schema.route_paths() {
                if path == EXPLORERS_PATH {
                    return Err(ConfigError::ReservedPath {
                        schema: schema.id.clone(),
                        path,
                    });
                }
                if let Some(first) = routes.insert(path.clone(), &schema.id) {
                    return Err(ConfigError::DuplicatePath {
                        path,
                        first: first.to_string(),
                        second: schema.id.clone(),
                    });
                }
            }
        }

        Ok(())
    }

    /// Find a schema by id
    pub fn find_schema(&self, id: &str) -> Option<&SchemaConfig> {
        self.schemas.iter().find(|schema| schema.id == id)
    }

    /// Merge multiple configurations
    ///
    /// Schemas are concatenated, keeping the first schema for a repeated id.
    /// Entity types and persisted queries from later configs replace earlier
    /// ones with the same id. The last config's server settings win.
    pub fn merge(configs: Vec<BridgeConfig>) -> Self {
        let mut merged = BridgeConfig::default();

        for config in configs {
            for schema in config.schemas {
                if merged.find_schema(&schema.id).is_none() {
                    merged.schemas.push(schema);
                }
            }

            for entity_type in config.entity_types {
                match merged
                    .entity_types
                    .iter_mut()
                    .find(|existing| existing.entity_type_id == entity_type.entity_type_id)
                {
                    Some(existing) => *existing = entity_type,
                    None => merged.entity_types.push(entity_type),
                }
            }

            merged.persisted_queries.extend(config.persisted_queries);
            merged.server = config.server;
        }

        merged
    }

    /// Create a default configuration for testing
    pub fn default_config() -> Self {
        Self {
            schemas: vec![SchemaConfig::new("default", "/graphql").with_title("Default schema")],
            entity_types: vec![
                TypeDefinition::config("node_type")
                    .with_prefix("node.type")
                    .with_exported(["type", "name", "description", "new_revision", "_core"])
                    .with_property("type", "string")
                    .with_property("name", "label")
                    .with_property("description", "text")
                    .with_property("new_revision", "boolean"),
                TypeDefinition::config("menu")
                    .with_prefix("system.menu")
                    .with_exported(["id", "label", "locked", "weight"])
                    .with_property("id", "string")
                    .with_property("label", "label")
                    .with_property("locked", "boolean"),
            ],
            persisted_queries: HashMap::new(),
            server: ServerConfig::default(),
        }
    }
}
