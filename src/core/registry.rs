//! Entity type registry consumed by schema derivation

use anyhow::Result;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Storage flavour of an entity type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// Configuration entity backed by a config schema
    #[default]
    Config,
    /// Content entity; has no config schema
    Content,
}

/// Structural definition of one config schema property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyDefinition {
    /// Primitive schema type name (e.g. `string`, `integer`)
    #[serde(rename = "type")]
    pub property_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl PropertyDefinition {
    pub fn new(property_type: impl Into<String>) -> Self {
        Self {
            property_type: property_type.into(),
            label: None,
        }
    }
}

/// Read-only description of an entity type and its config schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDefinition {
    /// Entity type id (e.g. `node_type`)
    pub entity_type_id: String,

    #[serde(default)]
    pub kind: EntityKind,

    /// Config name prefix (e.g. `node.type`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_prefix: Option<String>,

    /// Properties exported when the entity is serialized
    #[serde(default)]
    pub exported_properties: Vec<String>,

    /// Structural schema mapping, `None` when the config schema is unknown
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_mapping: Option<IndexMap<String, PropertyDefinition>>,
}

impl TypeDefinition {
    /// Create a config entity definition without schema
    pub fn config(entity_type_id: impl Into<String>) -> Self {
        Self {
            entity_type_id: entity_type_id.into(),
            kind: EntityKind::Config,
            config_prefix: None,
            exported_properties: Vec::new(),
            property_mapping: None,
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config_prefix = Some(prefix.into());
        self
    }

    pub fn with_exported<I, S>(mut self, properties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exported_properties = properties.into_iter().map(Into::into).collect();
        self
    }

    /// Add a property to the structural mapping
    pub fn with_property(mut self, name: impl Into<String>, property_type: &str) -> Self {
        self.property_mapping
            .get_or_insert_with(IndexMap::new)
            .insert(name.into(), PropertyDefinition::new(property_type));
        self
    }

    pub fn is_config(&self) -> bool {
        self.kind == EntityKind::Config
    }
}

/// Source of entity type definitions
///
/// Implementations wrap the platform's entity type manager and typed config
/// manager. Failures are passed through to callers unchanged.
pub trait TypeRegistry: Send + Sync {
    /// Enumerate all known entity type definitions
    fn definitions(&self) -> Result<Vec<TypeDefinition>>;
}

/// Type registry backed by a fixed list of definitions
#[derive(Debug, Clone, Default)]
pub struct InMemoryTypeRegistry {
    definitions: Vec<TypeDefinition>,
}

impl InMemoryTypeRegistry {
    pub fn new(definitions: Vec<TypeDefinition>) -> Self {
        Self { definitions }
    }

    /// Register a definition, replacing one with the same entity type id
    pub fn register(&mut self, definition: TypeDefinition) {
        match self
            .definitions
            .iter_mut()
            .find(|d| d.entity_type_id == definition.entity_type_id)
        {
            Some(existing) => *existing = definition,
            None => self.definitions.push(definition),
        }
    }
}

impl TypeRegistry for InMemoryTypeRegistry {
    fn definitions(&self) -> Result<Vec<TypeDefinition>> {
        Ok(self.definitions.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_replaces_same_id() {
        let mut registry = InMemoryTypeRegistry::default();
        registry.register(TypeDefinition::config("block").with_prefix("block.block"));
        registry.register(TypeDefinition::config("block").with_prefix("block.other"));
        registry.register(TypeDefinition::config("menu"));

        let definitions = registry.definitions().unwrap();
        assert_eq!(definitions.len(), 2);
        assert_eq!(definitions[0].config_prefix.as_deref(), Some("block.other"));
    }

    #[test]
    fn test_definition_from_yaml() {
        let yaml = r#"
entity_type_id: node_type
config_prefix: node.type
exported_properties: [type, name, _core]
property_mapping:
  type: { type: string, label: Machine name }
  name: { type: label }
"#;
        let definition: TypeDefinition = serde_yaml::from_str(yaml).unwrap();

        assert!(definition.is_config());
        assert_eq!(definition.exported_properties.len(), 3);
        let mapping = definition.property_mapping.unwrap();
        assert_eq!(mapping["type"].property_type, "string");
        assert_eq!(mapping["name"].property_type, "label");
    }
}
