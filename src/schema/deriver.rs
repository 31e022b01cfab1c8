//! Field derivation from config entity schemas
//!
//! Every exported property of a config entity type whose schema type maps to a
//! GraphQL scalar becomes one field on the entity's GraphQL object type. The
//! descriptors are a derived view over the type registry: rebuild them when the
//! registry changes instead of editing them.

use super::type_mapper::{GraphQLScalar, PropertyTypeMapper};
use crate::core::naming::Naming;
use crate::core::registry::{TypeDefinition, TypeRegistry};
use anyhow::Result;
use serde::Serialize;
use std::sync::Arc;

/// Property that is exported for serialization but never exposed
const INTERNAL_PROPERTY: &str = "_core";

/// Typed description of one derived GraphQL field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    /// GraphQL field name (`camelCase`)
    pub name: String,
    pub graphql_type: GraphQLScalar,
    /// GraphQL object type owning the field
    pub parent_type_id: String,
    /// Original config schema property key
    pub source_property: String,
    /// Entity type the property belongs to
    pub entity_type_id: String,
}

impl FieldDescriptor {
    /// Unique key of the descriptor (`entity_type:property`)
    pub fn id(&self) -> String {
        format!("{}:{}", self.entity_type_id, self.source_property)
    }
}

/// Derives field descriptors from a type registry
pub struct SchemaFieldDeriver {
    registry: Arc<dyn TypeRegistry>,
}

impl SchemaFieldDeriver {
    pub fn new(registry: Arc<dyn TypeRegistry>) -> Self {
        Self { registry }
    }

    /// Derive descriptors for every definition currently in the registry
    ///
    /// Registry failures are returned unchanged.
    pub fn derive(&self) -> Result<Vec<FieldDescriptor>> {
        let definitions = self.registry.definitions()?;
        Ok(Self::derive_from(&definitions))
    }

    /// Derive descriptors from a set of type definitions
    pub fn derive_from(definitions: &[TypeDefinition]) -> Vec<FieldDescriptor> {
        let mut fields = Vec::new();

        for definition in definitions {
            let derived = Self::derive_definition(definition);
            tracing::debug!(
                entity_type = %definition.entity_type_id,
                fields = derived.len(),
                "Derived config entity fields"
            );
            fields.extend(derived);
        }

        fields
    }

    fn derive_definition(definition: &TypeDefinition) -> Vec<FieldDescriptor> {
        if !definition.is_config() {
            return Vec::new();
        }

        let Some(mapping) = &definition.property_mapping else {
            return Vec::new();
        };

        let parent_type_id = Naming::type_case(&definition.entity_type_id);

        // Schema mapping order, restricted to exported properties
        mapping
            .iter()
            .filter(|(property, _)| property.as_str() != INTERNAL_PROPERTY)
            .filter(|(property, _)| definition.exported_properties.contains(*property))
            .filter_map(|(property, property_definition)| {
                let graphql_type = PropertyTypeMapper::map_type(&property_definition.property_type)?;
                Some(FieldDescriptor {
                    name: Naming::prop_case(property),
                    graphql_type,
                    parent_type_id: parent_type_id.clone(),
                    source_property: property.clone(),
                    entity_type_id: definition.entity_type_id.clone(),
                })
            })
            .collect()
    }
}
