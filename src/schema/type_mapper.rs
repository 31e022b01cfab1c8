//! Primitive config schema types to GraphQL scalars

/// GraphQL scalar types a config property can be exposed as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum GraphQLScalar {
    String,
    Int,
    Boolean,
}

impl GraphQLScalar {
    pub fn as_str(&self) -> &'static str {
        match self {
            GraphQLScalar::String => "String",
            GraphQLScalar::Int => "Int",
            GraphQLScalar::Boolean => "Boolean",
        }
    }
}

impl std::fmt::Display for GraphQLScalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed mapping from primitive schema types to GraphQL scalars
pub struct PropertyTypeMapper;

impl PropertyTypeMapper {
    /// Map a primitive schema type name
    ///
    /// Returns `None` for types without a scalar counterpart; such properties
    /// get no field.
    pub fn map_type(primitive: &str) -> Option<GraphQLScalar> {
        match primitive {
            "string" | "text" => Some(GraphQLScalar::String),
            "integer" => Some(GraphQLScalar::Int),
            "boolean" => Some(GraphQLScalar::Boolean),
            _ => None,
        }
    }
}
