//! Statically declared fields resolved against runtime values
//!
//! A resolver yields at most one value for its parent; a parent of the wrong
//! shape simply resolves to nothing.

use super::type_mapper::GraphQLScalar;
use crate::core::value::Value;
use serde::Serialize;

/// A routed URL as seen by field resolvers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteUrl {
    pub route_name: String,
    /// Internal system path without leading slash (e.g. `node/1`)
    pub internal_path: String,
}

impl RouteUrl {
    pub fn new(route_name: impl Into<String>, internal_path: impl Into<String>) -> Self {
        Self {
            route_name: route_name.into(),
            internal_path: internal_path.into(),
        }
    }
}

/// Runtime parent value a field is resolved on
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedValue {
    Url(RouteUrl),
    Other(Value),
}

/// Static declaration of a resolver-backed field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub graphql_type: GraphQLScalar,
    pub parents: Vec<&'static str>,
    /// Whether the field is safe to expose without extra access checks
    pub secure: bool,
}

/// A field whose value is computed from its parent at runtime
///
/// The bridge only publishes [`FieldResolver::definition`] (see the
/// `/fields` route). The execution engine behind `QueryExecutor` registers
/// the field and calls [`FieldResolver::resolve`] while executing queries.
pub trait FieldResolver: Send + Sync {
    fn definition(&self) -> FieldDefinition;

    /// Resolve the field value, `None` when the parent does not apply
    ///
    /// Called by the execution engine for every parent of a declared type.
    fn resolve(&self, parent: &ResolvedValue) -> Option<Value>;
}

/// `pathInternal` on `InternalUrl`: the route's internal path
#[derive(Debug, Clone, Copy, Default)]
pub struct InternalPathField;

impl FieldResolver for InternalPathField {
    fn definition(&self) -> FieldDefinition {
        FieldDefinition {
            id: "internal_url_path_internal",
            name: "pathInternal",
            description: "The route's internal path.",
            graphql_type: GraphQLScalar::String,
            parents: vec!["InternalUrl"],
            secure: true,
        }
    }

    fn resolve(&self, parent: &ResolvedValue) -> Option<Value> {
        match parent {
            ResolvedValue::Url(url) => Some(Value::String(format!("/{}", url.internal_path))),
            ResolvedValue::Other(_) => None,
        }
    }
}

/// Resolvers shipped with the bridge
pub fn builtin_resolvers() -> Vec<Box<dyn FieldResolver>> {
    vec![Box::new(InternalPathField)]
}
