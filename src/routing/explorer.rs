//! Explorer menu links, one per GraphQL schema

use crate::config::SchemaConfig;
use serde::Serialize;

/// Menu link pointing at the explorer page of a schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplorerLink {
    pub id: String,
    pub route_name: String,
    pub path: String,
    pub title: String,
}

/// Derive one explorer link per configured schema
pub fn explorer_links(schemas: &[SchemaConfig]) -> Vec<ExplorerLink> {
    schemas
        .iter()
        .map(|schema| ExplorerLink {
            id: schema.id.clone(),
            route_name: format!("graphql.explorer.{}", schema.id),
            path: format!("{}/explorer", schema.path.trim_end_matches('/')),
            title: schema.title.clone().unwrap_or_else(|| schema.id.clone()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_per_schema() {
        let schemas = vec![
            SchemaConfig::new("default", "/graphql").with_title("Default schema"),
            SchemaConfig::new("admin", "/admin/graphql/"),
        ];

        let links = explorer_links(&schemas);
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].route_name, "graphql.explorer.default");
        assert_eq!(links[0].path, "/graphql/explorer");
        assert_eq!(links[0].title, "Default schema");
        assert_eq!(links[1].route_name, "graphql.explorer.admin");
        assert_eq!(links[1].path, "/admin/graphql/explorer");
        assert_eq!(links[1].title, "admin");
    }

    #[test]
    fn test_no_schemas_no_links() {
        assert!(explorer_links(&[]).is_empty());
    }
}
