//! SDL rendering of derived fields

use super::deriver::FieldDescriptor;
use indexmap::IndexMap;

/// Render descriptors as GraphQL object type extensions
///
/// Descriptors are grouped by parent type, in order of first appearance.
pub fn render_sdl(fields: &[FieldDescriptor]) -> String {
    let mut by_parent: IndexMap<&str, Vec<&FieldDescriptor>> = IndexMap::new();
    for field in fields {
        by_parent.entry(field.parent_type_id.as_str()).or_default().push(field);
    }

    let mut sdl = String::new();
    for (parent, fields) in by_parent {
        if !sdl.is_empty() {
            sdl.push('\n');
        }
        sdl.push_str(&format!("extend type {} {{\n", parent));
        for field in fields {
            sdl.push_str(&format!("  {}: {}\n", field.name, field.graphql_type));
        }
        sdl.push_str("}\n");
    }

    sdl
}
