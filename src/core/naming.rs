//! GraphQL naming rules for derived fields and types
//!
//! Schema property keys come in `snake_case` or `dotted.case`; GraphQL fields
//! use `camelCase` and object types use `PascalCase`.

use regex::Regex;
use std::sync::OnceLock;

/// Utility for converting schema keys into GraphQL names
pub struct Naming;

impl Naming {
    /// Convert a property key to a GraphQL field name
    ///
    /// # Examples
    ///
    /// ```
    /// use graphql_bridge::core::naming::Naming;
    ///
    /// assert_eq!(Naming::prop_case("label"), "label");
    /// assert_eq!(Naming::prop_case("third_party.settings"), "thirdPartySettings");
    /// ```
    pub fn prop_case(name: &str) -> String {
        let mut result = Self::join_words(name);
        if let Some(first) = result.chars().next() {
            let lowered: String = first.to_lowercase().collect();
            result.replace_range(..first.len_utf8(), &lowered);
        }
        Self::guard_leading_digit(result)
    }

    /// Convert an identifier to a GraphQL object type name
    ///
    /// # Examples
    ///
    /// ```
    /// use graphql_bridge::core::naming::Naming;
    ///
    /// assert_eq!(Naming::type_case("node_type"), "NodeType");
    /// ```
    pub fn type_case(name: &str) -> String {
        Self::guard_leading_digit(Self::join_words(name))
    }

    fn join_words(name: &str) -> String {
        static SEPARATORS: OnceLock<Regex> = OnceLock::new();
        let separators = SEPARATORS.get_or_init(|| Regex::new(r"[^a-zA-Z0-9_]").expect("valid separator pattern"));

        separators
            .replace_all(name, "_")
            .split('_')
            .filter(|word| !word.is_empty())
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    None => String::new(),
                    Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                }
            })
            .collect()
    }

    // GraphQL names may not start with a digit
    fn guard_leading_digit(name: String) -> String {
        if name.starts_with(|c: char| c.is_ascii_digit()) {
            format!("_{}", name)
        } else {
            name
        }
    }
}
