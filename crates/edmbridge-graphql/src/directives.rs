//! Routing and provenance directives.
//!
//! - `@backend(product, collection, method, endpoint)` routes an object or a
//!   mutation field to a backend collection
//! - `@connection(primaryKey, foreignKey)` carries join hints on fields
//! - `@enumValue(value, type)` records the source literal of an enum member
//!
//! Declarations are emitted once at the top of the document.

use crate::sdl::{Directive, DirectiveDeclaration, DirectiveLocation};

/// Directive name constants.
pub mod names {
    pub const BACKEND: &str = "backend";
    pub const CONNECTION: &str = "connection";
    pub const ENUM_VALUE: &str = "enumValue";
}

/// HTTP-like method tags carried by `@backend` on mutations.
pub mod methods {
    pub const ADD: &str = "POST";
    pub const UPDATE: &str = "PATCH";
    pub const REMOVE: &str = "DELETE";
}

/// `@backend(product: ..., collection: ...[, method: ...])`.
pub fn backend(product: &str, collection: &str, method: Option<&str>) -> Directive {
    let directive = Directive::new(names::BACKEND)
        .with_argument("product", product)
        .with_argument("collection", collection);
    match method {
        Some(method) => directive.with_argument("method", method),
        None => directive,
    }
}

/// `@enumValue(value: ..., type: ...)`.
pub fn enum_value(value: &str, values_type: &str) -> Directive {
    Directive::new(names::ENUM_VALUE)
        .with_argument("value", value)
        .with_argument("type", values_type)
}

/// The directive preamble. `@enumValue` is only declared when provenance is
/// emitted.
pub fn declarations(enum_provenance: bool) -> Vec<DirectiveDeclaration> {
    let mut declarations = vec![
        DirectiveDeclaration {
            name: names::BACKEND.to_string(),
            parameters: string_parameters(&["product", "collection", "method", "endpoint"]),
            locations: vec![DirectiveLocation::Object, DirectiveLocation::FieldDefinition],
        },
        DirectiveDeclaration {
            name: names::CONNECTION.to_string(),
            parameters: string_parameters(&["primaryKey", "foreignKey"]),
            locations: vec![DirectiveLocation::FieldDefinition],
        },
    ];

    if enum_provenance {
        declarations.push(DirectiveDeclaration {
            name: names::ENUM_VALUE.to_string(),
            parameters: string_parameters(&["value", "type"]),
            locations: vec![DirectiveLocation::EnumValue],
        });
    }

    declarations
}

fn string_parameters(names: &[&str]) -> Vec<(String, String)> {
    names
        .iter()
        .map(|name| (name.to_string(), "String".to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preamble() {
        let rendered: Vec<String> = declarations(false).iter().map(ToString::to_string).collect();
        assert_eq!(
            rendered,
            [
                concat!(
                    "directive @backend(product: String, collection: String, method: String, ",
                    "endpoint: String) on OBJECT | FIELD_DEFINITION"
                ),
                "directive @connection(primaryKey: String, foreignKey: String) on FIELD_DEFINITION",
            ]
        );
    }

    #[test]
    fn test_preamble_with_provenance() {
        let declarations = declarations(true);
        assert_eq!(declarations.len(), 3);
        assert_eq!(
            declarations[2].to_string(),
            "directive @enumValue(value: String, type: String) on ENUM_VALUE"
        );
    }

    #[test]
    fn test_backend_directive() {
        assert_eq!(
            backend("odata", "Widgets", Some(methods::ADD)).to_string(),
            r#"@backend(product: "odata", collection: "Widgets", method: "POST")"#
        );
        assert_eq!(
            backend("odata", "Widgets", None).to_string(),
            r#"@backend(product: "odata", collection: "Widgets")"#
        );
    }
}
