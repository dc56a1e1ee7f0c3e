//! EDM primitive type table.
//!
//! Maps `Edm.*` keywords to the normalized scalar names used in the mediation
//! schema. `Edm.DateTime` and `Edm.DateTimeOffset` both normalize to
//! `datetime`.

/// Namespace prefix reserved for EDM primitive types.
pub const PRIMITIVE_NAMESPACE_PREFIX: &str = "Edm.";

/// Normalized scalar used for enums without a declared underlying type.
pub const DEFAULT_ENUM_VALUES_TYPE: &str = "int32";

/// Maps an EDM primitive keyword to its normalized scalar name.
///
/// Returns `None` for anything outside the table, including unsupported
/// `Edm.*` keywords. Use [`is_primitive_namespace`] to tell the two apart.
pub fn normalize_primitive(edm_type: &str) -> Option<&'static str> {
    let normalized = match edm_type {
        "Edm.String" | "Edm.Guid" => "string",
        "Edm.Boolean" => "boolean",
        "Edm.Date" => "date",
        "Edm.DateTime" | "Edm.DateTimeOffset" => "datetime",
        "Edm.Single" => "float32",
        "Edm.Double" => "float64",
        "Edm.Int16" => "int16",
        "Edm.Int32" | "Edm.Int" => "int32",
        "Edm.Int64" => "int64",
        "Edm.Decimal" => "decimal",
        "Edm.Binary" => "binary",
        "Edm.Stream" => "stream",
        "Edm.GeographyPoint" => "geopoint",
        "Edm.Duration" => "duration",
        _ => return None,
    };
    Some(normalized)
}

/// Checks whether a type reference lives in the primitive namespace.
pub fn is_primitive_namespace(type_ref: &str) -> bool {
    type_ref.starts_with(PRIMITIVE_NAMESPACE_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_primitive_table() {
        let cases = [
            ("Edm.String", "string"),
            ("Edm.Guid", "string"),
            ("Edm.Boolean", "boolean"),
            ("Edm.Date", "date"),
            ("Edm.DateTime", "datetime"),
            ("Edm.DateTimeOffset", "datetime"),
            ("Edm.Single", "float32"),
            ("Edm.Double", "float64"),
            ("Edm.Int16", "int16"),
            ("Edm.Int32", "int32"),
            ("Edm.Int", "int32"),
            ("Edm.Int64", "int64"),
            ("Edm.Decimal", "decimal"),
            ("Edm.Binary", "binary"),
            ("Edm.Stream", "stream"),
            ("Edm.GeographyPoint", "geopoint"),
            ("Edm.Duration", "duration"),
        ];

        for (edm, expected) in cases {
            assert_eq!(normalize_primitive(edm), Some(expected), "{edm}");
        }
    }

    #[test]
    fn test_unsupported_primitives() {
        assert_eq!(normalize_primitive("Edm.TimeOfDay"), None);
        assert_eq!(normalize_primitive("Demo.Widget"), None);
        assert!(is_primitive_namespace("Edm.TimeOfDay"));
        assert!(!is_primitive_namespace("Demo.Widget"));
        assert!(!is_primitive_namespace("Collection(Edm.String)"));
    }
}
