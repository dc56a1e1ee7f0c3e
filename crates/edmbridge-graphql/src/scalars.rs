//! Scalar and name conversions.

/// Scalars every GraphQL implementation provides.
pub const BUILTIN_SCALARS: [&str; 5] = ["Int", "Float", "String", "Boolean", "ID"];

/// Maps a normalized mediation scalar (`int32`, `datetime`, ...) to its SDL
/// scalar name.
///
/// Integer and float widths collapse to `Int` and `Float`. There is no
/// native temporal scalar, so `datetime` renders as `String`; `decimal`
/// renders as `Float`. Anything else is capitalized (`date` becomes `Date`).
pub fn scalar_name(value_type: &str) -> String {
    let name = capitalize_first(value_type);
    let name = if name.starts_with("Int") || name.starts_with("Float") {
        name.trim_end_matches(|c: char| c.is_ascii_digit()).to_string()
    } else {
        name
    };

    match name.as_str() {
        "Datetime" => "String".to_string(),
        "Decimal" => "Float".to_string(),
        _ => name,
    }
}

pub fn is_builtin_scalar(name: &str) -> bool {
    BUILTIN_SCALARS.contains(&name)
}

/// Capitalizes the first character of a string.
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

/// Lowercases the first character of a string.
pub fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c.to_lowercase().collect::<String>() + chars.as_str(),
    }
}

/// Checks if a name is valid for GraphQL.
///
/// GraphQL names must match the pattern `[_a-zA-Z][_a-zA-Z0-9]*`.
pub fn is_valid_graphql_name(name: &str) -> bool {
    let mut chars = name.chars();

    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }

    chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
}
