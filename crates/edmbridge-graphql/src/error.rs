//! Error types for SDL generation.
//!
//! Generation runs on a complete mediation schema, so these errors only
//! surface for schemas that were edited by hand or produced by another tool.

use std::fmt;

/// Errors that can occur while rendering a mediation schema as SDL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SdlError {
    /// A property or collection references a type missing from the service.
    UnknownType {
        /// Where the reference was found.
        referenced_by: String,
        /// The qualified name that could not be found.
        type_name: String,
    },

    /// An entity type declares more than one key field.
    CompositeKey {
        /// Qualified name of the entity type.
        entity_type: String,
        /// The declared key fields.
        key: Vec<String>,
    },

    /// An entity type has an empty key.
    MissingKey(String),

    /// A generated type or field name is not a valid GraphQL name.
    InvalidName(String),
}

impl fmt::Display for SdlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownType {
                referenced_by,
                type_name,
            } => {
                write!(f, "Type '{type_name}' referenced by '{referenced_by}' is not defined")
            }
            Self::CompositeKey { entity_type, key } => {
                write!(
                    f,
                    "Entity type '{entity_type}' has an unsupported composite key ({})",
                    key.join(", ")
                )
            }
            Self::MissingKey(entity_type) => {
                write!(f, "Entity type '{entity_type}' has no key")
            }
            Self::InvalidName(name) => {
                write!(f, "'{name}' is not a valid GraphQL name")
            }
        }
    }
}

impl std::error::Error for SdlError {}

impl SdlError {
    /// Returns the error code for logs and CLI output.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownType { .. } => "UNKNOWN_TYPE",
            Self::CompositeKey { .. } => "COMPOSITE_KEY",
            Self::MissingKey(_) => "MISSING_KEY",
            Self::InvalidName(_) => "INVALID_NAME",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(SdlError::MissingKey("Demo.Widget".into()).error_code(), "MISSING_KEY");
        assert_eq!(
            SdlError::CompositeKey {
                entity_type: "Demo.Line".into(),
                key: vec!["a".into(), "b".into()]
            }
            .error_code(),
            "COMPOSITE_KEY"
        );
    }

    #[test]
    fn test_display() {
        let err = SdlError::UnknownType {
            referenced_by: "Demo.Widget.owner".into(),
            type_name: "Demo.Person".into(),
        };
        assert_eq!(
            err.to_string(),
            "Type 'Demo.Person' referenced by 'Demo.Widget.owner' is not defined"
        );
        assert_eq!(
            SdlError::InvalidName("bad-name".into()).to_string(),
            "'bad-name' is not a valid GraphQL name"
        );
    }
}
