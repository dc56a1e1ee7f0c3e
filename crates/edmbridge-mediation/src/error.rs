//! Error types for mediation schema construction.
//!
//! Every variant except the JSON/IO ones is fatal for the mapping pass: the
//! mapper stops at the first error and never hands out a partial service.

use std::path::PathBuf;

use thiserror::Error;

use crate::registry::SymbolKind;

/// Errors that can occur while resolving a CSDL document.
#[derive(Debug, Error)]
pub enum MediationError {
    #[error("Duplicate {kind} definition for '{name}'")]
    DuplicateDefinition { kind: SymbolKind, name: String },

    #[error("No schema declares an entity container")]
    MissingEntityContainer,

    #[error("Unknown primitive type '{0}'")]
    UnknownPrimitive(String),

    #[error("Collection nesting in '{type_ref}' exceeds the maximum depth of {max}")]
    CollectionNestingTooDeep { type_ref: String, max: usize },

    #[error("Unable to find collection for entity type '{0}'")]
    UnresolvedRelationTarget(String),

    #[error(
        "Entity type '{entity_type}' is exposed by multiple collections: {}",
        .collections.join(", ")
    )]
    AmbiguousRelationTarget {
        entity_type: String,
        collections: Vec<String>,
    },

    #[error("Unable to find keys for type '{0}'")]
    MissingKey(String),

    #[error(
        "Entity type '{entity_type}' declares a composite key ({}), composite keys are not supported",
        .key.join(", ")
    )]
    UnsupportedCompositeKey { entity_type: String, key: Vec<String> },

    #[error("Type '{0}' is not defined")]
    UndefinedType(String),

    #[error("Base type '{base_type}' of '{type_name}' is not defined")]
    UnresolvedBaseType { type_name: String, base_type: String },

    #[error("Inheritance cycle detected at type '{0}'")]
    InheritanceCycle(String),

    #[error("Collection '{collection}' references undefined entity type '{entity_type}'")]
    UndefinedEntityType {
        collection: String,
        entity_type: String,
    },

    #[error("Bound invocation '{0}' declares no binding parameter")]
    BoundInvocationWithoutParameters(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl MediationError {
    /// Create a new DuplicateDefinition error
    pub fn duplicate(kind: SymbolKind, name: impl Into<String>) -> Self {
        Self::DuplicateDefinition {
            kind,
            name: name.into(),
        }
    }

    /// Create a new UnsupportedCompositeKey error
    pub fn composite_key(entity_type: impl Into<String>, key: Vec<String>) -> Self {
        Self::UnsupportedCompositeKey {
            entity_type: entity_type.into(),
            key,
        }
    }

    /// Create a new UnresolvedBaseType error
    pub fn unresolved_base_type(
        type_name: impl Into<String>,
        base_type: impl Into<String>,
    ) -> Self {
        Self::UnresolvedBaseType {
            type_name: type_name.into(),
            base_type: base_type.into(),
        }
    }

    /// Create a new Io error for the given path
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns the error code for logs and CLI output.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateDefinition { .. } => "DUPLICATE_DEFINITION",
            Self::MissingEntityContainer => "MISSING_ENTITY_CONTAINER",
            Self::UnknownPrimitive(_) => "UNKNOWN_PRIMITIVE",
            Self::CollectionNestingTooDeep { .. } => "COLLECTION_NESTING_TOO_DEEP",
            Self::UnresolvedRelationTarget(_) => "UNRESOLVED_RELATION_TARGET",
            Self::AmbiguousRelationTarget { .. } => "AMBIGUOUS_RELATION_TARGET",
            Self::MissingKey(_) => "MISSING_KEY",
            Self::UnsupportedCompositeKey { .. } => "UNSUPPORTED_COMPOSITE_KEY",
            Self::UndefinedType(_) => "UNDEFINED_TYPE",
            Self::UnresolvedBaseType { .. } => "UNRESOLVED_BASE_TYPE",
            Self::InheritanceCycle(_) => "INHERITANCE_CYCLE",
            Self::UndefinedEntityType { .. } => "UNDEFINED_ENTITY_TYPE",
            Self::BoundInvocationWithoutParameters(_) => "BOUND_INVOCATION_WITHOUT_PARAMETERS",
            Self::Json(_) => "JSON_ERROR",
            Self::Io { .. } => "IO_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_message() {
        let err = MediationError::duplicate(SymbolKind::EntityType, "Demo.Widget");
        assert_eq!(
            err.to_string(),
            "Duplicate entity type definition for 'Demo.Widget'"
        );
        assert_eq!(err.error_code(), "DUPLICATE_DEFINITION");
    }

    #[test]
    fn test_composite_key_message() {
        let err =
            MediationError::composite_key("Demo.Line", vec!["orderId".into(), "lineNo".into()]);
        assert!(err.to_string().contains("(orderId, lineNo)"));
        assert_eq!(err.error_code(), "UNSUPPORTED_COMPOSITE_KEY");
    }

    #[test]
    fn test_ambiguous_message() {
        let err = MediationError::AmbiguousRelationTarget {
            entity_type: "Demo.Widget".into(),
            collections: vec!["Widgets".into(), "ArchivedWidgets".into()],
        };
        assert_eq!(
            err.to_string(),
            "Entity type 'Demo.Widget' is exposed by multiple collections: Widgets, ArchivedWidgets"
        );
    }
}
