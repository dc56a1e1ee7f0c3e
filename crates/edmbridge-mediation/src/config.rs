//! Mediation configuration.
//!
//! Backend-specific tolerances live here instead of in the resolver so the
//! resolution core stays backend-agnostic. Configuration can be specified in
//! `edmbridge.toml` under the `[mediation]` section.
//!
//! # Example Configuration
//!
//! ```toml
//! [mediation]
//! tolerated_duplicate_enums = ["Vendor.Forms.ConditionOperator"]
//! invocation_overloads = "keep-first"
//! ambiguous_relations = "first"
//! max_collection_depth = 4
//! ```

use serde::{Deserialize, Serialize};

/// What to do when a function or action name is declared more than once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OverloadPolicy {
    /// Report a duplicate definition.
    #[default]
    Reject,
    /// Keep the first declaration and discard later overloads.
    KeepFirst,
}

/// What to do when several collections expose the same entity type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AmbiguityPolicy {
    /// Use the first collection in declaration order and log a warning.
    #[default]
    First,
    /// Fail the mapping with an ambiguity error.
    Reject,
}

/// Mediation schema construction options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediationConfig {
    /// Protocol tag recorded on the produced service.
    /// Default: "OData4"
    #[serde(default = "default_service_kind")]
    pub service_kind: String,

    /// Namespace-qualified enum names whose repeated definitions are ignored
    /// (the first definition is kept).
    /// Default: empty
    #[serde(default)]
    pub tolerated_duplicate_enums: Vec<String>,

    /// Handling of repeated function/action names.
    /// Default: reject
    #[serde(default)]
    pub invocation_overloads: OverloadPolicy,

    /// Handling of entity types exposed by more than one collection.
    /// Default: first
    #[serde(default)]
    pub ambiguous_relations: AmbiguityPolicy,

    /// Maximum nesting of `Collection(...)` wrappers in a type reference.
    /// Default: 4
    #[serde(default = "default_max_collection_depth")]
    pub max_collection_depth: usize,
}

fn default_service_kind() -> String {
    "OData4".to_string()
}

fn default_max_collection_depth() -> usize {
    4
}

impl Default for MediationConfig {
    fn default() -> Self {
        Self {
            service_kind: default_service_kind(),
            tolerated_duplicate_enums: Vec::new(),
            invocation_overloads: OverloadPolicy::default(),
            ambiguous_relations: AmbiguityPolicy::default(),
            max_collection_depth: default_max_collection_depth(),
        }
    }
}

impl MediationConfig {
    /// Adds enum names to the tolerated-duplicates list.
    pub fn with_tolerated_duplicate_enums(
        mut self,
        names: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.tolerated_duplicate_enums
            .extend(names.into_iter().map(Into::into));
        self
    }

    /// Checks whether a duplicate definition of this enum is tolerated.
    pub fn is_tolerated_duplicate_enum(&self, qualified_name: &str) -> bool {
        self.tolerated_duplicate_enums
            .iter()
            .any(|name| name == qualified_name)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration values are invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.service_kind.trim().is_empty() {
            return Err("mediation.service_kind must not be empty".into());
        }
        if self.max_collection_depth == 0 {
            return Err("mediation.max_collection_depth must be > 0".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MediationConfig::default();
        assert_eq!(config.service_kind, "OData4");
        assert!(config.tolerated_duplicate_enums.is_empty());
        assert_eq!(config.invocation_overloads, OverloadPolicy::Reject);
        assert_eq!(config.ambiguous_relations, AmbiguityPolicy::First);
        assert_eq!(config.max_collection_depth, 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_max_collection_depth() {
        let mut config = MediationConfig::default();
        config.max_collection_depth = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_service_kind() {
        let mut config = MediationConfig::default();
        config.service_kind = "  ".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_tolerated_duplicate_enums() {
        let config = MediationConfig::default().with_tolerated_duplicate_enums(["Demo.Color"]);
        assert!(config.is_tolerated_duplicate_enum("Demo.Color"));
        assert!(!config.is_tolerated_duplicate_enum("Demo.Shape"));
    }

    #[test]
    fn test_deserialize_from_toml() {
        let toml = r#"
            tolerated_duplicate_enums = ["Vendor.Forms.ConditionOperator"]
            invocation_overloads = "keep-first"
            ambiguous_relations = "reject"
        "#;

        let config: MediationConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.service_kind, "OData4");
        assert_eq!(config.invocation_overloads, OverloadPolicy::KeepFirst);
        assert_eq!(config.ambiguous_relations, AmbiguityPolicy::Reject);
        assert_eq!(config.max_collection_depth, 4);
        assert!(config.is_tolerated_duplicate_enum("Vendor.Forms.ConditionOperator"));
    }
}
