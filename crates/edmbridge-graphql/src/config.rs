//! SDL generation configuration.
//!
//! Configuration can be specified in `edmbridge.toml` under the `[graphql]`
//! section.
//!
//! # Example Configuration
//!
//! ```toml
//! [graphql]
//! product = "catalog"
//! enum_provenance = true
//! annotate_objects = false
//! declare_custom_scalars = true
//! ```

use serde::{Deserialize, Serialize};

/// SDL generation options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SdlConfig {
    /// Product tag recorded in every `@backend` directive.
    /// Default: "odata"
    #[serde(default = "default_product")]
    pub product: String,

    /// Attach `@enumValue(value, type)` to enum members.
    /// Default: false
    #[serde(default)]
    pub enum_provenance: bool,

    /// Attach `@backend(product, collection)` to entity object types that are
    /// exposed by a collection.
    /// Default: false
    #[serde(default)]
    pub annotate_objects: bool,

    /// Emit `scalar X` for every non-built-in scalar used by the schema.
    /// Default: true
    #[serde(default = "default_declare_custom_scalars")]
    pub declare_custom_scalars: bool,
}

fn default_product() -> String {
    "odata".to_string()
}

fn default_declare_custom_scalars() -> bool {
    true
}

impl Default for SdlConfig {
    fn default() -> Self {
        Self {
            product: default_product(),
            enum_provenance: false,
            annotate_objects: false,
            declare_custom_scalars: default_declare_custom_scalars(),
        }
    }
}

impl SdlConfig {
    /// Returns a copy with a different product tag.
    pub fn with_product(mut self, product: impl Into<String>) -> Self {
        self.product = product.into();
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration values are invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.product.trim().is_empty() {
            return Err("graphql.product must not be empty".into());
        }
        if self.product.contains('"') {
            return Err("graphql.product must not contain quotes".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SdlConfig::default();
        assert_eq!(config.product, "odata");
        assert!(!config.enum_provenance);
        assert!(!config.annotate_objects);
        assert!(config.declare_custom_scalars);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_product() {
        assert!(SdlConfig::default().with_product("").validate().is_err());
        assert!(SdlConfig::default().with_product("a\"b").validate().is_err());
    }

    #[test]
    fn test_deserialize_from_toml() {
        let toml = r#"
            product = "catalog"
            enum_provenance = true
        "#;

        let config: SdlConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.product, "catalog");
        assert!(config.enum_provenance);
        assert!(!config.annotate_objects);
        assert!(config.declare_custom_scalars);
    }
}
